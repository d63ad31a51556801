// src/config.rs
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use url::Url;

const DEFAULT_URL: &str = "http://inmateinformation.lanecounty.org/Home/BookingSearchDetail";
const DEFAULT_START: i64 = 23_001_767;
const DEFAULT_COUNT: u32 = 3;
const DEFAULT_STEP: i64 = -1;
const DEFAULT_OUT_DIR: &str = "bookings";

/// Run parameters, passed explicitly into the orchestration.
///
/// Defaults sweep a short descending range from the highest known booking
/// number; every field can be overridden through `JAILSCRAPE_*` environment
/// variables.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub base_url: Url,
    pub start: i64,
    pub count: u32,
    pub step: i64,
    pub out_dir: PathBuf,
}

impl ScrapeConfig {
    pub fn from_env() -> Result<Self> {
        let base_url = match env::var("JAILSCRAPE_URL") {
            Ok(v) => Url::parse(&v).context("JAILSCRAPE_URL is not a valid URL")?,
            Err(_) => Url::parse(DEFAULT_URL).expect("default URL is valid"),
        };
        let start = parse_var("JAILSCRAPE_START", DEFAULT_START)?;
        let count = parse_var("JAILSCRAPE_COUNT", DEFAULT_COUNT)?;
        let step = parse_var("JAILSCRAPE_STEP", DEFAULT_STEP)?;
        if step == 0 {
            anyhow::bail!("JAILSCRAPE_STEP must be nonzero");
        }
        let out_dir = env::var("JAILSCRAPE_OUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUT_DIR));

        Ok(ScrapeConfig {
            base_url,
            start,
            count,
            step,
            out_dir,
        })
    }

    /// Booking numbers to process, in order.
    pub fn identifiers(&self) -> impl Iterator<Item = i64> {
        let start = self.start;
        let step = self.step;
        (0..i64::from(self.count)).map(move |i| start + i * step)
    }
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(v) => v
            .parse::<T>()
            .with_context(|| format!("{} is not a valid number: {}", key, v)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_descend_from_start() {
        let cfg = ScrapeConfig {
            base_url: Url::parse("http://example.com/detail").unwrap(),
            start: 10,
            count: 3,
            step: -1,
            out_dir: PathBuf::from("out"),
        };
        assert_eq!(cfg.identifiers().collect::<Vec<_>>(), vec![10, 9, 8]);
    }

    #[test]
    fn step_can_ascend() {
        let cfg = ScrapeConfig {
            base_url: Url::parse("http://example.com/detail").unwrap(),
            start: 100,
            count: 2,
            step: 5,
            out_dir: PathBuf::from("out"),
        };
        assert_eq!(cfg.identifiers().collect::<Vec<_>>(), vec![100, 105]);
    }

    // env mutations live in one test so parallel runs never race on the vars
    #[test]
    fn env_defaults_and_validation() {
        let cfg = ScrapeConfig::from_env().unwrap();
        assert_eq!(cfg.start, 23_001_767);
        assert_eq!(cfg.count, 3);
        assert_eq!(cfg.step, -1);
        assert_eq!(cfg.out_dir, PathBuf::from("bookings"));

        env::set_var("JAILSCRAPE_STEP", "0");
        assert!(ScrapeConfig::from_env().is_err());

        env::set_var("JAILSCRAPE_STEP", "-2");
        env::set_var("JAILSCRAPE_START", "500");
        let cfg = ScrapeConfig::from_env().unwrap();
        assert_eq!(cfg.identifiers().collect::<Vec<_>>(), vec![500, 498, 496]);

        env::remove_var("JAILSCRAPE_STEP");
        env::remove_var("JAILSCRAPE_START");
    }
}
