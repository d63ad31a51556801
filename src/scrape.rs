// src/scrape.rs
use std::fs;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use tracing::{error, info, warn};

use crate::config::ScrapeConfig;
use crate::extract::{charges, name, tables, Charge, ExtractError};
use crate::fetch;
use crate::output;

static TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table").expect("invalid table selector"));

/// Everything pulled from one booking detail page.
#[derive(Debug)]
pub struct Booking {
    pub name: String,
    pub charges: Vec<Charge>,
}

/// Extract a booking from one page body: custody name from the heading
/// panels, booking fields from the first table, charges from the second.
/// Pure over the body text, so the skip policies are testable offline.
pub fn extract_booking(body: &str) -> Result<Booking, ExtractError> {
    let doc = Html::parse_document(body);

    let found: Vec<_> = doc.select(&TABLE).collect();
    if found.len() < 2 {
        return Err(ExtractError::InsufficientTables {
            expected: 2,
            found: found.len(),
        });
    }

    let name = name::custody_name(&doc)?;
    let booking_fields = tables::key_value_fields(found[0]);
    let charges = charges::split_charges(found[1], &name, &booking_fields)?;

    Ok(Booking { name, charges })
}

/// Process every identifier in the configured range, strictly sequentially:
/// fetch, extract, write. Per-identifier failures are logged and skipped;
/// nothing aborts the run.
pub fn run(cfg: &ScrapeConfig, client: &Client) -> Result<()> {
    fs::create_dir_all(&cfg.out_dir)
        .with_context(|| format!("creating output dir {}", cfg.out_dir.display()))?;

    let mut written = 0u32;
    for id in cfg.identifiers() {
        let body = match fetch::fetch_booking_page(client, &cfg.base_url, id) {
            Ok(body) => body,
            Err(e) => {
                warn!(id, error = %e, "error requesting booking, skipping");
                continue;
            }
        };

        let booking = match extract_booking(&body) {
            Ok(booking) => booking,
            Err(e @ ExtractError::InsufficientTables { .. }) => {
                warn!(id, error = %e, "no table data");
                continue;
            }
            Err(e @ ExtractError::NameNotFound) => {
                warn!(id, error = %e, "unable to parse inmate name");
                continue;
            }
            Err(e) => {
                warn!(id, error = %e, "unparseable charge table");
                continue;
            }
        };

        if booking.charges.is_empty() {
            warn!(id, "no charges on page, nothing to write");
            continue;
        }

        info!(id, name = %booking.name, charges = booking.charges.len(), "parsed booking");

        match output::write_charges(&cfg.out_dir, id, &booking.charges) {
            Ok(path) => {
                written += 1;
                info!(id, path = %path.display(), "wrote charges");
            }
            Err(e) => error!(id, error = %e, "failed to write charges"),
        }
    }

    info!(written, "run complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::charges::{NAME_FIELD, VIOLATION_MARKER};

    const FULL_PAGE: &str = r#"<html><body>
        <div class="panel-heading"><h4>JOHN Q PUBLIC IN CUSTODY FOR THEFT</h4></div>
        <table><tr><td><span>Status</span><strong>Active</strong></td></tr></table>
        <table>
        <tr><td><span>Violation:</span><strong>Theft</strong></td></tr>
        <tr><td><span>Bail</span><strong>$500</strong></td></tr>
        <tr><td><span>Violation:</span><strong>Assault</strong></td></tr>
        <tr><td><span>Court Date</span><strong>03/12/2023</strong></td></tr>
        </table>
        </body></html>"#;

    #[test]
    fn two_table_page_yields_name_and_charges() {
        let booking = extract_booking(FULL_PAGE).unwrap();
        assert_eq!(booking.name, "JOHN Q PUBLIC");
        assert_eq!(booking.charges.len(), 2);
        for charge in &booking.charges {
            assert_eq!(charge.get(NAME_FIELD).map(String::as_str), Some("JOHN Q PUBLIC"));
            assert_eq!(charge.get("Status").map(String::as_str), Some("Active"));
        }
        assert_eq!(
            booking.charges[0].get(VIOLATION_MARKER).map(String::as_str),
            Some("Theft")
        );
        assert_eq!(
            booking.charges[1].get(VIOLATION_MARKER).map(String::as_str),
            Some("Assault")
        );
    }

    #[test]
    fn charges_written_for_a_full_page() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let booking = extract_booking(FULL_PAGE)?;
        let path = output::write_charges(dir.path(), 23001767, &booking.charges)?;

        assert!(path.ends_with("bookingid_23001767.csv"));
        let mut reader = csv::Reader::from_path(&path)?;
        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        for expected in ["Violation:", "full name", "Status"] {
            assert!(headers.contains(&expected.to_string()), "missing {expected}");
        }
        assert_eq!(reader.records().count(), 2);
        Ok(())
    }

    #[test]
    fn one_table_page_is_insufficient() {
        let body = r#"<html><body>
            <div class="panel-heading"><h4>JOHN Q PUBLIC IN CUSTODY FOR THEFT</h4></div>
            <table><tr><td><span>Status</span><strong>Active</strong></td></tr></table>
            </body></html>"#;
        match extract_booking(body) {
            Err(ExtractError::InsufficientTables { expected, found }) => {
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_custody_heading_is_a_name_error() {
        let body = r#"<html><body>
            <div class="panel-heading"><h4>Booking Detail</h4></div>
            <table><tr><td><span>Status</span><strong>Active</strong></td></tr></table>
            <table><tr><td><span>Violation:</span><strong>Theft</strong></td></tr></table>
            </body></html>"#;
        assert!(matches!(extract_booking(body), Err(ExtractError::NameNotFound)));
    }
}
