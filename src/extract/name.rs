// src/extract/name.rs
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use super::ExtractError;

static HEADINGS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.panel-heading h4").expect("invalid heading selector"));

// Uppercase run (letters, spaces, hyphens) immediately ahead of the custody phrase.
static CUSTODY_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z\s-]+)\sIN CUSTODY").expect("invalid custody name regex"));

/// Find the heading panel reading `<NAME> IN CUSTODY ...` and return the
/// name with internal whitespace collapsed to single spaces.
pub fn custody_name(doc: &Html) -> Result<String, ExtractError> {
    for heading in doc.select(&HEADINGS) {
        let text = heading.text().collect::<String>();
        if let Some(caps) = CUSTODY_NAME.captures(&text) {
            let name = caps[1].split_whitespace().collect::<Vec<_>>().join(" ");
            return Ok(name);
        }
    }
    Err(ExtractError::NameNotFound)
}
