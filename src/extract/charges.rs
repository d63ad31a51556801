// src/extract/charges.rs
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

use super::tables::{collect_text, parse_cell};
use super::{Charge, ExtractError, FieldMap};

/// Row text that opens a new charge; also the column the violation
/// description is written under.
pub const VIOLATION_MARKER: &str = "Violation:";

/// Column the subject's name is written under on every charge.
pub const NAME_FIELD: &str = "full name";

static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("invalid tr selector"));
static TD: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("invalid td selector"));
static VALUE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("strong").expect("invalid strong selector"));

/// Split a charge table into one record per violation row.
///
/// Rows are walked in document order. A row whose text contains
/// `Violation:` finalizes the charge in progress (if any) and opens a new
/// one seeded with the violation description, `name`, and a copy of
/// `booking`. Every other row contributes its label/value cells to the open
/// charge under the same best-effort cell policy as the metadata table. The
/// last open charge is flushed after the loop.
///
/// A table with no violation rows yields an empty list. A labelled cell
/// ahead of the first violation row has no charge to land in and fails with
/// `PrecededContent`.
pub fn split_charges(
    table: ElementRef,
    name: &str,
    booking: &FieldMap,
) -> Result<Vec<Charge>, ExtractError> {
    let mut charges = Vec::new();
    let mut current: Option<Charge> = None;

    for row in table.select(&TR) {
        if row.text().any(|t| t.contains(VIOLATION_MARKER)) {
            let description = row.select(&VALUE).next().map(collect_text).unwrap_or_default();

            if let Some(done) = current.take() {
                charges.push(done);
            }

            let mut charge = booking.clone();
            charge.insert(VIOLATION_MARKER.to_string(), description);
            charge.insert(NAME_FIELD.to_string(), name.to_string());
            current = Some(charge);
        } else {
            for cell in row.select(&TD) {
                if let Some((label, value)) = parse_cell(cell) {
                    match current.as_mut() {
                        Some(charge) => {
                            charge.insert(label, value);
                        }
                        None => return Err(ExtractError::PrecededContent { label }),
                    }
                }
            }
        }
    }

    if let Some(done) = current.take() {
        charges.push(done);
    }

    Ok(charges)
}
