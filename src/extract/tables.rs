// src/extract/tables.rs
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

use super::FieldMap;

static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("invalid tr selector"));
static TD: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("invalid td selector"));
static LABEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span").expect("invalid span selector"));
static VALUE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("strong").expect("invalid strong selector"));

/// Read one `<td>` holding its label in a `<span>` and its value in a
/// `<strong>`. Table shapes vary across bookings; a cell missing either
/// child is not an error, it just yields nothing.
pub(crate) fn parse_cell(cell: ElementRef) -> Option<(String, String)> {
    let label = cell.select(&LABEL).next()?;
    let value = cell.select(&VALUE).next()?;
    Some((collect_text(label), collect_text(value)))
}

/// Concatenated, trimmed text content of an element.
pub(crate) fn collect_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Extract every label/value pair from a booking metadata table. A label
/// repeated in a later row overwrites the earlier value.
pub fn key_value_fields(table: ElementRef) -> FieldMap {
    let mut fields = FieldMap::new();
    for row in table.select(&TR) {
        for cell in row.select(&TD) {
            if let Some((label, value)) = parse_cell(cell) {
                fields.insert(label, value);
            }
        }
    }
    fields
}
