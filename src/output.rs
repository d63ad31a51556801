// src/output.rs
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::extract::Charge;

/// Output file name for one booking.
pub fn booking_file_name(id: i64) -> String {
    format!("bookingid_{}.csv", id)
}

/// Write one booking's charges as CSV under `out_dir`.
///
/// The header is the union of keys across this booking's charges, in sorted
/// order; the column set is per file, not global, since charges carry
/// heterogeneous field sets. A charge missing a column serializes as an
/// empty field. Returns the path written.
pub fn write_charges(out_dir: &Path, id: i64, charges: &[Charge]) -> Result<PathBuf> {
    let path = out_dir.join(booking_file_name(id));

    let columns: BTreeSet<&str> = charges
        .iter()
        .flat_map(|charge| charge.keys().map(String::as_str))
        .collect();

    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer
        .write_record(&columns)
        .with_context(|| format!("writing header to {}", path.display()))?;

    for charge in charges {
        let row = columns
            .iter()
            .map(|col| charge.get(*col).map(String::as_str).unwrap_or(""));
        writer
            .write_record(row)
            .with_context(|| format!("writing row to {}", path.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("flushing {}", path.display()))?;
    Ok(path)
}
