// src/extract/mod.rs
//
// Pulls structured records out of a booking detail page: the custody name
// from the heading panels, booking fields from the first table, and the
// charge list from the second.

pub mod charges;
pub mod name;
pub mod tables;

use std::collections::BTreeMap;

/// Flat label → value mapping read from a table region.
pub type FieldMap = BTreeMap<String, String>;

/// One charge: the violation description, the subject's name, a copy of the
/// booking fields, and whatever labelled rows followed the violation row.
pub type Charge = FieldMap;

/// Extraction failures. All of these are recoverable per booking; the
/// orchestrator logs the identifier and moves on.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// No heading matched the custody name pattern.
    #[error("no heading matched the custody name pattern")]
    NameNotFound,

    /// A labelled cell appeared before the first violation row, so there was
    /// no open charge to attach it to.
    #[error("charge table has labelled content before the first violation row: {label}")]
    PrecededContent { label: String },

    /// The page carried fewer tables than the booking layout requires.
    #[error("expected {expected} tables, found {found}")]
    InsufficientTables { expected: usize, found: usize },
}
