//! Domain model for dialogue event records.
//!
//! # Responsibility
//! - Define the record shape shared by the table and node views.
//! - Keep field addressing typed (`RecordField`) instead of stringly keyed.
//!
//! # Invariants
//! - Every record is identified by a stable `RecordId`.
//! - Identifier-stripped copies are expressed as `RecordDraft`.

pub mod record;
pub mod status;
