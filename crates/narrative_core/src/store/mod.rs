//! Record ownership layer.
//!
//! # Responsibility
//! - Hold the caller-owned record set the editor core reads and mutates.
//! - Translate paste/append requests into concrete records.
//!
//! # Invariants
//! - Identifiers are assigned here, never by history or clipboard.

pub mod record_store;
