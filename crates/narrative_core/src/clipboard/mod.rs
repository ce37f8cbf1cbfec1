//! Clipboard payloads and paste reconciliation.
//!
//! # Responsibility
//! - Model exactly one pending copy payload (cell, row or rows).
//! - Resolve ambiguous paste targets into explicit mutation plans.
//!
//! # Invariants
//! - Copying strips identifiers so pasted-as-new records never collide.

pub mod entry;
pub mod paste;
