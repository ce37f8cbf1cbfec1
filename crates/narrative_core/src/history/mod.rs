//! Undo/redo history over whole-record-set snapshots.
//!
//! # Responsibility
//! - Let callers move backward/forward through prior record-set states.
//! - Skip keystroke-level intermediate states through a call-time debounce.
//!
//! # Invariants
//! - Callers apply returned snapshots themselves; history owns only its log.

pub mod undo_log;
