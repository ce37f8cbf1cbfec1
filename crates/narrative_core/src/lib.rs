//! Core editing logic for the narrative dialogue database tool.
//! This crate is the single source of truth for editor invariants: record
//! identity, undo/redo history, clipboard reconciliation and node layout.

pub mod clipboard;
pub mod clock;
pub mod config;
pub mod graph;
pub mod history;
pub mod logging;
pub mod model;
pub mod selection;
pub mod service;
pub mod store;

pub use clipboard::entry::{Clipboard, ClipboardEntry};
pub use clipboard::paste::{resolve_paste, CellRef, PastePlan, PasteTarget};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, EditorConfig, HistoryConfig, RecordDefaults};
pub use graph::layout::{
    filter_records, layout, missions, zones, GraphFilter, GraphNode, NodeKind, Position,
    ZoomLevel,
};
pub use graph::view::{GraphEdge, NodeView};
pub use history::undo_log::{HistoryManager, PushOutcome, Snapshot};
pub use logging::{init_logging, logging_status, LogLevel};
pub use model::record::{DialogueEvent, RecordDraft, RecordField, RecordFieldError, RecordId};
pub use model::status::StatusBadge;
pub use selection::{ClickMode, Selection};
pub use service::editor_session::EditorSession;
pub use store::record_store::{RecordStore, RecordSummary, RecordUpdate, StoreError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
