//! Single-slot clipboard holding the pending copy payload.
//!
//! # Invariants
//! - At most one payload is held; every copy replaces the previous one.
//! - `Row`/`Rows` payloads never carry record identifiers.
//! - `Rows` preserves input order for both drafts and source identifiers.

use crate::model::record::{DialogueEvent, RecordDraft, RecordField, RecordId};
use log::debug;

/// Pending copy payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardEntry {
    /// One field value copied from one record.
    Cell {
        source_id: RecordId,
        field: RecordField,
        value: String,
    },
    /// One identifier-stripped record.
    Row {
        source_id: RecordId,
        draft: RecordDraft,
    },
    /// Several identifier-stripped records in copy order.
    Rows {
        source_ids: Vec<RecordId>,
        drafts: Vec<RecordDraft>,
    },
}

impl ClipboardEntry {
    /// Identifiers of the records the payload was copied from.
    pub fn source_ids(&self) -> Vec<RecordId> {
        match self {
            Self::Cell { source_id, .. } | Self::Row { source_id, .. } => vec![*source_id],
            Self::Rows { source_ids, .. } => source_ids.clone(),
        }
    }

    /// Originating field for `Cell` payloads.
    pub fn field(&self) -> Option<RecordField> {
        match self {
            Self::Cell { field, .. } => Some(*field),
            Self::Row { .. } | Self::Rows { .. } => None,
        }
    }
}

/// Clipboard state owned by one editor session.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    entry: Option<ClipboardEntry>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copy_cell(&mut self, record_id: RecordId, field: RecordField, value: impl Into<String>) {
        debug!("event=clipboard_copy module=clipboard kind=cell field={field}");
        self.entry = Some(ClipboardEntry::Cell {
            source_id: record_id,
            field,
            value: value.into(),
        });
    }

    pub fn copy_row(&mut self, record: &DialogueEvent) {
        debug!(
            "event=clipboard_copy module=clipboard kind=row source={}",
            record.id
        );
        self.entry = Some(ClipboardEntry::Row {
            source_id: record.id,
            draft: record.to_draft(),
        });
    }

    pub fn copy_rows<'a>(&mut self, records: impl IntoIterator<Item = &'a DialogueEvent>) {
        let (source_ids, drafts): (Vec<_>, Vec<_>) = records
            .into_iter()
            .map(|record| (record.id, record.to_draft()))
            .unzip();
        debug!(
            "event=clipboard_copy module=clipboard kind=rows count={}",
            drafts.len()
        );
        self.entry = Some(ClipboardEntry::Rows { source_ids, drafts });
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }

    pub fn entry(&self) -> Option<&ClipboardEntry> {
        self.entry.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    /// Identifiers to highlight as "copied"; empty when nothing is held.
    pub fn source_ids(&self) -> Vec<RecordId> {
        self.entry
            .as_ref()
            .map(ClipboardEntry::source_ids)
            .unwrap_or_default()
    }
}
