//! Paste target resolution.
//!
//! # Responsibility
//! - Decide whether a paste overwrites selected records or appends new ones.
//! - Express the decision as data; the caller applies it to its record set.
//!
//! # Invariants
//! - Resolution is total: an empty clipboard or unmatched target yields
//!   `PastePlan::Nothing`.
//! - `Rows` positional overwrite sorts target identifiers ascending and keeps
//!   payload order as copied.

use crate::clipboard::entry::ClipboardEntry;
use crate::model::record::{RecordDraft, RecordField, RecordId};
use crate::store::record_store::RecordUpdate;
use std::collections::BTreeSet;

/// One focused table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub record_id: RecordId,
    pub field: RecordField,
}

/// What the paste lands on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasteTarget {
    pub focused: Option<CellRef>,
    pub selected: BTreeSet<RecordId>,
}

/// Mutation the caller must apply to honor a paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PastePlan {
    Nothing,
    /// Overwrite one field on one record.
    UpdateField {
        record_id: RecordId,
        field: RecordField,
        value: String,
    },
    /// Overwrite fields on existing records.
    UpdateRecords(Vec<RecordUpdate>),
    /// Append new records; identifiers are assigned by the caller.
    AppendRecords(Vec<RecordDraft>),
}

/// Resolves a clipboard payload against a paste target.
pub fn resolve_paste(entry: Option<&ClipboardEntry>, target: &PasteTarget) -> PastePlan {
    let Some(entry) = entry else {
        return PastePlan::Nothing;
    };

    match entry {
        ClipboardEntry::Cell { field, value, .. } => match target.focused {
            Some(cell) => PastePlan::UpdateField {
                record_id: cell.record_id,
                field: cell.field,
                value: value.clone(),
            },
            None if target.selected.is_empty() => {
                PastePlan::AppendRecords(vec![RecordDraft::single(*field, value.clone())])
            }
            None => PastePlan::Nothing,
        },
        ClipboardEntry::Row { draft, .. } => match single(&target.selected) {
            Some(id) => PastePlan::UpdateRecords(vec![RecordUpdate {
                id,
                draft: draft.clone(),
            }]),
            None => PastePlan::AppendRecords(vec![draft.clone()]),
        },
        ClipboardEntry::Rows { drafts, .. } => {
            if target.selected.len() == drafts.len() {
                // BTreeSet iterates in ascending identifier order.
                let updates = target
                    .selected
                    .iter()
                    .zip(drafts)
                    .map(|(id, draft)| RecordUpdate {
                        id: *id,
                        draft: draft.clone(),
                    })
                    .collect();
                PastePlan::UpdateRecords(updates)
            } else {
                PastePlan::AppendRecords(drafts.clone())
            }
        }
    }
}

fn single(selected: &BTreeSet<RecordId>) -> Option<RecordId> {
    if selected.len() == 1 {
        selected.iter().next().copied()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_paste, CellRef, PastePlan, PasteTarget};
    use crate::clipboard::entry::ClipboardEntry;
    use crate::model::record::{RecordDraft, RecordField};

    #[test]
    fn empty_clipboard_resolves_to_nothing() {
        let target = PasteTarget {
            focused: Some(CellRef {
                record_id: 1,
                field: RecordField::Zone,
            }),
            ..PasteTarget::default()
        };
        assert_eq!(resolve_paste(None, &target), PastePlan::Nothing);
    }

    #[test]
    fn cell_with_selection_but_no_focus_is_a_noop() {
        let entry = ClipboardEntry::Cell {
            source_id: 1,
            field: RecordField::Speaker,
            value: "Harper".to_string(),
        };
        let target = PasteTarget {
            focused: None,
            selected: [4].into_iter().collect(),
        };
        assert_eq!(resolve_paste(Some(&entry), &target), PastePlan::Nothing);
    }

    #[test]
    fn rows_of_empty_payload_with_empty_selection_update_nothing() {
        let entry = ClipboardEntry::Rows {
            source_ids: Vec::new(),
            drafts: Vec::<RecordDraft>::new(),
        };
        assert_eq!(
            resolve_paste(Some(&entry), &PasteTarget::default()),
            PastePlan::UpdateRecords(Vec::new())
        );
    }
}
