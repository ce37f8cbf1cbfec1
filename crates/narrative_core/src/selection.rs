//! Table selection and focus state.
//!
//! # Invariants
//! - Range selection extends from the anchor without moving it.
//! - Selection is a set; table order is recovered from the record sequence.

use crate::clipboard::paste::{CellRef, PasteTarget};
use crate::model::record::{RecordField, RecordId};
use std::collections::BTreeSet;

/// Modifier state of a row click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickMode {
    /// Replace the selection with the clicked row.
    Plain,
    /// Ctrl/Cmd click: flip membership of the clicked row.
    Toggle,
    /// Shift click: add the table range between anchor and clicked row.
    Range,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: BTreeSet<RecordId>,
    anchor: Option<RecordId>,
    focused: Option<CellRef>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a row click; `table_order` is the current record id sequence.
    pub fn click_row(&mut self, id: RecordId, mode: ClickMode, table_order: &[RecordId]) {
        match mode {
            ClickMode::Toggle => {
                if !self.selected.remove(&id) {
                    self.selected.insert(id);
                }
                self.anchor = Some(id);
            }
            ClickMode::Range => {
                let bounds = self.anchor.and_then(|anchor| {
                    let start = table_order.iter().position(|row| *row == anchor)?;
                    let end = table_order.iter().position(|row| *row == id)?;
                    Some((start.min(end), start.max(end)))
                });
                match bounds {
                    Some((start, end)) => {
                        self.selected
                            .extend(table_order[start..=end].iter().copied());
                    }
                    None => self.select_only(id),
                }
            }
            ClickMode::Plain => self.select_only(id),
        }
    }

    pub fn set_checked(&mut self, id: RecordId, checked: bool) {
        if checked {
            self.selected.insert(id);
        } else {
            self.selected.remove(&id);
        }
    }

    pub fn select_all(&mut self, ids: impl IntoIterator<Item = RecordId>) {
        self.selected = ids.into_iter().collect();
    }

    /// Header checkbox: select every id or clear.
    pub fn set_all_checked(&mut self, checked: bool, ids: impl IntoIterator<Item = RecordId>) {
        if checked {
            self.select_all(ids);
        } else {
            self.selected.clear();
        }
    }

    /// Selects the row of the focused cell, if any.
    pub fn select_focused_row(&mut self) {
        if let Some(cell) = self.focused {
            self.select_only(cell.record_id);
        }
    }

    pub fn focus_cell(&mut self, record_id: RecordId, field: RecordField) {
        self.focused = Some(CellRef { record_id, field });
    }

    /// Clears selection and focus; the anchor is kept.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.focused = None;
    }

    /// Drops selected ids and focus that no longer exist.
    pub fn retain(&mut self, live: &[RecordId]) {
        self.selected.retain(|id| live.contains(id));
        if self
            .focused
            .is_some_and(|cell| !live.contains(&cell.record_id))
        {
            self.focused = None;
        }
    }

    pub fn selected(&self) -> &BTreeSet<RecordId> {
        &self.selected
    }

    pub fn focused(&self) -> Option<CellRef> {
        self.focused
    }

    pub fn is_selected(&self, id: RecordId) -> bool {
        self.selected.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn paste_target(&self) -> PasteTarget {
        PasteTarget {
            focused: self.focused,
            selected: self.selected.clone(),
        }
    }

    fn select_only(&mut self, id: RecordId) {
        self.selected.clear();
        self.selected.insert(id);
        self.anchor = Some(id);
    }
}
