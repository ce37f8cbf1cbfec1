//! Editor session controller.
//!
//! # Responsibility
//! - Own the record store, history log, clipboard, selection and node view
//!   of one editing session, and route user actions through them.
//! - Capture a debounced history snapshot after every record-set mutation.
//!
//! # Invariants
//! - Undo/redo commit the returned snapshot and never push history.
//! - Operations are total; invalid or boundary calls are no-ops.
//! - A history entry is pushed only when the record set actually changed.
//! - No state is shared between sessions.

use crate::clipboard::entry::Clipboard;
use crate::clipboard::paste::{resolve_paste, PastePlan};
use crate::clock::{Clock, SystemClock};
use crate::config::EditorConfig;
use crate::graph::layout::{GraphFilter, ZoomLevel};
use crate::graph::view::NodeView;
use crate::history::undo_log::{HistoryManager, PushOutcome};
use crate::model::record::{DialogueEvent, RecordDraft, RecordField, RecordId};
use crate::selection::{ClickMode, Selection};
use crate::store::record_store::{RecordStore, StoreError};
use log::{debug, error, info, warn};

/// One editing session over an in-memory record set.
pub struct EditorSession<C: Clock + Clone = SystemClock> {
    config: EditorConfig,
    store: RecordStore<C>,
    history: HistoryManager<C>,
    clipboard: Clipboard,
    selection: Selection,
    node_view: Option<NodeView>,
}

impl EditorSession<SystemClock> {
    pub fn new(records: Vec<DialogueEvent>, config: EditorConfig) -> Result<Self, StoreError> {
        Self::with_clock(records, config, SystemClock)
    }
}

impl<C: Clock + Clone> EditorSession<C> {
    /// Creates a session and seeds history with the initial record set.
    ///
    /// # Errors
    /// - Record sets the store rejects (duplicate or out-of-range ids).
    pub fn with_clock(
        records: Vec<DialogueEvent>,
        config: EditorConfig,
        clock: C,
    ) -> Result<Self, StoreError> {
        let history = HistoryManager::with_clock(&records, config.history, clock.clone());
        let store = RecordStore::with_clock(records, config.defaults.clone(), clock)?;
        info!(
            "event=session_start module=service status=ok records={} capacity={} debounce_ms={}",
            store.len(),
            config.history.capacity,
            config.history.debounce_ms
        );
        Ok(Self {
            config,
            store,
            history,
            clipboard: Clipboard::new(),
            selection: Selection::new(),
            node_view: None,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn records(&self) -> &[DialogueEvent] {
        self.store.records()
    }

    pub fn store(&self) -> &RecordStore<C> {
        &self.store
    }

    pub fn history(&self) -> &HistoryManager<C> {
        &self.history
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    // Selection and focus.

    pub fn click_row(&mut self, id: RecordId, mode: ClickMode) {
        let order = self.store.ids();
        self.selection.click_row(id, mode, &order);
    }

    pub fn set_checked(&mut self, id: RecordId, checked: bool) {
        self.selection.set_checked(id, checked);
    }

    pub fn set_all_checked(&mut self, checked: bool) {
        let ids = self.store.ids();
        self.selection.set_all_checked(checked, ids);
    }

    pub fn select_all(&mut self) {
        let ids = self.store.ids();
        self.selection.select_all(ids);
    }

    pub fn select_focused_row(&mut self) {
        self.selection.select_focused_row();
    }

    pub fn focus_cell(&mut self, id: RecordId, field: RecordField) {
        self.selection.focus_cell(id, field);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Clears selection, focus and clipboard.
    pub fn escape(&mut self) {
        self.selection.clear();
        self.clipboard.clear();
    }

    // Record mutations.

    pub fn edit_field(&mut self, id: RecordId, field: RecordField, value: &str) -> bool {
        let changed = self.store.update_field(id, field, value);
        if changed {
            self.commit(&format!("edit {field}"));
        }
        changed
    }

    /// Appends a default record; `None` once identifiers are exhausted.
    pub fn add_blank_record(&mut self) -> Option<RecordId> {
        let id = self.append(&[RecordDraft::new()]).first().copied()?;
        self.commit("add record");
        Some(id)
    }

    pub fn add_drafts(&mut self, drafts: &[RecordDraft]) -> Vec<RecordId> {
        let ids = self.append(drafts);
        if !ids.is_empty() {
            self.commit("add records");
        }
        ids
    }

    /// Deletes every selected record and clears the selection.
    pub fn delete_selected(&mut self) -> usize {
        let targets = self.selection.selected().clone();
        let removed = targets
            .iter()
            .filter(|id| self.store.delete(**id))
            .count();
        self.selection.clear();
        if removed > 0 {
            self.commit("delete records");
        }
        removed
    }

    // Clipboard.

    /// Copies from the current focus/selection; returns `false` when nothing applies.
    pub fn copy(&mut self) -> bool {
        let selected = self.selection.selected();
        match (selected.len(), self.selection.focused()) {
            (0, Some(cell)) => {
                let Some(record) = self.store.get(cell.record_id) else {
                    return false;
                };
                let value = record.get(cell.field).to_string();
                self.clipboard.copy_cell(cell.record_id, cell.field, value);
            }
            (0, None) => return false,
            (1, _) => {
                let Some(record) = selected.iter().next().and_then(|id| self.store.get(*id))
                else {
                    return false;
                };
                self.clipboard.copy_row(record);
            }
            _ => {
                let rows = self
                    .store
                    .records()
                    .iter()
                    .filter(|record| selected.contains(&record.id));
                self.clipboard.copy_rows(rows);
            }
        }
        true
    }

    /// Resolves and applies the clipboard against the current target.
    ///
    /// Returns the applied plan, or `PastePlan::Nothing` when the record set
    /// was left unchanged.
    pub fn paste(&mut self) -> PastePlan {
        let plan = resolve_paste(self.clipboard.entry(), &self.selection.paste_target());
        let changed = match &plan {
            PastePlan::Nothing => false,
            PastePlan::UpdateField {
                record_id,
                field,
                value,
            } => self.store.update_field(*record_id, *field, value),
            PastePlan::UpdateRecords(updates) => self.store.update_many(updates) > 0,
            PastePlan::AppendRecords(drafts) => !self.append(drafts).is_empty(),
        };
        if !changed {
            debug!(
                "event=paste module=service status=noop plan={}",
                plan_kind(&plan)
            );
            return PastePlan::Nothing;
        }
        info!("event=paste module=service status=ok plan={}", plan_kind(&plan));
        self.commit("paste");
        plan
    }

    // History.

    pub fn undo(&mut self) -> bool {
        let Some(records) = self.history.undo() else {
            return false;
        };
        if !self.restore(records) {
            return false;
        }
        info!("event=undo module=service status=ok");
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(records) = self.history.redo() else {
            return false;
        };
        if !self.restore(records) {
            return false;
        }
        info!("event=redo module=service status=ok");
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Label of the state an undo would leave.
    pub fn undo_label(&self) -> &str {
        self.history.current_action_label()
    }

    /// Label of the state a redo would enter.
    pub fn redo_label(&self) -> &str {
        self.history.next_action_label()
    }

    // Node view.

    /// Opens the node view over the current table selection.
    pub fn open_node_view(&mut self) {
        let selected = self.selection.selected().clone();
        if let Some(view) = self.node_view.as_mut() {
            view.reopen(self.store.records(), selected);
            return;
        }
        self.node_view = Some(NodeView::open(self.store.records(), selected));
    }

    pub fn close_node_view(&mut self) {
        if let Some(view) = &mut self.node_view {
            view.close();
        }
    }

    /// The node view while it is open.
    pub fn node_view(&self) -> Option<&NodeView> {
        self.node_view.as_ref().filter(|view| view.is_open())
    }

    pub fn node_view_mut(&mut self) -> Option<&mut NodeView> {
        self.node_view.as_mut().filter(|view| view.is_open())
    }

    pub fn set_graph_zoom(&mut self, zoom: ZoomLevel) {
        if let Some(view) = self.node_view.as_mut().filter(|view| view.is_open()) {
            view.set_zoom(zoom, self.store.records());
        }
    }

    pub fn set_graph_filter(&mut self, filter: GraphFilter) {
        if let Some(view) = self.node_view.as_mut().filter(|view| view.is_open()) {
            view.set_filter(filter, self.store.records());
        }
    }

    /// Drops edges and helper notes and re-lays out the open node view.
    pub fn reset_node_view(&mut self) {
        if let Some(view) = self.node_view.as_mut().filter(|view| view.is_open()) {
            view.reset(self.store.records());
        }
    }

    /// Appends a record placed in the node view's current context.
    pub fn add_dialogue_node(&mut self) -> Option<RecordId> {
        let draft = self
            .node_view()?
            .new_dialogue_draft(self.store.records(), &self.config.defaults);
        self.add_drafts(&[draft]).first().copied()
    }

    fn append(&mut self, drafts: &[RecordDraft]) -> Vec<RecordId> {
        match self.store.add_drafts(drafts) {
            Ok(ids) => {
                self.after_append(&ids);
                ids
            }
            Err(err) => {
                warn!("event=append module=service status=skipped error={err}");
                Vec::new()
            }
        }
    }

    fn after_append(&mut self, ids: &[RecordId]) {
        let Some(view) = self.node_view.as_mut().filter(|view| view.is_open()) else {
            return;
        };
        if !view.selected().is_empty() {
            view.extend_selection(ids.iter().copied());
        }
        view.sync_dialogue_nodes(self.store.records());
    }

    fn restore(&mut self, records: Vec<DialogueEvent>) -> bool {
        if let Err(err) = self.store.replace_all(records) {
            error!("event=restore module=service status=error error={err}");
            return false;
        }
        let live = self.store.ids();
        self.selection.retain(&live);
        if let Some(view) = self.node_view.as_mut().filter(|view| view.is_open()) {
            view.sync_dialogue_nodes(self.store.records());
        }
        true
    }

    fn commit(&mut self, action: &str) {
        if self.history.push_state(self.store.records(), action) == PushOutcome::Debounced {
            debug!("event=commit module=service status=skipped action={action}");
        }
    }
}

fn plan_kind(plan: &PastePlan) -> &'static str {
    match plan {
        PastePlan::Nothing => "nothing",
        PastePlan::UpdateField { .. } => "update_field",
        PastePlan::UpdateRecords(_) => "update_records",
        PastePlan::AppendRecords(_) => "append_records",
    }
}
