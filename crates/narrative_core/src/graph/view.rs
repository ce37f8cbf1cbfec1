//! Node view state for the visual dialogue editor.
//!
//! # Responsibility
//! - Track nodes, edges and helper notes for the current filter and zoom.
//! - Keep dialogue nodes in step with records added while the view is open.
//! - Save the arrangement on close and restore it on reopen.
//!
//! # Invariants
//! - Edges always connect two existing node ids; duplicate links are refused.
//! - Changing zoom or filter regenerates nodes and drops edges and helpers.
//! - Non-selection filters force `ZoomLevel::Dialogue`.

use crate::config::RecordDefaults;
use crate::graph::layout::{
    dialogue_node_id, filter_records, layout, GraphFilter, GraphNode, NodeKind, Position,
    ZoomLevel, UNKNOWN_GROUP,
};
use crate::model::record::{DialogueEvent, RecordDraft, RecordField, RecordId};
use log::debug;
use std::collections::{BTreeSet, HashSet};
use uuid::Uuid;

/// Directed link between two nodes, optionally labeled with choice text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub id: Uuid,
    pub source: String,
    pub target: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
struct SavedArrangement {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

/// Node editor state scoped to one editor session.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeView {
    selected: BTreeSet<RecordId>,
    filter: GraphFilter,
    zoom: ZoomLevel,
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    saved: Option<SavedArrangement>,
    open: bool,
}

impl NodeView {
    /// Opens a view over the given table selection at dialogue zoom.
    pub fn open(records: &[DialogueEvent], selected: BTreeSet<RecordId>) -> Self {
        let mut view = Self {
            selected,
            filter: GraphFilter::Selection,
            zoom: ZoomLevel::Dialogue,
            nodes: Vec::new(),
            edges: Vec::new(),
            saved: None,
            open: true,
        };
        view.regenerate(records);
        debug!(
            "event=node_view_open module=graph status=ok nodes={}",
            view.nodes.len()
        );
        view
    }

    /// Saves the arrangement and marks the view closed.
    pub fn close(&mut self) {
        self.saved = Some(SavedArrangement {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        });
        self.open = false;
        debug!("event=node_view_close module=graph status=ok");
    }

    /// Reopens with a new table selection, restoring any saved arrangement.
    pub fn reopen(&mut self, records: &[DialogueEvent], selected: BTreeSet<RecordId>) {
        self.selected = selected;
        self.open = true;
        match self.saved.clone() {
            Some(saved) => {
                self.nodes = saved.nodes;
                self.edges = saved.edges;
                self.sync_dialogue_nodes(records);
            }
            None => self.regenerate(records),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    pub fn filter(&self) -> &GraphFilter {
        &self.filter
    }

    pub fn selected(&self) -> &BTreeSet<RecordId> {
        &self.selected
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Records the view currently shows.
    pub fn visible<'a>(&self, records: &'a [DialogueEvent]) -> Vec<&'a DialogueEvent> {
        filter_records(records, &self.selected, &self.filter)
    }

    pub fn set_zoom(&mut self, zoom: ZoomLevel, records: &[DialogueEvent]) {
        if self.zoom == zoom {
            return;
        }
        self.zoom = zoom;
        self.regenerate(records);
    }

    pub fn set_filter(&mut self, filter: GraphFilter, records: &[DialogueEvent]) {
        if filter != GraphFilter::Selection {
            self.zoom = ZoomLevel::Dialogue;
        }
        self.filter = filter;
        self.regenerate(records);
    }

    /// Adds ids to the selection backing `GraphFilter::Selection`.
    pub fn extend_selection(&mut self, ids: impl IntoIterator<Item = RecordId>) {
        self.selected.extend(ids);
    }

    /// Appends dialogue nodes for visible records that have none.
    ///
    /// New nodes continue the dialogue grid after existing dialogue nodes.
    /// Returns the number of nodes appended.
    pub fn sync_dialogue_nodes(&mut self, records: &[DialogueEvent]) -> usize {
        if self.zoom != ZoomLevel::Dialogue {
            return 0;
        }
        let present = self
            .nodes
            .iter()
            .filter(|node| node.is_dialogue())
            .map(|node| node.id.clone())
            .collect::<HashSet<_>>();
        let missing = self
            .visible(records)
            .into_iter()
            .filter(|record| !present.contains(&dialogue_node_id(record.id)))
            .map(|record| record.id)
            .collect::<Vec<_>>();

        let existing = present.len();
        for (offset, record_id) in missing.iter().enumerate() {
            self.nodes
                .push(GraphNode::dialogue(*record_id, existing + offset));
        }
        if !missing.is_empty() {
            debug!(
                "event=node_view_sync module=graph status=ok added={}",
                missing.len()
            );
        }
        missing.len()
    }

    /// Links two nodes; returns `None` for unknown ends or an existing link.
    pub fn connect(&mut self, source: &str, target: &str) -> Option<Uuid> {
        if !self.has_node(source) || !self.has_node(target) {
            return None;
        }
        if self
            .edges
            .iter()
            .any(|edge| edge.source == source && edge.target == target)
        {
            return None;
        }
        let id = Uuid::new_v4();
        self.edges.push(GraphEdge {
            id,
            source: source.to_string(),
            target: target.to_string(),
            label: String::new(),
        });
        Some(id)
    }

    pub fn set_edge_label(&mut self, edge_id: Uuid, label: impl Into<String>) -> bool {
        match self.edges.iter_mut().find(|edge| edge.id == edge_id) {
            Some(edge) => {
                edge.label = label.into();
                true
            }
            None => false,
        }
    }

    pub fn remove_edge(&mut self, edge_id: Uuid) -> bool {
        let before = self.edges.len();
        self.edges.retain(|edge| edge.id != edge_id);
        before != self.edges.len()
    }

    /// Adds a free-text helper node and returns its id.
    pub fn add_helper_node(&mut self, text: impl Into<String>, position: Position) -> String {
        let id = format!("helper-{}", Uuid::new_v4());
        self.nodes.push(GraphNode {
            id: id.clone(),
            kind: NodeKind::Helper { text: text.into() },
            position,
        });
        id
    }

    pub fn set_helper_text(&mut self, node_id: &str, text: impl Into<String>) -> bool {
        let Some(node) = self.nodes.iter_mut().find(|node| node.id == node_id) else {
            return false;
        };
        match &mut node.kind {
            NodeKind::Helper { text: current } => {
                *current = text.into();
                true
            }
            _ => false,
        }
    }

    /// Drops edges, helpers and any saved arrangement, then re-lays out.
    pub fn reset(&mut self, records: &[DialogueEvent]) {
        self.saved = None;
        self.regenerate(records);
    }

    /// Draft for a new dialogue node placed in the current context.
    pub fn new_dialogue_draft(
        &self,
        records: &[DialogueEvent],
        defaults: &RecordDefaults,
    ) -> RecordDraft {
        let visible = self.visible(records);
        let context = visible.first();
        let mission = context
            .map(|record| record.mission.as_str())
            .filter(|value| !value.is_empty())
            .unwrap_or(UNKNOWN_GROUP);
        let zone = context
            .map(|record| record.zone.as_str())
            .filter(|value| !value.is_empty())
            .unwrap_or(UNKNOWN_GROUP);

        RecordDraft::new()
            .with(RecordField::DialogueText, "New dialogue...")
            .with(RecordField::Speaker, "Speaker")
            .with(RecordField::Trigger, "New trigger")
            .with(RecordField::Mission, mission)
            .with(RecordField::Zone, zone)
            .with(RecordField::GameStatus, defaults.game_status.as_str())
            .with(RecordField::AssetStatus, defaults.asset_status.as_str())
            .with(RecordField::WwiseStatus, defaults.wwise_status.as_str())
            .with(RecordField::Creator, defaults.creator.as_str())
    }

    fn has_node(&self, node_id: &str) -> bool {
        self.nodes.iter().any(|node| node.id == node_id)
    }

    fn regenerate(&mut self, records: &[DialogueEvent]) {
        let visible = self.visible(records);
        self.nodes = layout(&visible, self.zoom);
        self.edges.clear();
    }
}
