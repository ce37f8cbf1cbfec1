//! Record filtering and multi-level node layout.
//!
//! # Responsibility
//! - Select the record subset a node view shows.
//! - Group records into mission / zone / dialogue nodes on a fixed grid.
//!
//! # Invariants
//! - Group order follows first appearance in the record sequence.
//! - Empty mission/zone values group under `Unknown`.

use crate::model::record::{DialogueEvent, RecordId};
use std::collections::{BTreeSet, HashSet};

/// Group name used for records with an empty mission or zone.
pub const UNKNOWN_GROUP: &str = "Unknown";

const MISSION_SPACING_X: f32 = 300.0;
const MISSION_ROW_Y: f32 = 100.0;
const ZONE_COLUMNS: usize = 3;
const ZONE_CELL: (f32, f32) = (250.0, 150.0);
const DIALOGUE_COLUMNS: usize = 4;
const DIALOGUE_CELL: (f32, f32) = (300.0, 200.0);

/// Aggregation level of a node view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoomLevel {
    Mission,
    Zone,
    #[default]
    Dialogue,
}

/// Which records a node view shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GraphFilter {
    /// Records selected in the table when the view opened.
    #[default]
    Selection,
    Mission(String),
    Zone(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// Payload of one graph node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Mission {
        mission: String,
        zone_count: usize,
        dialogue_count: usize,
    },
    Zone {
        zone: String,
        dialogue_count: usize,
    },
    Dialogue {
        record_id: RecordId,
    },
    /// Free-text scene note with no backing record.
    Helper {
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub id: String,
    pub kind: NodeKind,
    pub position: Position,
}

impl GraphNode {
    pub fn dialogue(record_id: RecordId, slot: usize) -> Self {
        Self {
            id: dialogue_node_id(record_id),
            kind: NodeKind::Dialogue { record_id },
            position: grid_position(slot, DIALOGUE_COLUMNS, DIALOGUE_CELL),
        }
    }

    pub fn is_dialogue(&self) -> bool {
        matches!(self.kind, NodeKind::Dialogue { .. })
    }
}

pub fn dialogue_node_id(record_id: RecordId) -> String {
    format!("dialogue-{record_id}")
}

/// Records visible under `filter`, in record order.
pub fn filter_records<'a>(
    records: &'a [DialogueEvent],
    selected: &BTreeSet<RecordId>,
    filter: &GraphFilter,
) -> Vec<&'a DialogueEvent> {
    records
        .iter()
        .filter(|record| match filter {
            GraphFilter::Selection => selected.contains(&record.id),
            GraphFilter::Mission(mission) => &record.mission == mission,
            GraphFilter::Zone(zone) => &record.zone == zone,
        })
        .collect()
}

/// Distinct non-empty missions in first-seen order.
pub fn missions(records: &[DialogueEvent]) -> Vec<String> {
    distinct(records.iter().map(|record| record.mission.as_str()))
}

/// Distinct non-empty zones in first-seen order.
pub fn zones(records: &[DialogueEvent]) -> Vec<String> {
    distinct(records.iter().map(|record| record.zone.as_str()))
}

/// Builds the node set for `records` at `level`.
pub fn layout(records: &[&DialogueEvent], level: ZoomLevel) -> Vec<GraphNode> {
    match level {
        ZoomLevel::Mission => group_by(records, |record| record.mission.as_str())
            .into_iter()
            .enumerate()
            .map(|(index, (mission, members))| {
                let zone_count = members
                    .iter()
                    .map(|record| record.zone.as_str())
                    .filter(|zone| !zone.is_empty())
                    .collect::<HashSet<_>>()
                    .len();
                GraphNode {
                    id: format!("mission-{mission}"),
                    kind: NodeKind::Mission {
                        mission,
                        zone_count,
                        dialogue_count: members.len(),
                    },
                    position: Position {
                        x: index as f32 * MISSION_SPACING_X,
                        y: MISSION_ROW_Y,
                    },
                }
            })
            .collect(),
        ZoomLevel::Zone => group_by(records, |record| record.zone.as_str())
            .into_iter()
            .enumerate()
            .map(|(index, (zone, members))| GraphNode {
                id: format!("zone-{zone}"),
                kind: NodeKind::Zone {
                    zone,
                    dialogue_count: members.len(),
                },
                position: grid_position(index, ZONE_COLUMNS, ZONE_CELL),
            })
            .collect(),
        ZoomLevel::Dialogue => records
            .iter()
            .enumerate()
            .map(|(index, record)| GraphNode::dialogue(record.id, index))
            .collect(),
    }
}

fn group_by<'a>(
    records: &[&'a DialogueEvent],
    key: impl Fn(&DialogueEvent) -> &str,
) -> Vec<(String, Vec<&'a DialogueEvent>)> {
    let mut groups: Vec<(String, Vec<&'a DialogueEvent>)> = Vec::new();
    for record in records.iter().copied() {
        let name = match key(record) {
            "" => UNKNOWN_GROUP,
            other => other,
        };
        match groups.iter_mut().find(|(group, _)| group == name) {
            Some((_, members)) => members.push(record),
            None => groups.push((name.to_string(), vec![record])),
        }
    }
    groups
}

fn grid_position(slot: usize, columns: usize, cell: (f32, f32)) -> Position {
    Position {
        x: (slot % columns) as f32 * cell.0,
        y: (slot / columns) as f32 * cell.1,
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| !value.is_empty() && seen.insert(*value))
        .map(str::to_string)
        .collect()
}
