//! In-memory record set with identifier allocation.
//!
//! # Responsibility
//! - Own the ordered record sequence that both views edit.
//! - Allocate identifiers from a monotonically increasing counter.
//! - Stamp `created_at` / `updated_at` on writes.
//!
//! # Invariants
//! - Identifiers are unique and below `RecordId::MAX`.
//! - `next_id` is always greater than every identifier ever held.
//! - Writes addressed to a missing identifier are no-ops.

use crate::clock::{to_record_timestamp, Clock, SystemClock};
use crate::config::RecordDefaults;
use crate::model::record::{DialogueEvent, RecordDraft, RecordField, RecordId};
use log::{debug, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error for record sets the store cannot hold or identifiers it cannot issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Two records share one identifier.
    DuplicateId(RecordId),
    /// `RecordId::MAX` is reserved and never held.
    IdOutOfRange(RecordId),
    /// The identifier counter reached `RecordId::MAX`.
    IdsExhausted,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate record id: {id}"),
            Self::IdOutOfRange(id) => write!(f, "record id out of range: {id}"),
            Self::IdsExhausted => write!(f, "record id space exhausted"),
        }
    }
}

impl Error for StoreError {}

/// One "apply these fields to record X" instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordUpdate {
    pub id: RecordId,
    pub draft: RecordDraft,
}

/// Header statistics for the record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSummary {
    pub events: usize,
    pub missions: usize,
    pub speakers: usize,
}

/// Owning collaborator for the editable record sequence.
pub struct RecordStore<C: Clock = SystemClock> {
    records: Vec<DialogueEvent>,
    next_id: RecordId,
    defaults: RecordDefaults,
    clock: C,
}

impl RecordStore<SystemClock> {
    /// Creates a store over `records` using the system clock.
    pub fn new(records: Vec<DialogueEvent>) -> Result<Self, StoreError> {
        Self::with_clock(records, RecordDefaults::default(), SystemClock)
    }
}

impl<C: Clock> RecordStore<C> {
    /// Creates a store over `records`.
    ///
    /// # Errors
    /// - `DuplicateId` when two records share an identifier.
    /// - `IdOutOfRange` for a record holding `RecordId::MAX`.
    pub fn with_clock(
        records: Vec<DialogueEvent>,
        defaults: RecordDefaults,
        clock: C,
    ) -> Result<Self, StoreError> {
        validate_ids(&records)?;
        let next_id = next_id_after(&records, 1);
        Ok(Self {
            records,
            next_id,
            defaults,
            clock,
        })
    }

    pub fn records(&self) -> &[DialogueEvent] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&DialogueEvent> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.records.iter().map(|record| record.id).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Identifier the next appended record will receive.
    pub fn next_id(&self) -> RecordId {
        self.next_id
    }

    /// Appends one record populated only with defaults.
    ///
    /// # Errors
    /// - `IdsExhausted` once the counter reaches `RecordId::MAX`.
    pub fn add_blank(&mut self) -> Result<RecordId, StoreError> {
        let ids = self.add_drafts(&[RecordDraft::new()])?;
        ids.first().copied().ok_or(StoreError::IdsExhausted)
    }

    /// Appends one record per draft with consecutive identifiers.
    ///
    /// Missing or empty draft values fall back to defaults; timestamps are
    /// always stamped with the current time. Nothing is appended when the
    /// counter cannot cover every draft.
    ///
    /// # Errors
    /// - `IdsExhausted` when fewer identifiers remain than drafts.
    pub fn add_drafts(&mut self, drafts: &[RecordDraft]) -> Result<Vec<RecordId>, StoreError> {
        let remaining = RecordId::MAX - self.next_id;
        let requested = RecordId::try_from(drafts.len()).unwrap_or(RecordId::MAX);
        if requested > remaining {
            warn!(
                "event=record_add_many module=store status=error reason=ids_exhausted requested={requested}"
            );
            return Err(StoreError::IdsExhausted);
        }

        let mut ids = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let id = self.next_id;
            let record = self.materialize(id, draft);
            self.records.push(record);
            self.next_id = id + 1;
            ids.push(id);
        }
        debug!(
            "event=record_add_many module=store status=ok count={}",
            ids.len()
        );
        Ok(ids)
    }

    /// Overwrites one field and stamps `updated_at`.
    ///
    /// Returns `false` when `id` is not present.
    pub fn update_field(&mut self, id: RecordId, field: RecordField, value: &str) -> bool {
        let stamp = to_record_timestamp(self.clock.now());
        let Some(record) = self.records.iter_mut().find(|record| record.id == id) else {
            debug!("event=record_update module=store status=noop id={id}");
            return false;
        };
        record.set(field, value);
        record.updated_at = stamp;
        true
    }

    /// Applies every update onto its record, then stamps `updated_at`.
    ///
    /// Returns the number of records touched.
    pub fn update_many(&mut self, updates: &[RecordUpdate]) -> usize {
        let stamp = to_record_timestamp(self.clock.now());
        let mut touched = 0;
        for record in &mut self.records {
            let Some(update) = updates.iter().find(|update| update.id == record.id) else {
                continue;
            };
            record.apply_draft(&update.draft);
            record.updated_at = stamp.clone();
            touched += 1;
        }
        debug!("event=record_update_many module=store status=ok touched={touched}");
        touched
    }

    pub fn delete(&mut self, id: RecordId) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        before != self.records.len()
    }

    /// Replaces the whole record sequence.
    ///
    /// The identifier counter never moves backwards, so records dropped by
    /// an undo cannot have their identifiers reissued.
    ///
    /// # Errors
    /// - Same as `with_clock`; the held records are kept on error.
    pub fn replace_all(&mut self, records: Vec<DialogueEvent>) -> Result<(), StoreError> {
        validate_ids(&records)?;
        self.next_id = next_id_after(&records, self.next_id);
        self.records = records;
        Ok(())
    }

    pub fn summary(&self) -> RecordSummary {
        let missions = self
            .records
            .iter()
            .map(|record| record.mission.as_str())
            .collect::<HashSet<_>>();
        let speakers = self
            .records
            .iter()
            .map(|record| record.speaker.as_str())
            .collect::<HashSet<_>>();
        RecordSummary {
            events: self.records.len(),
            missions: missions.len(),
            speakers: speakers.len(),
        }
    }

    fn materialize(&self, id: RecordId, draft: &RecordDraft) -> DialogueEvent {
        let stamp = to_record_timestamp(self.clock.now());
        let text = |field: RecordField| draft.non_empty(field).unwrap_or_default().to_string();
        let or_default = |field: RecordField, fallback: &str| {
            draft.non_empty(field).unwrap_or(fallback).to_string()
        };

        DialogueEvent {
            id,
            dialogue_text: text(RecordField::DialogueText),
            dialogue_event_name: draft
                .non_empty(RecordField::DialogueEventName)
                .map(str::to_string)
                .unwrap_or_else(|| format!("dx_new_event_{id}")),
            wwise_event_name: draft
                .non_empty(RecordField::WwiseEventName)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Play_dx_new_event_{id}")),
            mission: text(RecordField::Mission),
            zone: text(RecordField::Zone),
            speaker: text(RecordField::Speaker),
            trigger: text(RecordField::Trigger),
            integration_notes: text(RecordField::IntegrationNotes),
            related_game_asset: text(RecordField::RelatedGameAsset),
            game_status: or_default(RecordField::GameStatus, &self.defaults.game_status),
            asset_status: or_default(RecordField::AssetStatus, &self.defaults.asset_status),
            wwise_status: or_default(RecordField::WwiseStatus, &self.defaults.wwise_status),
            dev_revision_note: text(RecordField::DevRevisionNote),
            notes: text(RecordField::Notes),
            creator: or_default(RecordField::Creator, &self.defaults.creator),
            created_at: stamp.clone(),
            updated_at: stamp,
        }
    }
}

fn validate_ids(records: &[DialogueEvent]) -> Result<(), StoreError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if record.id == RecordId::MAX {
            return Err(StoreError::IdOutOfRange(record.id));
        }
        if !seen.insert(record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }
    }
    Ok(())
}

// Callers validate first, so every id is below `RecordId::MAX`.
fn next_id_after(records: &[DialogueEvent], floor: RecordId) -> RecordId {
    records
        .iter()
        .map(|record| record.id.saturating_add(1))
        .max()
        .map_or(floor, |candidate| candidate.max(floor))
}
