//! Dialogue event record model.
//!
//! # Responsibility
//! - Define the canonical record edited by table and node views.
//! - Provide typed field access so field-level edits never touch identity.
//!
//! # Invariants
//! - `id` is assigned by the record store and never changes afterwards.
//! - Every editable value is a string addressed by a `RecordField`.
//! - A `RecordDraft` never carries an identifier.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Integer identifier assigned by the store's monotonically increasing counter.
pub type RecordId = u64;

/// Addressable string field of a `DialogueEvent`.
///
/// Declaration order matches the record layout and drives draft ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    DialogueText,
    DialogueEventName,
    WwiseEventName,
    Mission,
    Zone,
    Speaker,
    Trigger,
    IntegrationNotes,
    RelatedGameAsset,
    GameStatus,
    AssetStatus,
    WwiseStatus,
    DevRevisionNote,
    Notes,
    Creator,
    CreatedAt,
    UpdatedAt,
}

impl RecordField {
    /// All fields in record layout order.
    pub const ALL: [RecordField; 17] = [
        Self::DialogueText,
        Self::DialogueEventName,
        Self::WwiseEventName,
        Self::Mission,
        Self::Zone,
        Self::Speaker,
        Self::Trigger,
        Self::IntegrationNotes,
        Self::RelatedGameAsset,
        Self::GameStatus,
        Self::AssetStatus,
        Self::WwiseStatus,
        Self::DevRevisionNote,
        Self::Notes,
        Self::Creator,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];

    /// Stable snake_case name shared with the JSON shape.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DialogueText => "dialogue_text",
            Self::DialogueEventName => "dialogue_event_name",
            Self::WwiseEventName => "wwise_event_name",
            Self::Mission => "mission",
            Self::Zone => "zone",
            Self::Speaker => "speaker",
            Self::Trigger => "trigger",
            Self::IntegrationNotes => "integration_notes",
            Self::RelatedGameAsset => "related_game_asset",
            Self::GameStatus => "game_status",
            Self::AssetStatus => "asset_status",
            Self::WwiseStatus => "wwise_status",
            Self::DevRevisionNote => "dev_revision_note",
            Self::Notes => "notes",
            Self::Creator => "creator",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

impl Display for RecordField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for field names that do not address a record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordFieldError {
    /// Name is not one of the editable fields (`id` included).
    UnknownField(String),
}

impl Display for RecordFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField(name) => write!(f, "unknown record field: `{name}`"),
        }
    }
}

impl Error for RecordFieldError {}

impl FromStr for RecordField {
    type Err = RecordFieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == normalized)
            .ok_or_else(|| RecordFieldError::UnknownField(normalized.to_string()))
    }
}

/// One dialogue/event entity.
///
/// `id` is required on the wire; missing string fields decode as empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DialogueEvent {
    pub id: RecordId,
    #[serde(default)]
    pub dialogue_text: String,
    #[serde(default)]
    pub dialogue_event_name: String,
    #[serde(default)]
    pub wwise_event_name: String,
    #[serde(default)]
    pub mission: String,
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub speaker: String,
    #[serde(default)]
    pub trigger: String,
    #[serde(default)]
    pub integration_notes: String,
    #[serde(default)]
    pub related_game_asset: String,
    #[serde(default)]
    pub game_status: String,
    #[serde(default)]
    pub asset_status: String,
    #[serde(default)]
    pub wwise_status: String,
    #[serde(default)]
    pub dev_revision_note: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub creator: String,
    /// ISO-8601 UTC creation time.
    #[serde(default)]
    pub created_at: String,
    /// ISO-8601 UTC time of the last field write.
    #[serde(default)]
    pub updated_at: String,
}

impl DialogueEvent {
    /// Creates an empty record with the given identifier.
    pub fn with_id(id: RecordId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn get(&self, field: RecordField) -> &str {
        match field {
            RecordField::DialogueText => &self.dialogue_text,
            RecordField::DialogueEventName => &self.dialogue_event_name,
            RecordField::WwiseEventName => &self.wwise_event_name,
            RecordField::Mission => &self.mission,
            RecordField::Zone => &self.zone,
            RecordField::Speaker => &self.speaker,
            RecordField::Trigger => &self.trigger,
            RecordField::IntegrationNotes => &self.integration_notes,
            RecordField::RelatedGameAsset => &self.related_game_asset,
            RecordField::GameStatus => &self.game_status,
            RecordField::AssetStatus => &self.asset_status,
            RecordField::WwiseStatus => &self.wwise_status,
            RecordField::DevRevisionNote => &self.dev_revision_note,
            RecordField::Notes => &self.notes,
            RecordField::Creator => &self.creator,
            RecordField::CreatedAt => &self.created_at,
            RecordField::UpdatedAt => &self.updated_at,
        }
    }

    pub fn set(&mut self, field: RecordField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// Overwrites every field present in `draft`; identity is untouched.
    pub fn apply_draft(&mut self, draft: &RecordDraft) {
        for (field, value) in draft.iter() {
            self.set(field, value);
        }
    }

    /// Copies every field into a draft, dropping the identifier.
    pub fn to_draft(&self) -> RecordDraft {
        RecordField::ALL
            .iter()
            .map(|field| (*field, self.get(*field).to_string()))
            .collect()
    }

    fn slot_mut(&mut self, field: RecordField) -> &mut String {
        match field {
            RecordField::DialogueText => &mut self.dialogue_text,
            RecordField::DialogueEventName => &mut self.dialogue_event_name,
            RecordField::WwiseEventName => &mut self.wwise_event_name,
            RecordField::Mission => &mut self.mission,
            RecordField::Zone => &mut self.zone,
            RecordField::Speaker => &mut self.speaker,
            RecordField::Trigger => &mut self.trigger,
            RecordField::IntegrationNotes => &mut self.integration_notes,
            RecordField::RelatedGameAsset => &mut self.related_game_asset,
            RecordField::GameStatus => &mut self.game_status,
            RecordField::AssetStatus => &mut self.asset_status,
            RecordField::WwiseStatus => &mut self.wwise_status,
            RecordField::DevRevisionNote => &mut self.dev_revision_note,
            RecordField::Notes => &mut self.notes,
            RecordField::Creator => &mut self.creator,
            RecordField::CreatedAt => &mut self.created_at,
            RecordField::UpdatedAt => &mut self.updated_at,
        }
    }
}

/// Identifier-stripped, possibly partial record.
///
/// Used as clipboard payload and as "append new record" request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordDraft {
    fields: BTreeMap<RecordField, String>,
}

impl RecordDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft with exactly one populated field.
    pub fn single(field: RecordField, value: impl Into<String>) -> Self {
        let mut draft = Self::new();
        draft.set(field, value);
        draft
    }

    pub fn set(&mut self, field: RecordField, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    pub fn with(mut self, field: RecordField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: RecordField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Returns the value when present and non-empty.
    pub fn non_empty(&self, field: RecordField) -> Option<&str> {
        self.get(field).filter(|value| !value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates populated fields in record layout order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordField, &str)> {
        self.fields
            .iter()
            .map(|(field, value)| (*field, value.as_str()))
    }
}

impl FromIterator<(RecordField, String)> for RecordDraft {
    fn from_iter<T: IntoIterator<Item = (RecordField, String)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DialogueEvent, RecordDraft, RecordField, RecordFieldError};

    #[test]
    fn field_names_round_trip_through_from_str() {
        for field in RecordField::ALL {
            assert_eq!(field.as_str().parse::<RecordField>(), Ok(field));
        }
    }

    #[test]
    fn id_is_not_an_addressable_field() {
        assert_eq!(
            "id".parse::<RecordField>(),
            Err(RecordFieldError::UnknownField("id".to_string()))
        );
    }

    #[test]
    fn to_draft_strips_identifier_and_keeps_all_fields() {
        let mut record = DialogueEvent::with_id(3);
        record.speaker = "Lance".to_string();

        let draft = record.to_draft();
        assert_eq!(draft.len(), RecordField::ALL.len());
        assert_eq!(draft.get(RecordField::Speaker), Some("Lance"));
    }

    #[test]
    fn apply_draft_overwrites_only_present_fields() {
        let mut record = DialogueEvent::with_id(9);
        record.zone = "Dock".to_string();
        record.speaker = "Harper".to_string();

        record.apply_draft(&RecordDraft::single(RecordField::Speaker, "Lance"));

        assert_eq!(record.id, 9);
        assert_eq!(record.speaker, "Lance");
        assert_eq!(record.zone, "Dock");
    }
}
