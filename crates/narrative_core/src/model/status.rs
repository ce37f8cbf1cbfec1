//! Status badge classification for status-like record fields.

use crate::model::record::RecordField;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Fields rendered with a status badge.
pub const STATUS_FIELDS: [RecordField; 3] = [
    RecordField::GameStatus,
    RecordField::AssetStatus,
    RecordField::WwiseStatus,
];

/// Visual category of a status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBadge {
    Complete,
    InProgress,
    NotStarted,
    Blocked,
    Final,
    Recorded,
    Implemented,
    /// Value outside the known vocabulary.
    Plain,
}

impl StatusBadge {
    /// Classifies a raw status value.
    ///
    /// Matching is case-insensitive and treats whitespace runs as `-`.
    pub fn classify(value: &str) -> Self {
        match normalize_status(value).as_str() {
            "complete" => Self::Complete,
            "in-progress" | "needs-revision" | "recording" => Self::InProgress,
            "not-started" | "not-implemented" | "placeholding" => Self::NotStarted,
            "blocked" => Self::Blocked,
            "final" => Self::Final,
            "recorded" => Self::Recorded,
            "implemented" => Self::Implemented,
            _ => Self::Plain,
        }
    }

    /// CSS-style class name used by the table view.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Complete => "status-complete",
            Self::InProgress => "status-in-progress",
            Self::NotStarted => "status-not-started",
            Self::Blocked => "status-blocked",
            Self::Final => "status-final",
            Self::Recorded => "status-recorded",
            Self::Implemented => "status-implemented",
            Self::Plain => "status-badge",
        }
    }
}

/// Returns a badge for status fields with a non-empty value.
pub fn badge_for(field: RecordField, value: &str) -> Option<StatusBadge> {
    if value.is_empty() || !STATUS_FIELDS.contains(&field) {
        return None;
    }
    Some(StatusBadge::classify(value))
}

fn normalize_status(value: &str) -> String {
    WHITESPACE_RE
        .replace_all(&value.to_lowercase(), "-")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::{badge_for, StatusBadge};
    use crate::model::record::RecordField;

    #[test]
    fn classify_normalizes_case_and_whitespace() {
        assert_eq!(StatusBadge::classify("Not  Started"), StatusBadge::NotStarted);
        assert_eq!(StatusBadge::classify("IN PROGRESS"), StatusBadge::InProgress);
        assert_eq!(StatusBadge::classify("Needs Revision"), StatusBadge::InProgress);
        assert_eq!(StatusBadge::classify("Placeholding"), StatusBadge::NotStarted);
        assert_eq!(StatusBadge::classify("Shelved"), StatusBadge::Plain);
    }

    #[test]
    fn badge_only_applies_to_status_fields() {
        assert_eq!(badge_for(RecordField::Speaker, "Complete"), None);
        assert_eq!(badge_for(RecordField::GameStatus, ""), None);
        assert_eq!(
            badge_for(RecordField::WwiseStatus, "Implemented").map(StatusBadge::class_name),
            Some("status-implemented")
        );
    }
}
