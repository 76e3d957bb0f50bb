//! Party lifecycle status.
//!
//! Stored as a short text label in `parties.status` (guarded by a CHECK
//! constraint), so an unknown label can only come from a corrupted row and
//! decodes as an error instead of a variant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PartyStatus {
    #[default]
    Pending,
    InProgress,
    Done,
    Cancelled,
}

/// Returned when a label does not name a [`PartyStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown party status '{0}'")]
pub struct UnknownStatus(pub String);

impl PartyStatus {
    pub const ALL: [PartyStatus; 4] = [
        PartyStatus::Pending,
        PartyStatus::InProgress,
        PartyStatus::Done,
        PartyStatus::Cancelled,
    ];

    /// Stored label.
    pub fn as_str(self) -> &'static str {
        match self {
            PartyStatus::Pending => "pending",
            PartyStatus::InProgress => "in_progress",
            PartyStatus::Done => "done",
            PartyStatus::Cancelled => "cancelled",
        }
    }

    /// Human-readable label shown next to the stored one.
    pub fn display_name(self) -> &'static str {
        match self {
            PartyStatus::Pending => "Pending",
            PartyStatus::InProgress => "In Progress",
            PartyStatus::Done => "Done",
            PartyStatus::Cancelled => "Cancelled",
        }
    }

    /// Pending and in-progress parties count as upcoming.
    pub fn is_upcoming(self) -> bool {
        matches!(self, PartyStatus::Pending | PartyStatus::InProgress)
    }
}

impl fmt::Display for PartyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartyStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PartyStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

impl TryFrom<String> for PartyStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_str() {
        for status in PartyStatus::ALL {
            assert_eq!(status.as_str().parse::<PartyStatus>(), Ok(status));
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert_eq!(
            "archived".parse::<PartyStatus>(),
            Err(UnknownStatus("archived".into()))
        );
    }

    #[test]
    fn default_status_is_pending() {
        assert_eq!(PartyStatus::default(), PartyStatus::Pending);
    }

    #[test]
    fn upcoming_covers_pending_and_in_progress_only() {
        let upcoming: Vec<_> = PartyStatus::ALL
            .into_iter()
            .filter(|s| s.is_upcoming())
            .collect();
        assert_eq!(upcoming, vec![PartyStatus::Pending, PartyStatus::InProgress]);
    }

    #[test]
    fn serde_uses_stored_label() {
        let json = serde_json::to_string(&PartyStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let parsed: PartyStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, PartyStatus::Cancelled);
    }

    #[test]
    fn display_names() {
        assert_eq!(PartyStatus::InProgress.display_name(), "In Progress");
        assert_eq!(PartyStatus::Done.display_name(), "Done");
    }
}
