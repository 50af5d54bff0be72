use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Participants are identified by their display name.
pub type ParticipantName = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub name: ParticipantName,
    pub joined_at: DateTime<Utc>,
}

impl Participant {
    /// Create a participant. The name is expected to be trimmed and non-empty;
    /// the ledger checks that before calling this.
    pub fn new(name: impl Into<ParticipantName>) -> Self {
        Self {
            name: name.into(),
            joined_at: Utc::now(),
        }
    }
}

/// Normalize a participant name as typed by a user.
/// Returns `None` when nothing is left after trimming.
pub fn normalize_name(input: &str) -> Option<ParticipantName> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
