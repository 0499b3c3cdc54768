//! What a session reports to its host after each change.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::identifiers::HuntIdentifier;
use crate::session::config::SessionConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, strum::Display)]
pub enum SessionPhase {
    /// The clue overlay is showing; the player has not started searching
    AwaitingIntro,
    Searching,
    /// A scan is in flight; further scan attempts are rejected
    Scanning,
    HuntComplete,
}

/// Coarse distance band used for UI badges
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, strum::Display)]
pub enum Proximity {
    /// No location sample yet, or nothing left to find
    Unknown,
    Far,
    WithinRange,
    Near,
}

impl Proximity {
    pub fn classify(distance_m: Option<f64>, config: &SessionConfig) -> Self {
        match distance_m {
            None => Self::Unknown,
            Some(d) if d < config.near_m => Self::Near,
            Some(d) if d < config.within_range_m => Self::WithinRange,
            Some(_) => Self::Far,
        }
    }

    /// Near is also within range
    pub fn is_within_range(&self) -> bool {
        matches!(self, Self::WithinRange | Self::Near)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub current_clue_index: usize,
    pub clue_count: usize,
    /// Meters to the current clue, `None` while unknown
    pub distance_m: Option<f64>,
    pub proximity: Proximity,
}

impl SessionSnapshot {
    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::HuntComplete
    }

    /// Share of clues found, 0 to 100. Empty hunts report 0.
    pub fn progress_percent(&self) -> f64 {
        if self.clue_count == 0 {
            return 0.0;
        }
        (self.current_clue_index as f64 / self.clue_count as f64 * 100.0).min(100.0)
    }
}

/// Final report handed to the completion screen
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompletionSummary {
    pub hunt_id: HuntIdentifier,
    pub title: String,
    pub clue_count: usize,
    pub educational_content: Option<String>,
    pub learn_more_link: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl CompletionSummary {
    pub fn elapsed(&self) -> TimeDelta {
        self.completed_at - self.started_at
    }
}

/// The outcome of feeding one event to a session
#[derive(Clone, Debug, PartialEq)]
pub enum Applied {
    /// Rejected or irrelevant in the current phase; nothing changed
    Ignored,
    Changed(SessionSnapshot),
    /// The event finished the hunt. Produced at most once per session.
    Completed(SessionSnapshot, CompletionSummary),
}

impl Applied {
    pub fn snapshot(&self) -> Option<&SessionSnapshot> {
        match self {
            Self::Ignored => None,
            Self::Changed(snapshot) | Self::Completed(snapshot, _) => Some(snapshot),
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }
}
