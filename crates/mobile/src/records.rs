//! Plain data crossing the FFI boundary.

use campus_hunt_core::catalog::HuntDraft;
use campus_hunt_core::models::{Clue, Difficulty, Hunt, HuntError};
use campus_hunt_core::session::{CompletionSummary, Proximity, SessionPhase, SessionSnapshot};

#[derive(Debug, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum HuntApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Unavailable(String),
}

impl From<HuntError> for HuntApiError {
    fn from(error: HuntError) -> Self {
        let message = error.to_string();
        match error {
            HuntError::HuntNotFound(_) => Self::NotFound(message),
            HuntError::InvalidData(_) | HuntError::InvalidCoordinate { .. } => {
                Self::InvalidInput(message)
            }
            HuntError::Suggestion(_) => Self::Unavailable(message),
        }
    }
}

fn saturating_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum DifficultyRecord {
    Easy,
    Medium,
    Hard,
}

impl From<Difficulty> for DifficultyRecord {
    fn from(value: Difficulty) -> Self {
        match value {
            Difficulty::Easy => Self::Easy,
            Difficulty::Medium => Self::Medium,
            Difficulty::Hard => Self::Hard,
        }
    }
}

impl From<DifficultyRecord> for Difficulty {
    fn from(value: DifficultyRecord) -> Self {
        match value {
            DifficultyRecord::Easy => Self::Easy,
            DifficultyRecord::Medium => Self::Medium,
            DifficultyRecord::Hard => Self::Hard,
        }
    }
}

#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct ClueRecord {
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Clue> for ClueRecord {
    fn from(clue: &Clue) -> Self {
        Self {
            description: clue.description.clone(),
            latitude: clue.latitude,
            longitude: clue.longitude,
        }
    }
}

impl From<ClueRecord> for Clue {
    fn from(record: ClueRecord) -> Self {
        Clue::new(record.description, record.latitude, record.longitude)
    }
}

#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct HuntRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: DifficultyRecord,
    pub duration_minutes: u32,
    pub participants: u32,
    pub rating: f32,
    pub image: Option<String>,
    pub trending: bool,
    pub clues: Vec<ClueRecord>,
    pub educational_content: Option<String>,
    pub learn_more_link: Option<String>,
}

impl From<&Hunt> for HuntRecord {
    fn from(hunt: &Hunt) -> Self {
        Self {
            id: hunt.id.to_string(),
            title: hunt.title.clone(),
            description: hunt.description.clone(),
            difficulty: hunt.difficulty.into(),
            duration_minutes: hunt.duration,
            participants: hunt.participants,
            rating: hunt.rating,
            image: hunt.image.clone(),
            trending: hunt.trending,
            clues: hunt.clues.iter().map(ClueRecord::from).collect(),
            educational_content: hunt.educational_content.clone(),
            learn_more_link: hunt.learn_more_link(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct HuntDraftRecord {
    pub title: String,
    pub description: String,
    pub difficulty: DifficultyRecord,
    pub duration_minutes: u32,
    pub clues: Vec<ClueRecord>,
}

impl From<HuntDraft> for HuntDraftRecord {
    fn from(draft: HuntDraft) -> Self {
        Self {
            title: draft.title,
            description: draft.description,
            difficulty: draft.difficulty.into(),
            duration_minutes: draft.duration,
            clues: draft.clues.iter().map(ClueRecord::from).collect(),
        }
    }
}

impl From<HuntDraftRecord> for HuntDraft {
    fn from(record: HuntDraftRecord) -> Self {
        Self {
            title: record.title,
            description: record.description,
            difficulty: record.difficulty.into(),
            duration: record.duration_minutes,
            clues: record.clues.into_iter().map(Clue::from).collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum SessionPhaseRecord {
    AwaitingIntro,
    Searching,
    Scanning,
    HuntComplete,
}

impl From<SessionPhase> for SessionPhaseRecord {
    fn from(phase: SessionPhase) -> Self {
        match phase {
            SessionPhase::AwaitingIntro => Self::AwaitingIntro,
            SessionPhase::Searching => Self::Searching,
            SessionPhase::Scanning => Self::Scanning,
            SessionPhase::HuntComplete => Self::HuntComplete,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum ProximityRecord {
    Unknown,
    Far,
    WithinRange,
    Near,
}

impl From<Proximity> for ProximityRecord {
    fn from(proximity: Proximity) -> Self {
        match proximity {
            Proximity::Unknown => Self::Unknown,
            Proximity::Far => Self::Far,
            Proximity::WithinRange => Self::WithinRange,
            Proximity::Near => Self::Near,
        }
    }
}

#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct SessionSnapshotRecord {
    pub phase: SessionPhaseRecord,
    pub current_clue_index: u32,
    pub clue_count: u32,
    pub distance_m: Option<f64>,
    pub proximity: ProximityRecord,
    pub progress_percent: f64,
}

impl From<SessionSnapshot> for SessionSnapshotRecord {
    fn from(snapshot: SessionSnapshot) -> Self {
        Self {
            phase: snapshot.phase.into(),
            current_clue_index: saturating_u32(snapshot.current_clue_index),
            clue_count: saturating_u32(snapshot.clue_count),
            distance_m: snapshot.distance_m,
            proximity: snapshot.proximity.into(),
            progress_percent: snapshot.progress_percent(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct CompletionRecord {
    pub hunt_id: String,
    pub title: String,
    pub clue_count: u32,
    pub educational_content: Option<String>,
    pub learn_more_link: Option<String>,
    pub elapsed_seconds: i64,
}

impl From<CompletionSummary> for CompletionRecord {
    fn from(summary: CompletionSummary) -> Self {
        Self {
            elapsed_seconds: summary.elapsed().num_seconds(),
            hunt_id: summary.hunt_id.to_string(),
            title: summary.title,
            clue_count: saturating_u32(summary.clue_count),
            educational_content: summary.educational_content,
            learn_more_link: summary.learn_more_link,
        }
    }
}
