//! Core data types for hunts and device positions.

use chrono::{DateTime, Utc};
use geo::Point;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::identifiers::HuntIdentifier;

const LEARN_MORE_SEARCH_URL: &str = "https://www.google.com/search";

// ============================================================================
// Enums
// ============================================================================

/// Difficulty tier shown on hunt cards
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

// ============================================================================
// Data Structures
// ============================================================================

/// A single geolocated waypoint of a hunt
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Clue {
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Clue {
    pub fn new(description: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            description: description.into(),
            latitude,
            longitude,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

/// An ordered sequence of clues plus the metadata shown in the catalog.
///
/// Clues are visited strictly in order, index 0 first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hunt {
    pub id: HuntIdentifier,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    /// Expected duration in minutes
    pub duration: u32,
    pub participants: u32,
    pub rating: f32,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub trending: bool,
    #[serde(default)]
    pub clues: Vec<Clue>,
    #[serde(default)]
    pub educational_content: Option<String>,
    #[serde(default)]
    pub educational_link: Option<String>,
}

impl Hunt {
    pub fn clue(&self, index: usize) -> Option<&Clue> {
        self.clues.get(index)
    }

    /// Where "Learn More" points on the completion screen.
    ///
    /// Only hunts with educational content have one. Without an explicit link this
    /// falls back to a web search for the hunt title.
    pub fn learn_more_link(&self) -> Option<String> {
        self.educational_content.as_ref()?;

        if let Some(link) = &self.educational_link {
            return Some(link.clone());
        }

        Url::parse_with_params(LEARN_MORE_SEARCH_URL, &[("q", self.title.as_str())])
            .ok()
            .map(String::from)
    }
}

/// A point-in-time device position. Only the latest sample matters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
}

impl LocationSample {
    pub fn new(latitude: f64, longitude: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
        }
    }

    /// A sample stamped with the current time
    pub fn now(latitude: f64, longitude: f64) -> Self {
        Self::new(latitude, longitude, Utc::now())
    }

    pub fn position(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum HuntError {
    #[error("Hunt not found: {0}")]
    HuntNotFound(HuntIdentifier),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid coordinate: ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Suggestion service error: {0}")]
    Suggestion(String),
}

pub type Result<T> = std::result::Result<T, HuntError>;
