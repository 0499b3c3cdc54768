//! Authoring input for new hunts, either typed in or suggested by the generator.

use serde::{Deserialize, Serialize};

use crate::identifiers::HuntIdentifier;
use crate::models::{Clue, Difficulty, Hunt, HuntError, Result};

const DEFAULT_DURATION_MINUTES: u32 = 45;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HuntDraft {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    /// Minutes; zero means "not given"
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub clues: Vec<Clue>,
}

impl HuntDraft {
    /// Validate the draft and turn it into a catalog-ready hunt with a fresh id.
    pub fn into_hunt(self) -> Result<Hunt> {
        if self.title.trim().is_empty() {
            return Err(HuntError::InvalidData("hunt title is required".into()));
        }
        if self.description.trim().is_empty() {
            return Err(HuntError::InvalidData("hunt description is required".into()));
        }
        for clue in &self.clues {
            check_coordinate(clue.latitude, clue.longitude)?;
        }

        Ok(Hunt {
            id: HuntIdentifier::generate(),
            title: self.title,
            description: self.description,
            difficulty: self.difficulty,
            duration: match self.duration {
                0 => DEFAULT_DURATION_MINUTES,
                minutes => minutes,
            },
            participants: 0,
            rating: 0.0,
            image: None,
            trending: false,
            clues: self.clues,
            educational_content: None,
            educational_link: None,
        })
    }
}

/// A clue as typed into the authoring form
pub struct ClueDraft;

impl ClueDraft {
    pub fn parse(description: &str, latitude: &str, longitude: &str) -> Result<Clue> {
        let description = description.trim();
        if description.is_empty() || latitude.trim().is_empty() || longitude.trim().is_empty() {
            return Err(HuntError::InvalidData("all clue fields are required".into()));
        }

        let latitude = parse_degrees(latitude)?;
        let longitude = parse_degrees(longitude)?;
        check_coordinate(latitude, longitude)?;

        Ok(Clue::new(description, latitude, longitude))
    }
}

fn parse_degrees(value: &str) -> Result<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| HuntError::InvalidData(format!("not a coordinate: {value:?}")))
}

fn check_coordinate(latitude: f64, longitude: f64) -> Result<()> {
    let valid = latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude);

    if valid {
        Ok(())
    } else {
        Err(HuntError::InvalidCoordinate {
            latitude,
            longitude,
        })
    }
}
