use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::{HuntError, Result};

/// Tunables for a hunt session.
///
/// Defaults match the shipped app: a two second scan, a "Within Range" badge under
/// 30 m and a highlighted distance readout under 20 m.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How long a scan takes before the clue counts as found
    pub scan_duration_ms: u64,
    /// Distance under which the target is reported as within range
    pub within_range_m: f64,
    /// Distance under which the target is reported as near
    pub near_m: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            scan_duration_ms: 2_000,
            within_range_m: 30.0,
            near_m: 20.0,
        }
    }
}

impl SessionConfig {
    /// Parse a host-supplied JSON object. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| HuntError::InvalidData(e.to_string()))
    }

    pub fn scan_duration(&self) -> Duration {
        Duration::from_millis(self.scan_duration_ms)
    }
}
