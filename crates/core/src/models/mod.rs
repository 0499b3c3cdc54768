//! Hunt data models, types, and errors.

pub mod types;

pub use types::{Clue, Difficulty, Hunt, HuntError, LocationSample, Result};
