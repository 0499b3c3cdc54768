//! Hunt catalog: where sessions get their hunts from.
//!
//! The catalog is an explicitly owned repository. Whatever constructs sessions holds
//! it by reference; there is no app-wide shared list.

use std::sync::Arc;

use crate::identifiers::HuntIdentifier;
use crate::models::{Difficulty, Hunt, Result};

pub mod draft;
pub mod in_memory;
pub mod seed;

pub use draft::{ClueDraft, HuntDraft};
pub use in_memory::InMemoryHuntCatalog;

pub trait HuntCatalog: Send + Sync {
    /// Look up a hunt. Misses are [`crate::models::HuntError::HuntNotFound`].
    fn get(&self, id: &HuntIdentifier) -> Result<Arc<Hunt>>;

    /// Every hunt, newest first
    fn all(&self) -> Vec<Arc<Hunt>>;

    fn add(&self, hunt: Hunt) -> Arc<Hunt>;

    /// Case-insensitive match on title or description. An empty term matches everything.
    fn search(&self, term: &str) -> Vec<Arc<Hunt>> {
        let term = term.trim().to_lowercase();
        self.all()
            .into_iter()
            .filter(|hunt| {
                term.is_empty()
                    || hunt.title.to_lowercase().contains(&term)
                    || hunt.description.to_lowercase().contains(&term)
            })
            .collect()
    }

    fn trending(&self) -> Vec<Arc<Hunt>> {
        self.all().into_iter().filter(|hunt| hunt.trending).collect()
    }

    fn by_difficulty(&self, difficulty: Difficulty) -> Vec<Arc<Hunt>> {
        self.all()
            .into_iter()
            .filter(|hunt| hunt.difficulty == difficulty)
            .collect()
    }
}
