//! Volatile catalog kept in process memory.

use std::sync::{Arc, PoisonError, RwLock};

use crate::catalog::{HuntCatalog, seed};
use crate::identifiers::HuntIdentifier;
use crate::models::{Hunt, HuntError, Result};

#[derive(Default)]
pub struct InMemoryHuntCatalog {
    hunts: RwLock<Vec<Arc<Hunt>>>,
}

impl InMemoryHuntCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_hunts(hunts: impl IntoIterator<Item = Hunt>) -> Self {
        Self {
            hunts: RwLock::new(hunts.into_iter().map(Arc::new).collect()),
        }
    }

    /// The hunts a fresh install starts with
    pub fn with_campus_hunts() -> Self {
        Self::from_hunts(seed::campus_hunts())
    }

    pub fn len(&self) -> usize {
        self.hunts.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HuntCatalog for InMemoryHuntCatalog {
    fn get(&self, id: &HuntIdentifier) -> Result<Arc<Hunt>> {
        self.hunts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|hunt| &hunt.id == id)
            .cloned()
            .ok_or_else(|| HuntError::HuntNotFound(id.clone()))
    }

    fn all(&self) -> Vec<Arc<Hunt>> {
        self.hunts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn add(&self, hunt: Hunt) -> Arc<Hunt> {
        let hunt = Arc::new(hunt);
        tracing::debug!(hunt = %hunt.id, title = %hunt.title, "hunt added to catalog");
        self.hunts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(0, Arc::clone(&hunt));
        hunt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Clue, Difficulty};

    fn hunt(id: &str, title: &str) -> Hunt {
        Hunt {
            id: HuntIdentifier::new(id),
            title: title.into(),
            description: "Find things around the quad".into(),
            difficulty: Difficulty::Medium,
            duration: 30,
            participants: 0,
            rating: 0.0,
            image: None,
            trending: false,
            clues: vec![Clue::new("Fountain", 40.7, -74.1)],
            educational_content: None,
            educational_link: None,
        }
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = InMemoryHuntCatalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.all().is_empty());
    }

    #[test]
    fn test_lookup_miss_is_not_found() {
        let catalog = InMemoryHuntCatalog::new();
        let missing = HuntIdentifier::new("nope");
        assert!(matches!(
            catalog.get(&missing),
            Err(HuntError::HuntNotFound(id)) if id == missing
        ));
    }

    #[test]
    fn test_add_puts_newest_first() {
        let catalog = InMemoryHuntCatalog::from_hunts([hunt("1", "Old")]);
        catalog.add(hunt("2", "New"));

        let titles: Vec<_> = catalog.all().iter().map(|h| h.title.clone()).collect();
        assert_eq!(titles, ["New", "Old"]);
        assert!(catalog.get(&HuntIdentifier::new("2")).is_ok());
    }

    #[test]
    fn test_search_matches_title_or_description() {
        let catalog = InMemoryHuntCatalog::from_hunts([hunt("1", "Library Mystery"), hunt("2", "Art Walk")]);

        assert_eq!(catalog.search("library").len(), 1);
        assert_eq!(catalog.search("QUAD").len(), 2);
        assert_eq!(catalog.search("   ").len(), 2);
        assert!(catalog.search("chemistry").is_empty());
    }

    #[test]
    fn test_sessions_keep_their_snapshot() {
        let catalog = InMemoryHuntCatalog::from_hunts([hunt("1", "Walk")]);
        let playing = catalog.get(&HuntIdentifier::new("1")).unwrap();

        let mut edited = hunt("1", "Walk");
        edited.clues.clear();
        catalog.add(edited);

        assert_eq!(playing.clues.len(), 1);
    }

    #[test]
    fn test_seeded_catalog() {
        let catalog = InMemoryHuntCatalog::with_campus_hunts();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.trending().len(), 3);
        assert_eq!(catalog.by_difficulty(Difficulty::Easy).len(), 2);
    }
}
