use std::sync::Arc;

use campus_hunt_core::catalog::{ClueDraft, HuntCatalog, HuntDraft, InMemoryHuntCatalog};
use campus_hunt_core::identifiers::HuntIdentifier;
use campus_hunt_core::models::Hunt;

use crate::records::{ClueRecord, DifficultyRecord, HuntApiError, HuntDraftRecord, HuntRecord};

#[derive(uniffi::Object)]
pub struct CatalogState {
    catalog: InMemoryHuntCatalog,
}

impl CatalogState {
    pub(crate) fn hunt(&self, id: &str) -> Result<Arc<Hunt>, HuntApiError> {
        Ok(self.catalog.get(&HuntIdentifier::new(id))?)
    }
}

fn records(hunts: Vec<Arc<Hunt>>) -> Vec<HuntRecord> {
    hunts.iter().map(|hunt| HuntRecord::from(&**hunt)).collect()
}

#[uniffi::export]
impl CatalogState {
    /// A catalog seeded with the bundled campus hunts
    #[uniffi::constructor]
    pub fn new() -> Self {
        Self {
            catalog: InMemoryHuntCatalog::with_campus_hunts(),
        }
    }

    pub fn all_hunts(&self) -> Vec<HuntRecord> {
        records(self.catalog.all())
    }

    pub fn search(&self, term: String) -> Vec<HuntRecord> {
        records(self.catalog.search(&term))
    }

    pub fn trending(&self) -> Vec<HuntRecord> {
        records(self.catalog.trending())
    }

    pub fn by_difficulty(&self, difficulty: DifficultyRecord) -> Vec<HuntRecord> {
        records(self.catalog.by_difficulty(difficulty.into()))
    }

    pub fn get(&self, id: String) -> Result<HuntRecord, HuntApiError> {
        self.hunt(&id).map(|hunt| HuntRecord::from(&*hunt))
    }

    /// Validate a clue typed into the authoring form
    pub fn parse_clue(
        &self,
        description: String,
        latitude: String,
        longitude: String,
    ) -> Result<ClueRecord, HuntApiError> {
        let clue = ClueDraft::parse(&description, &latitude, &longitude)?;
        Ok(ClueRecord::from(&clue))
    }

    pub fn create_hunt(&self, draft: HuntDraftRecord) -> Result<HuntRecord, HuntApiError> {
        let hunt = HuntDraft::from(draft).into_hunt()?;
        let hunt = self.catalog.add(hunt);
        Ok(HuntRecord::from(&*hunt))
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new()
    }
}
