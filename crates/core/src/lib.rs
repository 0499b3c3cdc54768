//! # campus-hunt-core
//!
//! Location-based scavenger hunts: a player walks an ordered list of geolocated
//! clues, scanning at each one to move on to the next.
//!
//! ## Modules
//!
//! - **spatial**: Haversine distance between coordinates
//! - **models**: hunts, clues, location samples and errors
//! - **session**: the per-player progress state machine and its tokio driver
//! - **catalog**: the hunt repository sessions are started from
//! - **location**: device location feeds
//! - **suggest**: hunt idea generation
//!
//! ## Example
//!
//! ```
//! use campus_hunt_core::prelude::*;
//!
//! let catalog = InMemoryHuntCatalog::with_campus_hunts();
//! let hunt = catalog.get(&HuntIdentifier::new("2")).unwrap();
//!
//! let mut session = HuntSession::new(hunt, SessionConfig::default());
//! session.dismiss_intro();
//! session.update_location(LocationSample::now(40.7425, -74.1825));
//! assert!(session.snapshot().proximity.is_within_range());
//!
//! session.attempt_scan();
//! session.finish_scan(); // normally fired by the scan timer
//! assert_eq!(session.phase(), SessionPhase::HuntComplete);
//! ```

pub mod catalog;
pub mod identifiers;
pub mod location;
pub mod models;
pub mod session;
pub mod spatial;
pub mod suggest;

pub mod prelude {
    pub use crate::catalog::{ClueDraft, HuntCatalog, HuntDraft, InMemoryHuntCatalog};
    pub use crate::identifiers::*;
    pub use crate::location::{BroadcastLocationProvider, LocationProvider, LocationSubscription};
    pub use crate::models::*;
    pub use crate::session::*;
    pub use crate::spatial::distance_meters;
    pub use crate::suggest::{GeminiSuggester, HuntSuggester, SuggesterConfig, suggest_or_empty};
}

pub use prelude::*;
