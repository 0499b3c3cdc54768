//! Hunt progress tracking: the state machine and its async driver.

pub mod config;
pub mod driver;
pub mod snapshot;
pub mod state;

pub use config::SessionConfig;
pub use driver::{ActiveHunt, ActiveHuntHandle, ScanAck, SessionUpdates};
pub use snapshot::{Applied, CompletionSummary, Proximity, SessionPhase, SessionSnapshot};
pub use state::{HuntSession, SessionEvent};
