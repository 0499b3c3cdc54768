use std::sync::Arc;

use campus_hunt_core::models::LocationSample;
use campus_hunt_core::session::{ActiveHuntHandle, ScanAck, SessionSnapshot, SessionUpdates};
use tokio::sync::watch;

use crate::records::{CompletionRecord, SessionSnapshotRecord};

/// Implemented by the host screen to render session progress
#[uniffi::export(with_foreign)]
pub trait SessionObserver: Send + Sync {
    /// Called with the latest state after every change
    fn on_update(&self, snapshot: SessionSnapshotRecord);

    /// Called once, when the last clue is found
    fn on_complete(&self, summary: CompletionRecord);
}

#[derive(uniffi::Object)]
pub struct SessionHandle {
    handle: ActiveHuntHandle,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    pub(crate) fn new(handle: ActiveHuntHandle, snapshots: watch::Receiver<SessionSnapshot>) -> Self {
        Self { handle, snapshots }
    }
}

#[uniffi::export]
impl SessionHandle {
    pub fn hunt_id(&self) -> String {
        self.handle.hunt_id().to_string()
    }

    pub fn dismiss_intro(&self) {
        self.handle.dismiss_intro();
    }

    pub fn show_intro(&self) {
        self.handle.show_intro();
    }

    pub fn update_location(&self, latitude: f64, longitude: f64) {
        self.handle
            .update_location(LocationSample::now(latitude, longitude));
    }

    /// Returns whether scanning started; the clue advances once the scan finishes
    pub async fn attempt_scan(&self) -> bool {
        self.handle.attempt_scan().await == ScanAck::Started
    }

    pub fn cancel_scan(&self) {
        self.handle.cancel_scan();
    }

    pub fn snapshot(&self) -> SessionSnapshotRecord {
        (*self.snapshots.borrow()).into()
    }

    /// Leave the hunt. Any scan in flight is cancelled.
    pub fn dispose(&self) {
        self.handle.dispose();
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.handle.dispose();
    }
}

/// Relay session output to the host until the session ends.
///
/// `last` is the snapshot the observer has already been given.
pub(crate) async fn forward_updates(
    updates: SessionUpdates,
    observer: Arc<dyn SessionObserver>,
    mut last: SessionSnapshot,
) {
    let SessionUpdates {
        mut snapshots,
        mut completion,
    } = updates;

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                let current = *snapshots.borrow_and_update();
                if current != last {
                    last = current;
                    observer.on_update(current.into());
                }
                if changed.is_err() {
                    // Session task ended; a summary may still be waiting
                    if let Ok(summary) = completion.try_recv() {
                        observer.on_complete(summary.into());
                    }
                    break;
                }
            }
            summary = &mut completion => {
                // The final snapshot is published just before the summary
                let current = *snapshots.borrow_and_update();
                if current != last {
                    observer.on_update(current.into());
                }
                if let Ok(summary) = summary {
                    observer.on_complete(summary.into());
                }
                break;
            }
        }
    }
}
