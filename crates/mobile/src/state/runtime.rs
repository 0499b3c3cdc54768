use std::sync::Arc;

use campus_hunt_core::session::{ActiveHunt, SessionConfig};
use campus_hunt_core::suggest::{GeminiSuggester, SuggesterConfig, suggest_or_empty};
use tokio::runtime::Runtime;

use crate::records::{HuntApiError, HuntDraftRecord};
use crate::state::catalog::CatalogState;
use crate::state::session::{SessionHandle, SessionObserver, forward_updates};

/// Owns the tokio runtime that session timers and network calls run on
#[derive(uniffi::Object)]
pub struct HuntRuntime {
    runtime: Runtime,
    suggester: Arc<GeminiSuggester>,
}

#[uniffi::export]
impl HuntRuntime {
    /// `suggestion_api_key` falls back to the `API_KEY` environment variable when
    /// absent. An empty key disables suggestions.
    #[uniffi::constructor]
    pub fn new(suggestion_api_key: Option<String>) -> Result<Self, HuntApiError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("campus-hunt")
            .enable_all()
            .build()
            .map_err(|e| HuntApiError::Unavailable(e.to_string()))?;

        let config = match suggestion_api_key {
            Some(key) => SuggesterConfig::with_api_key(Some(key)),
            None => SuggesterConfig::from_env(),
        };

        Ok(Self {
            runtime,
            suggester: Arc::new(GeminiSuggester::new(config)),
        })
    }

    /// Start playing a hunt from `catalog`.
    ///
    /// `config_json` may override session settings, e.g. `{"scan_duration_ms": 1500}`.
    pub fn start_session(
        &self,
        catalog: Arc<CatalogState>,
        hunt_id: String,
        config_json: Option<String>,
        observer: Arc<dyn SessionObserver>,
    ) -> Result<Arc<SessionHandle>, HuntApiError> {
        let hunt = catalog.hunt(&hunt_id)?;
        let config = match config_json {
            Some(json) => SessionConfig::from_json(&json)?,
            None => SessionConfig::default(),
        };

        let _guard = self.runtime.enter();
        let (handle, mut updates) = ActiveHunt::spawn(hunt, config);
        let initial = *updates.snapshots.borrow_and_update();
        observer.on_update(initial.into());

        let snapshots = updates.snapshots.clone();
        self.runtime.spawn(forward_updates(updates, observer, initial));

        tracing::info!(hunt = %hunt_id, "hunt session started");
        Ok(Arc::new(SessionHandle::new(handle, snapshots)))
    }

    /// Hunt ideas for `topic`. Empty when the service is unconfigured or fails.
    pub async fn suggest_hunts(&self, topic: String) -> Vec<HuntDraftRecord> {
        let suggester = Arc::clone(&self.suggester);
        let task = self
            .runtime
            .spawn(async move { suggest_or_empty(suggester.as_ref(), &topic).await });

        match task.await {
            Ok(drafts) => drafts.into_iter().map(HuntDraftRecord::from).collect(),
            Err(e) => {
                tracing::warn!(error = %e, "suggestion task failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;
    use crate::records::{CompletionRecord, SessionPhaseRecord, SessionSnapshotRecord};

    #[derive(Default)]
    struct Recorder {
        updates: Mutex<Vec<SessionSnapshotRecord>>,
        completions: Mutex<Vec<CompletionRecord>>,
    }

    impl SessionObserver for Recorder {
        fn on_update(&self, snapshot: SessionSnapshotRecord) {
            self.updates.lock().unwrap().push(snapshot);
        }

        fn on_complete(&self, summary: CompletionRecord) {
            self.completions.lock().unwrap().push(summary);
        }
    }

    fn fast_config() -> Option<String> {
        Some(r#"{"scan_duration_ms": 20}"#.into())
    }

    #[test]
    fn test_unknown_hunt_is_reported() {
        let runtime = HuntRuntime::new(None).unwrap();
        let result = runtime.start_session(
            Arc::new(CatalogState::new()),
            "missing".into(),
            None,
            Arc::new(Recorder::default()),
        );
        assert!(matches!(result, Err(HuntApiError::NotFound(_))));
    }

    #[test]
    fn test_bad_config_is_reported() {
        let runtime = HuntRuntime::new(None).unwrap();
        let result = runtime.start_session(
            Arc::new(CatalogState::new()),
            "1".into(),
            Some("{".into()),
            Arc::new(Recorder::default()),
        );
        assert!(matches!(result, Err(HuntApiError::InvalidInput(_))));
    }

    #[test]
    fn test_session_reports_to_observer() {
        let runtime = HuntRuntime::new(None).unwrap();
        let recorder = Arc::new(Recorder::default());
        let session = runtime
            .start_session(
                Arc::new(CatalogState::new()),
                "2".into(),
                fast_config(),
                recorder.clone(),
            )
            .unwrap();

        session.dismiss_intro();
        session.update_location(40.7425, -74.1825);
        assert!(runtime.runtime.block_on(session.attempt_scan()));

        std::thread::sleep(Duration::from_millis(300));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase, SessionPhaseRecord::HuntComplete);
        assert_eq!(snapshot.current_clue_index, 1);
        assert_eq!(snapshot.progress_percent, 100.0);

        let updates = recorder.updates.lock().unwrap();
        assert_eq!(updates.first().unwrap().phase, SessionPhaseRecord::AwaitingIntro);
        assert_eq!(updates.last().unwrap().phase, SessionPhaseRecord::HuntComplete);

        let completions = recorder.completions.lock().unwrap();
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].hunt_id, "2");
        assert_eq!(completions[0].clue_count, 1);
    }

    #[test]
    fn test_empty_hunt_completes_on_start() {
        let runtime = HuntRuntime::new(None).unwrap();
        let recorder = Arc::new(Recorder::default());
        let session = runtime
            .start_session(Arc::new(CatalogState::new()), "3".into(), None, recorder.clone())
            .unwrap();

        std::thread::sleep(Duration::from_millis(100));

        assert_eq!(session.snapshot().phase, SessionPhaseRecord::HuntComplete);
        assert_eq!(recorder.completions.lock().unwrap().len(), 1);
        assert!(!runtime.runtime.block_on(session.attempt_scan()));
    }

    #[test]
    fn test_dispose_stops_pending_scan() {
        let runtime = HuntRuntime::new(None).unwrap();
        let recorder = Arc::new(Recorder::default());
        let session = runtime
            .start_session(Arc::new(CatalogState::new()), "1".into(), fast_config(), recorder.clone())
            .unwrap();

        session.dismiss_intro();
        assert!(runtime.runtime.block_on(session.attempt_scan()));
        session.dispose();

        std::thread::sleep(Duration::from_millis(200));
        assert_eq!(session.snapshot().current_clue_index, 0);
        assert!(recorder.completions.lock().unwrap().is_empty());
    }

    #[test]
    fn test_suggestions_without_key_are_empty() {
        let runtime = HuntRuntime::new(Some(String::new())).unwrap();
        let drafts = runtime.runtime.block_on(runtime.suggest_hunts("art".into()));
        assert!(drafts.is_empty());
    }
}
