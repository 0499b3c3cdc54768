//! The per-player hunt progress state machine.
//!
//! ```text
//! AwaitingIntro ──dismiss_intro──▶ Searching ──attempt_scan──▶ Scanning
//!       ▲                            │  ▲                          │
//!       └────────show_intro──────────┘  └──elapsed (more clues)────┤
//!                                       └──cancel_scan─────────────┤
//!                                                                  ▼
//!                                     HuntComplete ◀──elapsed (last clue)
//! ```
//!
//! The session is a plain value: it never sleeps or spawns. Whoever owns it feeds
//! `ScanElapsed` once the scan duration has passed (see [`crate::session::driver`]).
//! Scans always succeed after the delay. Distance is feedback for the player and
//! never gates a scan.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::{Clue, Hunt, LocationSample};
use crate::session::config::SessionConfig;
use crate::session::snapshot::{
    Applied, CompletionSummary, Proximity, SessionPhase, SessionSnapshot,
};
use crate::spatial::distance_between;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionEvent {
    DismissIntro,
    ShowIntro,
    LocationUpdate(LocationSample),
    AttemptScan,
    /// The in-flight scan's delay has passed
    ScanElapsed,
    CancelScan,
}

#[derive(Clone, Debug)]
pub struct HuntSession {
    hunt: Arc<Hunt>,
    config: SessionConfig,
    phase: SessionPhase,
    current_clue_index: usize,
    last_location: Option<LocationSample>,
    last_distance_m: Option<f64>,
    started_at: DateTime<Utc>,
}

impl HuntSession {
    /// Start playing `hunt`. A hunt without clues is complete immediately.
    pub fn new(hunt: Arc<Hunt>, config: SessionConfig) -> Self {
        let phase = if hunt.clues.is_empty() {
            SessionPhase::HuntComplete
        } else {
            SessionPhase::AwaitingIntro
        };

        tracing::debug!(hunt = %hunt.id, clues = hunt.clues.len(), ?phase, "hunt session started");

        Self {
            hunt,
            config,
            phase,
            current_clue_index: 0,
            last_location: None,
            last_distance_m: None,
            started_at: Utc::now(),
        }
    }

    pub fn hunt(&self) -> &Hunt {
        &self.hunt
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn current_clue_index(&self) -> usize {
        self.current_clue_index
    }

    /// The clue being searched for, `None` once the hunt is complete
    pub fn current_clue(&self) -> Option<&Clue> {
        self.hunt.clue(self.current_clue_index)
    }

    pub fn last_location(&self) -> Option<&LocationSample> {
        self.last_location.as_ref()
    }

    pub fn last_distance_m(&self) -> Option<f64> {
        self.last_distance_m
    }

    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::HuntComplete
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            current_clue_index: self.current_clue_index,
            clue_count: self.hunt.clues.len(),
            distance_m: self.last_distance_m,
            proximity: Proximity::classify(self.last_distance_m, &self.config),
        }
    }

    /// The completion report, available once the hunt is complete
    pub fn completion_summary(&self) -> Option<CompletionSummary> {
        if !self.is_complete() {
            return None;
        }

        Some(CompletionSummary {
            hunt_id: self.hunt.id.clone(),
            title: self.hunt.title.clone(),
            clue_count: self.hunt.clues.len(),
            educational_content: self.hunt.educational_content.clone(),
            learn_more_link: self.hunt.learn_more_link(),
            started_at: self.started_at,
            completed_at: Utc::now(),
        })
    }

    pub fn apply(&mut self, event: SessionEvent) -> Applied {
        match event {
            SessionEvent::DismissIntro => self.dismiss_intro(),
            SessionEvent::ShowIntro => self.show_intro(),
            SessionEvent::LocationUpdate(sample) => self.update_location(sample),
            SessionEvent::AttemptScan => self.attempt_scan(),
            SessionEvent::ScanElapsed => self.finish_scan(),
            SessionEvent::CancelScan => self.cancel_scan(),
        }
    }

    pub fn dismiss_intro(&mut self) -> Applied {
        if self.phase != SessionPhase::AwaitingIntro {
            return Applied::Ignored;
        }
        self.transition(SessionPhase::Searching)
    }

    /// Re-open the clue overlay while searching
    pub fn show_intro(&mut self) -> Applied {
        if self.phase != SessionPhase::Searching {
            return Applied::Ignored;
        }
        self.transition(SessionPhase::AwaitingIntro)
    }

    /// Record the latest device position and recompute the distance to the current clue.
    ///
    /// Samples arriving after completion are dropped.
    pub fn update_location(&mut self, sample: LocationSample) -> Applied {
        let Some(clue) = self.current_clue() else {
            return Applied::Ignored;
        };

        let distance = distance_between(sample.position(), clue.position());
        tracing::trace!(
            hunt = %self.hunt.id,
            clue = self.current_clue_index,
            distance_m = distance,
            "location update"
        );

        self.last_location = Some(sample);
        self.last_distance_m = Some(distance);
        Applied::Changed(self.snapshot())
    }

    /// Begin a scan. Only accepted while searching, so at most one scan is ever in flight.
    pub fn attempt_scan(&mut self) -> Applied {
        if self.phase != SessionPhase::Searching || self.current_clue().is_none() {
            tracing::debug!(hunt = %self.hunt.id, phase = %self.phase, "scan attempt ignored");
            return Applied::Ignored;
        }
        self.transition(SessionPhase::Scanning)
    }

    /// Abandon the in-flight scan without advancing
    pub fn cancel_scan(&mut self) -> Applied {
        if self.phase != SessionPhase::Scanning {
            return Applied::Ignored;
        }
        self.transition(SessionPhase::Searching)
    }

    /// Complete the in-flight scan: advance to the next clue, or finish the hunt.
    pub fn finish_scan(&mut self) -> Applied {
        if self.phase != SessionPhase::Scanning {
            return Applied::Ignored;
        }

        let clue_count = self.hunt.clues.len();
        if self.current_clue_index + 1 < clue_count {
            self.current_clue_index += 1;
            self.last_distance_m = self.current_clue().zip(self.last_location).map(
                |(clue, sample)| distance_between(sample.position(), clue.position()),
            );
            tracing::debug!(
                hunt = %self.hunt.id,
                clue = self.current_clue_index,
                of = clue_count,
                "clue found"
            );
            return self.transition(SessionPhase::Searching);
        }

        self.current_clue_index = clue_count;
        self.last_distance_m = None;
        self.phase = SessionPhase::HuntComplete;
        tracing::debug!(hunt = %self.hunt.id, clues = clue_count, "hunt complete");

        match self.completion_summary() {
            Some(summary) => Applied::Completed(self.snapshot(), summary),
            None => Applied::Changed(self.snapshot()),
        }
    }

    fn transition(&mut self, to: SessionPhase) -> Applied {
        tracing::debug!(hunt = %self.hunt.id, from = %self.phase, %to, "session transition");
        self.phase = to;
        Applied::Changed(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::HuntIdentifier;
    use crate::models::Difficulty;

    fn hunt_with(clues: Vec<Clue>) -> Arc<Hunt> {
        Arc::new(Hunt {
            id: HuntIdentifier::new("test"),
            title: "Test Hunt".into(),
            description: "A hunt for tests".into(),
            difficulty: Difficulty::Easy,
            duration: 10,
            participants: 0,
            rating: 0.0,
            image: None,
            trending: false,
            clues,
            educational_content: Some("Some history".into()),
            educational_link: None,
        })
    }

    fn two_clue_session() -> HuntSession {
        HuntSession::new(
            hunt_with(vec![
                Clue::new("First", 40.7420, -74.1820),
                Clue::new("Second", 40.7422, -74.1818),
            ]),
            SessionConfig::default(),
        )
    }

    fn assert_completion_invariant(session: &HuntSession) {
        assert_eq!(
            session.phase() == SessionPhase::HuntComplete,
            session.current_clue_index() == session.hunt().clues.len()
        );
    }

    #[test]
    fn test_two_clue_walkthrough() {
        let mut session = two_clue_session();
        assert_eq!(session.phase(), SessionPhase::AwaitingIntro);

        assert!(!session.dismiss_intro().is_ignored());
        assert_eq!(session.phase(), SessionPhase::Searching);
        assert_eq!(session.current_clue_index(), 0);

        session.update_location(LocationSample::now(40.7420, -74.1820));
        assert!(session.last_distance_m().unwrap() < 0.5);

        assert!(!session.attempt_scan().is_ignored());
        assert_eq!(session.phase(), SessionPhase::Scanning);

        session.finish_scan();
        assert_eq!(session.phase(), SessionPhase::Searching);
        assert_eq!(session.current_clue_index(), 1);

        session.attempt_scan();
        let applied = session.finish_scan();
        assert_eq!(session.phase(), SessionPhase::HuntComplete);
        assert_eq!(session.current_clue_index(), 2);

        let Applied::Completed(snapshot, summary) = applied else {
            panic!("expected completion");
        };
        assert!(snapshot.is_complete());
        assert_eq!(summary.clue_count, 2);
        assert_eq!(summary.hunt_id, HuntIdentifier::new("test"));
        assert!(summary.learn_more_link.is_some());
        assert_completion_invariant(&session);
    }

    #[test]
    fn test_advance_recomputes_distance_against_next_clue() {
        let mut session = two_clue_session();
        session.dismiss_intro();
        session.update_location(LocationSample::now(40.7420, -74.1820));
        let first = session.last_distance_m().unwrap();

        session.attempt_scan();
        session.finish_scan();

        let second = session.last_distance_m().unwrap();
        assert!(first < 0.5);
        assert!(second > 20.0 && second < 40.0, "got {second}");
    }

    #[test]
    fn test_advance_without_location_keeps_distance_unknown() {
        let mut session = two_clue_session();
        session.dismiss_intro();
        session.attempt_scan();
        session.finish_scan();
        assert_eq!(session.last_distance_m(), None);
        assert_eq!(session.snapshot().proximity, Proximity::Unknown);
    }

    #[test]
    fn test_second_scan_attempt_is_rejected() {
        let mut session = two_clue_session();
        session.dismiss_intro();

        assert!(!session.attempt_scan().is_ignored());
        assert!(session.attempt_scan().is_ignored());

        session.finish_scan();
        // A stray second elapse must not advance again
        assert!(session.finish_scan().is_ignored());
        assert_eq!(session.current_clue_index(), 1);
    }

    #[test]
    fn test_scan_rejected_outside_searching() {
        let mut session = two_clue_session();
        assert!(session.attempt_scan().is_ignored());
        assert_eq!(session.phase(), SessionPhase::AwaitingIntro);
    }

    #[test]
    fn test_scan_succeeds_regardless_of_distance() {
        let mut session = two_clue_session();
        session.dismiss_intro();
        // Several kilometres away
        session.update_location(LocationSample::now(40.80, -74.10));
        assert_eq!(session.snapshot().proximity, Proximity::Far);

        session.attempt_scan();
        session.finish_scan();
        assert_eq!(session.current_clue_index(), 1);
    }

    #[test]
    fn test_cancel_scan_keeps_index() {
        let mut session = two_clue_session();
        session.dismiss_intro();
        session.attempt_scan();

        assert!(!session.cancel_scan().is_ignored());
        assert_eq!(session.phase(), SessionPhase::Searching);
        assert_eq!(session.current_clue_index(), 0);
        assert!(session.finish_scan().is_ignored());
        assert!(session.cancel_scan().is_ignored());
    }

    #[test]
    fn test_show_intro_only_while_searching() {
        let mut session = two_clue_session();
        assert!(session.show_intro().is_ignored());

        session.dismiss_intro();
        assert!(!session.show_intro().is_ignored());
        assert_eq!(session.phase(), SessionPhase::AwaitingIntro);
        assert!(session.attempt_scan().is_ignored());
    }

    #[test]
    fn test_location_accepted_behind_intro() {
        let mut session = two_clue_session();
        assert!(!session.update_location(LocationSample::now(40.7420, -74.1820)).is_ignored());
        assert_eq!(session.phase(), SessionPhase::AwaitingIntro);
        assert!(session.last_distance_m().is_some());
    }

    #[test]
    fn test_empty_hunt_is_complete_on_start() {
        let session = HuntSession::new(hunt_with(vec![]), SessionConfig::default());
        assert_eq!(session.phase(), SessionPhase::HuntComplete);
        assert_eq!(session.current_clue_index(), 0);
        assert!(session.current_clue().is_none());
        assert!(session.completion_summary().is_some());
        assert_completion_invariant(&session);
    }

    #[test]
    fn test_events_after_completion_are_ignored() {
        let mut session = HuntSession::new(hunt_with(vec![]), SessionConfig::default());
        let events = [
            SessionEvent::DismissIntro,
            SessionEvent::ShowIntro,
            SessionEvent::LocationUpdate(LocationSample::now(40.0, -74.0)),
            SessionEvent::AttemptScan,
            SessionEvent::ScanElapsed,
            SessionEvent::CancelScan,
        ];
        for event in events {
            assert!(session.apply(event).is_ignored(), "{event:?}");
        }
        assert_eq!(session.last_distance_m(), None);
    }

    #[test]
    fn test_progress_is_monotonic_under_arbitrary_events() {
        let clues = (0..5)
            .map(|i| Clue::new(format!("clue {i}"), 40.742 + i as f64 * 1e-4, -74.182))
            .collect();
        let mut session = HuntSession::new(hunt_with(clues), SessionConfig::default());

        let script = [
            SessionEvent::AttemptScan,
            SessionEvent::ScanElapsed,
            SessionEvent::DismissIntro,
            SessionEvent::ScanElapsed,
            SessionEvent::AttemptScan,
            SessionEvent::AttemptScan,
            SessionEvent::LocationUpdate(LocationSample::now(40.742, -74.182)),
            SessionEvent::ScanElapsed,
            SessionEvent::ScanElapsed,
            SessionEvent::ShowIntro,
            SessionEvent::AttemptScan,
            SessionEvent::DismissIntro,
            SessionEvent::AttemptScan,
            SessionEvent::CancelScan,
            SessionEvent::AttemptScan,
            SessionEvent::ScanElapsed,
        ];

        let mut completions = 0;
        for _ in 0..4 {
            for event in script {
                let before = session.current_clue_index();
                if let Applied::Completed(..) = session.apply(event) {
                    completions += 1;
                }
                let after = session.current_clue_index();
                assert!(after >= before && after - before <= 1);
                assert_completion_invariant(&session);
            }
        }

        assert!(session.is_complete());
        assert_eq!(completions, 1);
    }
}
