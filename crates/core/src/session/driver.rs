//! Runs a [`HuntSession`] on a tokio task.
//!
//! The task is the only writer: handle calls are queued and applied one at a time,
//! and the scan timer lives inside the same task. When the task ends (dispose, every
//! handle dropped, or hunt complete) the timer is dropped with it, so a pending scan
//! can never touch a discarded session.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::identifiers::HuntIdentifier;
use crate::location::LocationProvider;
use crate::models::{Hunt, LocationSample};
use crate::session::config::SessionConfig;
use crate::session::snapshot::{Applied, CompletionSummary, SessionSnapshot};
use crate::session::state::{HuntSession, SessionEvent};

/// Immediate answer to a scan attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanAck {
    /// The scan timer is running; the clue advances when it elapses
    Started,
    /// Not searching (another scan in flight, overlay open, hunt over or session gone)
    Rejected,
}

enum Command {
    Event(SessionEvent),
    AttemptScan(oneshot::Sender<ScanAck>),
    Dispose,
}

/// Receiving side of a running session
pub struct SessionUpdates {
    /// Latest state, replaced after every change
    pub snapshots: watch::Receiver<SessionSnapshot>,
    /// Fires once when the hunt completes. Closed without a value if the session
    /// ends any other way.
    pub completion: oneshot::Receiver<CompletionSummary>,
}

impl SessionUpdates {
    pub fn current(&self) -> SessionSnapshot {
        *self.snapshots.borrow()
    }

    pub async fn completed(self) -> Option<CompletionSummary> {
        self.completion.await.ok()
    }
}

/// Cheap-clone handle used by the host to feed events into a running session.
///
/// Calls made after the session ended are dropped.
#[derive(Clone)]
pub struct ActiveHuntHandle {
    hunt_id: HuntIdentifier,
    commands: mpsc::UnboundedSender<Command>,
}

impl ActiveHuntHandle {
    pub fn hunt_id(&self) -> &HuntIdentifier {
        &self.hunt_id
    }

    pub fn dismiss_intro(&self) {
        self.send(Command::Event(SessionEvent::DismissIntro));
    }

    pub fn show_intro(&self) {
        self.send(Command::Event(SessionEvent::ShowIntro));
    }

    pub fn update_location(&self, sample: LocationSample) {
        self.send(Command::Event(SessionEvent::LocationUpdate(sample)));
    }

    pub fn cancel_scan(&self) {
        self.send(Command::Event(SessionEvent::CancelScan));
    }

    /// Ask to scan. Resolves as soon as the session has accepted or rejected the
    /// attempt; the clue itself advances later, when the scan timer elapses.
    pub async fn attempt_scan(&self) -> ScanAck {
        let (reply, ack) = oneshot::channel();
        if self.commands.send(Command::AttemptScan(reply)).is_err() {
            return ScanAck::Rejected;
        }
        ack.await.unwrap_or(ScanAck::Rejected)
    }

    /// End the session, cancelling any scan in flight
    pub fn dispose(&self) {
        self.send(Command::Dispose);
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    /// Forward samples from `provider` until the session ends or the feed stops.
    /// Aborting the returned task unsubscribes.
    ///
    /// The feed only holds a weak sender, so it never keeps the session alive on its
    /// own: once every handle is dropped the next sample ends the task.
    pub fn follow(&self, provider: &dyn LocationProvider) -> JoinHandle<()> {
        let mut subscription = provider.subscribe();
        let hunt_id = self.hunt_id.clone();
        let commands = self.commands.downgrade();

        tokio::spawn(async move {
            while let Some(sample) = subscription.next().await {
                let Some(commands) = commands.upgrade() else {
                    break;
                };
                let event = Command::Event(SessionEvent::LocationUpdate(sample));
                if commands.send(event).is_err() {
                    break;
                }
            }
            tracing::trace!(hunt = %hunt_id, "location feed detached");
        })
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            tracing::trace!(hunt = %self.hunt_id, "event for ended session dropped");
        }
    }
}

/// The task that owns a [`HuntSession`]
pub struct ActiveHunt {
    session: HuntSession,
    commands: mpsc::UnboundedReceiver<Command>,
    snapshots: watch::Sender<SessionSnapshot>,
    completion: Option<oneshot::Sender<CompletionSummary>>,
}

impl ActiveHunt {
    /// Start a session for `hunt` on the current tokio runtime.
    pub fn spawn(hunt: Arc<Hunt>, config: SessionConfig) -> (ActiveHuntHandle, SessionUpdates) {
        let hunt_id = hunt.id.clone();
        let session = HuntSession::new(hunt, config);

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());
        let (completion_tx, completion_rx) = oneshot::channel();

        let task = Self {
            session,
            commands: command_rx,
            snapshots: snapshot_tx,
            completion: Some(completion_tx),
        };
        tokio::spawn(task.run());

        (
            ActiveHuntHandle {
                hunt_id,
                commands: command_tx,
            },
            SessionUpdates {
                snapshots: snapshot_rx,
                completion: completion_rx,
            },
        )
    }

    async fn run(mut self) {
        if let Some(summary) = self.session.completion_summary() {
            self.complete(summary);
            return;
        }

        let scan_timer = tokio::time::sleep(Duration::ZERO);
        tokio::pin!(scan_timer);
        let mut scan_pending = false;

        loop {
            tokio::select! {
                () = &mut scan_timer, if scan_pending => {
                    scan_pending = false;
                    let applied = self.session.apply(SessionEvent::ScanElapsed);
                    if self.publish(applied) {
                        break;
                    }
                }
                command = self.commands.recv() => {
                    let Some(command) = command else {
                        tracing::debug!(hunt = %self.session.hunt().id, "all session handles dropped");
                        break;
                    };

                    match command {
                        Command::Event(event) => {
                            let applied = self.session.apply(event);
                            if event == SessionEvent::CancelScan && !applied.is_ignored() {
                                scan_pending = false;
                            }
                            self.publish(applied);
                        }
                        Command::AttemptScan(reply) => {
                            let applied = self.session.attempt_scan();
                            let ack = if applied.is_ignored() {
                                ScanAck::Rejected
                            } else {
                                let deadline = Instant::now() + self.session.config().scan_duration();
                                scan_timer.as_mut().reset(deadline);
                                scan_pending = true;
                                ScanAck::Started
                            };
                            self.publish(applied);
                            let _ = reply.send(ack);
                        }
                        Command::Dispose => {
                            tracing::debug!(
                                hunt = %self.session.hunt().id,
                                phase = %self.session.phase(),
                                "session disposed"
                            );
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Push the outcome to observers. Returns true once the hunt is complete.
    fn publish(&mut self, applied: Applied) -> bool {
        if let Some(snapshot) = applied.snapshot() {
            self.snapshots.send_replace(*snapshot);
        }
        match applied {
            Applied::Completed(_, summary) => {
                self.complete(summary);
                true
            }
            Applied::Ignored | Applied::Changed(_) => false,
        }
    }

    fn complete(&mut self, summary: CompletionSummary) {
        if let Some(completion) = self.completion.take() {
            let _ = completion.send(summary);
        }
    }
}
