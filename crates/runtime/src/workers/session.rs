//! Session worker that owns one player's [`game_core::Session`].
//!
//! Receives commands from [`SessionHandle`](crate::SessionHandle), applies
//! input lines, resolves level requests through the [`LevelCatalog`], and
//! publishes [`SessionEvent`] notifications.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use game_core::{ErrorSeverity, LevelRequest, RenderedStatus, Session, Step};

use crate::api::{LevelId, Result, RuntimeError, SessionId, SessionSnapshot};
use crate::catalog::LevelCatalog;
use crate::events::{EventBus, SessionEvent};

/// Commands that can be sent to a session worker
pub enum Command {
    /// Apply one raw input line.
    Submit {
        input: String,
        reply: oneshot::Sender<Result<Step>>,
    },
    /// Render the current phase without consuming input.
    Render {
        reply: oneshot::Sender<Result<RenderedStatus>>,
    },
    /// Query the observable session state (read-only).
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    /// Stop the worker and discard the session.
    Close { reply: oneshot::Sender<()> },
}

/// Background task that processes one session's commands in arrival order.
pub struct SessionWorker {
    id: SessionId,
    level: LevelId,
    pending_level: Option<LevelId>,
    unresolved: Option<u32>,
    session: Session,
    catalog: Arc<LevelCatalog>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SessionWorker {
    pub fn new(
        id: SessionId,
        level: LevelId,
        session: Session,
        catalog: Arc<LevelCatalog>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            id,
            level,
            pending_level: None,
            unresolved: None,
            session,
            catalog,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    ///
    /// Ends on [`Command::Close`] or once every handle is dropped.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    if !self.handle_command(cmd).await {
                        break;
                    }
                }
                else => break,
            }
        }

        debug!(target: "runtime::session", session = %self.id, "Session worker stopped");
        self.event_bus
            .publish(SessionEvent::Closed { session: self.id });
    }

    /// Returns `false` when the worker should stop.
    async fn handle_command(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Submit { input, reply } => {
                let result = self.submit(&input).await;
                let _ = reply.send(result);
                true
            }
            Command::Render { reply } => {
                let result = self.session.render().map_err(Into::into);
                let _ = reply.send(result);
                true
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
                true
            }
            Command::Close { reply } => {
                let _ = reply.send(());
                false
            }
        }
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(self.id, &self.level, &self.session)
    }

    async fn submit(&mut self, input: &str) -> Result<Step> {
        let was_over = self.session.is_game_over();
        let result = self.apply(input).await;

        match &result {
            Ok(step) => {
                self.event_bus.publish(SessionEvent::Stepped {
                    session: self.id,
                    phase: step.status.phase,
                    room: self.session.current_room().to_string(),
                });
                if self.session.is_game_over() && !was_over {
                    info!(
                        target: "runtime::session",
                        session = %self.id,
                        outcome = ?self.session.outcome(),
                        "Game over"
                    );
                    self.event_bus.publish(SessionEvent::Ended {
                        session: self.id,
                        outcome: self.session.outcome(),
                    });
                }
            }
            Err(e) => {
                let fatal = e.severity() == ErrorSeverity::Fatal;
                if fatal {
                    error!(
                        target: "runtime::session",
                        session = %self.id,
                        error = %e,
                        "Session failed"
                    );
                } else {
                    warn!(
                        target: "runtime::session",
                        session = %self.id,
                        error = %e,
                        "Command rejected"
                    );
                }
                self.event_bus.publish(SessionEvent::Failed {
                    session: self.id,
                    error: e.to_string(),
                    fatal,
                });
            }
        }

        match self.snapshot().to_json() {
            Ok(json) => debug!(target: "runtime::session", snapshot = %json, "Session state"),
            Err(e) => debug!(target: "runtime::session", error = %e, "Snapshot not encodable"),
        }

        result
    }

    async fn apply(&mut self, input: &str) -> Result<Step> {
        if let Some(completed) = self.unresolved.filter(|_| input.trim().is_empty()) {
            match self.resolve_next(completed).await {
                Ok(Handoff::Staged) => {}
                Ok(Handoff::Concluded(status)) => {
                    return Ok(Step {
                        status,
                        request: None,
                    });
                }
                Err(e) => {
                    let status = self.session.render()?;
                    return Ok(self.handoff_failed(completed, status, &e));
                }
            }
        }

        let step = self.session.apply_command(input)?;
        if !self.session.has_staged_level() {
            if let Some(entered) = self.pending_level.take() {
                self.level = entered;
            }
        }

        let Some(LevelRequest::Next { completed }) = step.request else {
            return Ok(step);
        };

        match self.resolve_next(completed).await {
            Ok(Handoff::Staged) => Ok(step),
            Ok(Handoff::Concluded(status)) => Ok(Step {
                status,
                request: None,
            }),
            Err(e) => Ok(self.handoff_failed(completed, step.status, &e)),
        }
    }

    /// Stages the level after `completed`, or ends the campaign when there
    /// is none.
    async fn resolve_next(&mut self, completed: u32) -> Result<Handoff> {
        let Some(next) = self.catalog.next_after(completed).await? else {
            self.unresolved = None;
            return Ok(Handoff::Concluded(self.session.conclude_campaign()?));
        };

        let template = self.catalog.get(&next).await?;
        self.session.stage_next_level(&template)?;
        self.unresolved = None;
        info!(
            target: "runtime::session",
            session = %self.id,
            completed,
            next = %next,
            "Next level staged"
        );
        self.event_bus.publish(SessionEvent::LevelStaged {
            session: self.id,
            completed,
            next: next.clone(),
        });
        self.pending_level = Some(next);
        Ok(Handoff::Staged)
    }

    /// Keeps the session on the level-complete screen and retries the
    /// lookup on the next empty line.
    fn handoff_failed(
        &mut self,
        completed: u32,
        status: RenderedStatus,
        e: &RuntimeError,
    ) -> Step {
        error!(
            target: "runtime::session",
            session = %self.id,
            completed,
            error = %e,
            "Next level unavailable"
        );
        self.event_bus.publish(SessionEvent::Failed {
            session: self.id,
            error: e.to_string(),
            fatal: false,
        });
        self.unresolved = Some(completed);

        let body = format!("{}\n\n{}", status.body, next_level_unavailable(e));
        Step {
            status: RenderedStatus {
                phase: status.phase,
                body,
            },
            request: None,
        }
    }
}

/// Result of resolving the level after a completed one.
enum Handoff {
    Staged,
    Concluded(RenderedStatus),
}

fn next_level_unavailable(e: &RuntimeError) -> String {
    format!("The next level could not be loaded ({e}). Press enter to try again.")
}
