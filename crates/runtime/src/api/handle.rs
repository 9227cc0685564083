//! Cloneable façade for driving one session.
//!
//! [`SessionHandle`] hides channel plumbing and offers async helpers for
//! submitting input lines or streaming events from specific topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{RenderedStatus, Step};

use super::errors::{Result, RuntimeError};
use super::snapshot::{SessionId, SessionSnapshot};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with a session
///
/// Clones share the same session; commands from all clones are applied in
/// the order the worker receives them.
#[derive(Clone)]
pub struct SessionHandle {
    id: SessionId,
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl SessionHandle {
    pub(crate) fn new(
        id: SessionId,
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            id,
            command_tx,
            event_bus,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Apply one raw input line and return the rendered result.
    pub async fn submit(&self, input: impl Into<String>) -> Result<Step> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Submit {
                input: input.into(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Render the current screen, e.g. the intro right after opening.
    pub async fn render(&self) -> Result<RenderedStatus> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Render { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Query the observable session state
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Snapshot { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Stop the session worker. Commands queued before this one still run.
    pub async fn close(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Close { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Whether the worker behind this handle has stopped.
    pub fn is_closed(&self) -> bool {
        self.command_tx.is_closed()
    }

    /// Subscribe to events from a specific topic
    ///
    /// Session events from every session share one topic; filter on
    /// [`SessionEvent::session`](crate::SessionEvent::session).
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }
}
