//! High-level runtime orchestrator.
//!
//! The runtime owns the level catalog and one background worker per open
//! session, and exposes a builder-based API for clients to open sessions.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use game_core::{GameConfig, Progression, Session};

use crate::api::{LevelId, LevelSource, Result, RuntimeError, SessionHandle, SessionId};
use crate::catalog::LevelCatalog;
use crate::events::{Event, EventBus, SessionEvent, Topic};
use crate::workers::{Command, SessionWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Level new sessions start on. Defaults to the source's first level.
    pub start_level: Option<LevelId>,
    /// Chain levels after a boss victory (default: true)
    pub campaign: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            start_level: None,
            campaign: true,
        }
    }
}

struct WorkerSlot {
    command_tx: mpsc::Sender<Command>,
    join: JoinHandle<()>,
}

/// Main runtime that hosts game sessions
///
/// Design: Runtime owns workers and the shared level catalog.
/// [`SessionHandle`] provides a cloneable façade per session.
pub struct Runtime {
    config: RuntimeConfig,
    start_level: LevelId,
    catalog: Arc<LevelCatalog>,
    event_bus: EventBus,
    next_session: AtomicU64,
    workers: Mutex<Vec<WorkerSlot>>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn start_level(&self) -> &LevelId {
        &self.start_level
    }

    pub fn catalog(&self) -> &Arc<LevelCatalog> {
        &self.catalog
    }

    /// Subscribe to runtime events of one topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Open a new session on the start level.
    pub async fn open_session(&self) -> Result<SessionHandle> {
        let level = self.start_level.clone();
        self.open_session_on(level).await
    }

    /// Open a new session on a specific level.
    pub async fn open_session_on(&self, level: LevelId) -> Result<SessionHandle> {
        let template = self.catalog.get(&level).await?;
        let session = Session::new(&template, self.config.game_config.clone()).map_err(
            |source| RuntimeError::InvalidLevel {
                level: level.clone(),
                source,
            },
        )?;
        let session = if self.config.campaign {
            let ordinal = self
                .catalog
                .ordinal_of(&level)
                .await?
                .ok_or_else(|| RuntimeError::UnknownLevel(level.clone()))?;
            session.with_progression(Progression::Campaign { ordinal })
        } else {
            session
        };

        let id = SessionId(self.next_session.fetch_add(1, Ordering::Relaxed));
        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);

        self.event_bus.publish(SessionEvent::Opened {
            session: id,
            level: level.clone(),
        });

        let worker = SessionWorker::new(
            id,
            level.clone(),
            session,
            Arc::clone(&self.catalog),
            command_rx,
            self.event_bus.clone(),
        );
        let join = tokio::spawn(async move {
            worker.run().await;
        });

        let mut workers = self.workers.lock().await;
        workers.retain(|slot| !slot.join.is_finished());
        workers.push(WorkerSlot {
            command_tx: command_tx.clone(),
            join,
        });

        info!(target: "runtime", session = %id, level = %level, "Session opened");
        Ok(SessionHandle::new(id, command_tx, self.event_bus.clone()))
    }

    /// Number of session workers still running.
    pub async fn active_sessions(&self) -> usize {
        let workers = self.workers.lock().await;
        workers.iter().filter(|slot| !slot.join.is_finished()).count()
    }

    /// Shutdown the runtime gracefully
    ///
    /// Every session finishes the commands already queued, then stops.
    pub async fn shutdown(self) -> Result<()> {
        let workers = self.workers.into_inner();
        debug!(target: "runtime", workers = workers.len(), "Shutting down");

        for slot in &workers {
            let (reply_tx, _reply_rx) = oneshot::channel();
            // A worker that already stopped has dropped its receiver.
            let _ = slot.command_tx.send(Command::Close { reply: reply_tx }).await;
        }

        for slot in workers {
            slot.join.await.map_err(RuntimeError::WorkerJoin)?;
        }

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    source: Option<Arc<dyn LevelSource>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            source: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the game rules configuration
    pub fn game_config(mut self, game_config: GameConfig) -> Self {
        self.config.game_config = game_config;
        self
    }

    /// Set required level source
    pub fn source(mut self, source: impl LevelSource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Start new sessions on `level` instead of the source's first level
    pub fn start_level(mut self, level: impl Into<LevelId>) -> Self {
        self.config.start_level = Some(level.into());
        self
    }

    /// Build the runtime
    ///
    /// The start level is loaded and validated here so a broken level fails
    /// before any session opens.
    pub async fn build(self) -> Result<Runtime> {
        let source = self.source.ok_or(RuntimeError::MissingSource)?;
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let catalog = Arc::new(LevelCatalog::new(
            source,
            self.config.game_config.clone(),
            event_bus.clone(),
        ));

        let start_level = match &self.config.start_level {
            Some(level) => level.clone(),
            None => catalog.first_level().await?,
        };
        catalog.get(&start_level).await?;

        Ok(Runtime {
            config: self.config,
            start_level,
            catalog,
            event_bus,
            next_session: AtomicU64::new(1),
            workers: Mutex::new(Vec::new()),
        })
    }
}
