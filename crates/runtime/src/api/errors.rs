//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, level sources, and the game
//! rules so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{ErrorSeverity, GameError, LevelError, SessionError};

use super::source::LevelId;

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Boxed error produced by a [`LevelSource`](super::LevelSource).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("level '{level}' is invalid")]
    InvalidLevel {
        level: LevelId,
        #[source]
        source: LevelError,
    },

    #[error("level source failed: {context}")]
    Source {
        context: String,
        #[source]
        source: BoxError,
    },

    #[error("level source does not know level '{0}'")]
    UnknownLevel(LevelId),

    #[error("level source lists no levels")]
    NoLevels,

    #[error("runtime requires a level source to be configured before building")]
    MissingSource,

    #[error("failed to encode session snapshot")]
    Snapshot(#[from] serde_json::Error),
}

impl RuntimeError {
    pub(crate) fn source_failed(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Source {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Severity of the underlying failure.
    ///
    /// Rule errors keep their own severity; plumbing failures are internal.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Session(error) => error.severity(),
            Self::InvalidLevel { source, .. } => source.severity(),
            Self::UnknownLevel(_) | Self::NoLevels | Self::MissingSource => {
                ErrorSeverity::Validation
            }
            _ => ErrorSeverity::Internal,
        }
    }
}
