//! Event types for different topics.

use serde::{Deserialize, Serialize};

use game_core::{Outcome, Phase};

use crate::api::{LevelId, SessionId};

/// Session lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A session started on `level`.
    Opened { session: SessionId, level: LevelId },

    /// An input line was processed.
    Stepped {
        session: SessionId,
        phase: Phase,
        room: String,
    },

    /// The level after `completed` is ready and entered on the next empty line.
    LevelStaged {
        session: SessionId,
        completed: u32,
        next: LevelId,
    },

    /// The game reached its final phase.
    Ended {
        session: SessionId,
        outcome: Option<Outcome>,
    },

    /// A command failed with a runtime error.
    Failed {
        session: SessionId,
        error: String,
        fatal: bool,
    },

    /// The session worker stopped and its state was discarded.
    Closed { session: SessionId },
}

impl SessionEvent {
    pub fn session(&self) -> SessionId {
        match self {
            Self::Opened { session, .. }
            | Self::Stepped { session, .. }
            | Self::LevelStaged { session, .. }
            | Self::Ended { session, .. }
            | Self::Failed { session, .. }
            | Self::Closed { session } => *session,
        }
    }
}

/// Level catalog events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelEvent {
    /// A level template was validated and cached.
    Loaded {
        level: LevelId,
        rooms: usize,
        unreachable: Vec<String>,
        conflicts: usize,
    },

    /// A level failed to load or validate.
    Rejected { level: LevelId, error: String },
}
