//! Errors raised while building or surveying a level.

use crate::direction::CardinalDirection;
use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelError {
    #[error("level has no rooms")]
    NoRooms,

    #[error("room '{0}' is defined more than once")]
    DuplicateRoom(String),

    #[error("room '{room}' has an exit {direction} to '{target}', which does not exist")]
    DanglingExit {
        room: String,
        direction: CardinalDirection,
        target: String,
    },

    #[error("room '{0}' does not exist")]
    UnknownRoom(String),

    #[error("room '{0}' has a traversal size of zero")]
    InvalidSize(String),

    #[error("room '{0}' has an empty item name")]
    EmptyItemName(String),

    #[error("required item '{0}' is not placed in any room")]
    UnknownRequiredItem(String),

    #[error("room '{room}' sits at {assigned} but an edge implies {implied} ({count} conflicts)")]
    GridConflict {
        room: String,
        assigned: String,
        implied: String,
        count: usize,
    },
}

impl GameError for LevelError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DanglingExit { .. } => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoRooms => "LEVEL_NO_ROOMS",
            Self::DuplicateRoom(_) => "LEVEL_DUPLICATE_ROOM",
            Self::DanglingExit { .. } => "LEVEL_DANGLING_EXIT",
            Self::UnknownRoom(_) => "LEVEL_UNKNOWN_ROOM",
            Self::InvalidSize(_) => "LEVEL_INVALID_SIZE",
            Self::EmptyItemName(_) => "LEVEL_EMPTY_ITEM_NAME",
            Self::UnknownRequiredItem(_) => "LEVEL_UNKNOWN_REQUIRED_ITEM",
            Self::GridConflict { .. } => "LEVEL_GRID_CONFLICT",
        }
    }
}
