use crate::direction::CardinalDirection;
use crate::error::{ErrorSeverity, GameError};
use crate::level::LevelError;

use super::machine::Phase;

/// Player mistakes while in the `playing` phase.
///
/// The display text is what the player sees in the status block.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandError {
    #[error("You can't move {0}, see above for the directions you can move!")]
    UnrecognizedDirection(String),

    #[error("You can't move {0}, see above for the directions you can move!")]
    ExitNotFound(CardinalDirection),

    #[error("{item} isn't in {room}! Make sure you spelled it correctly!")]
    ItemNotPresent { item: String, room: String },

    #[error("You already have this.")]
    ItemAlreadyHeld(String),

    #[error("You need a direction!")]
    MissingDirection,

    #[error("You can't pick up thin air. Include the item name (ex. get fish tacos).")]
    MissingItem,

    #[error("You need a destination! Include a room name (ex. path keep).")]
    MissingDestination,

    #[error("Error: Invalid command. Type 'help' if you need assistance.")]
    UnknownCommand(String),
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnrecognizedDirection(_) => "COMMAND_UNRECOGNIZED_DIRECTION",
            Self::ExitNotFound(_) => "COMMAND_EXIT_NOT_FOUND",
            Self::ItemNotPresent { .. } => "COMMAND_ITEM_NOT_PRESENT",
            Self::ItemAlreadyHeld(_) => "COMMAND_ITEM_ALREADY_HELD",
            Self::MissingDirection => "COMMAND_MISSING_DIRECTION",
            Self::MissingItem => "COMMAND_MISSING_ITEM",
            Self::MissingDestination => "COMMAND_MISSING_DESTINATION",
            Self::UnknownCommand(_) => "COMMAND_UNKNOWN",
        }
    }
}

/// Failures that stop a session from processing further input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionError {
    #[error("current room '{0}' is missing from the session's level")]
    CurrentRoomMissing(String),

    #[error("room '{room}' has an exit to '{target}', which does not exist")]
    GraphConsistency { room: String, target: String },

    #[error("session has ended")]
    Terminated,

    #[error("no next level has been staged")]
    NoStagedLevel,

    #[error("cannot {operation} while in the {phase} phase")]
    UnexpectedPhase {
        phase: Phase,
        operation: String,
    },

    #[error("invalid level: {0}")]
    InvalidLevel(#[from] LevelError),
}

impl GameError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CurrentRoomMissing(_) | Self::GraphConsistency { .. } | Self::Terminated => {
                ErrorSeverity::Fatal
            }
            Self::NoStagedLevel | Self::UnexpectedPhase { .. } => ErrorSeverity::Internal,
            Self::InvalidLevel(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CurrentRoomMissing(_) => "SESSION_CURRENT_ROOM_MISSING",
            Self::GraphConsistency { .. } => "SESSION_GRAPH_CONSISTENCY",
            Self::Terminated => "SESSION_TERMINATED",
            Self::NoStagedLevel => "SESSION_NO_STAGED_LEVEL",
            Self::UnexpectedPhase { .. } => "SESSION_UNEXPECTED_PHASE",
            Self::InvalidLevel(_) => "SESSION_INVALID_LEVEL",
        }
    }
}
