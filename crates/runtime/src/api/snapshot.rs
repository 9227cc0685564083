//! Read-only views of a running session.
use std::fmt;

use serde::{Deserialize, Serialize};

use game_core::{GridPosition, Inventory, Outcome, Phase, Progression, Session};

use super::errors::Result;
use super::source::LevelId;

/// Runtime-assigned session identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Point-in-time copy of the observable session state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session: SessionId,
    pub level: LevelId,
    pub title: String,
    pub progression: Progression,
    pub phase: Phase,
    pub current_room: String,
    pub position: Option<GridPosition>,
    pub inventory: Inventory,
    pub outcome: Option<Outcome>,
    pub terminated: bool,
}

impl SessionSnapshot {
    pub(crate) fn capture(id: SessionId, level: &LevelId, session: &Session) -> Self {
        let position = session
            .level()
            .room(session.current_room())
            .and_then(|room| room.position());

        Self {
            session: id,
            level: level.clone(),
            title: session.level().title().to_string(),
            progression: session.progression(),
            phase: session.phase(),
            current_room: session.current_room().to_string(),
            position,
            inventory: session.inventory().clone(),
            outcome: session.outcome(),
            terminated: session.is_terminated(),
        }
    }

    /// Compact JSON form, as written to logs.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
