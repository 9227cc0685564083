//! Canonical compass directions and the synonym table used to read them.
//!
//! Players type directions in many shapes ("north", "N", "up", "forward").
//! [`normalize_direction`] folds every accepted token onto one of the four
//! [`CardinalDirection`]s; anything else is rejected rather than guessed.

use crate::error::{ErrorSeverity, GameError};

/// Error returned when a token is not part of the synonym table.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DirectionError {
    #[error("'{0}' isn't a direction I know")]
    Unrecognized(String),
}

impl GameError for DirectionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Unrecognized(_) => "DIRECTION_UNRECOGNIZED",
        }
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CardinalDirection {
    North,
    South,
    East,
    West,
}

impl CardinalDirection {
    /// Every direction, in the order exits are listed and explored.
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::North,
        CardinalDirection::South,
        CardinalDirection::East,
        CardinalDirection::West,
    ];

    /// Grid offset of one step in this direction. North grows `y`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            CardinalDirection::North => (0, 1),
            CardinalDirection::South => (0, -1),
            CardinalDirection::East => (1, 0),
            CardinalDirection::West => (-1, 0),
        }
    }

    /// Alternate spellings accepted for this direction (lowercase).
    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            CardinalDirection::North => &["n", "up", "u", "forward", "f"],
            CardinalDirection::South => &["s", "down", "d", "back", "b"],
            CardinalDirection::East => &["e", "right", "r"],
            CardinalDirection::West => &["w", "left", "l"],
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            CardinalDirection::North => CardinalDirection::South,
            CardinalDirection::South => CardinalDirection::North,
            CardinalDirection::East => CardinalDirection::West,
            CardinalDirection::West => CardinalDirection::East,
        }
    }

    /// Lowercase canonical key, as stored in exit tables.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl core::str::FromStr for CardinalDirection {
    type Err = DirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize_direction(s)
    }
}

/// Maps a raw, case-insensitive token onto its canonical direction.
///
/// Matching is exact after trimming and lowercasing; there is no prefix or
/// fuzzy matching.
pub fn normalize_direction(token: &str) -> Result<CardinalDirection, DirectionError> {
    let key = token.trim().to_lowercase();
    CardinalDirection::ALL
        .into_iter()
        .find(|direction| direction.as_str() == key || direction.synonyms().contains(&key.as_str()))
        .ok_or_else(|| DirectionError::Unrecognized(token.trim().to_string()))
}
