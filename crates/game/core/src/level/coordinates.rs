//! Best-effort grid layout inferred from exit directions.
//!
//! Levels are authored as plain graphs, but most of them are drawn on a
//! grid. A single breadth-first pass from the start room recovers that grid:
//! every canonical exit moves one step along its axis. Levels are not
//! required to be planar, so disagreements are collected as
//! [`GridConflict`]s instead of failing the pass.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use super::{Level, LevelError};
use crate::direction::CardinalDirection;

/// Integer grid coordinates. North is `+y`, east is `+x`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// One step from `self` in `direction`.
    pub fn step(self, direction: CardinalDirection) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A room reached again through an edge that implies a different position.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConflict {
    pub room: String,
    pub assigned: GridPosition,
    pub implied: GridPosition,
    pub from: String,
    pub direction: CardinalDirection,
}

/// Outcome of one inference pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordinateReport {
    /// Rooms never reached from the start room, sentinel exit room excluded.
    pub unreachable: BTreeSet<String>,
    pub conflicts: Vec<GridConflict>,
}

impl CoordinateReport {
    pub fn is_planar(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Converts the first conflict into a load error.
    pub fn into_conflict_error(self) -> Option<LevelError> {
        let count = self.conflicts.len();
        self.conflicts
            .into_iter()
            .next()
            .map(|conflict| LevelError::GridConflict {
                room: conflict.room,
                assigned: conflict.assigned.to_string(),
                implied: conflict.implied.to_string(),
                count,
            })
    }
}

/// Assigns grid coordinates to every room reachable from `start`.
///
/// `start` sits at the origin. Any coordinates from a previous pass are
/// cleared first, so rooms left without a position are exactly the
/// unreachable ones.
pub fn infer_coordinates(level: &mut Level, start: &str) -> Result<CoordinateReport, LevelError> {
    if !level.contains(start) {
        return Err(LevelError::UnknownRoom(start.to_string()));
    }

    for room in level.rooms.values_mut() {
        room.set_position(None);
    }

    let mut report = CoordinateReport::default();
    let mut queue = VecDeque::new();
    if let Some(room) = level.room_mut(start) {
        room.set_position(Some(GridPosition::ORIGIN));
    }
    queue.push_back(start.to_string());

    while let Some(current) = queue.pop_front() {
        let (origin, edges) = match level.room(&current) {
            Some(room) => (
                room.position().unwrap_or_default(),
                room.exits()
                    .canonical()
                    .map(|(direction, target)| (direction, target.to_string()))
                    .collect::<Vec<_>>(),
            ),
            None => continue,
        };

        for (direction, target) in edges {
            let implied = origin.step(direction);
            let neighbor = level
                .room_mut(&target)
                .ok_or_else(|| LevelError::DanglingExit {
                    room: current.clone(),
                    direction,
                    target: target.clone(),
                })?;

            match neighbor.position() {
                None => {
                    neighbor.set_position(Some(implied));
                    queue.push_back(target);
                }
                Some(assigned) if assigned != implied => {
                    report.conflicts.push(GridConflict {
                        room: target,
                        assigned,
                        implied,
                        from: current.clone(),
                        direction,
                    });
                }
                Some(_) => {}
            }
        }
    }

    report.unreachable = level
        .rooms()
        .filter(|room| room.position().is_none() && room.name() != level.exit_room())
        .map(|room| room.name().to_string())
        .collect();
    level.set_grid_consistent(report.is_planar());

    Ok(report)
}
