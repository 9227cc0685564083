//! Cost-optimal routes between rooms.
//!
//! A* over the room graph. Entering a room costs its `size`, and the
//! heuristic is the Manhattan distance between inferred grid positions.
//! When the level's grid is not known to be consistent, or either endpoint
//! has no position, the heuristic is zero and the search is plain Dijkstra.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::direction::CardinalDirection;
use crate::error::{ErrorSeverity, GameError};
use crate::level::{GridPosition, Level};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathError {
    #[error("'{0}' is not a room in this level")]
    NodeNotFound(String),

    #[error("there is no way from {from} to {to}")]
    PathNotFound { from: String, to: String },

    #[error("room '{room}' has an exit to '{target}', which does not exist")]
    GraphConsistency { room: String, target: String },
}

impl GameError for PathError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NodeNotFound(_) | Self::PathNotFound { .. } => ErrorSeverity::Recoverable,
            Self::GraphConsistency { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NodeNotFound(_) => "PATH_NODE_NOT_FOUND",
            Self::PathNotFound { .. } => "PATH_NOT_FOUND",
            Self::GraphConsistency { .. } => "PATH_GRAPH_CONSISTENCY",
        }
    }
}

/// One room on a route and the direction taken to enter it.
///
/// The first segment is the start room and has no direction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathSegment {
    pub room: String,
    pub direction: Option<CardinalDirection>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub segments: Vec<PathSegment>,
    /// Sum of the sizes of every room entered after the start.
    pub cost: u32,
}

impl Route {
    /// Number of moves, one less than the number of segments.
    pub fn hops(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }

    pub fn destination(&self) -> Option<&str> {
        self.segments.last().map(|segment| segment.room.as_str())
    }

    /// Directions to follow, in order.
    pub fn directions(&self) -> impl Iterator<Item = CardinalDirection> + '_ {
        self.segments.iter().filter_map(|segment| segment.direction)
    }
}

/// Finds a minimum-cost route from `start` to `end`.
///
/// Ties in the frontier are broken by insertion order, and exits are
/// expanded in [`CardinalDirection::ALL`] order, so equal inputs always
/// give the same route.
pub fn find_path(level: &Level, start: &str, end: &str) -> Result<Route, PathError> {
    let origin = level
        .room(start)
        .ok_or_else(|| PathError::NodeNotFound(start.to_string()))?;
    let goal = level
        .room(end)
        .ok_or_else(|| PathError::NodeNotFound(end.to_string()))?;

    if start == end {
        return Ok(Route {
            segments: vec![PathSegment {
                room: origin.name().to_string(),
                direction: None,
            }],
            cost: 0,
        });
    }

    let goal_position = goal.position();
    let use_heuristic = level.grid_consistent();
    let heuristic = |position: Option<GridPosition>| -> u32 {
        match (use_heuristic, position, goal_position) {
            (true, Some(from), Some(to)) => from.manhattan(to),
            _ => 0,
        }
    };

    let mut best: HashMap<&str, u32> = HashMap::new();
    let mut came_from: HashMap<&str, &str> = HashMap::new();
    let mut frontier = BinaryHeap::new();
    let mut sequence: u64 = 0;

    best.insert(origin.name(), 0);
    frontier.push(Reverse((heuristic(origin.position()), sequence, origin.name())));

    while let Some(Reverse((_, _, current))) = frontier.pop() {
        if current == end {
            return Ok(reconstruct(level, &came_from, end, best[end]));
        }

        let Some(room) = level.room(current) else {
            continue;
        };
        let g = best[current];

        for (_, target) in room.exits().canonical() {
            let neighbor = level.room(target).ok_or_else(|| PathError::GraphConsistency {
                room: current.to_string(),
                target: target.to_string(),
            })?;

            let tentative = g.saturating_add(neighbor.size());
            if best.get(neighbor.name()).is_some_and(|&known| known <= tentative) {
                continue;
            }

            best.insert(neighbor.name(), tentative);
            came_from.insert(neighbor.name(), current);
            sequence += 1;
            let f = tentative.saturating_add(heuristic(neighbor.position()));
            frontier.push(Reverse((f, sequence, neighbor.name())));
        }
    }

    Err(PathError::PathNotFound {
        from: start.to_string(),
        to: end.to_string(),
    })
}

fn reconstruct(level: &Level, came_from: &HashMap<&str, &str>, end: &str, cost: u32) -> Route {
    let mut rooms = vec![end];
    let mut cursor = end;
    while let Some(&previous) = came_from.get(cursor) {
        rooms.push(previous);
        cursor = previous;
    }
    rooms.reverse();

    let segments = rooms
        .iter()
        .enumerate()
        .map(|(index, room)| PathSegment {
            room: room.to_string(),
            direction: index.checked_sub(1).and_then(|prev| {
                level
                    .room(rooms[prev])
                    .and_then(|from| from.exits().direction_to(room))
            }),
        })
        .collect();

    Route { segments, cost }
}
