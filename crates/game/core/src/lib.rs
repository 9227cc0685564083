//! Deterministic room-graph exploration rules shared by every front end.
//!
//! `game-core` defines the canonical rules (directions, exit tables, level
//! graphs, pathfinding, and the per-player session machine) and exposes pure,
//! synchronous APIs. It performs no I/O: content crates hand it an
//! already-parsed [`LevelSpec`], and the runtime drives [`Session`]s.
pub mod config;
pub mod direction;
pub mod error;
pub mod exits;
pub mod level;
pub mod path;
pub mod session;

pub use config::{GameConfig, GridConflictPolicy};
pub use direction::{CardinalDirection, DirectionError, normalize_direction};
pub use error::{ErrorSeverity, GameError};
pub use exits::{ExitTable, build_exits};
pub use level::{
    CoordinateReport, GridConflict, GridPosition, Level, LevelError, LevelSpec, Room, RoomSpec,
    infer_coordinates,
};
pub use path::{PathError, PathSegment, Route, find_path};
pub use session::{
    Command, CommandError, Inventory, LevelRequest, Outcome, Phase, Progression, RenderedStatus,
    Session, SessionError, StatusReport, Step,
};
