/// What to do when coordinate inference finds a room whose position
/// disagrees with the one implied by a later edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GridConflictPolicy {
    /// Keep the first assignment and carry on; levels need not be planar.
    #[default]
    Tolerate,
    /// Refuse to start a session on a level whose grid is inconsistent.
    Reject,
}

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Name of the sentinel room the player is sent to on `quit`.
    /// It may be disconnected from the rest of the level.
    pub exit_room: String,

    pub grid_conflicts: GridConflictPolicy,

    /// Inputs longer than this are cut before parsing.
    pub max_input_len: usize,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_EXIT_ROOM: &'static str = "Exit";
    pub const DEFAULT_MAX_INPUT_LEN: usize = 256;

    pub fn new() -> Self {
        Self {
            exit_room: Self::DEFAULT_EXIT_ROOM.to_string(),
            grid_conflicts: GridConflictPolicy::default(),
            max_input_len: Self::DEFAULT_MAX_INPUT_LEN,
        }
    }

    pub fn with_grid_conflicts(mut self, policy: GridConflictPolicy) -> Self {
        self.grid_conflicts = policy;
        self
    }

    pub fn with_exit_room(mut self, exit_room: impl Into<String>) -> Self {
        self.exit_room = exit_room.into();
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
