//! Level graphs: rooms joined by directed, labeled exits.
//!
//! A [`LevelSpec`] is the already-parsed authoring form handed over by a
//! content loader. [`Level::from_spec`] validates it once and produces the
//! immutable template; every session clones that template and mutates only
//! its own copy (item pickup, inferred coordinates).
mod coordinates;
mod error;

pub use coordinates::{CoordinateReport, GridConflict, GridPosition, infer_coordinates};
pub use error::LevelError;

use std::collections::{BTreeMap, BTreeSet};

use crate::config::GameConfig;
use crate::direction::CardinalDirection;
use crate::exits::{ExitTable, build_exits};

/// Authoring-time description of one room.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomSpec {
    pub name: String,
    pub description: Option<String>,
    pub exits: BTreeMap<CardinalDirection, String>,
    pub item: Option<String>,
    pub boss: Option<String>,
    pub size: Option<u32>,
}

impl RoomSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn exit(mut self, direction: CardinalDirection, target: impl Into<String>) -> Self {
        self.exits.insert(direction, target.into());
        self
    }

    pub fn item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
        self
    }

    pub fn boss(mut self, boss: impl Into<String>) -> Self {
        self.boss = Some(boss.into());
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Authoring-time description of a whole level, as produced by a loader.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelSpec {
    pub title: String,
    pub intro: Option<String>,
    /// Shown when a boss is defeated.
    pub victory: Option<String>,
    /// Shown when a boss defeats the player.
    pub defeat: Option<String>,
    pub start: String,
    /// Relics needed to defeat a boss. `None` means every item placed
    /// outside a boss room.
    pub required_items: Option<Vec<String>>,
    pub rooms: Vec<RoomSpec>,
}

impl LevelSpec {
    pub fn new(title: impl Into<String>, start: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            start: start.into(),
            ..Self::default()
        }
    }

    pub fn room(mut self, room: RoomSpec) -> Self {
        self.rooms.push(room);
        self
    }

    pub fn intro(mut self, intro: impl Into<String>) -> Self {
        self.intro = Some(intro.into());
        self
    }

    pub fn victory(mut self, text: impl Into<String>) -> Self {
        self.victory = Some(text.into());
        self
    }

    pub fn defeat(mut self, text: impl Into<String>) -> Self {
        self.defeat = Some(text.into());
        self
    }

    pub fn required_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_items = Some(items.into_iter().map(Into::into).collect());
        self
    }
}

/// A validated room inside a [`Level`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    name: String,
    description: Option<String>,
    exits: ExitTable,
    item: Option<String>,
    boss: Option<String>,
    size: u32,
    position: Option<GridPosition>,
}

impl Room {
    pub const DEFAULT_SIZE: u32 = 1;

    fn sentinel(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            exits: ExitTable::default(),
            item: None,
            boss: None,
            size: Self::DEFAULT_SIZE,
            position: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn exits(&self) -> &ExitTable {
        &self.exits
    }

    pub fn item(&self) -> Option<&str> {
        self.item.as_deref()
    }

    pub fn boss(&self) -> Option<&str> {
        self.boss.as_deref()
    }

    /// Cost of entering this room.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Grid position written by [`infer_coordinates`], if the room was reached.
    pub fn position(&self) -> Option<GridPosition> {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Option<GridPosition>) {
        self.position = position;
    }

    pub(crate) fn take_item(&mut self) -> Option<String> {
        self.item.take()
    }
}

/// Validated room graph for one level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Level {
    title: String,
    intro: Option<String>,
    victory: Option<String>,
    defeat: Option<String>,
    start: String,
    exit_room: String,
    required_items: Vec<String>,
    rooms: BTreeMap<String, Room>,
    grid_consistent: bool,
}

impl Level {
    /// Validates a spec and builds the level template.
    ///
    /// The sentinel exit room named by `config.exit_room` is added when the
    /// spec does not define it, so `quit` always has somewhere to go.
    pub fn from_spec(spec: LevelSpec, config: &GameConfig) -> Result<Self, LevelError> {
        if spec.rooms.is_empty() {
            return Err(LevelError::NoRooms);
        }

        let mut rooms = BTreeMap::new();
        for room in spec.rooms {
            if room.size == Some(0) {
                return Err(LevelError::InvalidSize(room.name));
            }
            if room.item.as_deref().is_some_and(|item| item.trim().is_empty()) {
                return Err(LevelError::EmptyItemName(room.name));
            }
            if rooms.contains_key(&room.name) {
                return Err(LevelError::DuplicateRoom(room.name));
            }

            let built = Room {
                name: room.name.clone(),
                description: room.description,
                exits: build_exits(room.exits),
                item: room.item,
                boss: room.boss,
                size: room.size.unwrap_or(Room::DEFAULT_SIZE),
                position: None,
            };
            rooms.insert(room.name, built);
        }

        rooms
            .entry(config.exit_room.clone())
            .or_insert_with(|| Room::sentinel(&config.exit_room));

        for room in rooms.values() {
            for (direction, target) in room.exits.canonical() {
                if !rooms.contains_key(target) {
                    return Err(LevelError::DanglingExit {
                        room: room.name.clone(),
                        direction,
                        target: target.to_string(),
                    });
                }
            }
        }

        if !rooms.contains_key(&spec.start) {
            return Err(LevelError::UnknownRoom(spec.start));
        }

        let placed: BTreeSet<&str> = rooms.values().filter_map(Room::item).collect();
        let required_items = match spec.required_items {
            Some(required) => {
                if let Some(missing) = required.iter().find(|item| !placed.contains(item.as_str())) {
                    return Err(LevelError::UnknownRequiredItem(missing.clone()));
                }
                required
            }
            None => rooms
                .values()
                .filter(|room| room.boss.is_none())
                .filter_map(|room| room.item.clone())
                .collect(),
        };

        Ok(Self {
            title: spec.title,
            intro: spec.intro,
            victory: spec.victory,
            defeat: spec.defeat,
            start: spec.start,
            exit_room: config.exit_room.clone(),
            required_items,
            rooms,
            grid_consistent: false,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn intro(&self) -> Option<&str> {
        self.intro.as_deref()
    }

    pub fn victory(&self) -> Option<&str> {
        self.victory.as_deref()
    }

    pub fn defeat(&self) -> Option<&str> {
        self.defeat.as_deref()
    }

    /// First boss in room-name order, used in level-wide wording.
    pub fn boss(&self) -> Option<&str> {
        self.rooms.values().find_map(Room::boss)
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn exit_room(&self) -> &str {
        &self.exit_room
    }

    pub fn required_items(&self) -> &[String] {
        &self.required_items
    }

    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.get(name)
    }

    pub(crate) fn room_mut(&mut self, name: &str) -> Option<&mut Room> {
        self.rooms.get_mut(name)
    }

    /// Breaks the graph on purpose to exercise consistency errors.
    #[cfg(test)]
    pub(crate) fn remove_room(&mut self, name: &str) -> Option<Room> {
        self.rooms.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rooms.contains_key(name)
    }

    /// Rooms in name order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Exits that have no matching exit back, as `(room, direction, target)`.
    /// Exits into the exit room are never listed.
    pub fn one_way_exits(&self) -> Vec<(&str, CardinalDirection, &str)> {
        self.rooms
            .values()
            .flat_map(|room| {
                room.exits()
                    .canonical()
                    .filter(move |(direction, target)| {
                        let back = self
                            .rooms
                            .get(*target)
                            .and_then(|to| to.exits().target(direction.opposite()));
                        *target != self.exit_room && back != Some(room.name())
                    })
                    .map(move |(direction, target)| (room.name(), direction, target))
            })
            .collect()
    }

    /// Finds a room by exact name, falling back to a case-insensitive match.
    pub fn resolve_name(&self, query: &str) -> Option<&str> {
        if let Some((name, _)) = self.rooms.get_key_value(query) {
            return Some(name);
        }
        let lowered = query.to_lowercase();
        self.rooms
            .keys()
            .find(|name| name.to_lowercase() == lowered)
            .map(String::as_str)
    }

    /// True once coordinate inference has run and found no conflicts.
    pub fn grid_consistent(&self) -> bool {
        self.grid_consistent
    }

    pub(crate) fn set_grid_consistent(&mut self, consistent: bool) {
        self.grid_consistent = consistent;
    }

    /// Runs coordinate inference on a scratch copy from the start room.
    ///
    /// Used at load time to report unreachable rooms and grid conflicts
    /// without touching the template.
    pub fn survey(&self) -> Result<CoordinateReport, LevelError> {
        let mut scratch = self.clone();
        infer_coordinates(&mut scratch, &self.start)
    }
}
