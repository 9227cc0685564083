//! Level graph loader.
//!
//! Exit keys in level files are free-form direction tokens ("north", "n",
//! "left", ...). They are folded onto canonical directions here so authors
//! can use whichever spelling reads best.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, bail};
use game_core::{LevelSpec, RoomSpec, normalize_direction};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Level data structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LevelRon {
    title: String,
    #[serde(default)]
    intro: Option<String>,
    #[serde(default)]
    victory: Option<String>,
    #[serde(default)]
    defeat: Option<String>,
    start: String,
    #[serde(default)]
    required_items: Option<Vec<String>>,
    rooms: Vec<RoomRon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RoomRon {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    exits: BTreeMap<String, String>,
    #[serde(default)]
    item: Option<String>,
    #[serde(default)]
    boss: Option<String>,
    #[serde(default)]
    size: Option<u32>,
}

impl RoomRon {
    fn into_spec(self) -> LoadResult<RoomSpec> {
        let mut exits = BTreeMap::new();
        for (key, target) in self.exits {
            let direction = normalize_direction(&key)
                .with_context(|| format!("room '{}' has an invalid exit key", self.name))?;
            if let Some(previous) = exits.insert(direction, target) {
                bail!(
                    "room '{}' defines the {} exit twice (already leads to '{}')",
                    self.name,
                    direction,
                    previous
                );
            }
        }

        Ok(RoomSpec {
            name: self.name,
            description: self.description,
            exits,
            item: self.item,
            boss: self.boss,
            size: self.size,
        })
    }
}

/// Loader for level graphs from RON files.
pub struct LevelLoader;

impl LevelLoader {
    /// Load a level spec from a RON file.
    ///
    /// The result is not validated; pass it to [`game_core::Level::from_spec`].
    pub fn load(path: &Path) -> LoadResult<LevelSpec> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid level file {}", path.display()))
    }

    /// Parse a level spec from RON text.
    pub fn parse(content: &str) -> LoadResult<LevelSpec> {
        let data: LevelRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse level RON: {}", e))?;

        let rooms = data
            .rooms
            .into_iter()
            .map(RoomRon::into_spec)
            .collect::<LoadResult<Vec<_>>>()?;

        Ok(LevelSpec {
            title: data.title,
            intro: data.intro,
            victory: data.victory,
            defeat: data.defeat,
            start: data.start,
            required_items: data.required_items,
            rooms,
        })
    }
}
