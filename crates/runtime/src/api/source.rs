//! Where level graphs come from.
//!
//! Sessions never read files themselves: they ask a [`LevelSource`] for a
//! level by identifier and for the identifier that follows a completed one.
use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use game_content::{Campaign, ContentFactory};
use game_core::LevelSpec;

use super::errors::{Result, RuntimeError};

/// Identifier of a level within a source, e.g. `shadow_castle`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelId(String);

impl LevelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LevelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LevelId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Supplies level graphs and campaign order to the runtime.
///
/// Implementations may block on I/O internally but must not hold up other
/// sessions; file-backed sources move their work onto blocking threads.
#[async_trait]
pub trait LevelSource: Send + Sync {
    /// Raw graph of `level`, validated later by the catalog.
    async fn load_level_graph(&self, level: &LevelId) -> Result<LevelSpec>;

    /// Identifier of the level after the one at `current_ordinal`, or `None`
    /// once the campaign is exhausted.
    async fn load_next_level_identifier(&self, current_ordinal: u32) -> Result<Option<LevelId>>;

    /// Identifier of the level new sessions start on.
    async fn first_level_identifier(&self) -> Result<LevelId>;

    /// Campaign position of `level`, or `None` when the campaign does not
    /// list it.
    async fn level_ordinal(&self, level: &LevelId) -> Result<Option<u32>>;
}

/// Level source backed by specs held in memory, in campaign order.
#[derive(Clone, Debug, Default)]
pub struct InMemoryLevelSource {
    levels: Vec<(LevelId, LevelSpec)>,
}

impl InMemoryLevelSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a level to the campaign.
    pub fn level(mut self, id: impl Into<LevelId>, spec: LevelSpec) -> Self {
        self.levels.push((id.into(), spec));
        self
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[async_trait]
impl LevelSource for InMemoryLevelSource {
    async fn load_level_graph(&self, level: &LevelId) -> Result<LevelSpec> {
        self.levels
            .iter()
            .find(|(id, _)| id == level)
            .map(|(_, spec)| spec.clone())
            .ok_or_else(|| RuntimeError::UnknownLevel(level.clone()))
    }

    async fn load_next_level_identifier(&self, current_ordinal: u32) -> Result<Option<LevelId>> {
        let next = usize::try_from(current_ordinal)
            .ok()
            .and_then(|ordinal| ordinal.checked_add(1))
            .and_then(|index| self.levels.get(index));
        Ok(next.map(|(id, _)| id.clone()))
    }

    async fn first_level_identifier(&self) -> Result<LevelId> {
        self.levels
            .first()
            .map(|(id, _)| id.clone())
            .ok_or(RuntimeError::NoLevels)
    }

    async fn level_ordinal(&self, level: &LevelId) -> Result<Option<u32>> {
        let index = self.levels.iter().position(|(id, _)| id == level);
        Ok(index.and_then(|index| u32::try_from(index).ok()))
    }
}

/// Level source reading RON levels and the campaign list from a data
/// directory through [`ContentFactory`].
#[derive(Clone, Debug)]
pub struct ContentLevelSource {
    factory: ContentFactory,
    campaign: Campaign,
}

impl ContentLevelSource {
    /// Opens `data_dir` and reads its `campaign.toml`.
    pub async fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let factory = ContentFactory::new(data_dir);
        let loader = factory.clone();
        let campaign = tokio::task::spawn_blocking(move || loader.load_campaign())
            .await
            .map_err(RuntimeError::WorkerJoin)?
            .map_err(|e| {
                let context = format!("campaign in {}", factory.data_dir().display());
                RuntimeError::source_failed(context, e)
            })?;

        Ok(Self { factory, campaign })
    }

    pub fn factory(&self) -> &ContentFactory {
        &self.factory
    }

    pub fn campaign(&self) -> &Campaign {
        &self.campaign
    }
}

#[async_trait]
impl LevelSource for ContentLevelSource {
    async fn load_level_graph(&self, level: &LevelId) -> Result<LevelSpec> {
        if !self.campaign.levels.iter().any(|id| id == level.as_str()) {
            return Err(RuntimeError::UnknownLevel(level.clone()));
        }

        let factory = self.factory.clone();
        let id = level.clone();
        tokio::task::spawn_blocking(move || factory.load_level_spec(id.as_str()))
            .await
            .map_err(RuntimeError::WorkerJoin)?
            .map_err(|e| RuntimeError::source_failed(format!("level '{level}'"), e))
    }

    async fn load_next_level_identifier(&self, current_ordinal: u32) -> Result<Option<LevelId>> {
        Ok(self.campaign.next_after(current_ordinal).map(LevelId::from))
    }

    async fn first_level_identifier(&self) -> Result<LevelId> {
        self.campaign
            .first()
            .map(LevelId::from)
            .ok_or(RuntimeError::NoLevels)
    }

    async fn level_ordinal(&self, level: &LevelId) -> Result<Option<u32>> {
        Ok(self.campaign.ordinal_of(level.as_str()))
    }
}
