//! Shared cache of validated level templates.
//!
//! A template is loaded from the [`LevelSource`] once, validated, surveyed,
//! and then handed out as an [`Arc<Level>`]. Sessions clone the template
//! into their own copy, so the cached value is never mutated.
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use game_core::{GameConfig, GridConflictPolicy, Level, LevelError};

use crate::api::{LevelId, LevelSource, Result, RuntimeError};
use crate::events::{EventBus, LevelEvent};

pub struct LevelCatalog {
    source: Arc<dyn LevelSource>,
    config: GameConfig,
    templates: RwLock<HashMap<LevelId, Arc<Level>>>,
    event_bus: EventBus,
}

impl LevelCatalog {
    pub fn new(source: Arc<dyn LevelSource>, config: GameConfig, event_bus: EventBus) -> Self {
        Self {
            source,
            config,
            templates: RwLock::new(HashMap::new()),
            event_bus,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the cached template for `id`, loading it on first use.
    pub async fn get(&self, id: &LevelId) -> Result<Arc<Level>> {
        if let Some(level) = self.templates.read().await.get(id) {
            return Ok(Arc::clone(level));
        }

        let level = match self.load(id).await {
            Ok(level) => Arc::new(level),
            Err(error) => {
                warn!(target: "runtime::catalog", level = %id, error = %error, "Level rejected");
                self.event_bus.publish(LevelEvent::Rejected {
                    level: id.clone(),
                    error: error.to_string(),
                });
                return Err(error);
            }
        };

        // Another session may have loaded the same level meanwhile; keep the first.
        let mut templates = self.templates.write().await;
        let cached = templates
            .entry(id.clone())
            .or_insert_with(|| Arc::clone(&level));
        Ok(Arc::clone(cached))
    }

    pub async fn first_level(&self) -> Result<LevelId> {
        self.source.first_level_identifier().await
    }

    pub async fn next_after(&self, ordinal: u32) -> Result<Option<LevelId>> {
        self.source.load_next_level_identifier(ordinal).await
    }

    pub async fn ordinal_of(&self, id: &LevelId) -> Result<Option<u32>> {
        self.source.level_ordinal(id).await
    }

    pub async fn is_cached(&self, id: &LevelId) -> bool {
        self.templates.read().await.contains_key(id)
    }

    async fn load(&self, id: &LevelId) -> Result<Level> {
        debug!(target: "runtime::catalog", level = %id, "Loading level");
        let spec = self.source.load_level_graph(id).await?;
        let invalid = |source: LevelError| RuntimeError::InvalidLevel {
            level: id.clone(),
            source,
        };

        let level = Level::from_spec(spec, &self.config).map_err(invalid)?;
        let survey = level.survey().map_err(invalid)?;

        if !survey.unreachable.is_empty() {
            warn!(
                target: "runtime::catalog",
                level = %id,
                rooms = ?survey.unreachable,
                "Rooms unreachable from the start room"
            );
        }
        for (room, direction, target) in level.one_way_exits() {
            debug!(
                target: "runtime::catalog",
                level = %id,
                room,
                direction = %direction,
                to = target,
                "One-way exit"
            );
        }
        for conflict in &survey.conflicts {
            warn!(
                target: "runtime::catalog",
                level = %id,
                room = %conflict.room,
                assigned = %conflict.assigned,
                implied = %conflict.implied,
                from = %conflict.from,
                direction = %conflict.direction,
                "Grid conflict"
            );
        }

        let event = LevelEvent::Loaded {
            level: id.clone(),
            rooms: level.len(),
            unreachable: survey.unreachable.iter().cloned().collect(),
            conflicts: survey.conflicts.len(),
        };

        if self.config.grid_conflicts == GridConflictPolicy::Reject {
            if let Some(error) = survey.into_conflict_error() {
                return Err(invalid(error));
            }
        }

        info!(target: "runtime::catalog", level = %id, rooms = level.len(), "Level loaded");
        self.event_bus.publish(event);
        Ok(level)
    }
}
