//! Campaign list loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Ordered list of level identifiers played one after another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub levels: Vec<String>,
}

impl Campaign {
    pub fn first(&self) -> Option<&str> {
        self.levels.first().map(String::as_str)
    }

    /// Identifier of the level after the one at `ordinal`, if any.
    pub fn next_after(&self, ordinal: u32) -> Option<&str> {
        let index = usize::try_from(ordinal).ok()?.checked_add(1)?;
        self.levels.get(index).map(String::as_str)
    }

    /// Position of `level` in the campaign.
    pub fn ordinal_of(&self, level: &str) -> Option<u32> {
        let index = self.levels.iter().position(|id| id == level)?;
        u32::try_from(index).ok()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Loader for the campaign list from a TOML file.
pub struct CampaignLoader;

impl CampaignLoader {
    pub fn load(path: &Path) -> LoadResult<Campaign> {
        let content = read_file(path)?;
        let campaign: Campaign = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse campaign TOML: {}", e))?;

        if campaign.is_empty() {
            anyhow::bail!("Campaign {} lists no levels", path.display());
        }
        Ok(campaign)
    }
}
