//! Data-driven content definitions and loaders.
//!
//! This crate houses the bundled levels and provides loaders for RON/TOML data files:
//! - Level graphs (data-driven via RON)
//! - Campaign order (data-driven via TOML)
//! - Game configuration (data-driven via TOML)
//!
//! All loaders produce game-core types directly; validation stays in
//! [`game_core::Level::from_spec`].

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    Campaign, CampaignLoader, ConfigLoader, ContentFactory, LevelLoader, LoadResult,
};

/// Directory of the content bundled with this crate.
pub const BUNDLED_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");
