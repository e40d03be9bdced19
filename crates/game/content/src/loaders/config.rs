//! Combat configuration loader.

use std::path::Path;

use dice_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat tuning from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`CombatConfig::default`].
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse combat config TOML: {}", e))?;
        anyhow::ensure!(
            config.adjacency_radius >= 0.0,
            "adjacency_radius must not be negative, got {}",
            config.adjacency_radius
        );
        anyhow::ensure!(
            config.max_casts_per_tick >= 1,
            "max_casts_per_tick must be at least 1"
        );
        Ok(config)
    }
}
