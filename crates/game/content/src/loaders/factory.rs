//! Content factory for loading everything a board needs from one directory.

use std::path::{Path, PathBuf};

use dice_core::CombatConfig;

use crate::catalog::TemplateCatalog;
use crate::loaders::{ConfigLoader, DiceLoader, LoadResult};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml   (optional; defaults apply when absent)
/// └── dice.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load dice templates from `dice.ron`.
    pub fn load_catalog(&self) -> LoadResult<TemplateCatalog> {
        DiceLoader::load(&self.data_dir.join("dice.ron"))
    }

    /// Load combat tuning from `combat.toml`, or defaults if the file is absent.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("combat.toml");
        if !path.exists() {
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }
}
