//! Dice template catalog loader.

use std::path::Path;

use anyhow::Context;
use dice_core::DiceTemplate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::TemplateCatalog;
use crate::loaders::{LoadResult, read_file};

/// Dice catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiceCatalog {
    pub dice: Vec<DiceTemplate>,
}

/// Loader for dice templates from RON files.
pub struct DiceLoader;

impl DiceLoader {
    const BUILTIN: &'static str = include_str!("../../data/dice.ron");

    /// Load and validate a catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<TemplateCatalog> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> LoadResult<TemplateCatalog> {
        Self::parse(Self::BUILTIN).context("in built-in dice.ron")
    }

    /// Parse and validate catalog RON text.
    pub fn parse(content: &str) -> LoadResult<TemplateCatalog> {
        let catalog: DiceCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse dice catalog RON: {}", e))?;
        let count = catalog.dice.len();
        let catalog = TemplateCatalog::from_templates(catalog.dice)?;

        debug!(target: "dice_content::loaders", templates = count, "dice catalog loaded");
        Ok(catalog)
    }
}
