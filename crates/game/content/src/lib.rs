//! Data-driven dice content.
//!
//! This crate houses the authored side of combat:
//! - Dice templates (data-driven via RON)
//! - Combat tuning (data-driven via TOML)
//!
//! Templates are validated on load and handed out as shared
//! `Arc<DiceTemplate>` handles; nothing here ever appears in board state.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{CatalogError, TemplateCatalog};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, DiceCatalog, DiceLoader, LoadResult};
