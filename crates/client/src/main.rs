//! DiceCraft headless client binary.
//!
//! Composition root: loads the dice catalog, builds the combat runtime, runs
//! a scripted session of combats against a target pool, and prints a JSON
//! summary on stdout. Logs go to stderr.
//!
//! # Examples
//!
//! ```bash
//! DICECRAFT_SEED=42 DICECRAFT_COMBATS=5 cargo run -p dicecraft-client
//!
//! RUST_LOG=combat_runtime=debug DICECRAFT_CATALOG=./my-dice cargo run -p dicecraft-client
//! ```

mod config;
mod session;

use anyhow::{Context, Result};

use combat_runtime::{Runtime, RuntimeConfig};
use dice_content::{ContentFactory, DiceLoader, TemplateCatalog};
use dice_core::CombatConfig;

use crate::config::ClientConfig;
use crate::session::Session;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    let (catalog, combat) = load_content(&config)?;
    tracing::info!(templates = catalog.len(), "catalog loaded");

    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            combat,
            frame_interval: config.frame_interval,
            rng_seed: config.seed,
            ..RuntimeConfig::default()
        })
        .catalog(catalog)
        .build()
        .await?;
    let seed = runtime.seed();
    tracing::info!(seed, combats = config.combats, "starting DiceCraft session");

    let summary = Session::new(runtime.handle(), config).run(seed).await?;
    runtime.shutdown().await?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn load_content(config: &ClientConfig) -> Result<(TemplateCatalog, CombatConfig)> {
    match &config.catalog_dir {
        Some(dir) => {
            let factory = ContentFactory::new(dir);
            let catalog = factory
                .load_catalog()
                .with_context(|| format!("loading dice catalog from {}", dir.display()))?;
            let combat = factory.load_config()?;
            Ok((catalog, combat))
        }
        None => Ok((DiceLoader::builtin()?, CombatConfig::default())),
    }
}
