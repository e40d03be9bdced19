//! High-level runtime orchestrator.
//!
//! The runtime owns the combat worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the board.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use dice_content::TemplateCatalog;
use dice_core::{Board, CombatConfig, CombatEnv, InstantProjectiles, TargetPool};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::arena::{SharedPlayer, SharedTargets};
use crate::events::EventBus;
use crate::workers::{Command, CombatWorker};

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    /// Wall-clock length of one combat frame; also the `dt` each frame advances.
    pub frame_interval: Duration,
    pub command_buffer_size: usize,
    pub event_buffer_size: usize,
    /// Seed for the board RNG. `None` draws one from the thread RNG.
    pub rng_seed: Option<u64>,
    /// Run the frame ticker while combat is active. When false, the clock
    /// only moves through [`RuntimeHandle::advance`].
    pub auto_advance: bool,
}

impl RuntimeConfig {
    pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            frame_interval: Self::DEFAULT_FRAME_INTERVAL,
            command_buffer_size: 32,
            event_buffer_size: 1024,
            rng_seed: None,
            auto_advance: true,
        }
    }
}

/// Main runtime that hosts the combat board
///
/// Design: Runtime owns the worker and coordinates shutdown.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    seed: u64,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Seed the board RNG was created with, for replaying a run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shutdown the runtime gracefully
    ///
    /// Stops the worker even if clones of the handle are still alive; their
    /// later calls fail with [`RuntimeError::CommandChannelClosed`].
    pub async fn shutdown(self) -> Result<()> {
        // A closed channel means the worker is already gone; the join reports why.
        let _ = self.handle.shutdown_worker().await;
        drop(self.handle);

        self.worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    catalog: TemplateCatalog,
    targets: Option<SharedTargets>,
    player: Option<SharedPlayer>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: TemplateCatalog::default(),
            targets: None,
            player: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Templates the handle may place by id
    pub fn catalog(mut self, catalog: TemplateCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Share an existing target pool instead of starting empty
    pub fn targets(mut self, targets: SharedTargets) -> Self {
        self.targets = Some(targets);
        self
    }

    /// Share a player ledger with the caller
    pub fn player(mut self, player: SharedPlayer) -> Self {
        self.player = Some(player);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.rng_seed = Some(seed);
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<Runtime> {
        if self.config.frame_interval.is_zero() {
            return Err(RuntimeError::ZeroFrameInterval);
        }

        let seed = self.config.rng_seed.unwrap_or_else(rand::random);
        let targets = self
            .targets
            .unwrap_or_else(|| SharedTargets::new(TargetPool::new()));
        let player = self.player.unwrap_or_default();

        let env = CombatEnv::new()
            .with_targets(targets.clone())
            .with_projectiles(InstantProjectiles::new())
            .with_player(player.clone());
        let board = Board::with_seed(self.config.combat.clone(), env, seed);

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let worker = CombatWorker::new(
            board,
            self.catalog,
            targets,
            player,
            command_rx,
            event_bus,
            self.config.frame_interval,
            self.config.auto_advance,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        info!(target: "combat_runtime::worker", seed, "runtime started");

        Ok(Runtime {
            handle,
            seed,
            worker_handle,
        })
    }
}
