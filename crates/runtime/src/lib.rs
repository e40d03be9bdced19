//! Async host for the dice combat board.
//!
//! This crate wraps a [`dice_core::Board`] in a tokio worker so that
//! placement, merges, and combat phases can be driven from any task while the
//! worker advances the frame clock on its own. Consumers embed [`Runtime`] and
//! talk to the board through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`arena`] shares targets and the player between the board and its host
//! - `workers` keeps the board-owning task internal to the crate
pub mod api;
pub mod arena;
pub mod events;
pub mod runtime;
pub mod totals;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use arena::{SharedPlayer, SharedTargets};
pub use events::{DiceEvent, EffectEvent, Event, EventBus, PhaseEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use totals::CombatTotals;
