//! Topic-based event bus for runtime events.
//!
//! The combat worker publishes phase changes, roster changes, and every
//! drained effect record; consumers subscribe only to the topics they need.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{DiceEvent, EffectEvent, PhaseEvent};
