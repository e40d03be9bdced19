//! Worker tasks that back the runtime orchestration.
//!
//! The combat worker is the only owner of the board; every other task talks
//! to it through [`Command`]s.

mod combat;

pub use combat::{Command, CombatWorker};
