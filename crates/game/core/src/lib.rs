//! Deterministic dice combat and passive resolution.
//!
//! `dice-core` turns placed dice into periodic damage, heal, and shield
//! output. Every mutation flows through [`board::Board`]: placement, removal,
//! merge, combat phase changes, and the per-frame clock that drives each
//! unit's [`unit::FireLoop`]. Passive abilities plug in through the
//! [`passive::PassiveEffect`] hook trait.
//!
//! The crate performs no I/O and never blocks. Targets, projectiles, and the
//! player are injected through [`env::CombatEnv`]; randomness through
//! [`env::DiceRng`], so a seeded board replays identically.
pub mod board;
pub mod config;
pub mod env;
pub mod error;
pub mod passive;
pub mod record;
pub mod state;
pub mod stats;
pub mod template;
pub mod unit;

pub use board::{Board, BoardSnapshot, FireOutcome, FireReport, MergeReport, UnitSnapshot};
pub use config::CombatConfig;
pub use env::{
    CombatEnv, DamageOutcome, DiceRng, InstantProjectiles, PcgRng, PlayerLedger, PlayerVitals,
    Projectile, ProjectileDispatch, ProjectileFate, TargetPool, TargetProvider, TargetState,
};
pub use error::{BoardError, ErrorSeverity, GameError, TemplateError};
pub use passive::{BuffLedger, PassiveContext, PassiveEffect, PassiveKind, Shot};
pub use record::{EffectRecord, HitReport};
pub use state::{DiceId, Position, TargetId};
pub use stats::RuntimeDiceStats;
pub use template::{DiceTemplate, Rarity};
pub use unit::{DiceUnit, FireLoop, FireState, UnitStore};
