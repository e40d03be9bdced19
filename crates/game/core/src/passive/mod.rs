//! Trigger-based passive abilities.
//!
//! A passive is one gameplay rule expressed as a set of optional lifecycle
//! hooks. Every hook defaults to a no-op, so an effect overrides only the
//! triggers it cares about.
//!
//! # Hook order within one fire tick
//!
//! ```text
//! roll face, roll crit, roll multicast count
//! for each cast:
//!     owner.on_dice_fire          (always first)
//!     neighbor.on_neighbor_fire   (any order; Shot modifiers commute)
//!     dispatch unless skipped
//!         → on_enemy_hit → on_enemy_killed   (when the projectile lands)
//! ```
//!
//! Paired hooks (`on_combat_start`/`on_combat_end`,
//! `on_dice_spawn`/`on_dice_removed`) must leave stats exactly as they found
//! them once both halves have run.
mod context;
pub mod effects;
mod kind;
mod ledger;
mod shot;

use std::collections::BTreeSet;
use std::fmt;

pub use context::PassiveContext;
pub use kind::PassiveKind;
pub use ledger::BuffLedger;
pub use shot::Shot;

use crate::config::CombatConfig;
use crate::state::{DiceId, TargetId};
use crate::unit::UnitStore;

/// Lifecycle hooks of one passive ability.
pub trait PassiveEffect: Send + fmt::Debug {
    /// Stable identifier used in logs and snapshots.
    fn name(&self) -> &'static str;

    /// The owner was placed (or re-armed) and is now active.
    fn on_dice_spawn(&mut self, _ctx: &mut PassiveContext<'_>) {}

    /// Once per cast of the owner, before any neighbor sees the shot.
    fn on_dice_fire(&mut self, _ctx: &mut PassiveContext<'_>, _shot: &mut Shot) {}

    /// The owner is leaving the board or pausing its loop. Must undo every
    /// persistent change the passive made to other units.
    fn on_dice_removed(&mut self, _ctx: &mut PassiveContext<'_>) {}

    /// A projectile of the owner resolved against `target`.
    fn on_enemy_hit(
        &mut self,
        _ctx: &mut PassiveContext<'_>,
        _target: TargetId,
        _damage_dealt: &mut f32,
    ) {
    }

    /// A projectile of the owner killed `target`.
    fn on_enemy_killed(&mut self, _ctx: &mut PassiveContext<'_>, _target: TargetId) {}

    /// Runs on both sides of a merge with the same arguments.
    fn on_dice_merged(
        &mut self,
        _ctx: &mut PassiveContext<'_>,
        _consumed: DiceId,
        _survivor: DiceId,
    ) {
    }

    fn on_combat_start(&mut self, _ctx: &mut PassiveContext<'_>) {}

    /// Restores whatever `on_combat_start` saved.
    fn on_combat_end(&mut self, _ctx: &mut PassiveContext<'_>) {}

    /// Once per cast of an adjacent dice.
    fn on_neighbor_fire(
        &mut self,
        _ctx: &mut PassiveContext<'_>,
        _fired: DiceId,
        _shot: &mut Shot,
    ) {
    }

    fn on_neighbor_spawn(&mut self, _ctx: &mut PassiveContext<'_>, _neighbor: DiceId) {}

    /// `neighbor` is about to leave; it is still on the board during the call.
    fn on_neighbor_removed(&mut self, _ctx: &mut PassiveContext<'_>, _neighbor: DiceId) {}

    /// Units a hover over the owner should highlight.
    fn affected_neighbors(
        &self,
        units: &UnitStore,
        owner: DiceId,
        config: &CombatConfig,
    ) -> BTreeSet<DiceId> {
        units.neighbors_of(owner, config.adjacency_radius)
    }
}
