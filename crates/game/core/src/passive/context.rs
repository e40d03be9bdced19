//! Execution context handed to passive hooks.

use std::collections::BTreeSet;

use tracing::trace;

use crate::config::CombatConfig;
use crate::env::{CombatEnv, DiceRng};
use crate::passive::BuffLedger;
use crate::record::{EffectRecord, HitReport};
use crate::state::{DiceId, TargetId};
use crate::stats::RuntimeDiceStats;
use crate::unit::UnitStore;

/// Everything a hook may read or touch while it runs.
///
/// The owner's own passive is checked out of the store for the duration of
/// the call, so a hook can freely mutate any unit's stats (including the
/// owner's) through `units`.
pub struct PassiveContext<'a> {
    owner: DiceId,
    combat_active: bool,
    pub units: &'a mut UnitStore,
    pub buffs: &'a mut BuffLedger,
    pub env: &'a mut CombatEnv,
    pub rng: &'a mut dyn DiceRng,
    pub config: &'a CombatConfig,
    effects: &'a mut Vec<EffectRecord>,
}

impl<'a> PassiveContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        owner: DiceId,
        combat_active: bool,
        units: &'a mut UnitStore,
        buffs: &'a mut BuffLedger,
        env: &'a mut CombatEnv,
        rng: &'a mut dyn DiceRng,
        config: &'a CombatConfig,
        effects: &'a mut Vec<EffectRecord>,
    ) -> Self {
        Self {
            owner,
            combat_active,
            units,
            buffs,
            env,
            rng,
            config,
            effects,
        }
    }

    /// The dice whose passive is running.
    pub fn owner(&self) -> DiceId {
        self.owner
    }

    pub fn combat_active(&self) -> bool {
        self.combat_active
    }

    pub fn owner_stats(&self) -> Option<&RuntimeDiceStats> {
        self.units.stats(self.owner)
    }

    pub fn owner_stats_mut(&mut self) -> Option<&mut RuntimeDiceStats> {
        self.units.stats_mut(self.owner)
    }

    pub fn owner_level(&self) -> u32 {
        self.units.get(self.owner).map_or(0, |u| u.level())
    }

    /// Units adjacent to the owner under the configured radius.
    pub fn neighbors(&self) -> BTreeSet<DiceId> {
        self.units
            .neighbors_of(self.owner, self.config.adjacency_radius)
    }

    /// Recomputes `target`'s effective fire interval from its base and the
    /// active haste sources.
    pub fn refresh_fire_interval(&mut self, target: DiceId) {
        if let Some(stats) = self.units.stats_mut(target) {
            self.buffs.apply(target, stats);
        }
    }

    /// Adds the owner as a haste source of `target` and refreshes it.
    pub fn grant_haste(&mut self, target: DiceId, bonus: f32) {
        if self.buffs.grant(target, self.owner, bonus) {
            trace!(target: "dice_core::passive", source = %self.owner, buffed = %target, bonus, "haste granted");
        }
        self.refresh_fire_interval(target);
    }

    /// Removes the owner as a haste source of `target` and refreshes it.
    pub fn revoke_haste(&mut self, target: DiceId) {
        if self.buffs.revoke(target, self.owner) {
            trace!(target: "dice_core::passive", source = %self.owner, buffed = %target, "haste revoked");
        }
        self.refresh_fire_interval(target);
    }

    /// Removes every haste contribution of the owner.
    pub fn revoke_all_haste(&mut self) {
        for target in self.buffs.revoke_source(self.owner) {
            self.refresh_fire_interval(target);
        }
    }

    /// Heals the player and records it. Silently skips without a player.
    pub fn heal_player(&mut self, amount: f32) {
        if self.env.heal_player(amount) {
            self.record(EffectRecord::Healed {
                source: self.owner,
                amount,
            });
        } else {
            trace!(target: "dice_core::passive", source = %self.owner, "no player to heal");
        }
    }

    /// Shields the player and records it. Silently skips without a player.
    pub fn shield_player(&mut self, amount: f32) {
        if self.env.shield_player(amount) {
            self.record(EffectRecord::Shielded {
                source: self.owner,
                amount,
            });
        } else {
            trace!(target: "dice_core::passive", source = %self.owner, "no player to shield");
        }
    }

    /// Deals independent damage to `target` on the owner's behalf.
    ///
    /// Secondary damage bypasses on-hit hooks, so chains cannot recurse.
    pub fn deal_secondary_damage(&mut self, target: TargetId, amount: f32) -> Option<HitReport> {
        let outcome = self.env.apply_damage(target, amount)?;
        let report = HitReport {
            source: self.owner,
            target,
            dealt: outcome.dealt,
            killed: outcome.killed,
        };
        self.record(EffectRecord::SecondaryHit(report));
        Some(report)
    }

    pub fn record(&mut self, record: EffectRecord) {
        self.effects.push(record);
    }
}
