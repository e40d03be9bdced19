use std::collections::BTreeSet;

use crate::config::CombatConfig;
use crate::passive::{PassiveContext, PassiveEffect, Shot};
use crate::state::DiceId;
use crate::unit::UnitStore;

/// Hastes every adjacent dice: each distinct aura source divides a
/// neighbor's interval by `1 + bonus`.
///
/// Bookkeeping lives in the board's [`crate::BuffLedger`]; this passive only
/// decides when pairs are granted and revoked. An aura on an attacking dice
/// only hastes while combat is active: its grants are revoked when its loop
/// stops and nothing is granted until the next combat starts.
#[derive(Clone, Debug)]
pub struct AttackSpeedAura {
    bonus: f32,
    bonus_per_level: f32,
}

impl AttackSpeedAura {
    pub fn new(bonus: f32, bonus_per_level: f32) -> Self {
        Self {
            bonus,
            bonus_per_level,
        }
    }

    fn bonus_at(&self, level: u32) -> f32 {
        self.bonus + self.bonus_per_level * level as f32
    }

    fn lapsed(ctx: &PassiveContext<'_>) -> bool {
        !ctx.combat_active() && ctx.units.get(ctx.owner()).is_some_and(|u| u.can_attack())
    }

    fn grant_to_neighbors(&self, ctx: &mut PassiveContext<'_>) {
        if Self::lapsed(ctx) {
            return;
        }
        let bonus = self.bonus_at(ctx.owner_level());
        for neighbor in ctx.neighbors() {
            ctx.grant_haste(neighbor, bonus);
        }
    }
}

impl PassiveEffect for AttackSpeedAura {
    fn name(&self) -> &'static str {
        "attack_speed_aura"
    }

    fn on_dice_spawn(&mut self, ctx: &mut PassiveContext<'_>) {
        self.grant_to_neighbors(ctx);
    }

    // Pausing the loop revokes the aura; re-grant when combat resumes.
    fn on_combat_start(&mut self, ctx: &mut PassiveContext<'_>) {
        self.grant_to_neighbors(ctx);
    }

    fn on_neighbor_spawn(&mut self, ctx: &mut PassiveContext<'_>, neighbor: DiceId) {
        if Self::lapsed(ctx) {
            return;
        }
        let bonus = self.bonus_at(ctx.owner_level());
        ctx.grant_haste(neighbor, bonus);
    }

    fn on_neighbor_removed(&mut self, ctx: &mut PassiveContext<'_>, neighbor: DiceId) {
        ctx.revoke_haste(neighbor);
    }

    fn on_dice_removed(&mut self, ctx: &mut PassiveContext<'_>) {
        ctx.revoke_all_haste();
    }

    fn on_dice_merged(&mut self, ctx: &mut PassiveContext<'_>, _consumed: DiceId, survivor: DiceId) {
        // The survivor's level changed; refresh the bonus it hands out.
        if ctx.owner() == survivor {
            self.grant_to_neighbors(ctx);
        }
    }
}

/// Adds flat damage to every cast of adjacent attacking dice.
#[derive(Clone, Debug)]
pub struct SupportDamage {
    flat: f32,
}

impl SupportDamage {
    pub fn new(flat: f32) -> Self {
        Self { flat }
    }
}

impl PassiveEffect for SupportDamage {
    fn name(&self) -> &'static str {
        "support_damage"
    }

    fn on_neighbor_fire(&mut self, _ctx: &mut PassiveContext<'_>, _fired: DiceId, shot: &mut Shot) {
        shot.add(self.flat);
    }

    fn affected_neighbors(
        &self,
        units: &UnitStore,
        owner: DiceId,
        config: &CombatConfig,
    ) -> BTreeSet<DiceId> {
        attacking_neighbors(units, owner, config)
    }
}

/// Multiplies every cast of adjacent attacking dice.
#[derive(Clone, Debug)]
pub struct Amplifier {
    multiplier: f32,
}

impl Amplifier {
    pub fn new(multiplier: f32) -> Self {
        Self { multiplier }
    }
}

impl PassiveEffect for Amplifier {
    fn name(&self) -> &'static str {
        "amplifier"
    }

    fn on_neighbor_fire(&mut self, _ctx: &mut PassiveContext<'_>, _fired: DiceId, shot: &mut Shot) {
        shot.scale(self.multiplier);
    }

    fn affected_neighbors(
        &self,
        units: &UnitStore,
        owner: DiceId,
        config: &CombatConfig,
    ) -> BTreeSet<DiceId> {
        attacking_neighbors(units, owner, config)
    }
}

fn attacking_neighbors(units: &UnitStore, owner: DiceId, config: &CombatConfig) -> BTreeSet<DiceId> {
    units
        .neighbors_of(owner, config.adjacency_radius)
        .into_iter()
        .filter(|id| units.get(*id).is_some_and(|u| u.can_attack()))
        .collect()
}
