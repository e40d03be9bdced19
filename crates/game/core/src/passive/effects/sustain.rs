use crate::passive::{PassiveContext, PassiveEffect, Shot};
use crate::state::TargetId;

/// Converts each cast into a player heal instead of a projectile.
#[derive(Clone, Debug)]
pub struct Heal {
    ratio: f32,
}

impl Heal {
    pub fn new(ratio: f32) -> Self {
        Self { ratio }
    }
}

impl PassiveEffect for Heal {
    fn name(&self) -> &'static str {
        "heal"
    }

    fn on_dice_fire(&mut self, ctx: &mut PassiveContext<'_>, shot: &mut Shot) {
        shot.skip();
        ctx.heal_player(shot.damage() * self.ratio);
    }
}

/// Converts each cast into a player shield instead of a projectile.
#[derive(Clone, Debug)]
pub struct Shield {
    ratio: f32,
}

impl Shield {
    pub fn new(ratio: f32) -> Self {
        Self { ratio }
    }
}

impl PassiveEffect for Shield {
    fn name(&self) -> &'static str {
        "shield"
    }

    fn on_dice_fire(&mut self, ctx: &mut PassiveContext<'_>, shot: &mut Shot) {
        shot.skip();
        ctx.shield_player(shot.damage() * self.ratio);
    }
}

/// Heals the player for a share of the damage each projectile deals.
#[derive(Clone, Debug)]
pub struct Vampiric {
    ratio: f32,
}

impl Vampiric {
    pub fn new(ratio: f32) -> Self {
        Self { ratio }
    }
}

impl PassiveEffect for Vampiric {
    fn name(&self) -> &'static str {
        "vampiric"
    }

    fn on_enemy_hit(
        &mut self,
        ctx: &mut PassiveContext<'_>,
        _target: TargetId,
        damage_dealt: &mut f32,
    ) {
        if *damage_dealt > 0.0 {
            ctx.heal_player(*damage_dealt * self.ratio);
        }
    }
}
