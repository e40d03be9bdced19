use crate::passive::{PassiveContext, PassiveEffect, Shot};
use crate::state::TargetId;

/// Each kill during combat speeds the owner up, up to `max_stacks`.
/// Stacks and speed reset when combat ends.
#[derive(Clone, Debug)]
pub struct Bloodlust {
    haste_per_kill: f32,
    max_stacks: u32,
    stacks: u32,
    saved_base: Option<f32>,
}

impl Bloodlust {
    pub fn new(haste_per_kill: f32, max_stacks: u32) -> Self {
        Self {
            haste_per_kill,
            max_stacks,
            stacks: 0,
            saved_base: None,
        }
    }

    pub fn stacks(&self) -> u32 {
        self.stacks
    }
}

impl PassiveEffect for Bloodlust {
    fn name(&self) -> &'static str {
        "bloodlust"
    }

    fn on_enemy_killed(&mut self, ctx: &mut PassiveContext<'_>, _target: TargetId) {
        // Late projectiles landing after combat end must not leave a buff behind.
        if !ctx.combat_active() || self.stacks >= self.max_stacks {
            return;
        }
        let owner = ctx.owner();
        let Some(stats) = ctx.owner_stats_mut() else {
            return;
        };
        let baseline = *self.saved_base.get_or_insert(stats.base_fire_interval);
        self.stacks += 1;
        stats.base_fire_interval =
            baseline / (1.0 + self.haste_per_kill).powi(self.stacks as i32);
        ctx.refresh_fire_interval(owner);
    }

    fn on_combat_end(&mut self, ctx: &mut PassiveContext<'_>) {
        self.stacks = 0;
        let Some(baseline) = self.saved_base.take() else {
            return;
        };
        let owner = ctx.owner();
        if let Some(stats) = ctx.owner_stats_mut() {
            stats.base_fire_interval = baseline;
        }
        ctx.refresh_fire_interval(owner);
    }
}

/// A kill primes the owner's next cast with bonus damage.
#[derive(Clone, Debug)]
pub struct Executioner {
    bonus_damage: f32,
    primed: bool,
}

impl Executioner {
    pub fn new(bonus_damage: f32) -> Self {
        Self {
            bonus_damage,
            primed: false,
        }
    }
}

impl PassiveEffect for Executioner {
    fn name(&self) -> &'static str {
        "executioner"
    }

    fn on_enemy_killed(&mut self, _ctx: &mut PassiveContext<'_>, _target: TargetId) {
        self.primed = true;
    }

    fn on_dice_fire(&mut self, _ctx: &mut PassiveContext<'_>, shot: &mut Shot) {
        if std::mem::take(&mut self.primed) {
            shot.add(self.bonus_damage);
        }
    }

    fn on_combat_end(&mut self, _ctx: &mut PassiveContext<'_>) {
        self.primed = false;
    }
}
