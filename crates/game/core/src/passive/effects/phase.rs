use crate::passive::{PassiveContext, PassiveEffect};

/// Raises crit chance for the duration of a combat.
#[derive(Clone, Debug)]
pub struct CritBoost {
    bonus: f32,
    /// Crit chance observed at combat start.
    saved: Option<f32>,
}

impl CritBoost {
    pub fn new(bonus: f32) -> Self {
        Self { bonus, saved: None }
    }
}

impl PassiveEffect for CritBoost {
    fn name(&self) -> &'static str {
        "crit_boost"
    }

    fn on_combat_start(&mut self, ctx: &mut PassiveContext<'_>) {
        let Some(stats) = ctx.owner_stats_mut() else {
            return;
        };
        let baseline = *self.saved.get_or_insert(stats.crit_chance);
        stats.crit_chance = (baseline + self.bonus).min(1.0);
    }

    fn on_combat_end(&mut self, ctx: &mut PassiveContext<'_>) {
        let Some(baseline) = self.saved.take() else {
            return;
        };
        if let Some(stats) = ctx.owner_stats_mut() {
            stats.crit_chance = baseline;
        }
    }
}

/// Fires `speed_multiplier` times faster while combat lasts.
///
/// Scales the base interval so adjacency haste keeps stacking on top.
#[derive(Clone, Debug)]
pub struct Frenzy {
    speed_multiplier: f32,
    saved_base: Option<f32>,
}

impl Frenzy {
    pub fn new(speed_multiplier: f32) -> Self {
        Self {
            speed_multiplier,
            saved_base: None,
        }
    }
}

impl PassiveEffect for Frenzy {
    fn name(&self) -> &'static str {
        "frenzy"
    }

    fn on_combat_start(&mut self, ctx: &mut PassiveContext<'_>) {
        if self.speed_multiplier <= 0.0 {
            return;
        }
        let owner = ctx.owner();
        let Some(stats) = ctx.owner_stats_mut() else {
            return;
        };
        let baseline = *self.saved_base.get_or_insert(stats.base_fire_interval);
        stats.base_fire_interval = baseline / self.speed_multiplier;
        ctx.refresh_fire_interval(owner);
    }

    fn on_combat_end(&mut self, ctx: &mut PassiveContext<'_>) {
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
