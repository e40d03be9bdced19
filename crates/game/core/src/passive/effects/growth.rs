use crate::passive::{PassiveContext, PassiveEffect};
use crate::state::DiceId;

/// Merging permanently raises the surviving dice's base damage.
#[derive(Clone, Debug)]
pub struct Growth {
    damage_per_merge: f32,
}

impl Growth {
    pub fn new(damage_per_merge: f32) -> Self {
        Self { damage_per_merge }
    }
}

impl PassiveEffect for Growth {
    fn name(&self) -> &'static str {
        "growth"
    }

    fn on_dice_merged(&mut self, ctx: &mut PassiveContext<'_>, _consumed: DiceId, survivor: DiceId) {
        // Both sides see the merge; only the survivor's copy pays out.
        if ctx.owner() != survivor {
            return;
        }
        if let Some(stats) = ctx.units.stats_mut(survivor) {
            stats.base_damage += self.damage_per_merge;
        }
    }
}
