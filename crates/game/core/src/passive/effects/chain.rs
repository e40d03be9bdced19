use tracing::trace;

use crate::passive::{PassiveContext, PassiveEffect};
use crate::state::TargetId;

/// Arcs a fraction of every hit to the nearest other enemy.
///
/// The arc is an independent damage event: it does not pass through
/// `on_enemy_hit` again, so it never chains further.
#[derive(Clone, Debug)]
pub struct ChainLightning {
    ratio: f32,
    range: f32,
}

impl ChainLightning {
    pub fn new(ratio: f32, range: f32) -> Self {
        Self { ratio, range }
    }
}

impl PassiveEffect for ChainLightning {
    fn name(&self) -> &'static str {
        "chain_lightning"
    }

    fn on_enemy_hit(
        &mut self,
        ctx: &mut PassiveContext<'_>,
        target: TargetId,
        damage_dealt: &mut f32,
    ) {
        if *damage_dealt <= 0.0 {
            return;
        }
        let Some(next) = ctx.env.nearest_other_target(target, self.range) else {
            trace!(target: "dice_core::passive", from = %target, "no chain target in range");
            return;
        };
        ctx.deal_secondary_damage(next, *damage_dealt * self.ratio);
    }
}
