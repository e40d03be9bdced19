use crate::passive::{PassiveContext, PassiveEffect, Shot};

/// Rolling the highest face multiplies that cast.
#[derive(Clone, Debug)]
pub struct Gambler {
    max_roll_multiplier: f32,
}

impl Gambler {
    pub fn new(max_roll_multiplier: f32) -> Self {
        Self {
            max_roll_multiplier,
        }
    }
}

impl PassiveEffect for Gambler {
    fn name(&self) -> &'static str {
        "gambler"
    }

    fn on_dice_fire(&mut self, _ctx: &mut PassiveContext<'_>, shot: &mut Shot) {
        if shot.is_max_roll() {
            shot.scale(self.max_roll_multiplier);
        }
    }
}

/// Every `every`-th own cast of a combat is multiplied.
#[derive(Clone, Debug)]
pub struct Overcharge {
    every: u32,
    multiplier: f32,
    casts: u32,
}

impl Overcharge {
    pub fn new(every: u32, multiplier: f32) -> Self {
        Self {
            every: every.max(1),
            multiplier,
            casts: 0,
        }
    }
}

impl PassiveEffect for Overcharge {
    fn name(&self) -> &'static str {
        "overcharge"
    }

    fn on_combat_start(&mut self, _ctx: &mut PassiveContext<'_>) {
        self.casts = 0;
    }

    fn on_dice_fire(&mut self, _ctx: &mut PassiveContext<'_>, shot: &mut Shot) {
        self.casts += 1;
        if self.casts % self.every == 0 {
            shot.scale(self.multiplier);
        }
    }
}
