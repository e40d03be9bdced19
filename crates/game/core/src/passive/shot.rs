//! Per-cast damage accumulator threaded through fire hooks.

/// One cast in flight through the hook pipeline.
///
/// Hooks add to `flat` or scale `multiplier`; final damage is
/// `(base + flat) * multiplier`. Both operations commute, so neighbor hooks
/// produce the same result in any evaluation order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shot {
    /// Rolled amount shared by every cast of the tick (crit included).
    pub base: f32,
    pub flat: f32,
    pub multiplier: f32,
    /// Set by a hook to consume the cast without emitting a projectile.
    pub skip_projectile: bool,
    pub rolled: u32,
    pub sides: u32,
    pub crit: bool,
    /// Zero-based cast number within the tick.
    pub cast_index: u32,
}

impl Shot {
    pub fn new(base: f32, rolled: u32, sides: u32, crit: bool, cast_index: u32) -> Self {
        Self {
            base,
            flat: 0.0,
            multiplier: 1.0,
            skip_projectile: false,
            rolled,
            sides,
            crit,
            cast_index,
        }
    }

    pub fn damage(&self) -> f32 {
        (self.base + self.flat) * self.multiplier
    }

    pub fn add(&mut self, amount: f32) {
        self.flat += amount;
    }

    pub fn scale(&mut self, factor: f32) {
        self.multiplier *= factor;
    }

    pub fn skip(&mut self) {
        self.skip_projectile = true;
    }

    pub fn is_max_roll(&self) -> bool {
        self.sides > 1 && self.rolled == self.sides
    }
}
