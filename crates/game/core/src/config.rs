/// Combat tuning constants and runtime-tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Radius (in cell units) within which two dice are neighbors.
    /// 1.5 covers the eight surrounding cells of a unit-spaced grid.
    pub adjacency_radius: f32,
    /// Damage multiplier applied on a critical roll.
    pub crit_multiplier: f32,
    /// Hard ceiling on casts per tick. Only reachable when the multicast
    /// chance is at (or numerically near) 1.0.
    pub max_casts_per_tick: u32,
}

impl CombatConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ADJACENCY_RADIUS: f32 = 1.5;
    pub const DEFAULT_CRIT_MULTIPLIER: f32 = 2.0;
    pub const DEFAULT_MAX_CASTS_PER_TICK: u32 = 64;

    pub fn new() -> Self {
        Self {
            adjacency_radius: Self::DEFAULT_ADJACENCY_RADIUS,
            crit_multiplier: Self::DEFAULT_CRIT_MULTIPLIER,
            max_casts_per_tick: Self::DEFAULT_MAX_CASTS_PER_TICK,
        }
    }

    pub fn with_adjacency_radius(mut self, adjacency_radius: f32) -> Self {
        self.adjacency_radius = adjacency_radius;
        self
    }

    pub fn with_max_casts_per_tick(mut self, max_casts_per_tick: u32) -> Self {
        self.max_casts_per_tick = max_casts_per_tick.max(1);
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
