//! Per-instance mutable combat stats.
//!
//! [`RuntimeDiceStats`] is pure state. It knows nothing about combat phases;
//! passives and the board mutate it under their own contracts.
//!
//! # Fire interval layering
//!
//! ```text
//! base_fire_interval   template value, scaled by temporary speed passives
//!        │
//!        ▼  BuffLedger::apply  (÷ (1 + bonus)^N, N = adjacency sources)
//! fire_interval        value the fire loop waits on
//! ```
//!
//! The effective value is always recomputed from the base, never compounded
//! onto itself.

use crate::template::DiceTemplate;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuntimeDiceStats {
    /// Effective seconds between shots.
    pub fire_interval: f32,
    /// Fire interval before adjacency buffs.
    pub base_fire_interval: f32,
    pub base_damage: f32,
    pub sides: u32,
    pub crit_chance: f32,
    /// Normalized luck (`template.luck / 100`).
    pub luck: f32,
    /// Derived: `clamp01(luck * LUCK_MULTICAST_FACTOR)`.
    pub multicast_chance: f32,
    /// Current level in `0..max_upgrade_level`.
    pub upgrade_level: u32,
}

impl RuntimeDiceStats {
    pub const LUCK_MULTICAST_FACTOR: f32 = 0.25;

    pub fn from_template(template: &DiceTemplate) -> Self {
        let luck = template.luck / 100.0;
        Self {
            fire_interval: template.fire_interval,
            base_fire_interval: template.fire_interval,
            base_damage: template.base_damage,
            sides: template.sides,
            crit_chance: template.crit_chance,
            luck,
            multicast_chance: Self::multicast_from_luck(luck),
            upgrade_level: 0,
        }
    }

    /// Multicast chance implied by a normalized luck value.
    pub fn multicast_from_luck(luck: f32) -> f32 {
        (luck * Self::LUCK_MULTICAST_FACTOR).clamp(0.0, 1.0)
    }

    /// Replaces normalized luck and re-derives the multicast chance.
    pub fn set_luck(&mut self, luck: f32) {
        self.luck = luck;
        self.multicast_chance = Self::multicast_from_luck(luck);
    }

    /// Expected casts per tick under the unbounded geometric retry chain.
    pub fn expected_casts(&self) -> f32 {
        if self.multicast_chance >= 1.0 {
            f32::INFINITY
        } else {
            1.0 / (1.0 - self.multicast_chance)
        }
    }
}
