//! Per-combat counters accumulated by the worker.
use serde::{Deserialize, Serialize};

use dice_core::{EffectRecord, FireReport};

/// Aggregate output of the current (or most recent) combat.
///
/// Reset when a combat starts; frames advanced outside combat are not counted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatTotals {
    pub frames: u64,
    pub fire_ticks: u64,
    pub crits: u64,
    pub casts: u64,
    pub projectiles: u64,
    pub skipped: u64,
    pub dropped: u64,
    /// Damage dealt by projectile impacts and secondary hits.
    pub damage: f32,
    pub kills: u64,
    pub healed: f32,
    pub shielded: f32,
}

impl CombatTotals {
    pub fn record_fire(&mut self, report: &FireReport) {
        self.fire_ticks += 1;
        self.crits += u64::from(report.crit);
        self.casts += u64::from(report.casts);
        self.projectiles += u64::from(report.projectiles);
        self.skipped += u64::from(report.skipped);
        self.dropped += u64::from(report.dropped);
    }

    pub fn record_effect(&mut self, record: &EffectRecord) {
        match record {
            EffectRecord::Hit(hit) | EffectRecord::SecondaryHit(hit) => {
                self.damage += hit.dealt;
                self.kills += u64::from(hit.killed);
            }
            EffectRecord::Healed { amount, .. } => self.healed += amount,
            EffectRecord::Shielded { amount, .. } => self.shielded += amount,
            EffectRecord::ProjectileEmitted(_) | EffectRecord::CastDropped { .. } => {}
        }
    }

    /// Mean damage per fire tick, zero before the first tick.
    pub fn damage_per_tick(&self) -> f32 {
        if self.fire_ticks == 0 {
            0.0
        } else {
            self.damage / self.fire_ticks as f32
        }
    }
}
