//! Event types for different topics.

use serde::{Deserialize, Serialize};

use dice_core::{
    DiceId, EffectRecord, FireReport, HitReport, MergeReport, Position, Projectile, TargetId,
};

/// Combat phase transitions and roster milestones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PhaseEvent {
    CombatStarted { firing: usize },
    CombatEnded { frame: u64 },
    TargetSpawned { target: TargetId, position: Position, health: f32 },
    /// The last living target died while combat was running.
    TargetsCleared { frame: u64 },
}

/// Board roster changes and fire ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DiceEvent {
    Placed {
        dice: DiceId,
        template: String,
        position: Position,
    },
    Removed {
        dice: DiceId,
    },
    Merged(MergeReport),
    Fired(FireReport),
}

/// Observable combat output, one per drained [`EffectRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EffectEvent {
    ProjectileEmitted(Projectile),
    Hit {
        hit: HitReport,
        /// Chain or splash damage rather than a projectile impact.
        secondary: bool,
    },
    Healed {
        source: DiceId,
        amount: f32,
    },
    Shielded {
        source: DiceId,
        amount: f32,
    },
    CastDropped {
        source: DiceId,
        damage: f32,
    },
}

impl From<EffectRecord> for EffectEvent {
    fn from(record: EffectRecord) -> Self {
        match record {
            EffectRecord::ProjectileEmitted(projectile) => Self::ProjectileEmitted(projectile),
            EffectRecord::Hit(hit) => Self::Hit {
                hit,
                secondary: false,
            },
            EffectRecord::SecondaryHit(hit) => Self::Hit {
                hit,
                secondary: true,
            },
            EffectRecord::Healed { source, amount } => Self::Healed { source, amount },
            EffectRecord::Shielded { source, amount } => Self::Shielded { source, amount },
            EffectRecord::CastDropped { source, damage } => Self::CastDropped { source, damage },
        }
    }
}
