//! Observable side effects of combat resolution.
//!
//! The board appends an [`EffectRecord`] for every projectile, hit, heal, and
//! shield it produces (including those produced by passives). Hosts drain the
//! log each frame to drive floating numbers, VFX, or an event bus.

use crate::env::Projectile;
use crate::state::{DiceId, TargetId};

/// Damage that landed on a target.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitReport {
    pub source: DiceId,
    pub target: TargetId,
    pub dealt: f32,
    pub killed: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectRecord {
    ProjectileEmitted(Projectile),
    /// A projectile resolved against its target.
    Hit(HitReport),
    /// Independent damage caused by an on-hit effect (chains, splashes).
    /// Secondary hits never re-trigger on-hit hooks.
    SecondaryHit(HitReport),
    Healed { source: DiceId, amount: f32 },
    Shielded { source: DiceId, amount: f32 },
    /// Damage was computed but nothing could carry it.
    CastDropped { source: DiceId, damage: f32 },
}
