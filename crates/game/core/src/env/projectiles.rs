//! Projectile dispatch capability.

use crate::state::{DiceId, Position, TargetId};

/// A damage-carrying shot leaving a dice.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Projectile {
    pub source: DiceId,
    pub origin: Position,
    pub target: TargetId,
    pub damage: f32,
    pub crit: bool,
}

/// What the dispatcher did with a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProjectileFate {
    /// Travelling; the host reports the impact later via
    /// [`crate::Board::resolve_hit`].
    InFlight,
    /// Applied on emission; the board resolves the hit immediately.
    Landed,
}

/// Emits projectiles toward the target pool.
///
/// Fire-and-forget from the core's point of view: the projectile subsystem
/// owns travel and hit detection.
pub trait ProjectileDispatch: Send {
    fn emit_projectile(&mut self, projectile: &Projectile) -> ProjectileFate;
}

/// Dispatcher with no travel time: every projectile lands on emission.
#[derive(Clone, Copy, Debug, Default)]
pub struct InstantProjectiles {
    emitted: u64,
}

impl InstantProjectiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl ProjectileDispatch for InstantProjectiles {
    fn emit_projectile(&mut self, _projectile: &Projectile) -> ProjectileFate {
        self.emitted += 1;
        ProjectileFate::Landed
    }
}
