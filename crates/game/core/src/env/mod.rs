//! Capabilities the combat core consumes from its host.
//!
//! Targets, projectile dispatch, and the player are external collaborators.
//! [`CombatEnv`] bundles them as optional trait objects: any of them may be
//! absent, and every consumer treats absence as "skip that part of the
//! effect" rather than an error.
mod player;
mod projectiles;
mod rng;
mod targets;

use std::fmt;

pub use player::{PlayerLedger, PlayerVitals};
pub use projectiles::{InstantProjectiles, Projectile, ProjectileDispatch, ProjectileFate};
pub use rng::{DiceRng, PcgRng};
pub use targets::{DamageOutcome, TargetPool, TargetProvider, TargetState};

use crate::state::{Position, TargetId};

/// Injected collaborators for one board.
#[derive(Default)]
pub struct CombatEnv {
    pub targets: Option<Box<dyn TargetProvider>>,
    pub projectiles: Option<Box<dyn ProjectileDispatch>>,
    pub player: Option<Box<dyn PlayerVitals>>,
}

impl CombatEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_targets(mut self, targets: impl TargetProvider + 'static) -> Self {
        self.targets = Some(Box::new(targets));
        self
    }

    pub fn with_projectiles(mut self, projectiles: impl ProjectileDispatch + 'static) -> Self {
        self.projectiles = Some(Box::new(projectiles));
        self
    }

    pub fn with_player(mut self, player: impl PlayerVitals + 'static) -> Self {
        self.player = Some(Box::new(player));
        self
    }

    pub fn has_any_target(&self) -> bool {
        self.targets.as_ref().is_some_and(|t| t.has_any_target())
    }

    pub fn pick_arbitrary_target(&mut self) -> Option<TargetId> {
        self.targets.as_mut()?.pick_arbitrary_target()
    }

    pub fn nearest_other_target(&self, excluding: TargetId, max_range: f32) -> Option<TargetId> {
        self.targets
            .as_ref()?
            .nearest_other_target(excluding, max_range)
    }

    pub fn apply_damage(&mut self, target: TargetId, amount: f32) -> Option<DamageOutcome> {
        self.targets.as_mut()?.apply_damage(target, amount)
    }

    pub fn target_position(&self, target: TargetId) -> Option<Position> {
        self.targets.as_ref()?.position_of(target)
    }

    /// Heals the player. Returns false when no player is present.
    pub fn heal_player(&mut self, amount: f32) -> bool {
        match self.player.as_mut() {
            Some(player) => {
                player.heal(amount);
                true
            }
            None => false,
        }
    }

    /// Shields the player. Returns false when no player is present.
    pub fn shield_player(&mut self, amount: f32) -> bool {
        match self.player.as_mut() {
            Some(player) => {
                player.add_shield(amount);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for CombatEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombatEnv")
            .field("targets", &self.targets.is_some())
            .field("projectiles", &self.projectiles.is_some())
            .field("player", &self.player.is_some())
            .finish()
    }
}
