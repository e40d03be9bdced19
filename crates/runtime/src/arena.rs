//! Shared collaborators lent to the worker's board.
//!
//! The board owns its [`dice_core::CombatEnv`] as boxed trait objects, so the
//! worker keeps a second handle on the same target pool and player ledger to
//! spawn enemies and answer queries between frames.
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dice_core::{
    DamageOutcome, PlayerLedger, PlayerVitals, Position, TargetId, TargetPool, TargetProvider,
};

/// Ignores poisoning: neither the pool nor the ledger has cross-field invariants.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone, Debug, Default)]
pub struct SharedTargets(Arc<Mutex<TargetPool>>);

impl SharedTargets {
    pub fn new(pool: TargetPool) -> Self {
        Self(Arc::new(Mutex::new(pool)))
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut TargetPool) -> R) -> R {
        f(&mut lock(&self.0))
    }

    pub fn spawn(&self, position: Position, health: f32) -> TargetId {
        self.with(|pool| pool.spawn(position, health))
    }

    pub fn alive_count(&self) -> usize {
        self.with(|pool| pool.alive_count())
    }
}

impl TargetProvider for SharedTargets {
    fn has_any_target(&self) -> bool {
        lock(&self.0).has_any_target()
    }

    fn pick_arbitrary_target(&mut self) -> Option<TargetId> {
        lock(&self.0).pick_arbitrary_target()
    }

    fn nearest_other_target(&self, excluding: TargetId, max_range: f32) -> Option<TargetId> {
        lock(&self.0).nearest_other_target(excluding, max_range)
    }

    fn apply_damage(&mut self, target: TargetId, amount: f32) -> Option<DamageOutcome> {
        lock(&self.0).apply_damage(target, amount)
    }

    fn position_of(&self, target: TargetId) -> Option<Position> {
        lock(&self.0).position_of(target)
    }
}

#[derive(Clone, Debug, Default)]
pub struct SharedPlayer(Arc<Mutex<PlayerLedger>>);

impl SharedPlayer {
    pub fn ledger(&self) -> PlayerLedger {
        *lock(&self.0)
    }
}

impl PlayerVitals for SharedPlayer {
    fn heal(&mut self, amount: f32) {
        lock(&self.0).heal(amount);
    }

    fn add_shield(&mut self, amount: f32) {
        lock(&self.0).add_shield(amount);
    }
}
