//! Damageable-target capability and its in-memory implementation.

use std::collections::BTreeMap;

use crate::state::{Position, TargetId};

/// Result of applying damage to one target.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageOutcome {
    /// Damage actually absorbed by the target (capped at its remaining health).
    pub dealt: f32,
    pub killed: bool,
}

/// Capability exposing the enemies a dice can shoot at.
///
/// The combat core never owns enemies; it only needs to know whether one
/// exists, pick one, find a neighbor of one, and hurt one.
pub trait TargetProvider: Send {
    /// Returns true if at least one living target exists.
    fn has_any_target(&self) -> bool;

    /// Picks any living target. Which one is left to the provider.
    fn pick_arbitrary_target(&mut self) -> Option<TargetId>;

    /// Nearest living target other than `excluding`, within `max_range` of it.
    fn nearest_other_target(&self, excluding: TargetId, max_range: f32) -> Option<TargetId>;

    /// Applies damage. Returns `None` when the target is unknown or already dead.
    fn apply_damage(&mut self, target: TargetId, amount: f32) -> Option<DamageOutcome>;

    fn position_of(&self, target: TargetId) -> Option<Position>;
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetState {
    pub position: Position,
    pub health: f32,
    pub max_health: f32,
}

impl TargetState {
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// Simple enemy roster keyed by [`TargetId`].
///
/// Killed targets stay in the pool (with zero health) until
/// [`TargetPool::clear_dead`] so that on-hit effects resolving after a lethal
/// blow can still locate the corpse.
#[derive(Clone, Debug, Default)]
pub struct TargetPool {
    targets: BTreeMap<TargetId, TargetState>,
    next_id: u32,
}

impl TargetPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, position: Position, health: f32) -> TargetId {
        let id = TargetId(self.next_id);
        self.next_id += 1;
        self.targets.insert(
            id,
            TargetState {
                position,
                health,
                max_health: health,
            },
        );
        id
    }

    pub fn get(&self, id: TargetId) -> Option<&TargetState> {
        self.targets.get(&id)
    }

    pub fn health_of(&self, id: TargetId) -> Option<f32> {
        self.targets.get(&id).map(|t| t.health)
    }

    pub fn alive_count(&self) -> usize {
        self.targets.values().filter(|t| t.is_alive()).count()
    }

    /// Drops every killed target. Returns how many were removed.
    pub fn clear_dead(&mut self) -> usize {
        let before = self.targets.len();
        self.targets.retain(|_, t| t.is_alive());
        before - self.targets.len()
    }

    fn alive(&self) -> impl Iterator<Item = (&TargetId, &TargetState)> {
        self.targets.iter().filter(|(_, t)| t.is_alive())
    }
}

impl TargetProvider for TargetPool {
    fn has_any_target(&self) -> bool {
        self.alive().next().is_some()
    }

    fn pick_arbitrary_target(&mut self) -> Option<TargetId> {
        self.alive().map(|(&id, _)| id).next()
    }

    fn nearest_other_target(&self, excluding: TargetId, max_range: f32) -> Option<TargetId> {
        let origin = self.targets.get(&excluding)?.position;
        self.alive()
            .filter(|(id, _)| **id != excluding)
            .map(|(&id, t)| (id, origin.distance(&t.position)))
            .filter(|(_, distance)| *distance <= max_range)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    fn apply_damage(&mut self, target: TargetId, amount: f32) -> Option<DamageOutcome> {
        let state = self.targets.get_mut(&target)?;
        if !state.is_alive() {
            return None;
        }
        let dealt = amount.max(0.0).min(state.health);
        state.health -= dealt;
        Some(DamageOutcome {
            dealt,
            killed: !state.is_alive(),
        })
    }

    fn position_of(&self, target: TargetId) -> Option<Position> {
        self.targets.get(&target).map(|t| t.position)
    }
}
