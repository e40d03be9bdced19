//! Placed dice instances and the store the board keeps them in.
mod fire_loop;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

pub use fire_loop::{FireLoop, FireState};

use crate::passive::PassiveEffect;
use crate::state::{DiceId, Position};
use crate::stats::RuntimeDiceStats;
use crate::template::DiceTemplate;

/// A placed, combat-capable dice.
///
/// `stats` is optional: a unit without stats is misconfigured and never
/// fires, but it still occupies its cell and takes part in adjacency.
pub struct DiceUnit {
    id: DiceId,
    template: Arc<DiceTemplate>,
    pub stats: Option<RuntimeDiceStats>,
    pub(crate) passive: Option<Box<dyn PassiveEffect>>,
    pub position: Position,
    pub(crate) fire_loop: FireLoop,
}

impl DiceUnit {
    pub fn new(
        id: DiceId,
        template: Arc<DiceTemplate>,
        position: Position,
        passive: Option<Box<dyn PassiveEffect>>,
    ) -> Self {
        let stats = Some(RuntimeDiceStats::from_template(&template));
        Self {
            id,
            template,
            stats,
            passive,
            position,
            fire_loop: FireLoop::default(),
        }
    }

    pub fn id(&self) -> DiceId {
        self.id
    }

    pub fn template(&self) -> &Arc<DiceTemplate> {
        &self.template
    }

    pub fn level(&self) -> u32 {
        self.stats.as_ref().map_or(0, |s| s.upgrade_level)
    }

    pub fn can_attack(&self) -> bool {
        self.template.can_attack
    }

    pub fn is_firing(&self) -> bool {
        self.fire_loop.is_firing()
    }

    pub fn fire_state(&self) -> FireState {
        self.fire_loop.state()
    }

    pub fn passive_name(&self) -> Option<&'static str> {
        self.passive.as_ref().map(|p| p.name())
    }

    pub fn has_passive(&self) -> bool {
        self.passive.is_some()
    }

    /// Same template, same level, and room to level up.
    pub fn is_merge_compatible(&self, other: &DiceUnit) -> bool {
        self.id != other.id
            && self.template.id == other.template.id
            && self.level() == other.level()
            && self.level() + 1 < self.template.max_upgrade_level
    }
}

impl fmt::Debug for DiceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiceUnit")
            .field("id", &self.id)
            .field("template", &self.template.id)
            .field("position", &self.position)
            .field("level", &self.level())
            .field("passive", &self.passive_name())
            .field("fire_state", &self.fire_loop.state())
            .finish()
    }
}

/// All dice currently on the board, ordered by id.
#[derive(Debug, Default)]
pub struct UnitStore {
    units: BTreeMap<DiceId, DiceUnit>,
}

impl UnitStore {
    pub fn get(&self, id: DiceId) -> Option<&DiceUnit> {
        self.units.get(&id)
    }

    pub fn get_mut(&mut self, id: DiceId) -> Option<&mut DiceUnit> {
        self.units.get_mut(&id)
    }

    pub fn stats(&self, id: DiceId) -> Option<&RuntimeDiceStats> {
        self.units.get(&id)?.stats.as_ref()
    }

    pub fn stats_mut(&mut self, id: DiceId) -> Option<&mut RuntimeDiceStats> {
        self.units.get_mut(&id)?.stats.as_mut()
    }

    pub fn contains(&self, id: DiceId) -> bool {
        self.units.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn ids(&self) -> Vec<DiceId> {
        self.units.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiceUnit> {
        self.units.values()
    }

    pub(crate) fn insert(&mut self, unit: DiceUnit) {
        self.units.insert(unit.id, unit);
    }

    pub(crate) fn remove(&mut self, id: DiceId) -> Option<DiceUnit> {
        self.units.remove(&id)
    }

    /// Units within `radius` of `position`, excluding `exclude`.
    pub fn within(
        &self,
        position: Position,
        radius: f32,
        exclude: Option<DiceId>,
    ) -> BTreeSet<DiceId> {
        self.units
            .values()
            .filter(|u| Some(u.id) != exclude)
            .filter(|u| u.position.distance(&position) <= radius)
            .map(|u| u.id)
            .collect()
    }

    /// Adjacency query: every other unit within `radius` of `id`.
    ///
    /// Brute-force O(n); boards hold a few dozen cells at most. Symmetric by
    /// construction since distance is.
    pub fn neighbors_of(&self, id: DiceId, radius: f32) -> BTreeSet<DiceId> {
        match self.units.get(&id) {
            Some(unit) => self.within(unit.position, radius, Some(id)),
            None => BTreeSet::new(),
        }
    }

    /// The unit occupying the cell at `position`, if any.
    pub fn at(&self, position: Position) -> Option<DiceId> {
        const CELL_EPSILON: f32 = 0.01;
        self.units
            .values()
            .find(|u| u.position.distance(&position) < CELL_EPSILON)
            .map(|u| u.id)
    }
}
