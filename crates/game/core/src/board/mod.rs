//! The placed-dice board: placement, removal, merge, and hook orchestration.
//!
//! [`Board`] is the single owner of every unit, the buff ledger, and the
//! injected collaborators. All passive hooks are invoked from here, one at a
//! time, by checking the passive out of its unit for the duration of the
//! call (see [`Board::with_passive`]). Destruction is synchronous: once
//! [`Board::remove`] returns, no later hook can observe the removed unit.
mod fire;
mod phase;
mod snapshot;

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

pub use fire::{FireOutcome, FireReport};
pub use snapshot::{BoardSnapshot, UnitSnapshot};

use crate::config::CombatConfig;
use crate::env::{CombatEnv, DiceRng, PcgRng};
use crate::error::BoardError;
use crate::passive::{BuffLedger, PassiveContext, PassiveEffect, PassiveKind};
use crate::record::EffectRecord;
use crate::state::{DiceId, Position};
use crate::stats::RuntimeDiceStats;
use crate::template::DiceTemplate;
use crate::unit::{DiceUnit, UnitStore};

/// Outcome of a successful merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeReport {
    pub consumed: DiceId,
    pub survivor: DiceId,
    pub previous_level: u32,
    pub level: u32,
}

pub struct Board {
    config: CombatConfig,
    units: UnitStore,
    buffs: BuffLedger,
    env: CombatEnv,
    rng: Box<dyn DiceRng>,
    effects: Vec<EffectRecord>,
    next_id: u32,
    combat_active: bool,
}

impl Board {
    pub fn new(config: CombatConfig, env: CombatEnv, rng: impl DiceRng + 'static) -> Self {
        Self {
            config,
            units: UnitStore::default(),
            buffs: BuffLedger::default(),
            env,
            rng: Box::new(rng),
            effects: Vec::new(),
            next_id: 0,
            combat_active: false,
        }
    }

    /// Board with the default seeded PCG generator.
    pub fn with_seed(config: CombatConfig, env: CombatEnv, seed: u64) -> Self {
        Self::new(config, env, PcgRng::seeded(seed))
    }

    // ===== accessors =====

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn units(&self) -> &UnitStore {
        &self.units
    }

    pub fn unit(&self, id: DiceId) -> Option<&DiceUnit> {
        self.units.get(id)
    }

    pub fn stats(&self, id: DiceId) -> Option<&RuntimeDiceStats> {
        self.units.stats(id)
    }

    /// Direct stat access for hosts applying out-of-combat upgrades.
    pub fn stats_mut(&mut self, id: DiceId) -> Option<&mut RuntimeDiceStats> {
        self.units.stats_mut(id)
    }

    pub fn buffs(&self) -> &BuffLedger {
        &self.buffs
    }

    pub fn env(&self) -> &CombatEnv {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut CombatEnv {
        &mut self.env
    }

    pub fn is_combat_active(&self) -> bool {
        self.combat_active
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Takes every effect recorded since the last drain.
    pub fn drain_effects(&mut self) -> Vec<EffectRecord> {
        std::mem::take(&mut self.effects)
    }

    // ===== placement =====

    pub fn is_occupied(&self, position: Position) -> bool {
        self.units.at(position).is_some()
    }

    pub fn unit_at(&self, position: Position) -> Option<DiceId> {
        self.units.at(position)
    }

    /// Places a dice with a fresh instance of its template's passive.
    pub fn place(
        &mut self,
        template: Arc<DiceTemplate>,
        position: Position,
    ) -> Result<DiceId, BoardError> {
        let passive = template.passive.as_ref().map(PassiveKind::instantiate);
        self.place_with_passive(template, position, passive)
    }

    /// Places a dice with an explicit passive instance (or none).
    pub fn place_with_passive(
        &mut self,
        template: Arc<DiceTemplate>,
        position: Position,
        passive: Option<Box<dyn PassiveEffect>>,
    ) -> Result<DiceId, BoardError> {
        template.validate()?;
        if let Some(occupant) = self.units.at(position) {
            return Err(BoardError::CellOccupied(position, occupant));
        }

        let id = DiceId(self.next_id);
        self.next_id += 1;
        let template_id = template.id.clone();
        self.units
            .insert(DiceUnit::new(id, template, position, passive));

        // Neighbors are notified after the newcomer has set itself up.
        let neighbors = self.units.neighbors_of(id, self.config.adjacency_radius);
        self.with_passive(id, |passive, ctx| passive.on_dice_spawn(ctx));
        for neighbor in &neighbors {
            self.with_passive(*neighbor, |passive, ctx| passive.on_neighbor_spawn(ctx, id));
        }

        if self.combat_active {
            self.with_passive(id, |passive, ctx| passive.on_combat_start(ctx));
            self.start_unit(id);
        }

        debug!(
            target: "dice_core::board",
            dice = %id,
            template = %template_id,
            %position,
            neighbors = neighbors.len(),
            "dice placed"
        );
        Ok(id)
    }

    /// Removes a dice (sold, trashed, or merged away).
    ///
    /// Runs the owner's removal hook exactly once, then every neighbor's
    /// `on_neighbor_removed`, then drops the unit and all buff bookkeeping
    /// that references it.
    pub fn remove(&mut self, id: DiceId) -> Result<DiceUnit, BoardError> {
        if !self.units.contains(id) {
            return Err(BoardError::UnknownDice(id));
        }

        // stop_unit already runs on_dice_removed for a firing unit.
        if !self.stop_unit(id) {
            self.with_passive(id, |passive, ctx| passive.on_dice_removed(ctx));
        }

        let neighbors = self.units.neighbors_of(id, self.config.adjacency_radius);
        for neighbor in neighbors {
            self.with_passive(neighbor, |passive, ctx| {
                passive.on_neighbor_removed(ctx, id)
            });
        }

        let unit = self.units.remove(id).ok_or(BoardError::UnknownDice(id))?;
        self.buffs.forget_target(id);
        for target in self.buffs.revoke_source(id) {
            if let Some(stats) = self.units.stats_mut(target) {
                self.buffs.apply(target, stats);
            }
        }

        debug!(target: "dice_core::board", dice = %id, "dice removed");
        Ok(unit)
    }

    // ===== merge =====

    /// True if `a` and `b` both exist and may be merged.
    pub fn can_merge(&self, a: DiceId, b: DiceId) -> bool {
        match (self.units.get(a), self.units.get(b)) {
            (Some(a), Some(b)) => a.is_merge_compatible(b),
            _ => false,
        }
    }

    /// Merges `consumed` into `survivor`.
    ///
    /// Compatibility is the caller's responsibility (see [`Board::can_merge`]);
    /// only identity is checked here. The survivor gains one level (bounded by
    /// its template), both passives see `on_dice_merged` exactly once, and the
    /// consumed unit is gone before this returns.
    pub fn merge(&mut self, consumed: DiceId, survivor: DiceId) -> Result<MergeReport, BoardError> {
        if consumed == survivor {
            return Err(BoardError::SelfMerge(consumed));
        }
        if !self.units.contains(consumed) {
            return Err(BoardError::UnknownDice(consumed));
        }
        let unit = self
            .units
            .get_mut(survivor)
            .ok_or(BoardError::UnknownDice(survivor))?;

        let previous_level = unit.level();
        let top = unit.template().max_upgrade_level.saturating_sub(1);
        if let Some(stats) = unit.stats.as_mut() {
            stats.upgrade_level = (previous_level + 1).min(top);
        }
        let level = unit.level();

        self.with_passive(consumed, |passive, ctx| {
            passive.on_dice_merged(ctx, consumed, survivor)
        });
        self.with_passive(survivor, |passive, ctx| {
            passive.on_dice_merged(ctx, consumed, survivor)
        });
        self.remove(consumed)?;

        debug!(
            target: "dice_core::board",
            %consumed,
            %survivor,
            previous_level,
            level,
            "dice merged"
        );
        Ok(MergeReport {
            consumed,
            survivor,
            previous_level,
            level,
        })
    }

    // ===== adjacency =====

    pub fn neighbors_of(&self, id: DiceId, radius: f32) -> BTreeSet<DiceId> {
        self.units.neighbors_of(id, radius)
    }

    /// Units a hover over `id` should highlight.
    pub fn affected_neighbors(&self, id: DiceId) -> BTreeSet<DiceId> {
        match self.units.get(id).and_then(|u| u.passive.as_ref()) {
            Some(passive) => passive.affected_neighbors(&self.units, id, &self.config),
            None => self.units.neighbors_of(id, self.config.adjacency_radius),
        }
    }

    // ===== hook dispatch =====

    /// Runs one hook of `owner`'s passive.
    ///
    /// The passive is taken out of its unit while it runs so the hook can
    /// borrow the rest of the board mutably. Returns `None` (and runs nothing)
    /// when the unit is gone or has no passive.
    fn with_passive<R>(
        &mut self,
        owner: DiceId,
        hook: impl FnOnce(&mut dyn PassiveEffect, &mut PassiveContext<'_>) -> R,
    ) -> Option<R> {
        let mut passive = self.units.get_mut(owner)?.passive.take()?;
        let mut ctx = PassiveContext::new(
            owner,
            self.combat_active,
            &mut self.units,
            &mut self.buffs,
            &mut self.env,
            self.rng.as_mut(),
            &self.config,
            &mut self.effects,
        );
        let result = hook(passive.as_mut(), &mut ctx);

        match self.units.get_mut(owner) {
            Some(unit) => unit.passive = Some(passive),
            None => trace!(target: "dice_core::board", dice = %owner, "owner left during its own hook"),
        }
        Some(result)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("config", &self.config)
            .field("units", &self.units)
            .field("buffs", &self.buffs)
            .field("env", &self.env)
            .field("pending_effects", &self.effects.len())
            .field("combat_active", &self.combat_active)
            .finish()
    }
}
