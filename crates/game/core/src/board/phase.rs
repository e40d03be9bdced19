//! Combat phase transitions and per-unit fire loop control.

use tracing::{debug, info};

use super::Board;
use crate::error::BoardError;
use crate::state::DiceId;

impl Board {
    /// Arms `id`'s fire loop. Returns false if it was already firing or
    /// cannot fire at all.
    pub fn start_firing(&mut self, id: DiceId) -> Result<bool, BoardError> {
        if !self.units.contains(id) {
            return Err(BoardError::UnknownDice(id));
        }
        Ok(self.start_unit(id))
    }

    /// Cancels `id`'s fire loop and runs its removal cleanup. Returns false if
    /// it was already idle, in which case no hook runs.
    pub fn stop_firing(&mut self, id: DiceId) -> Result<bool, BoardError> {
        if !self.units.contains(id) {
            return Err(BoardError::UnknownDice(id));
        }
        Ok(self.stop_unit(id))
    }

    /// Enters the combat phase. Returns false if combat was already active.
    ///
    /// Every passive sees `on_combat_start` before any unit starts firing.
    pub fn start_combat(&mut self) -> bool {
        if self.combat_active {
            return false;
        }
        self.combat_active = true;

        let ids = self.units.ids();
        for id in &ids {
            self.with_passive(*id, |passive, ctx| passive.on_combat_start(ctx));
        }
        let started = ids.iter().filter(|id| self.start_unit(**id)).count();

        info!(
            target: "dice_core::board",
            units = ids.len(),
            started,
            "combat started"
        );
        true
    }

    /// Leaves the combat phase. Returns false if combat was not active.
    ///
    /// Every passive sees `on_combat_end` before any loop is stopped.
    pub fn end_combat(&mut self) -> bool {
        if !self.combat_active {
            return false;
        }

        let ids = self.units.ids();
        for id in &ids {
            self.with_passive(*id, |passive, ctx| passive.on_combat_end(ctx));
        }
        let stopped = ids.iter().filter(|id| self.stop_unit(**id)).count();
        self.combat_active = false;

        info!(target: "dice_core::board", stopped, "combat ended");
        true
    }

    pub(super) fn start_unit(&mut self, id: DiceId) -> bool {
        let Some(unit) = self.units.get_mut(id) else {
            return false;
        };
        if !unit.can_attack() || unit.stats.is_none() {
            return false;
        }
        let started = unit.fire_loop.start();
        if started {
            debug!(target: "dice_core::board", dice = %id, "fire loop started");
        }
        started
    }

    /// Stops the loop and, if it was running, runs `on_dice_removed`.
    pub(super) fn stop_unit(&mut self, id: DiceId) -> bool {
        let Some(unit) = self.units.get_mut(id) else {
            return false;
        };
        if !unit.fire_loop.stop() {
            return false;
        }
        self.with_passive(id, |passive, ctx| passive.on_dice_removed(ctx));
        debug!(target: "dice_core::board", dice = %id, "fire loop stopped");
        true
    }
}
