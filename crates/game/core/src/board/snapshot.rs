//! Read-only board view for hosts and UI.

use super::Board;
use crate::state::{DiceId, Position};
use crate::stats::RuntimeDiceStats;
use crate::unit::FireState;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSnapshot {
    pub id: DiceId,
    pub template: String,
    pub position: Position,
    pub level: u32,
    pub passive: Option<String>,
    pub fire_state: FireState,
    pub haste_sources: usize,
    pub stats: Option<RuntimeDiceStats>,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardSnapshot {
    pub combat_active: bool,
    pub units: Vec<UnitSnapshot>,
}

impl BoardSnapshot {
    pub fn unit(&self, id: DiceId) -> Option<&UnitSnapshot> {
        self.units.iter().find(|u| u.id == id)
    }
}

impl Board {
    pub fn snapshot(&self) -> BoardSnapshot {
        let units = self
            .units
            .iter()
            .map(|unit| UnitSnapshot {
                id: unit.id(),
                template: unit.template().id.clone(),
                position: unit.position,
                level: unit.level(),
                passive: unit.passive_name().map(str::to_owned),
                fire_state: unit.fire_state(),
                haste_sources: self.buffs.source_count(unit.id()),
                stats: unit.stats.clone(),
            })
            .collect();

        BoardSnapshot {
            combat_active: self.combat_active,
            units,
        }
    }
}
