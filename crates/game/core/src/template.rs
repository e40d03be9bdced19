//! Immutable, authored dice definitions.
//!
//! A template is created at authoring time (RON catalog, tests) and shared by
//! every unit instantiated from it. Nothing in the combat core mutates a
//! template; per-instance state lives in [`crate::RuntimeDiceStats`].

use crate::error::TemplateError;
use crate::passive::PassiveKind;

/// Rarity tier of a dice template.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Authored definition of a dice.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiceTemplate {
    /// Stable identity. Two units share a template iff their ids match.
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
    pub sides: u32,
    pub base_damage: f32,
    /// Seconds between shots.
    pub fire_interval: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: u32,
    /// Authored on a 0..=100 scale; normalized when stats are derived.
    #[cfg_attr(feature = "serde", serde(default))]
    pub luck: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_chance: f32,
    /// Number of distinct upgrade levels; valid levels are `0..max_upgrade_level`.
    pub max_upgrade_level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passive: Option<PassiveKind>,
    #[cfg_attr(feature = "serde", serde(default = "default_can_attack"))]
    pub can_attack: bool,
}

#[cfg(feature = "serde")]
fn default_can_attack() -> bool {
    true
}

impl DiceTemplate {
    pub const DEFAULT_MAX_UPGRADE_LEVEL: u32 = 3;

    /// Creates a plain attacking template with no passive.
    pub fn new(id: impl Into<String>, sides: u32, base_damage: f32, fire_interval: f32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            rarity: Rarity::Common,
            sides,
            base_damage,
            fire_interval,
            cost: 0,
            luck: 0.0,
            crit_chance: 0.0,
            max_upgrade_level: Self::DEFAULT_MAX_UPGRADE_LEVEL,
            passive: None,
            can_attack: true,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_luck(mut self, luck: f32) -> Self {
        self.luck = luck;
        self
    }

    pub fn with_crit_chance(mut self, crit_chance: f32) -> Self {
        self.crit_chance = crit_chance;
        self
    }

    pub fn with_max_upgrade_level(mut self, max_upgrade_level: u32) -> Self {
        self.max_upgrade_level = max_upgrade_level;
        self
    }

    pub fn with_passive(mut self, passive: PassiveKind) -> Self {
        self.passive = Some(passive);
        self
    }

    /// Marks the template as a pure support piece that never fires.
    pub fn support_only(mut self) -> Self {
        self.can_attack = false;
        self
    }

    /// Checks authoring invariants the combat core relies on.
    pub fn validate(&self) -> Result<(), TemplateError> {
        let id = || self.id.clone();

        if self.sides == 0 {
            return Err(TemplateError::ZeroSides { id: id() });
        }
        if !(self.fire_interval > 0.0) {
            return Err(TemplateError::NonPositiveFireInterval {
                id: id(),
                interval: self.fire_interval,
            });
        }
        if self.max_upgrade_level == 0 {
            return Err(TemplateError::ZeroMaxUpgradeLevel { id: id() });
        }
        if !(0.0..=1.0).contains(&self.crit_chance) {
            return Err(TemplateError::CritChanceOutOfRange {
                id: id(),
                chance: self.crit_chance,
            });
        }
        if self.base_damage < 0.0 {
            return Err(TemplateError::Negative {
                id: id(),
                field: "base_damage",
            });
        }
        if self.luck < 0.0 {
            return Err(TemplateError::Negative {
                id: id(),
                field: "luck",
            });
        }
        Ok(())
    }
}
