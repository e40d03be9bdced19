//! Authored passive descriptors.

use super::PassiveEffect;
use super::effects::{
    Amplifier, AttackSpeedAura, Bloodlust, ChainLightning, CritBoost, Executioner, Frenzy,
    Gambler, Growth, Heal, Overcharge, Shield, SupportDamage, Vampiric,
};

/// Passive assigned to a template, with its tuning parameters.
///
/// Templates carry the descriptor; each placed unit gets its own instance via
/// [`PassiveKind::instantiate`] so per-instance state never leaks between
/// units.
#[derive(Clone, Debug, PartialEq, strum::IntoStaticStr, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PassiveKind {
    ChainLightning { ratio: f32, range: f32 },
    Heal { ratio: f32 },
    Shield { ratio: f32 },
    CritBoost { bonus: f32 },
    Frenzy { speed_multiplier: f32 },
    AttackSpeedAura { bonus: f32, bonus_per_level: f32 },
    SupportDamage { flat: f32 },
    Amplifier { multiplier: f32 },
    Bloodlust { haste_per_kill: f32, max_stacks: u32 },
    Growth { damage_per_merge: f32 },
    Gambler { max_roll_multiplier: f32 },
    Vampiric { ratio: f32 },
    Overcharge { every: u32, multiplier: f32 },
    Executioner { bonus_damage: f32 },
}

impl PassiveKind {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Creates a fresh passive instance for one unit.
    pub fn instantiate(&self) -> Box<dyn PassiveEffect> {
        match *self {
            Self::ChainLightning { ratio, range } => Box::new(ChainLightning::new(ratio, range)),
            Self::Heal { ratio } => Box::new(Heal::new(ratio)),
            Self::Shield { ratio } => Box::new(Shield::new(ratio)),
            Self::CritBoost { bonus } => Box::new(CritBoost::new(bonus)),
            Self::Frenzy { speed_multiplier } => Box::new(Frenzy::new(speed_multiplier)),
            Self::AttackSpeedAura {
                bonus,
                bonus_per_level,
            } => Box::new(AttackSpeedAura::new(bonus, bonus_per_level)),
            Self::SupportDamage { flat } => Box::new(SupportDamage::new(flat)),
            Self::Amplifier { multiplier } => Box::new(Amplifier::new(multiplier)),
            Self::Bloodlust {
                haste_per_kill,
                max_stacks,
            } => Box::new(Bloodlust::new(haste_per_kill, max_stacks)),
            Self::Growth { damage_per_merge } => Box::new(Growth::new(damage_per_merge)),
            Self::Gambler {
                max_roll_multiplier,
            } => Box::new(Gambler::new(max_roll_multiplier)),
            Self::Vampiric { ratio } => Box::new(Vampiric::new(ratio)),
            Self::Overcharge { every, multiplier } => Box::new(Overcharge::new(every, multiplier)),
            Self::Executioner { bonus_damage } => Box::new(Executioner::new(bonus_damage)),
        }
    }
}
