//! Concrete passive abilities.
//!
//! Grouped by the trigger they lean on:
//! - [`sustain`]: fire/hit effects routed to the player
//! - [`chain`]: on-hit secondary damage
//! - [`phase`]: combat-start boosts reverted at combat end
//! - [`aura`]: adjacency buffs and support modifiers
//! - [`kills`]: on-kill rewards
//! - [`shots`]: per-cast damage modifiers
//! - [`growth`]: merge rewards
mod aura;
mod chain;
mod growth;
mod kills;
mod phase;
mod shots;
mod sustain;

pub use aura::{Amplifier, AttackSpeedAura, SupportDamage};
pub use chain::ChainLightning;
pub use growth::Growth;
pub use kills::{Bloodlust, Executioner};
pub use phase::{CritBoost, Frenzy};
pub use shots::{Gambler, Overcharge};
pub use sustain::{Heal, Shield, Vampiric};
