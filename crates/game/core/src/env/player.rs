//! Player-side sink for direct heal and shield effects.

/// The singleton player a heal/shield effect is routed to.
pub trait PlayerVitals: Send {
    fn heal(&mut self, amount: f32);

    fn add_shield(&mut self, amount: f32);
}

/// Accumulates heal and shield totals. Useful as a headless player.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerLedger {
    pub healed: f32,
    pub shielded: f32,
    pub heal_events: u32,
    pub shield_events: u32,
}

impl PlayerVitals for PlayerLedger {
    fn heal(&mut self, amount: f32) {
        self.healed += amount;
        self.heal_events += 1;
    }

    fn add_shield(&mut self, amount: f32) {
        self.shielded += amount;
        self.shield_events += 1;
    }
}
