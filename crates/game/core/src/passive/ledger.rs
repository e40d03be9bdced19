//! Adjacency buff bookkeeping.
//!
//! Tracks, per buffed target, which sources currently contribute a haste
//! (attack-speed) bonus. The effective interval is always recomputed from
//! `base_fire_interval` and the active source set, so granting the same pair
//! twice is a no-op and revoking every source lands exactly on the base.

use std::collections::BTreeMap;

use crate::state::DiceId;
use crate::stats::RuntimeDiceStats;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuffLedger {
    /// target -> (source -> per-source bonus at grant time)
    haste: BTreeMap<DiceId, BTreeMap<DiceId, f32>>,
}

impl BuffLedger {
    /// Records `source` as buffing `target`. Returns true if the pair is new.
    ///
    /// Re-granting an existing pair only refreshes its bonus value.
    pub fn grant(&mut self, target: DiceId, source: DiceId, bonus: f32) -> bool {
        self.haste
            .entry(target)
            .or_default()
            .insert(source, bonus)
            .is_none()
    }

    /// Removes one pair. Returns true if it was present.
    pub fn revoke(&mut self, target: DiceId, source: DiceId) -> bool {
        let Some(sources) = self.haste.get_mut(&target) else {
            return false;
        };
        let removed = sources.remove(&source).is_some();
        if sources.is_empty() {
            self.haste.remove(&target);
        }
        removed
    }

    /// Removes every pair contributed by `source`. Returns the affected targets.
    pub fn revoke_source(&mut self, source: DiceId) -> Vec<DiceId> {
        let mut affected = Vec::new();
        self.haste.retain(|&target, sources| {
            if sources.remove(&source).is_some() {
                affected.push(target);
            }
            !sources.is_empty()
        });
        affected
    }

    /// Drops all bookkeeping for a target leaving the board.
    pub fn forget_target(&mut self, target: DiceId) {
        self.haste.remove(&target);
    }

    pub fn source_count(&self, target: DiceId) -> usize {
        self.haste.get(&target).map_or(0, BTreeMap::len)
    }

    pub fn is_buffed_by(&self, target: DiceId, source: DiceId) -> bool {
        self.haste
            .get(&target)
            .is_some_and(|sources| sources.contains_key(&source))
    }

    /// Speed factor `(1 + bonus)^N` for `target`.
    ///
    /// The per-source bonus is taken from the first (lowest-id) source, even
    /// when sources differ in level.
    pub fn haste_factor(&self, target: DiceId) -> f32 {
        let Some(sources) = self.haste.get(&target) else {
            return 1.0;
        };
        let Some(&bonus) = sources.values().next() else {
            return 1.0;
        };
        (1.0 + bonus).powi(sources.len() as i32)
    }

    /// Recomputes `fire_interval` from `base_fire_interval`.
    pub fn apply(&self, target: DiceId, stats: &mut RuntimeDiceStats) {
        stats.fire_interval = stats.base_fire_interval / self.haste_factor(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::DiceTemplate;

    fn stats(interval: f32) -> RuntimeDiceStats {
        RuntimeDiceStats::from_template(&DiceTemplate::new("d6", 6, 1.0, interval))
    }

    #[test]
    fn duplicate_grants_do_not_stack() {
        let mut ledger = BuffLedger::default();
        let mut target = stats(1.0);

        assert!(ledger.grant(DiceId(1), DiceId(2), 0.25));
        assert!(!ledger.grant(DiceId(1), DiceId(2), 0.25));
        ledger.apply(DiceId(1), &mut target);

        assert_eq!(ledger.source_count(DiceId(1)), 1);
        assert!((target.fire_interval - 0.8).abs() < 1e-6);
    }

    #[test]
    fn stacking_is_exponential_and_fully_reversible() {
        let mut ledger = BuffLedger::default();
        let mut target = stats(2.0);
        let sources = [DiceId(10), DiceId(11), DiceId(12)];

        for source in sources {
            ledger.grant(DiceId(1), source, 0.5);
            ledger.apply(DiceId(1), &mut target);
        }
        // 2.0 / 1.5^3
        assert!((target.fire_interval - 2.0 / 3.375).abs() < 1e-6);

        for source in sources {
            ledger.revoke(DiceId(1), source);
            ledger.apply(DiceId(1), &mut target);
        }
        assert_eq!(target.fire_interval, 2.0);
        assert_eq!(ledger, BuffLedger::default());
    }

    #[test]
    fn first_source_bonus_applies_to_all() {
        let mut ledger = BuffLedger::default();
        ledger.grant(DiceId(1), DiceId(5), 0.1);
        ledger.grant(DiceId(1), DiceId(3), 0.3);

        // DiceId(3) sorts first, so its bonus wins.
        assert!((ledger.haste_factor(DiceId(1)) - 1.69).abs() < 1e-5);
    }

    #[test]
    fn revoke_source_reports_affected_targets() {
        let mut ledger = BuffLedger::default();
        ledger.grant(DiceId(1), DiceId(9), 0.2);
        ledger.grant(DiceId(2), DiceId(9), 0.2);
        ledger.grant(DiceId(2), DiceId(8), 0.2);

        let affected = ledger.revoke_source(DiceId(9));
        assert_eq!(affected, vec![DiceId(1), DiceId(2)]);
        assert_eq!(ledger.source_count(DiceId(1)), 0);
        assert_eq!(ledger.source_count(DiceId(2)), 1);
    }
}
