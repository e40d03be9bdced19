//! Fire resolution and the frame-driven combat clock.

use tracing::{debug, trace, warn};

use super::Board;
use crate::env::{Projectile, ProjectileFate};
use crate::error::BoardError;
use crate::passive::Shot;
use crate::record::{EffectRecord, HitReport};
use crate::state::{DiceId, TargetId};

/// Summary of one resolved fire tick.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FireReport {
    pub source: DiceId,
    /// Face shown by the die, in `1..=sides`.
    pub rolled: u32,
    pub crit: bool,
    /// Casts resolved this tick, skipped ones included.
    pub casts: u32,
    /// Projectiles handed to the dispatcher.
    pub projectiles: u32,
    /// Casts a hook consumed without a projectile.
    pub skipped: u32,
    /// Casts with nothing to carry them (no dispatcher, or no target left).
    pub dropped: u32,
    /// Damage dealt by projectiles that landed during the tick.
    pub total_damage: f32,
}

/// Result of asking a unit to fire.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FireOutcome {
    /// No stats, or the template forbids attacking.
    Misconfigured,
    /// Nothing to shoot at; no dice were rolled.
    NoTarget,
    Fired(FireReport),
}

impl FireOutcome {
    pub fn report(&self) -> Option<&FireReport> {
        match self {
            Self::Fired(report) => Some(report),
            _ => None,
        }
    }
}

impl Board {
    /// Resolves one fire tick of `id` right now, ignoring its fire loop.
    pub fn fire_once(&mut self, id: DiceId) -> Result<FireOutcome, BoardError> {
        if !self.units.contains(id) {
            return Err(BoardError::UnknownDice(id));
        }
        Ok(self.fire(id))
    }

    /// Advances every unit's fire loop by `dt` seconds and fires the due ones.
    ///
    /// This is the combat clock: hosts call it once per frame. Each unit fires
    /// at most once per call; units are visited in id order, but no passive
    /// may rely on that.
    pub fn advance(&mut self, dt: f32) -> Vec<FireReport> {
        let mut reports = Vec::new();
        for id in self.units.ids() {
            let has_targets = self.env.has_any_target();
            let Some(unit) = self.units.get_mut(id) else {
                continue;
            };
            let interval = unit
                .stats
                .as_ref()
                .map_or(f32::INFINITY, |stats| stats.fire_interval);
            if !unit.fire_loop.advance(dt, has_targets, interval) {
                continue;
            }

            if let FireOutcome::Fired(report) = self.fire(id) {
                reports.push(report);
            }

            let has_targets = self.env.has_any_target();
            if let Some(unit) = self.units.get_mut(id) {
                unit.fire_loop.rearm(has_targets);
            }
        }
        reports
    }

    /// Applies a landed projectile and runs the source's on-hit hooks.
    ///
    /// Hosts with travelling projectiles call this on impact. The source may
    /// already be gone; the damage still lands, only its hooks are skipped.
    pub fn resolve_hit(
        &mut self,
        source: DiceId,
        target: TargetId,
        damage: f32,
    ) -> Option<HitReport> {
        let Some(outcome) = self.env.apply_damage(target, damage) else {
            trace!(target: "dice_core::board", %source, %target, "hit on missing target ignored");
            return None;
        };

        let report = HitReport {
            source,
            target,
            dealt: outcome.dealt,
            killed: outcome.killed,
        };
        self.effects.push(EffectRecord::Hit(report));

        let mut dealt = outcome.dealt;
        self.with_passive(source, |passive, ctx| {
            passive.on_enemy_hit(ctx, target, &mut dealt)
        });
        if outcome.killed {
            debug!(target: "dice_core::board", %source, %target, "target killed");
            self.with_passive(source, |passive, ctx| passive.on_enemy_killed(ctx, target));
        }
        Some(report)
    }

    pub(super) fn fire(&mut self, id: DiceId) -> FireOutcome {
        let Some(unit) = self.units.get(id) else {
            return FireOutcome::Misconfigured;
        };
        let Some(stats) = unit.stats.as_ref().filter(|_| unit.can_attack()) else {
            trace!(target: "dice_core::board", dice = %id, "misconfigured dice cannot fire");
            return FireOutcome::Misconfigured;
        };
        let (sides, base_damage, crit_chance, multicast_chance) = (
            stats.sides,
            stats.base_damage,
            stats.crit_chance,
            stats.multicast_chance,
        );
        let origin = unit.position;

        if !self.env.has_any_target() {
            return FireOutcome::NoTarget;
        }

        let rolled = self.rng.roll_die(sides);
        let mut amount = base_damage * rolled as f32;
        let crit = self.rng.next_f32() < crit_chance;
        if crit {
            amount *= self.config.crit_multiplier;
        }
        let casts = self.roll_casts(multicast_chance);

        let neighbors = self.units.neighbors_of(id, self.config.adjacency_radius);
        let mut report = FireReport {
            source: id,
            rolled,
            crit,
            casts,
            projectiles: 0,
            skipped: 0,
            dropped: 0,
            total_damage: 0.0,
        };

        for cast_index in 0..casts {
            let mut shot = Shot::new(amount, rolled, sides, crit, cast_index);
            self.with_passive(id, |passive, ctx| passive.on_dice_fire(ctx, &mut shot));
            for neighbor in &neighbors {
                self.with_passive(*neighbor, |passive, ctx| {
                    passive.on_neighbor_fire(ctx, id, &mut shot)
                });
            }

            if shot.skip_projectile {
                report.skipped += 1;
                continue;
            }

            let damage = shot.damage();
            // Earlier casts of this tick may have killed the last target.
            let Some(target) = self.env.pick_arbitrary_target() else {
                self.drop_cast(id, damage, &mut report);
                continue;
            };
            let projectile = Projectile {
                source: id,
                origin,
                target,
                damage,
                crit,
            };
            let Some(dispatch) = self.env.projectiles.as_mut() else {
                warn!(
                    target: "dice_core::board",
                    dice = %id,
                    damage,
                    "no projectile dispatcher; cast dropped"
                );
                self.drop_cast(id, damage, &mut report);
                continue;
            };

            let fate = dispatch.emit_projectile(&projectile);
            self.effects.push(EffectRecord::ProjectileEmitted(projectile));
            report.projectiles += 1;
            if fate == ProjectileFate::Landed {
                if let Some(hit) = self.resolve_hit(id, target, damage) {
                    report.total_damage += hit.dealt;
                }
            }
        }

        trace!(
            target: "dice_core::board",
            dice = %id,
            rolled,
            crit,
            casts,
            projectiles = report.projectiles,
            skipped = report.skipped,
            "dice fired"
        );
        FireOutcome::Fired(report)
    }

    /// Geometric cast count: one, plus one more for every consecutive success.
    fn roll_casts(&mut self, multicast_chance: f32) -> u32 {
        let mut casts = 1;
        while self.rng.next_f32() < multicast_chance {
            if casts >= self.config.max_casts_per_tick {
                debug!(
                    target: "dice_core::board",
                    cap = self.config.max_casts_per_tick,
                    "multicast chain capped"
                );
                break;
            }
            casts += 1;
        }
        casts
    }

    fn drop_cast(&mut self, source: DiceId, damage: f32, report: &mut FireReport) {
        report.dropped += 1;
        self.effects
            .push(EffectRecord::CastDropped { source, damage });
    }
}
