//! Test doubles shared by the dice-core integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use dice_core::{
    DamageOutcome, DiceId, DiceRng, PassiveContext, PassiveEffect, PcgRng, PlayerLedger,
    PlayerVitals, Position, Shot, TargetId, TargetPool, TargetProvider,
};

/// RNG with scripted face rolls and uniform draws.
///
/// Once a queue runs dry it falls back to values that never crit and never
/// multicast: face 1 and draw 0.999.
#[derive(Debug, Default)]
pub struct ScriptedRng {
    faces: VecDeque<u32>,
    draws: VecDeque<f32>,
}

impl ScriptedRng {
    pub fn new(faces: impl IntoIterator<Item = u32>, draws: impl IntoIterator<Item = f32>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            draws: draws.into_iter().collect(),
        }
    }
}

impl DiceRng for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_f32(&mut self) -> f32 {
        self.draws.pop_front().unwrap_or(0.999)
    }

    fn roll_die(&mut self, sides: u32) -> u32 {
        self.faces.pop_front().unwrap_or(1).clamp(1, sides.max(1))
    }
}

/// Seeded PCG that counts every draw.
#[derive(Debug)]
pub struct CountingRng {
    inner: PcgRng,
    pub draws: Arc<AtomicU32>,
}

impl CountingRng {
    pub fn new(seed: u64) -> (Self, Arc<AtomicU32>) {
        let draws = Arc::new(AtomicU32::new(0));
        (
            Self {
                inner: PcgRng::seeded(seed),
                draws: Arc::clone(&draws),
            },
            draws,
        )
    }
}

impl DiceRng for CountingRng {
    fn next_u32(&mut self) -> u32 {
        self.draws.fetch_add(1, Ordering::SeqCst);
        self.inner.next_u32()
    }
}

/// Target pool the test keeps a handle to after handing it to a board.
#[derive(Clone, Debug, Default)]
pub struct SharedPool(pub Arc<Mutex<TargetPool>>);

impl SharedPool {
    pub fn spawn(&self, position: Position, health: f32) -> TargetId {
        self.0.lock().unwrap().spawn(position, health)
    }

    pub fn health_of(&self, id: TargetId) -> Option<f32> {
        self.0.lock().unwrap().health_of(id)
    }
}

impl TargetProvider for SharedPool {
    fn has_any_target(&self) -> bool {
        self.0.lock().unwrap().has_any_target()
    }

    fn pick_arbitrary_target(&mut self) -> Option<TargetId> {
        self.0.lock().unwrap().pick_arbitrary_target()
    }

    fn nearest_other_target(&self, excluding: TargetId, max_range: f32) -> Option<TargetId> {
        self.0
            .lock()
            .unwrap()
            .nearest_other_target(excluding, max_range)
    }

    fn apply_damage(&mut self, target: TargetId, amount: f32) -> Option<DamageOutcome> {
        self.0.lock().unwrap().apply_damage(target, amount)
    }

    fn position_of(&self, target: TargetId) -> Option<Position> {
        self.0.lock().unwrap().position_of(target)
    }
}

#[derive(Clone, Debug, Default)]
pub struct SharedPlayer(pub Arc<Mutex<PlayerLedger>>);

impl SharedPlayer {
    pub fn ledger(&self) -> PlayerLedger {
        *self.0.lock().unwrap()
    }
}

impl PlayerVitals for SharedPlayer {
    fn heal(&mut self, amount: f32) {
        self.0.lock().unwrap().heal(amount);
    }

    fn add_shield(&mut self, amount: f32) {
        self.0.lock().unwrap().add_shield(amount);
    }
}

/// Per-hook invocation counts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HookCounts {
    pub spawn: u32,
    pub fire: u32,
    pub removed: u32,
    pub hit: u32,
    pub killed: u32,
    pub merged: Vec<(DiceId, DiceId)>,
    pub combat_start: u32,
    pub combat_end: u32,
    pub neighbor_fire: u32,
    pub neighbor_spawn: Vec<DiceId>,
    pub neighbor_removed: Vec<DiceId>,
}

/// Passive that only records which hooks ran. Optionally skips every cast.
#[derive(Debug, Default)]
pub struct Recorder {
    pub counts: Arc<Mutex<HookCounts>>,
    pub skip_every_cast: bool,
}

impl Recorder {
    pub fn new() -> (Box<dyn PassiveEffect>, Arc<Mutex<HookCounts>>) {
        let counts = Arc::new(Mutex::new(HookCounts::default()));
        let recorder = Self {
            counts: Arc::clone(&counts),
            skip_every_cast: false,
        };
        (Box::new(recorder), counts)
    }

    pub fn skipping() -> (Box<dyn PassiveEffect>, Arc<Mutex<HookCounts>>) {
        let counts = Arc::new(Mutex::new(HookCounts::default()));
        let recorder = Self {
            counts: Arc::clone(&counts),
            skip_every_cast: true,
        };
        (Box::new(recorder), counts)
    }
}

impl PassiveEffect for Recorder {
    fn name(&self) -> &'static str {
        "recorder"
    }

    fn on_dice_spawn(&mut self, _ctx: &mut PassiveContext<'_>) {
        self.counts.lock().unwrap().spawn += 1;
    }

    fn on_dice_fire(&mut self, _ctx: &mut PassiveContext<'_>, shot: &mut Shot) {
        self.counts.lock().unwrap().fire += 1;
        if self.skip_every_cast {
            shot.skip();
        }
    }

    fn on_dice_removed(&mut self, _ctx: &mut PassiveContext<'_>) {
        self.counts.lock().unwrap().removed += 1;
    }

    fn on_enemy_hit(&mut self, _ctx: &mut PassiveContext<'_>, _target: TargetId, _dealt: &mut f32) {
        self.counts.lock().unwrap().hit += 1;
    }

    fn on_enemy_killed(&mut self, _ctx: &mut PassiveContext<'_>, _target: TargetId) {
        self.counts.lock().unwrap().killed += 1;
    }

    fn on_dice_merged(&mut self, _ctx: &mut PassiveContext<'_>, consumed: DiceId, survivor: DiceId) {
        self.counts.lock().unwrap().merged.push((consumed, survivor));
    }

    fn on_combat_start(&mut self, _ctx: &mut PassiveContext<'_>) {
        self.counts.lock().unwrap().combat_start += 1;
    }

    fn on_combat_end(&mut self, _ctx: &mut PassiveContext<'_>) {
        self.counts.lock().unwrap().combat_end += 1;
    }

    fn on_neighbor_fire(&mut self, _ctx: &mut PassiveContext<'_>, _fired: DiceId, _shot: &mut Shot) {
        self.counts.lock().unwrap().neighbor_fire += 1;
    }

    fn on_neighbor_spawn(&mut self, _ctx: &mut PassiveContext<'_>, neighbor: DiceId) {
        self.counts.lock().unwrap().neighbor_spawn.push(neighbor);
    }

    fn on_neighbor_removed(&mut self, _ctx: &mut PassiveContext<'_>, neighbor: DiceId) {
        self.counts.lock().unwrap().neighbor_removed.push(neighbor);
    }
}
