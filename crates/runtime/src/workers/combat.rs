//! Combat worker that owns the authoritative [`dice_core::Board`].
//!
//! Receives commands from [`crate::RuntimeHandle`], drives the board's frame
//! clock while combat is active, and publishes everything the board produces
//! to the [`EventBus`].

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use dice_content::TemplateCatalog;
use dice_core::{
    Board, BoardSnapshot, DiceId, FireReport, MergeReport, PlayerLedger, Position, TargetId,
};

use crate::api::{Result, RuntimeError};
use crate::arena::{SharedPlayer, SharedTargets};
use crate::events::{DiceEvent, Event, EventBus, PhaseEvent};
use crate::totals::CombatTotals;

/// Commands that can be sent to the combat worker
pub enum Command {
    /// Place a catalog template at a cell.
    Place {
        template: String,
        position: Position,
        reply: oneshot::Sender<Result<DiceId>>,
    },
    Remove {
        dice: DiceId,
        reply: oneshot::Sender<Result<()>>,
    },
    Merge {
        consumed: DiceId,
        survivor: DiceId,
        reply: oneshot::Sender<Result<MergeReport>>,
    },
    StartCombat {
        reply: oneshot::Sender<bool>,
    },
    EndCombat {
        reply: oneshot::Sender<bool>,
    },
    SpawnTarget {
        position: Position,
        health: f32,
        reply: oneshot::Sender<TargetId>,
    },
    /// Advance the clock by `dt` seconds outside the frame ticker.
    Advance {
        dt: f32,
        reply: oneshot::Sender<Vec<FireReport>>,
    },
    QuerySnapshot {
        reply: oneshot::Sender<BoardSnapshot>,
    },
    QueryTotals {
        reply: oneshot::Sender<CombatTotals>,
    },
    QueryPlayer {
        reply: oneshot::Sender<PlayerLedger>,
    },
    QueryTargetsAlive {
        reply: oneshot::Sender<usize>,
    },
    Shutdown,
}

/// Background task that serializes every board mutation.
pub struct CombatWorker {
    board: Board,
    catalog: TemplateCatalog,
    targets: SharedTargets,
    player: SharedPlayer,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    frame_interval: Duration,
    auto_advance: bool,
    frame: u64,
    totals: CombatTotals,
    had_targets: bool,
}

impl CombatWorker {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        board: Board,
        catalog: TemplateCatalog,
        targets: SharedTargets,
        player: SharedPlayer,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        frame_interval: Duration,
        auto_advance: bool,
    ) -> Self {
        info!(
            target: "combat_runtime::worker",
            templates = catalog.len(),
            frame_ms = frame_interval.as_millis() as u64,
            auto_advance,
            "combat worker initialized"
        );

        let had_targets = targets.alive_count() > 0;
        Self {
            board,
            catalog,
            targets,
            player,
            command_rx,
            event_bus,
            frame_interval,
            auto_advance,
            frame: 0,
            totals: CombatTotals::default(),
            had_targets,
        }
    }

    /// Main worker loop.
    ///
    /// Commands take priority over frames. The ticker only runs while combat
    /// is active and is re-phased whenever combat starts, so the first frame
    /// lands one interval after the start command.
    pub async fn run(mut self) {
        let mut ticker = time::interval(self.frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let ticking = self.auto_advance && self.board.is_combat_active();
            tokio::select! {
                biased;
                cmd = self.command_rx.recv() => match cmd {
                    Some(Command::Shutdown) | None => break,
                    Some(cmd) => {
                        let was_active = self.board.is_combat_active();
                        self.handle_command(cmd);
                        if !was_active && self.board.is_combat_active() {
                            ticker.reset();
                        }
                    }
                },
                _ = ticker.tick(), if ticking => {
                    let dt = self.frame_interval.as_secs_f32();
                    self.step(dt);
                }
            }
        }

        info!(
            target: "combat_runtime::worker",
            frames = self.frame,
            "combat worker stopped"
        );
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Place {
                template,
                position,
                reply,
            } => {
                let result = self.handle_place(template, position);
                if reply.send(result).is_err() {
                    debug!("Place reply channel closed (caller dropped)");
                }
            }
            Command::Remove { dice, reply } => {
                let result = self.handle_remove(dice);
                if reply.send(result).is_err() {
                    debug!("Remove reply channel closed (caller dropped)");
                }
            }
            Command::Merge {
                consumed,
                survivor,
                reply,
            } => {
                let result = self.handle_merge(consumed, survivor);
                if reply.send(result).is_err() {
                    debug!("Merge reply channel closed (caller dropped)");
                }
            }
            Command::StartCombat { reply } => {
                let started = self.handle_start_combat();
                if reply.send(started).is_err() {
                    debug!("StartCombat reply channel closed (caller dropped)");
                }
            }
            Command::EndCombat { reply } => {
                let ended = self.handle_end_combat();
                if reply.send(ended).is_err() {
                    debug!("EndCombat reply channel closed (caller dropped)");
                }
            }
            Command::SpawnTarget {
                position,
                health,
                reply,
            } => {
                let target = self.targets.spawn(position, health);
                self.had_targets = true;
                self.event_bus.publish(Event::Phase(PhaseEvent::TargetSpawned {
                    target,
                    position,
                    health,
                }));
                if reply.send(target).is_err() {
                    debug!("SpawnTarget reply channel closed (caller dropped)");
                }
            }
            Command::Advance { dt, reply } => {
                let reports = self.step(dt);
                if reply.send(reports).is_err() {
                    debug!("Advance reply channel closed (caller dropped)");
                }
            }
            Command::QuerySnapshot { reply } => {
                if reply.send(self.board.snapshot()).is_err() {
                    debug!("QuerySnapshot reply channel closed (caller dropped)");
                }
            }
            Command::QueryTotals { reply } => {
                if reply.send(self.totals).is_err() {
                    debug!("QueryTotals reply channel closed (caller dropped)");
                }
            }
            Command::QueryPlayer { reply } => {
                if reply.send(self.player.ledger()).is_err() {
                    debug!("QueryPlayer reply channel closed (caller dropped)");
                }
            }
            Command::QueryTargetsAlive { reply } => {
                if reply.send(self.targets.alive_count()).is_err() {
                    debug!("QueryTargetsAlive reply channel closed (caller dropped)");
                }
            }
            // Intercepted by the run loop.
            Command::Shutdown => {}
        }
    }

    fn handle_place(&mut self, template_id: String, position: Position) -> Result<DiceId> {
        let template = self
            .catalog
            .get(&template_id)
            .ok_or_else(|| RuntimeError::UnknownTemplate(template_id.clone()))?;
        let dice = self.board.place(template, position)?;

        self.event_bus.publish(Event::Dice(DiceEvent::Placed {
            dice,
            template: template_id,
            position,
        }));
        self.flush_effects();
        Ok(dice)
    }

    fn handle_remove(&mut self, dice: DiceId) -> Result<()> {
        self.board.remove(dice)?;
        self.event_bus
            .publish(Event::Dice(DiceEvent::Removed { dice }));
        self.flush_effects();
        Ok(())
    }

    fn handle_merge(&mut self, consumed: DiceId, survivor: DiceId) -> Result<MergeReport> {
        let both_present =
            self.board.unit(consumed).is_some() && self.board.unit(survivor).is_some();
        if consumed != survivor && both_present && !self.board.can_merge(consumed, survivor) {
            return Err(RuntimeError::IncompatibleMerge { consumed, survivor });
        }
        let report = self.board.merge(consumed, survivor)?;
        self.event_bus.publish(Event::Dice(DiceEvent::Merged(report)));
        self.flush_effects();
        Ok(report)
    }

    fn handle_start_combat(&mut self) -> bool {
        if !self.board.start_combat() {
            return false;
        }
        self.totals = CombatTotals::default();
        let firing = self.board.units().iter().filter(|u| u.is_firing()).count();
        self.event_bus
            .publish(Event::Phase(PhaseEvent::CombatStarted { firing }));
        self.flush_effects();
        true
    }

    fn handle_end_combat(&mut self) -> bool {
        if !self.board.end_combat() {
            return false;
        }
        self.flush_effects();
        self.event_bus
            .publish(Event::Phase(PhaseEvent::CombatEnded { frame: self.frame }));
        info!(
            target: "combat_runtime::worker",
            frames = self.totals.frames,
            damage = self.totals.damage,
            kills = self.totals.kills,
            "combat ended"
        );
        true
    }

    /// One frame of the combat clock.
    fn step(&mut self, dt: f32) -> Vec<FireReport> {
        self.frame += 1;
        let in_combat = self.board.is_combat_active();
        if in_combat {
            self.totals.frames += 1;
        }

        let reports = self.board.advance(dt);
        for report in &reports {
            self.totals.record_fire(report);
            self.event_bus.publish(Event::Dice(DiceEvent::Fired(*report)));
        }
        self.flush_effects();
        self.sweep_targets(in_combat);
        reports
    }

    fn flush_effects(&mut self) {
        for record in self.board.drain_effects() {
            self.totals.record_effect(&record);
            self.event_bus.publish(Event::Effect(record.into()));
        }
    }

    /// Drops corpses and announces when combat has nothing left to shoot.
    fn sweep_targets(&mut self, in_combat: bool) {
        let cleared = self.targets.with(|pool| pool.clear_dead());
        let alive = self.targets.alive_count();
        if cleared > 0 {
            debug!(
                target: "combat_runtime::worker",
                cleared,
                alive,
                frame = self.frame,
                "targets cleared"
            );
        }
        if in_combat && self.had_targets && alive == 0 {
            self.event_bus
                .publish(Event::Phase(PhaseEvent::TargetsCleared { frame: self.frame }));
        }
        self.had_targets = alive > 0;
    }
}
