//! Scripted combat session driven through a [`RuntimeHandle`].
//!
//! A session places the configured lineup, then alternates combat rounds with
//! a merge pass: after every combat, each pair of same-template same-level
//! dice is merged once. Enemies left standing carry over to the next round.
use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use combat_runtime::{CombatTotals, Event, PhaseEvent, RuntimeError, RuntimeHandle, Topic};
use dice_core::{BoardSnapshot, DiceId, MergeReport, PlayerLedger, Position};

use crate::config::{ClientConfig, grid_position};

#[derive(Debug, Serialize)]
pub struct CombatSummary {
    pub index: u32,
    /// Every enemy died before the time limit.
    pub cleared: bool,
    pub survivors: usize,
    pub totals: CombatTotals,
    pub merges: Vec<MergeReport>,
}

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub placed: usize,
    /// Lineup entries the board refused (unknown template, occupied cell).
    pub rejected: Vec<String>,
    pub combats: Vec<CombatSummary>,
    pub player: PlayerLedger,
    pub board: BoardSnapshot,
}

pub struct Session {
    handle: RuntimeHandle,
    config: ClientConfig,
}

impl Session {
    pub fn new(handle: RuntimeHandle, config: ClientConfig) -> Self {
        Self { handle, config }
    }

    pub async fn run(self, seed: u64) -> Result<SessionSummary> {
        let (placed, rejected) = self.place_lineup().await?;
        info!(placed, rejected = rejected.len(), "lineup placed");

        let mut combats = Vec::with_capacity(self.config.combats as usize);
        for index in 0..self.config.combats {
            combats.push(self.run_combat(index).await?);
        }

        Ok(SessionSummary {
            seed,
            placed,
            rejected,
            combats,
            player: self.handle.player().await?,
            board: self.handle.snapshot().await?,
        })
    }

    async fn place_lineup(&self) -> Result<(usize, Vec<String>)> {
        let mut placed = 0;
        let mut rejected = Vec::new();
        for (index, template) in self.config.lineup.iter().enumerate() {
            match self.handle.place(template.as_str(), grid_position(index)).await {
                Ok(_) => placed += 1,
                Err(e) if e.is_recoverable() => {
                    warn!(%template, error = %e, "lineup entry rejected");
                    rejected.push(template.clone());
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok((placed, rejected))
    }

    async fn run_combat(&self, index: u32) -> Result<CombatSummary> {
        let mut phase_rx = self.handle.subscribe(Topic::Phase);

        for enemy in 0..self.config.enemies {
            let position = Position::new(8.0 + enemy as f32, 0.0);
            self.handle
                .spawn_target(position, self.config.enemy_hp)
                .await?;
        }

        self.handle.start_combat().await?;
        let cleared = tokio::time::timeout(
            self.config.combat_duration,
            wait_for_clear(&mut phase_rx),
        )
        .await
        .unwrap_or(false);
        self.handle.end_combat().await?;

        let totals = self.handle.totals().await?;
        let survivors = self.handle.targets_alive().await?;
        info!(
            combat = index,
            cleared,
            survivors,
            damage = totals.damage,
            kills = totals.kills,
            "combat finished"
        );

        let merges = self.merge_pairs().await?;
        Ok(CombatSummary {
            index,
            cleared,
            survivors,
            totals,
            merges,
        })
    }

    /// Merges the first two dice of every (template, level) group.
    async fn merge_pairs(&self) -> Result<Vec<MergeReport>> {
        let snapshot = self.handle.snapshot().await?;
        let mut groups: BTreeMap<(&str, u32), Vec<DiceId>> = BTreeMap::new();
        for unit in &snapshot.units {
            groups
                .entry((unit.template.as_str(), unit.level))
                .or_default()
                .push(unit.id);
        }

        let mut merges = Vec::new();
        for ids in groups.values() {
            let [consumed, survivor, ..] = ids.as_slice() else {
                continue;
            };
            match self.handle.merge(*consumed, *survivor).await {
                Ok(report) => merges.push(report),
                Err(e @ RuntimeError::IncompatibleMerge { .. }) => {
                    debug!(error = %e, "merge skipped");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(merges)
    }
}

async fn wait_for_clear(rx: &mut broadcast::Receiver<Event>) -> bool {
    loop {
        match rx.recv().await {
            Ok(Event::Phase(PhaseEvent::TargetsCleared { .. })) => return true,
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => debug!(skipped, "phase events lagged"),
            Err(RecvError::Closed) => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use combat_runtime::{Runtime, RuntimeConfig};
    use dice_content::DiceLoader;

    use super::*;

    async fn runtime() -> Runtime {
        Runtime::builder()
            .config(RuntimeConfig {
                rng_seed: Some(11),
                ..RuntimeConfig::default()
            })
            .catalog(DiceLoader::builtin().unwrap())
            .build()
            .await
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn fragile_enemies_are_cleared_and_pairs_merge() {
        let runtime = runtime().await;
        let config = ClientConfig {
            combats: 1,
            enemies: 1,
            enemy_hp: 1.0,
            lineup: vec!["bone_d6".into(), "bone_d6".into(), "no_such_die".into()],
            ..ClientConfig::default()
        };

        let summary = Session::new(runtime.handle(), config).run(11).await.unwrap();

        assert_eq!(summary.placed, 2);
        assert_eq!(summary.rejected, vec!["no_such_die"]);
        let combat = &summary.combats[0];
        assert!(combat.cleared);
        assert_eq!(combat.survivors, 0);
        assert_eq!(combat.totals.kills, 1);
        assert_eq!(combat.merges.len(), 1);
        assert_eq!(summary.board.units.len(), 1);
        assert_eq!(summary.board.units[0].level, 1);

        runtime.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn combat_without_enemies_times_out_uncleared() {
        let runtime = runtime().await;
        let config = ClientConfig {
            combats: 2,
            enemies: 0,
            combat_duration: Duration::from_secs(2),
            lineup: vec!["bone_d6".into()],
            ..ClientConfig::default()
        };

        let summary = Session::new(runtime.handle(), config).run(11).await.unwrap();

        assert_eq!(summary.combats.len(), 2);
        assert!(summary.combats.iter().all(|c| !c.cleared));
        assert!(summary.combats.iter().all(|c| c.totals.fire_ticks == 0));

        runtime.shutdown().await.unwrap();
    }
}
