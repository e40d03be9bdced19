//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! arranging the board, driving combat, and streaming events from specific
//! topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use dice_core::{BoardSnapshot, DiceId, FireReport, MergeReport, PlayerLedger, Position, TargetId};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::totals::CombatTotals;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Sends a command built around a fresh reply channel and awaits the reply.
    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Place the catalog template `template` at `position`
    pub async fn place(&self, template: impl Into<String>, position: Position) -> Result<DiceId> {
        let template = template.into();
        self.request(|reply| Command::Place {
            template,
            position,
            reply,
        })
        .await?
    }

    /// Remove a dice from the board (sell)
    pub async fn remove(&self, dice: DiceId) -> Result<()> {
        self.request(|reply| Command::Remove { dice, reply }).await?
    }

    /// Merge `consumed` into `survivor`
    pub async fn merge(&self, consumed: DiceId, survivor: DiceId) -> Result<MergeReport> {
        self.request(|reply| Command::Merge {
            consumed,
            survivor,
            reply,
        })
        .await?
    }

    /// Enter the combat phase. Returns false if combat was already running.
    pub async fn start_combat(&self) -> Result<bool> {
        self.request(|reply| Command::StartCombat { reply }).await
    }

    /// Leave the combat phase. Returns false if combat was not running.
    pub async fn end_combat(&self) -> Result<bool> {
        self.request(|reply| Command::EndCombat { reply }).await
    }

    pub async fn spawn_target(&self, position: Position, health: f32) -> Result<TargetId> {
        self.request(|reply| Command::SpawnTarget {
            position,
            health,
            reply,
        })
        .await
    }

    /// Advance the combat clock by `dt` seconds immediately
    ///
    /// Useful when the runtime is built without the frame ticker.
    pub async fn advance(&self, dt: f32) -> Result<Vec<FireReport>> {
        self.request(|reply| Command::Advance { dt, reply }).await
    }

    /// Query the current board (read-only snapshot)
    pub async fn snapshot(&self) -> Result<BoardSnapshot> {
        self.request(|reply| Command::QuerySnapshot { reply }).await
    }

    /// Counters for the current or most recent combat
    pub async fn totals(&self) -> Result<CombatTotals> {
        self.request(|reply| Command::QueryTotals { reply }).await
    }

    /// Heal and shield received by the player so far
    pub async fn player(&self) -> Result<PlayerLedger> {
        self.request(|reply| Command::QueryPlayer { reply }).await
    }

    pub async fn targets_alive(&self) -> Result<usize> {
        self.request(|reply| Command::QueryTargetsAlive { reply })
            .await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Phase` - Combat start/end and target roster milestones
    /// - `Topic::Dice` - Placement, removal, merge, and fire ticks
    /// - `Topic::Effects` - Projectiles, hits, heals, and shields
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use combat_runtime::Topic;
    ///
    /// let mut phase_rx = handle.subscribe(Topic::Phase);
    /// while let Ok(event) = phase_rx.recv().await {
    ///     // Handle phase events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub(crate) async fn shutdown_worker(&self) -> Result<()> {
        self.command_tx
            .send(Command::Shutdown)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }
}
