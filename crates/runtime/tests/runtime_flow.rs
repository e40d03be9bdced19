//! End-to-end tests driving the combat worker through [`RuntimeHandle`].

use std::time::Duration;

use combat_runtime::{
    DiceEvent, EffectEvent, Event, PhaseEvent, Runtime, RuntimeConfig, RuntimeError, SharedPlayer,
    Topic,
};
use dice_content::TemplateCatalog;
use dice_core::{BoardError, DiceTemplate, PassiveKind, Position};
use tokio::sync::broadcast;

fn catalog() -> TemplateCatalog {
    TemplateCatalog::from_templates([
        // One side and no luck: every shot deals exactly base damage once.
        DiceTemplate::new("pebble", 1, 5.0, 0.5),
        DiceTemplate::new("mender", 1, 4.0, 0.5).with_passive(PassiveKind::Heal { ratio: 0.5 }),
        DiceTemplate::new("ticker", 1, 1.0, 0.25),
    ])
    .unwrap()
}

fn manual_config() -> RuntimeConfig {
    RuntimeConfig {
        auto_advance: false,
        rng_seed: Some(7),
        ..RuntimeConfig::default()
    }
}

async fn manual_runtime() -> Runtime {
    Runtime::builder()
        .config(manual_config())
        .catalog(catalog())
        .build()
        .await
        .unwrap()
}

fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn manual_frames_kill_target_and_announce_clear() {
    let runtime = manual_runtime().await;
    let handle = runtime.handle();
    let mut phase_rx = handle.subscribe(Topic::Phase);
    let mut effects_rx = handle.subscribe(Topic::Effects);

    let target = handle.spawn_target(Position::new(5.0, 0.0), 12.0).await.unwrap();
    handle.place("pebble", Position::ORIGIN).await.unwrap();
    assert!(handle.start_combat().await.unwrap());
    assert!(!handle.start_combat().await.unwrap());

    // Frame 1 arms the cooldown; frames 2..=4 each fire once.
    let mut shots = 0;
    for _ in 0..5 {
        shots += handle.advance(0.5).await.unwrap().len();
    }
    assert_eq!(shots, 3);
    assert_eq!(handle.targets_alive().await.unwrap(), 0);

    let totals = handle.totals().await.unwrap();
    assert_eq!(totals.frames, 5);
    assert_eq!(totals.fire_ticks, 3);
    assert_eq!(totals.projectiles, 3);
    assert_eq!(totals.damage, 12.0);
    assert_eq!(totals.kills, 1);

    assert_eq!(
        drain(&mut phase_rx),
        vec![
            Event::Phase(PhaseEvent::TargetSpawned {
                target,
                position: Position::new(5.0, 0.0),
                health: 12.0,
            }),
            Event::Phase(PhaseEvent::CombatStarted { firing: 1 }),
            Event::Phase(PhaseEvent::TargetsCleared { frame: 4 }),
        ]
    );

    let hits: Vec<f32> = drain(&mut effects_rx)
        .into_iter()
        .filter_map(|event| match event {
            Event::Effect(EffectEvent::Hit { hit, secondary }) => {
                assert!(!secondary);
                Some(hit.dealt)
            }
            _ => None,
        })
        .collect();
    assert_eq!(hits, vec![5.0, 5.0, 2.0]);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn rejected_commands_surface_typed_errors() {
    let runtime = manual_runtime().await;
    let handle = runtime.handle();

    let err = handle.place("missing", Position::ORIGIN).await.unwrap_err();
    assert!(matches!(err, RuntimeError::UnknownTemplate(ref id) if id == "missing"));
    assert!(err.is_recoverable());

    let first = handle.place("pebble", Position::ORIGIN).await.unwrap();
    let err = handle.place("pebble", Position::ORIGIN).await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Board(BoardError::CellOccupied(_, occupant)) if occupant == first
    ));

    let err = handle.merge(first, first).await.unwrap_err();
    assert!(matches!(err, RuntimeError::Board(BoardError::SelfMerge(_))));
    assert!(!err.is_recoverable());

    let other = handle.place("ticker", Position::new(1.0, 0.0)).await.unwrap();
    let err = handle.merge(first, other).await.unwrap_err();
    assert!(matches!(err, RuntimeError::IncompatibleMerge { .. }));
    assert_eq!(handle.snapshot().await.unwrap().units.len(), 2);

    handle.remove(first).await.unwrap();
    let err = handle.remove(first).await.unwrap_err();
    assert!(matches!(err, RuntimeError::Board(BoardError::UnknownDice(_))));

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn roster_changes_are_published_on_the_dice_topic() {
    let runtime = manual_runtime().await;
    let handle = runtime.handle();
    let mut dice_rx = handle.subscribe(Topic::Dice);

    let a = handle.place("pebble", Position::new(0.0, 0.0)).await.unwrap();
    let b = handle.place("pebble", Position::new(1.0, 0.0)).await.unwrap();
    let report = handle.merge(a, b).await.unwrap();
    assert_eq!(report.survivor, b);
    assert_eq!(report.level, 1);

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.units.len(), 1);
    assert_eq!(snapshot.unit(b).map(|u| u.level), Some(1));

    let events = drain(&mut dice_rx);
    assert_eq!(events.len(), 3);
    assert!(matches!(
        &events[0],
        Event::Dice(DiceEvent::Placed { dice, template, .. }) if *dice == a && template == "pebble"
    ));
    assert_eq!(events[2], Event::Dice(DiceEvent::Merged(report)));

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn heal_casts_reach_the_shared_player() {
    let player = SharedPlayer::default();
    let runtime = Runtime::builder()
        .config(manual_config())
        .catalog(catalog())
        .player(player.clone())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    handle.spawn_target(Position::new(3.0, 0.0), 50.0).await.unwrap();
    handle.place("mender", Position::ORIGIN).await.unwrap();
    handle.start_combat().await.unwrap();
    for _ in 0..3 {
        handle.advance(0.5).await.unwrap();
    }

    let ledger = handle.player().await.unwrap();
    assert_eq!(ledger.healed, 4.0);
    assert_eq!(ledger.heal_events, 2);
    assert_eq!(player.ledger(), ledger);

    let totals = handle.totals().await.unwrap();
    assert_eq!(totals.skipped, 2);
    assert_eq!(totals.projectiles, 0);
    assert_eq!(totals.healed, 4.0);
    assert_eq!(handle.targets_alive().await.unwrap(), 1);

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn frame_ticker_runs_only_during_combat() {
    let config = RuntimeConfig {
        frame_interval: Duration::from_millis(100),
        rng_seed: Some(1),
        ..RuntimeConfig::default()
    };
    let runtime = Runtime::builder()
        .config(config)
        .catalog(catalog())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    handle.spawn_target(Position::new(2.0, 0.0), 1_000.0).await.unwrap();
    handle.place("ticker", Position::ORIGIN).await.unwrap();

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(handle.totals().await.unwrap().frames, 0);

    handle.start_combat().await.unwrap();
    tokio::time::sleep(Duration::from_millis(1_050)).await;

    // Ten 0.1 s frames: one to arm, then a shot every third frame.
    let totals = handle.totals().await.unwrap();
    assert_eq!(totals.frames, 10);
    assert_eq!(totals.fire_ticks, 3);

    handle.end_combat().await.unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(handle.totals().await.unwrap().frames, 10);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn shutdown_stops_worker_despite_live_handles() {
    let runtime = manual_runtime().await;
    let survivor = runtime.handle();

    runtime.shutdown().await.unwrap();

    let err = survivor.snapshot().await.unwrap_err();
    assert!(matches!(err, RuntimeError::CommandChannelClosed));
}

#[tokio::test]
async fn zero_frame_interval_is_rejected() {
    let config = RuntimeConfig {
        frame_interval: Duration::ZERO,
        ..RuntimeConfig::default()
    };
    let result = Runtime::builder().config(config).build().await;
    assert!(matches!(result, Err(RuntimeError::ZeroFrameInterval)));
}
