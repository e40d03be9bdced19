//! Behaviour of the concrete passive abilities on a live board.
mod common;

use std::sync::Arc;

use common::{ScriptedRng, SharedPlayer, SharedPool};
use dice_core::{
    Board, CombatConfig, CombatEnv, DiceRng, DiceTemplate, EffectRecord, InstantProjectiles,
    PassiveKind, Position,
};

fn board(pool: &SharedPool, rng: impl DiceRng + 'static) -> Board {
    let env = CombatEnv::new()
        .with_targets(pool.clone())
        .with_projectiles(InstantProjectiles::new());
    Board::new(CombatConfig::default(), env, rng)
}

fn with_passive(id: &str, sides: u32, kind: PassiveKind) -> Arc<DiceTemplate> {
    Arc::new(DiceTemplate::new(id, sides, 1.0, 1.0).with_passive(kind))
}

fn damage_of(board: &mut Board, id: dice_core::DiceId) -> f32 {
    let outcome = board.fire_once(id).unwrap();
    outcome.report().unwrap().total_damage
}

#[test]
fn gambler_multiplies_only_max_faces() {
    let pool = SharedPool::default();
    pool.spawn(Position::ORIGIN, 10_000.0);
    let mut board = board(&pool, ScriptedRng::new([6, 5, 6], []));
    let id = board
        .place(
            with_passive("gambler", 6, PassiveKind::Gambler {
                max_roll_multiplier: 3.0,
            }),
            Position::new(0.0, 3.0),
        )
        .unwrap();

    assert_eq!(damage_of(&mut board, id), 18.0);
    assert_eq!(damage_of(&mut board, id), 5.0);
    assert_eq!(damage_of(&mut board, id), 18.0);
}

#[test]
fn overcharge_counts_casts_and_resets_each_combat() {
    let pool = SharedPool::default();
    pool.spawn(Position::ORIGIN, 10_000.0);
    let mut board = board(&pool, ScriptedRng::new([2; 8], []));
    let id = board
        .place(
            with_passive("capacitor", 6, PassiveKind::Overcharge {
                every: 3,
                multiplier: 4.0,
            }),
            Position::new(0.0, 3.0),
        )
        .unwrap();

    let damage: Vec<f32> = (0..4).map(|_| damage_of(&mut board, id)).collect();
    assert_eq!(damage, vec![2.0, 2.0, 8.0, 2.0]);

    // A new combat restarts the count.
    board.start_combat();
    let damage: Vec<f32> = (0..3).map(|_| damage_of(&mut board, id)).collect();
    assert_eq!(damage, vec![2.0, 2.0, 8.0]);
}

#[test]
fn executioner_primes_the_next_cast_after_a_kill() {
    let pool = SharedPool::default();
    pool.spawn(Position::ORIGIN, 3.0);
    pool.spawn(Position::new(1.0, 0.0), 1000.0);
    let mut board = board(&pool, ScriptedRng::new([4, 4, 4], []));
    let id = board
        .place(
            with_passive("reaper", 6, PassiveKind::Executioner { bonus_damage: 10.0 }),
            Position::new(0.0, 3.0),
        )
        .unwrap();

    // Kills the 3 hp target (dealt is capped), then the bonus is spent once.
    assert_eq!(damage_of(&mut board, id), 3.0);
    assert_eq!(damage_of(&mut board, id), 14.0);
    assert_eq!(damage_of(&mut board, id), 4.0);
}

#[test]
fn vampiric_and_shield_feed_the_player() {
    let pool = SharedPool::default();
    pool.spawn(Position::ORIGIN, 1000.0);
    let player = SharedPlayer::default();
    let env = CombatEnv::new()
        .with_targets(pool.clone())
        .with_projectiles(InstantProjectiles::new())
        .with_player(player.clone());
    let mut board = Board::new(CombatConfig::default(), env, ScriptedRng::new([5, 4], []));

    let leech = board
        .place(
            with_passive("leech", 6, PassiveKind::Vampiric { ratio: 0.2 }),
            Position::new(0.0, 3.0),
        )
        .unwrap();
    let ward = board
        .place(
            with_passive("ward", 6, PassiveKind::Shield { ratio: 0.5 }),
            Position::new(5.0, 3.0),
        )
        .unwrap();

    board.fire_once(leech).unwrap();
    board.fire_once(ward).unwrap();

    let ledger = player.ledger();
    assert!((ledger.healed - 1.0).abs() < 1e-6);
    assert_eq!(ledger.shielded, 2.0);
    assert_eq!(ledger.shield_events, 1);
    assert!(board.drain_effects().iter().any(|record| matches!(
        record,
        EffectRecord::Shielded { source, amount } if *source == ward && *amount == 2.0
    )));
}

#[test]
fn growth_rewards_only_the_survivor() {
    let pool = SharedPool::default();
    let mut board = board(&pool, ScriptedRng::default());
    let template = with_passive("sprout", 6, PassiveKind::Growth {
        damage_per_merge: 2.5,
    });
    let a = board.place(Arc::clone(&template), Position::ORIGIN).unwrap();
    let b = board.place(template, Position::new(1.0, 0.0)).unwrap();

    board.merge(a, b).unwrap();

    let stats = board.stats(b).unwrap();
    assert_eq!(stats.base_damage, 3.5);
    assert_eq!(stats.upgrade_level, 1);
}

#[test]
fn bloodlust_stacks_to_its_cap_then_resets() {
    let pool = SharedPool::default();
    for i in 0..10 {
        pool.spawn(Position::new(i as f32, 0.0), 1.0);
    }
    let mut board = board(&pool, ScriptedRng::default());
    let id = board
        .place(
            Arc::new(DiceTemplate::new("berserker", 6, 1.0, 2.0).with_passive(
                PassiveKind::Bloodlust {
                    haste_per_kill: 1.0,
                    max_stacks: 3,
                },
            )),
            Position::new(0.0, 3.0),
        )
        .unwrap();

    // Kills outside combat grant nothing.
    board.fire_once(id).unwrap();
    assert_eq!(board.stats(id).unwrap().fire_interval, 2.0);

    board.start_combat();
    for _ in 0..5 {
        board.fire_once(id).unwrap();
    }
    // 2.0 / 2^3
    assert_eq!(board.stats(id).unwrap().fire_interval, 0.25);

    board.end_combat();
    let stats = board.stats(id).unwrap();
    assert_eq!(stats.fire_interval, 2.0);
    assert_eq!(stats.base_fire_interval, 2.0);
}

#[test]
fn aura_survives_combat_cycles_and_scales_with_level() {
    let pool = SharedPool::default();
    pool.spawn(Position::ORIGIN, 1_000_000.0);
    let mut board = board(&pool, ScriptedRng::default());
    let aura = Arc::new(
        DiceTemplate::new("drum", 4, 1.0, 1.0)
            .with_passive(PassiveKind::AttackSpeedAura {
                bonus: 0.25,
                bonus_per_level: 0.25,
            })
            .support_only(),
    );
    let shooter = board
        .place(
            Arc::new(DiceTemplate::new("d6", 6, 1.0, 1.5)),
            Position::new(0.0, 1.0),
        )
        .unwrap();
    let a = board.place(Arc::clone(&aura), Position::ORIGIN).unwrap();
    let b = board.place(aura, Position::new(1.0, 0.0)).unwrap();

    // Two auras, each 1.25: 1.5 / 1.5625
    let interval = |board: &Board| board.stats(shooter).unwrap().fire_interval;
    assert!((interval(&board) - 0.96).abs() < 1e-5);

    for _ in 0..3 {
        board.start_combat();
        assert!((interval(&board) - 0.96).abs() < 1e-5);
        board.advance(0.1);
        board.end_combat();
        assert!((interval(&board) - 0.96).abs() < 1e-5);
    }

    // Merging lifts the survivor to level 1: bonus 0.5, one source left.
    board.merge(a, b).unwrap();
    assert_eq!(board.buffs().source_count(shooter), 1);
    assert!((interval(&board) - 1.0).abs() < 1e-6);

    board.remove(b).unwrap();
    assert_eq!(interval(&board), 1.5);
}

#[test]
fn attacking_aura_hastes_only_during_combat() {
    let pool = SharedPool::default();
    pool.spawn(Position::ORIGIN, 1_000_000.0);
    let mut board = board(&pool, ScriptedRng::default());
    let drum = with_passive(
        "war_drum",
        4,
        PassiveKind::AttackSpeedAura {
            bonus: 0.5,
            bonus_per_level: 0.0,
        },
    );
    let plain = || Arc::new(DiceTemplate::new("d6", 6, 1.0, 1.5));

    board.place(drum, Position::ORIGIN).unwrap();
    let early = board.place(plain(), Position::new(1.0, 0.0)).unwrap();
    assert_eq!(board.buffs().source_count(early), 0);

    board.start_combat();
    assert_eq!(board.buffs().source_count(early), 1);
    assert_eq!(board.stats(early).unwrap().fire_interval, 1.0);
    let joined = board.place(plain(), Position::new(0.0, 1.0)).unwrap();
    assert_eq!(board.buffs().source_count(joined), 1);

    board.end_combat();
    let late = board.place(plain(), Position::new(-1.0, 0.0)).unwrap();
    for id in [early, joined, late] {
        assert_eq!(board.buffs().source_count(id), 0);
        assert_eq!(board.stats(id).unwrap().fire_interval, 1.5);
    }

    board.start_combat();
    for id in [early, joined, late] {
        assert_eq!(board.buffs().source_count(id), 1);
    }
}
