use std::fs;

use dice_content::{ConfigLoader, ContentFactory, DiceLoader};
use dice_core::{CombatConfig, PassiveKind, Rarity};

const CATALOG: &str = r#"
DiceCatalog(
    dice: [
        (
            id: "storm",
            name: "Storm Die",
            rarity: Rare,
            sides: 6,
            base_damage: 1.5,
            fire_interval: 1.0,
            luck: 40.0,
            max_upgrade_level: 3,
            passive: Some(ChainLightning(ratio: 0.3, range: 3.0)),
        ),
        (
            id: "drum",
            name: "Drum",
            sides: 4,
            base_damage: 0.0,
            fire_interval: 1.0,
            max_upgrade_level: 2,
            passive: Some(AttackSpeedAura(bonus: 0.2, bonus_per_level: 0.05)),
            can_attack: false,
        ),
    ],
)
"#;

#[test]
fn builtin_catalog_covers_every_passive() {
    let catalog = DiceLoader::builtin().expect("built-in catalog should load");

    for name in [
        "chain_lightning",
        "heal",
        "shield",
        "crit_boost",
        "frenzy",
        "attack_speed_aura",
        "support_damage",
        "amplifier",
        "bloodlust",
        "growth",
        "gambler",
        "vampiric",
        "overcharge",
        "executioner",
    ] {
        assert!(
            catalog.with_passive_named(name).is_some(),
            "no built-in dice carries `{name}`"
        );
    }
    assert!(catalog.attackers().count() < catalog.len());
}

#[test]
fn loads_catalog_with_defaults_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dice.ron");
    fs::write(&path, CATALOG).unwrap();

    let catalog = DiceLoader::load(&path).unwrap();
    assert_eq!(catalog.len(), 2);

    let storm = catalog.get("storm").unwrap();
    assert_eq!(storm.rarity, Rarity::Rare);
    assert_eq!(
        storm.passive,
        Some(PassiveKind::ChainLightning {
            ratio: 0.3,
            range: 3.0
        })
    );
    assert!(storm.can_attack);
    assert_eq!(storm.crit_chance, 0.0);

    let drum = catalog.get("drum").unwrap();
    assert_eq!(drum.rarity, Rarity::Common);
    assert!(!drum.can_attack);
}

#[test]
fn invalid_templates_fail_with_file_context() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dice.ron");
    fs::write(&path, CATALOG.replace("sides: 4", "sides: 0")).unwrap();

    let err = DiceLoader::load(&path).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("dice.ron"), "{message}");
    assert!(message.contains("zero sides"), "{message}");
}

#[test]
fn duplicate_and_malformed_catalogs_are_rejected() {
    let duplicated = CATALOG.replace("id: \"drum\"", "id: \"storm\"");
    let err = DiceLoader::parse(&duplicated).unwrap_err();
    assert!(err.to_string().contains("more than once"));

    assert!(DiceLoader::parse("DiceCatalog(dice: [(id: \"x\")])").is_err());
    assert!(DiceLoader::load(std::path::Path::new("/definitely/missing.ron")).is_err());
}

#[test]
fn config_defaults_fill_missing_keys() {
    let config = ConfigLoader::parse("adjacency_radius = 2.5").unwrap();
    assert_eq!(config.adjacency_radius, 2.5);
    assert_eq!(config.crit_multiplier, CombatConfig::DEFAULT_CRIT_MULTIPLIER);
    assert_eq!(config.max_casts_per_tick, CombatConfig::DEFAULT_MAX_CASTS_PER_TICK);

    assert!(ConfigLoader::parse("max_casts_per_tick = 0").is_err());
    assert!(ConfigLoader::parse("adjacency_radius = \"far\"").is_err());
}

#[test]
fn factory_reads_a_data_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("dice.ron"), CATALOG).unwrap();

    let factory = ContentFactory::new(dir.path());
    assert_eq!(factory.load_config().unwrap(), CombatConfig::default());
    assert_eq!(factory.load_catalog().unwrap().len(), 2);

    fs::write(dir.path().join("combat.toml"), "crit_multiplier = 3.0\n").unwrap();
    assert_eq!(factory.load_config().unwrap().crit_multiplier, 3.0);
}
