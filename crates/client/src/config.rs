//! Session configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use dice_core::Position;

/// Dice placed when `DICECRAFT_LINEUP` is unset.
pub const DEFAULT_LINEUP: &[&str] = &[
    "bone_d6",
    "war_drum",
    "storm_d6",
    "bone_d6",
    "lens",
    "keen_d10",
    "chalice_d4",
    "fang_d8",
];

/// Board width used to lay the lineup out row by row.
pub const GRID_COLUMNS: usize = 4;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Board RNG seed; random when unset.
    pub seed: Option<u64>,
    pub combats: u32,
    /// Wall-clock limit per combat.
    pub combat_duration: Duration,
    pub enemies: u32,
    pub enemy_hp: f32,
    /// Directory holding `dice.ron` (and optionally `combat.toml`).
    pub catalog_dir: Option<PathBuf>,
    /// Template ids placed on the grid before the first combat.
    pub lineup: Vec<String>,
    pub frame_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            seed: None,
            combats: 3,
            combat_duration: Duration::from_secs(10),
            enemies: 5,
            enemy_hp: 150.0,
            catalog_dir: None,
            lineup: DEFAULT_LINEUP.iter().map(|id| id.to_string()).collect(),
            frame_interval: Duration::from_millis(16),
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DICECRAFT_SEED` - Board RNG seed (default: random)
    /// - `DICECRAFT_COMBATS` - Number of combats to run (default: 3)
    /// - `DICECRAFT_COMBAT_SECONDS` - Time limit per combat (default: 10)
    /// - `DICECRAFT_ENEMIES` - Enemies spawned per combat (default: 5)
    /// - `DICECRAFT_ENEMY_HP` - Health of each enemy (default: 150)
    /// - `DICECRAFT_CATALOG` - Content directory (default: built-in catalog)
    /// - `DICECRAFT_LINEUP` - Comma-separated template ids to place
    /// - `DICECRAFT_FRAME_MS` - Frame length in milliseconds (default: 16)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.seed = read_env::<u64>("DICECRAFT_SEED");

        if let Some(combats) = read_env::<u32>("DICECRAFT_COMBATS") {
            config.combats = combats;
        }

        if let Some(duration) = read_env::<f32>("DICECRAFT_COMBAT_SECONDS")
            .and_then(|seconds| Duration::try_from_secs_f32(seconds).ok())
            .filter(|duration| !duration.is_zero())
        {
            config.combat_duration = duration;
        }

        if let Some(enemies) = read_env::<u32>("DICECRAFT_ENEMIES") {
            config.enemies = enemies;
        }

        if let Some(hp) = read_env::<f32>("DICECRAFT_ENEMY_HP")
            && hp > 0.0
        {
            config.enemy_hp = hp;
        }

        config.catalog_dir = env::var("DICECRAFT_CATALOG").ok().map(PathBuf::from);

        if let Ok(lineup) = env::var("DICECRAFT_LINEUP") {
            config.lineup = parse_lineup(&lineup);
        }

        if let Some(ms) = read_env::<u64>("DICECRAFT_FRAME_MS") {
            config.frame_interval = Duration::from_millis(ms.max(1));
        }

        config
    }
}

pub fn parse_lineup(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Cell of the `index`-th lineup entry.
pub fn grid_position(index: usize) -> Position {
    Position::new((index % GRID_COLUMNS) as f32, (index / GRID_COLUMNS) as f32)
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
