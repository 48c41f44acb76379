//! Static game configuration.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    Board, EnemyKind, EnemyRoster, PlantCatalog, PlantKind, PowerupKind, WaveNumber, WaveTable,
};

/// Complete static configuration of a round.
///
/// Every section falls back to its default, so partial configuration files
/// only need to name the values they change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed of the world's random number generator.
    pub seed: u64,
    /// Lawn geometry.
    pub board: Board,
    /// Sun economy parameters.
    pub economy: EconomyConfig,
    /// Score rewards.
    pub scoring: ScoringConfig,
    /// Wave pacing.
    pub wave_timing: WaveTiming,
    /// Status effect and eating parameters.
    pub combat: CombatConfig,
    /// Powerup costs and effects.
    pub powerups: PowerupConfig,
    /// Plant templates.
    pub plants: PlantCatalog,
    /// Enemy profiles.
    pub enemies: EnemyRoster,
    /// Wave table.
    pub waves: WaveTable,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0x5eed_1a57,
            board: Board::default(),
            economy: EconomyConfig::default(),
            scoring: ScoringConfig::default(),
            wave_timing: WaveTiming::default(),
            combat: CombatConfig::default(),
            powerups: PowerupConfig::default(),
            plants: PlantCatalog::default(),
            enemies: EnemyRoster::default(),
            waves: WaveTable::default(),
        }
    }
}

impl GameConfig {
    /// Checks the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.rows() == 0 || self.board.columns() == 0 {
            return Err(ConfigError::EmptyBoard {
                rows: self.board.rows(),
                columns: self.board.columns(),
            });
        }
        if !(self.board.width() > 0.0 && self.board.height() > 0.0) {
            return Err(ConfigError::InvalidBoardSize {
                width: self.board.width(),
                height: self.board.height(),
            });
        }

        let mut seen = BTreeSet::new();
        for template in self.plants.iter() {
            if !seen.insert(template.kind) {
                return Err(ConfigError::DuplicatePlantTemplate {
                    kind: template.kind,
                });
            }
        }

        if self.waves.is_empty() {
            return Err(ConfigError::NoWaves);
        }
        for (wave, settings) in self.waves.iter() {
            if settings.enemy_count == 0 {
                return Err(ConfigError::EmptyWave { wave });
            }
            if settings.spawn_interval_ms == 0 {
                return Err(ConfigError::ZeroSpawnInterval { wave });
            }
            if settings.allowed_kinds.is_empty() {
                return Err(ConfigError::NoAllowedKinds { wave });
            }
            if let Some(kind) = settings
                .allowed_kinds
                .iter()
                .copied()
                .find(|kind| self.enemies.get(*kind).is_none())
            {
                return Err(ConfigError::UnknownEnemyKind { wave, kind });
            }
        }

        Ok(())
    }
}

/// Errors detected while validating a [`GameConfig`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The lawn has no lanes or no columns.
    #[error("board must have at least one row and one column (got {rows}x{columns})")]
    EmptyBoard {
        /// Configured number of rows.
        rows: u32,
        /// Configured number of columns.
        columns: u32,
    },
    /// The lawn's pixel size is not positive.
    #[error("board size must be positive (got {width}x{height})")]
    InvalidBoardSize {
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },
    /// Two plant templates describe the same kind.
    #[error("plant `{kind}` is configured more than once")]
    DuplicatePlantTemplate {
        /// Duplicated kind.
        kind: PlantKind,
    },
    /// The wave table is empty.
    #[error("at least one wave must be configured")]
    NoWaves,
    /// A wave spawns no enemies.
    #[error("wave {wave} spawns no enemies")]
    EmptyWave {
        /// Offending wave.
        wave: WaveNumber,
    },
    /// A wave has a zero spawn interval.
    #[error("wave {wave} has a zero spawn interval")]
    ZeroSpawnInterval {
        /// Offending wave.
        wave: WaveNumber,
    },
    /// A wave allows no enemy kinds.
    #[error("wave {wave} allows no enemy kinds")]
    NoAllowedKinds {
        /// Offending wave.
        wave: WaveNumber,
    },
    /// A wave allows an enemy kind without a roster profile.
    #[error("wave {wave} allows `{kind}` which has no enemy profile")]
    UnknownEnemyKind {
        /// Offending wave.
        wave: WaveNumber,
        /// Kind missing from the roster.
        kind: EnemyKind,
    },
}

/// Sun economy parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Sun balance at the start of a round.
    pub starting_sun: u32,
    /// Sun awarded per collected sun.
    pub sun_value: u32,
    /// Time between ambient sun drops.
    pub ambient_interval_ms: u64,
    /// Time between sunflower bursts.
    pub sunflower_burst_interval_ms: u64,
    /// Time before an uncollected sun expires.
    pub sun_lifetime_ms: u64,
    /// Margin kept between random suns and the board edge.
    pub board_padding: f32,
    /// Maximum offset of a sun produced near a plant.
    pub sun_jitter: f32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_sun: 150,
            sun_value: 25,
            ambient_interval_ms: 3_000,
            sunflower_burst_interval_ms: 7_000,
            sun_lifetime_ms: 10_000,
            board_padding: 40.0,
            sun_jitter: 20.0,
        }
    }
}

/// Score rewards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Score awarded per killed enemy.
    pub kill_score: u32,
    /// Wave-clear bonus per wave number.
    pub wave_bonus_multiplier: u64,
}

impl ScoringConfig {
    /// Bonus awarded for clearing the provided wave.
    #[must_use]
    pub const fn wave_bonus(&self, wave: WaveNumber) -> u64 {
        self.wave_bonus_multiplier.saturating_mul(wave.get() as u64)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            kill_score: 10,
            wave_bonus_multiplier: 50,
        }
    }
}

/// Wave pacing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTiming {
    /// Time the announcement stays up before spawning starts.
    pub announcement_ms: u64,
    /// Pause between a cleared wave and the next announcement.
    pub intermission_ms: u64,
}

impl Default for WaveTiming {
    fn default() -> Self {
        Self {
            announcement_ms: 3_000,
            intermission_ms: 5_000,
        }
    }
}

/// Status effect and eating parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Distance beyond a plant's forward edge at which enemies start eating.
    pub bite_reach: f32,
    /// Flight time of a projectile.
    pub projectile_flight_ms: u64,
    /// Remaining speed share of an enemy hit by ice.
    pub ice_slow_percent: u32,
    /// Duration of the ice slow.
    pub ice_duration_ms: u64,
    /// Damage per burn tick.
    pub burn_damage_per_tick: u32,
    /// Number of burn ticks.
    pub burn_ticks: u32,
    /// Time between burn ticks.
    pub burn_interval_ms: u64,
    /// Damage per shock tick.
    pub shock_damage_per_tick: u32,
    /// Number of shock ticks.
    pub shock_ticks: u32,
    /// Time between shock ticks.
    pub shock_interval_ms: u64,
    /// Speed cap of an electrified enemy, in percent.
    pub shock_slow_percent: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            bite_reach: 30.0,
            projectile_flight_ms: 500,
            ice_slow_percent: 50,
            ice_duration_ms: 3_000,
            burn_damage_per_tick: 5,
            burn_ticks: 6,
            burn_interval_ms: 500,
            shock_damage_per_tick: 4,
            shock_ticks: 4,
            shock_interval_ms: 500,
            shock_slow_percent: 30,
        }
    }
}

/// Powerup costs and effects.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerupConfig {
    /// Cost of plant food.
    pub plant_food_cost: u32,
    /// Cost of the freeze.
    pub freeze_cost: u32,
    /// Cost of the sun boost.
    pub sun_boost_cost: u32,
    /// Cost of the cherry bomb.
    pub cherry_bomb_cost: u32,
    /// Cost of the lawn mower.
    pub lawn_mower_cost: u32,
    /// Duration of the plant food boost.
    pub boost_duration_ms: u64,
    /// Remaining speed share of frozen enemies.
    pub freeze_slow_percent: u32,
    /// Duration of the freeze.
    pub freeze_duration_ms: u64,
    /// Sun granted immediately by the sun boost.
    pub sun_boost_instant: u32,
    /// Bonus suns released by the sun boost.
    pub sun_boost_drops: u32,
    /// Time between bonus sun releases.
    pub sun_boost_drop_interval_ms: u64,
    /// Damage dealt to every enemy by the cherry bomb.
    pub cherry_bomb_damage: u32,
    /// Damage dealt by the lawn mower.
    pub lawn_mower_damage: u32,
    /// Share of the lawn, from the goal line, swept by the lawn mower.
    pub lawn_mower_reach: f32,
}

impl PowerupConfig {
    /// Sun required to activate the provided powerup.
    #[must_use]
    pub const fn cost(&self, kind: PowerupKind) -> u32 {
        match kind {
            PowerupKind::PlantFood => self.plant_food_cost,
            PowerupKind::Freeze => self.freeze_cost,
            PowerupKind::SunBoost => self.sun_boost_cost,
            PowerupKind::CherryBomb => self.cherry_bomb_cost,
            PowerupKind::LawnMower => self.lawn_mower_cost,
        }
    }
}

impl Default for PowerupConfig {
    fn default() -> Self {
        Self {
            plant_food_cost: 75,
            freeze_cost: 100,
            sun_boost_cost: 50,
            cherry_bomb_cost: 150,
            lawn_mower_cost: 200,
            boost_duration_ms: 15_000,
            freeze_slow_percent: 20,
            freeze_duration_ms: 10_000,
            sun_boost_instant: 75,
            sun_boost_drops: 4,
            sun_boost_drop_interval_ms: 400,
            cherry_bomb_damage: 300,
            lawn_mower_damage: 500,
            lawn_mower_reach: 1.0 / 3.0,
        }
    }
}
