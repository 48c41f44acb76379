#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lawn Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

mod catalog;
mod config;

pub use catalog::{
    EnemyProfile, EnemyRoster, PlantCatalog, PlantTemplate, WaveSettings, WaveTable,
};
pub use config::{
    CombatConfig, ConfigError, EconomyConfig, GameConfig, PowerupConfig, ScoringConfig,
    WaveTiming,
};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Lawn Defence.";

/// Duration of a single simulation step driven by the game clock.
pub const TICK_QUANTUM: Duration = Duration::from_millis(100);

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that a new enemy enters the lawn using the settings of a wave.
    SpawnEnemy {
        /// Wave whose settings parameterise the enemy.
        wave: WaveNumber,
    },
    /// Requests placement of a plant into a single lawn cell.
    PlacePlant {
        /// Type of plant to grow.
        kind: PlantKind,
        /// Cell the plant should occupy.
        cell: CellCoord,
    },
    /// Requests removal of a plant with the shovel tool.
    RemovePlant {
        /// Identifier of the plant targeted for removal.
        plant: PlantId,
    },
    /// Requests collection of a sun resource lying on the lawn.
    CollectSun {
        /// Identifier of the sun to collect.
        sun: SunId,
    },
    /// Requests activation of a powerup paid for with sun.
    UsePowerup {
        /// Powerup to activate.
        kind: PowerupKind,
    },
    /// Requests that a plant attacks an enemy.
    FirePlant {
        /// Plant that should fire.
        plant: PlantId,
        /// Enemy the plant aims at.
        target: EnemyId,
    },
    /// Requests that a sun-producing plant emits a sun near its cell.
    ProducePlantSun {
        /// Plant producing the sun.
        plant: PlantId,
    },
    /// Requests that an enemy stops to eat a plant blocking its lane.
    BeginEating {
        /// Enemy that should stop.
        enemy: EnemyId,
        /// Plant the enemy starts eating.
        plant: PlantId,
    },
    /// Requests that an eating enemy resumes walking at the current wave's pace.
    ReleaseEnemy {
        /// Enemy to release.
        enemy: EnemyId,
    },
    /// Requests that an enemy advances along its lane for the current tick.
    StepEnemy {
        /// Enemy that should advance.
        enemy: EnemyId,
    },
    /// Requests that a plant loses health to the enemies eating it.
    BitePlant {
        /// Plant being eaten.
        plant: PlantId,
        /// Total damage inflicted this tick.
        damage: u32,
    },
    /// Requests a sun drop at a random position on the lawn.
    DropAmbientSun,
    /// Requests a sun burst from a randomly selected live sunflower.
    DropSunflowerSun,
    /// Requests the wave-clear bonus for a completed wave.
    CompleteWave {
        /// Wave that was cleared.
        wave: WaveNumber,
    },
    /// Requests that the round ends in victory.
    DeclareVictory,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
        /// Simulation clock after the tick, in milliseconds.
        now_ms: u64,
    },
    /// Confirms that an enemy entered the lawn.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Kind of enemy that spawned.
        kind: EnemyKind,
        /// Lane the enemy walks along.
        row: u32,
        /// Wave the enemy belongs to.
        wave: WaveNumber,
    },
    /// Confirms that an enemy was killed and removed from the lawn.
    EnemyKilled {
        /// Identifier of the killed enemy.
        enemy: EnemyId,
        /// Score awarded for the kill.
        score: u32,
    },
    /// Reports that an enemy crossed the goal line.
    EnemyReachedGoal {
        /// Identifier of the enemy.
        enemy: EnemyId,
        /// Lane the enemy crossed in.
        row: u32,
    },
    /// Announces that the round was lost. Emitted at most once per round.
    GameOver,
    /// Announces that the final wave was cleared. Emitted at most once per round.
    LevelComplete {
        /// Final score of the round.
        score: u64,
    },
    /// Confirms that a plant was placed.
    PlantPlaced {
        /// Identifier assigned to the plant.
        plant: PlantId,
        /// Kind of plant placed.
        kind: PlantKind,
        /// Cell occupied by the plant.
        cell: CellCoord,
        /// Sun debited for the placement.
        cost: u32,
    },
    /// Reports that a placement request was rejected.
    PlacementRejected {
        /// Kind of plant requested.
        kind: PlantKind,
        /// Cell requested.
        cell: CellCoord,
        /// Reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a plant was removed with the shovel.
    PlantRemoved {
        /// Identifier of the removed plant.
        plant: PlantId,
        /// Cell freed by the removal.
        cell: CellCoord,
    },
    /// Reports that a plant was eaten down to zero health.
    PlantDestroyed {
        /// Identifier of the destroyed plant.
        plant: PlantId,
        /// Cell freed by the destruction.
        cell: CellCoord,
    },
    /// Confirms that a plant fired at an enemy.
    PlantFired {
        /// Plant that fired.
        plant: PlantId,
        /// Enemy that was hit.
        target: EnemyId,
        /// Projectile created for the shot.
        projectile: ProjectileId,
        /// Kind of projectile created.
        kind: ProjectileKind,
    },
    /// Reports that an enemy stopped to eat a plant.
    EnemyStartedEating {
        /// Enemy that stopped.
        enemy: EnemyId,
        /// Plant being eaten.
        plant: PlantId,
    },
    /// Reports that an enemy resumed walking.
    EnemyReleased {
        /// Enemy that resumed walking.
        enemy: EnemyId,
    },
    /// Confirms that a sun appeared on the lawn.
    SunProduced {
        /// Identifier assigned to the sun.
        sun: SunId,
        /// Position of the sun in board pixels.
        position: PixelPoint,
        /// Origin of the sun.
        source: SunSource,
    },
    /// Confirms that a sun was collected.
    SunCollected {
        /// Identifier of the collected sun.
        sun: SunId,
        /// Sun added to the balance.
        value: u32,
        /// Balance after the collection.
        balance: u32,
    },
    /// Reports that an uncollected sun timed out.
    SunExpired {
        /// Identifier of the expired sun.
        sun: SunId,
    },
    /// Confirms that a powerup was paid for and applied.
    PowerupActivated {
        /// Powerup that was applied.
        kind: PowerupKind,
        /// Sun debited for the powerup.
        cost: u32,
    },
    /// Reports that a powerup request was rejected.
    PowerupRejected {
        /// Powerup requested.
        kind: PowerupKind,
        /// Reason the powerup failed.
        reason: PowerupError,
    },
    /// Confirms that a wave-clear bonus was awarded.
    WaveCompleted {
        /// Wave that was cleared.
        wave: WaveNumber,
        /// Score bonus awarded.
        bonus: u64,
    },
}

/// Origin of a sun resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SunSource {
    /// Periodic drop from the sky.
    Ambient,
    /// Produced by a sunflower-type plant.
    Plant(PlantId),
    /// Released by the sun boost powerup.
    Powerup,
}

/// Terminal result of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// An enemy crossed the goal line.
    Lost,
    /// The final configured wave was cleared.
    Won,
}

/// Reasons a plant placement request may be rejected by the world.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error,
)]
pub enum PlacementError {
    /// The round already ended.
    #[error("the round has already ended")]
    RoundOver,
    /// The requested cell lies outside the lawn.
    #[error("the cell lies outside the lawn")]
    OutOfBounds,
    /// The plant kind has no template in the catalog.
    #[error("the plant is not part of the catalog")]
    UnknownPlant,
    /// Another plant already occupies the cell.
    #[error("the cell is already occupied")]
    Occupied,
    /// The sun balance does not cover the plant's cost.
    #[error("not enough sun")]
    InsufficientSun,
}

/// Reasons a powerup request may be rejected by the world.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error,
)]
pub enum PowerupError {
    /// The round already ended.
    #[error("the round has already ended")]
    RoundOver,
    /// The sun balance does not cover the powerup's cost.
    #[error("not enough sun")]
    InsufficientSun,
}

/// Error returned when a kind name cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {category} `{name}`")]
pub struct UnknownKindError {
    category: &'static str,
    name: String,
}

macro_rules! named_kind {
    (
        $(#[$meta:meta])*
        $name:ident, $category:literal {
            $($(#[$variant_meta:meta])* $variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($(#[$variant_meta])* $variant),+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Stable snake-case name used in configuration files and the CLI.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownKindError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let trimmed = value.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| UnknownKindError {
                        category: $category,
                        name: trimmed.to_owned(),
                    })
            }
        }
    };
}

named_kind! {
    /// Types of plants that can be grown on the lawn.
    PlantKind, "plant" {
        /// Produces sun on its cooldown.
        Sunflower => "sunflower",
        /// Fires peas.
        Peashooter => "peashooter",
        /// Fires peas that chill their target.
        IceShooter => "ice_shooter",
        /// Fires peas that set their target alight.
        FireShooter => "fire_shooter",
        /// Fires bolts that electrify their target.
        LightningShooter => "lightning_shooter",
        /// Sturdy blocker without an attack.
        WallNut => "wall_nut",
    }
}

named_kind! {
    /// Types of enemies that walk across the lawn.
    EnemyKind, "enemy" {
        /// Baseline zombie.
        Basic => "basic",
        /// Zombie wearing a traffic cone.
        Conehead => "conehead",
        /// Zombie wearing a bucket.
        Buckethead => "buckethead",
        /// Fast but fragile zombie.
        Runner => "runner",
    }
}

named_kind! {
    /// Types of projectiles fired by plants.
    ProjectileKind, "projectile" {
        /// Plain pea without a status effect.
        Pea => "pea",
        /// Chilling pea that slows the target.
        Ice => "ice",
        /// Burning pea that deals damage over time.
        Fire => "fire",
        /// Bolt that slows and shocks the target.
        Lightning => "lightning",
    }
}

named_kind! {
    /// Powerups that can be bought with sun.
    PowerupKind, "powerup" {
        /// Boosts every plant and resets their cooldowns.
        PlantFood => "plant_food",
        /// Slows every enemy to a crawl.
        Freeze => "freeze",
        /// Grants sun immediately and releases bonus suns.
        SunBoost => "sun_boost",
        /// Deals heavy damage to every enemy.
        CherryBomb => "cherry_bomb",
        /// Mows down enemies close to the house.
        LawnMower => "lawn_mower",
    }
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(u32);

        impl $name {
            /// Creates a new identifier with the provided numeric value.
            #[must_use]
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            /// Retrieves the numeric representation of the identifier.
            #[must_use]
            pub const fn get(&self) -> u32 {
                self.0
            }
        }
    };
}

identifier! {
    /// Unique identifier assigned to an enemy.
    EnemyId
}

identifier! {
    /// Unique identifier assigned to a plant.
    PlantId
}

identifier! {
    /// Unique identifier assigned to a projectile.
    ProjectileId
}

identifier! {
    /// Unique identifier assigned to a sun resource.
    SunId
}

/// One-based wave number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WaveNumber(u32);

impl WaveNumber {
    /// The first wave of a round.
    pub const FIRST: Self = Self(1);

    /// Creates a wave number. Zero is promoted to the first wave.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        if value == 0 {
            Self::FIRST
        } else {
            Self(value)
        }
    }

    /// Retrieves the one-based wave number.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the wave that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for WaveNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Location of a single lawn cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new lawn cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell, counted from the house.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row (lane) index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Point on the board measured in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    /// Horizontal offset from the goal line.
    pub x: f32,
    /// Vertical offset from the top of the board.
    pub y: f32,
}

impl PixelPoint {
    /// Creates a new pixel point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Lane-based lawn geometry mapping cells to pixels.
///
/// Column zero sits next to the goal line at `x = 0`; enemies enter at
/// `x = width`. Callers must keep rows and columns inside the grid; derived
/// rows should pass through [`Board::clamp_row`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    width: f32,
    height: f32,
    rows: u32,
    columns: u32,
}

impl Board {
    /// Creates a new board description.
    #[must_use]
    pub const fn new(width: f32, height: f32, rows: u32, columns: u32) -> Self {
        Self {
            width,
            height,
            rows,
            columns,
        }
    }

    /// Width of the lawn in pixels.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the lawn in pixels.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Number of lanes.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of plantable columns per lane.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Width of a single cell in pixels.
    #[must_use]
    pub fn cell_width(&self) -> f32 {
        if self.columns == 0 {
            return 0.0;
        }
        self.width / self.columns as f32
    }

    /// Height of a single cell in pixels.
    #[must_use]
    pub fn cell_height(&self) -> f32 {
        if self.rows == 0 {
            return 0.0;
        }
        self.height / self.rows as f32
    }

    /// Pixel coordinate of the center of the provided cell.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> PixelPoint {
        let x = (cell.column() as f32 + 0.5) * self.cell_width();
        let y = self.lane_top(cell.row()) + self.cell_height() / 2.0;
        PixelPoint::new(x, y)
    }

    /// Vertical pixel offset of the top edge of a lane.
    #[must_use]
    pub fn lane_top(&self, row: u32) -> f32 {
        row as f32 * self.cell_height()
    }

    /// Pixel offset of the edge of a column nearest the goal line.
    #[must_use]
    pub fn cell_left(&self, column: u32) -> f32 {
        column as f32 * self.cell_width()
    }

    /// Pixel offset of the forward edge of a column, facing the enemies.
    #[must_use]
    pub fn cell_right(&self, column: u32) -> f32 {
        (column as f32 + 1.0) * self.cell_width()
    }

    /// Reports whether the provided cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Clamps a lane index into `0..rows`.
    #[must_use]
    pub const fn clamp_row(&self, row: u32) -> u32 {
        if self.rows == 0 {
            return 0;
        }
        if row >= self.rows {
            self.rows - 1
        } else {
            row
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(900.0, 500.0, 5, 9)
    }
}

/// Temporary slow applied to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slow {
    /// Remaining share of the base speed, in percent.
    pub factor_percent: u32,
    /// Simulation time at which the slow wears off.
    pub expires_at_ms: u64,
}

impl Slow {
    /// Combines two slows, keeping the stronger factor and the later expiry.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            factor_percent: self.factor_percent.min(other.factor_percent),
            expires_at_ms: self.expires_at_ms.max(other.expires_at_ms),
        }
    }
}

/// Damage applied to an enemy at a fixed cadence for a fixed number of ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageOverTime {
    /// Damage dealt on each tick of the effect.
    pub damage_per_tick: u32,
    /// Ticks left before the effect ends.
    pub remaining_ticks: u32,
    /// Simulation time of the next damage tick.
    pub next_tick_at_ms: u64,
    /// Time between damage ticks.
    pub interval_ms: u64,
}

/// Status effects attached to an enemy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffects {
    /// Slow applied by ice projectiles or the freeze powerup.
    pub frozen: Option<Slow>,
    /// Burn applied by fire projectiles.
    pub burning: Option<DamageOverTime>,
    /// Shock applied by lightning projectiles.
    pub electrified: Option<DamageOverTime>,
}

impl StatusEffects {
    /// Reports whether the enemy is frozen.
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        self.frozen.is_some()
    }

    /// Reports whether the enemy is burning.
    #[must_use]
    pub const fn is_burning(&self) -> bool {
        self.burning.is_some()
    }

    /// Reports whether the enemy is electrified.
    #[must_use]
    pub const fn is_electrified(&self) -> bool {
        self.electrified.is_some()
    }
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Kind of enemy.
    pub kind: EnemyKind,
    /// Lane the enemy walks along.
    pub row: u32,
    /// Pixel offset along the lane; zero is the goal line.
    pub position: f32,
    /// Remaining health.
    pub health: u32,
    /// Health at spawn time.
    pub max_health: u32,
    /// Speed before status effects.
    pub base_speed: u32,
    /// Speed after status effects; zero while eating.
    pub speed: u32,
    /// Damage dealt to an eaten plant per tick.
    pub bite_damage: u32,
    /// Plant being eaten, if any.
    pub eating: Option<PlantId>,
    /// Active status effects.
    pub status: StatusEffects,
}

/// Read-only snapshot describing all enemies on the lawn.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot of a single enemy.
    #[must_use]
    pub fn get(&self, enemy: EnemyId) -> Option<&EnemySnapshot> {
        self.snapshots
            .binary_search_by_key(&enemy, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single plant's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlantSnapshot {
    /// Identifier allocated to the plant by the world.
    pub id: PlantId,
    /// Kind of plant.
    pub kind: PlantKind,
    /// Cell occupied by the plant.
    pub cell: CellCoord,
    /// Remaining health.
    pub health: u32,
    /// Health at placement time.
    pub max_health: u32,
    /// Simulation time of the last shot or sun production.
    pub last_fired_at_ms: Option<u64>,
    /// Simulation time at which a plant food boost wears off.
    pub boosted_until_ms: Option<u64>,
    /// Indicates whether the plant's cooldown elapsed at snapshot time.
    pub ready: bool,
}

/// Read-only snapshot describing all plants on the lawn.
#[derive(Clone, Debug, Default)]
pub struct PlantView {
    snapshots: Vec<PlantSnapshot>,
}

impl PlantView {
    /// Creates a new plant view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<PlantSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured plant snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &PlantSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot of a single plant.
    #[must_use]
    pub fn get(&self, plant: PlantId) -> Option<&PlantSnapshot> {
        self.snapshots
            .binary_search_by_key(&plant, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of plants captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no plants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<PlantSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile.
    pub id: ProjectileId,
    /// Kind of projectile.
    pub kind: ProjectileKind,
    /// Lane the projectile travels along.
    pub row: u32,
    /// Horizontal pixel offset the projectile left from.
    pub start_x: f32,
    /// Horizontal pixel offset of the struck enemy.
    pub end_x: f32,
    /// Share of the flight completed, in `[0, 1]`.
    pub progress: f32,
}

/// Immutable representation of a sun lying on the lawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunSnapshot {
    /// Identifier allocated to the sun.
    pub id: SunId,
    /// Position of the sun in board pixels.
    pub position: PixelPoint,
    /// Simulation time at which the sun appeared.
    pub created_at_ms: u64,
    /// Sun awarded on collection.
    pub value: u32,
}

/// Target assignment produced by the plant targeting system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlantTarget {
    /// Plant that should attack.
    pub plant: PlantId,
    /// Enemy selected as the plant's target.
    pub enemy: EnemyId,
    /// Lane position of the enemy when it was selected.
    pub enemy_position: f32,
}
