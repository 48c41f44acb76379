#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-step game clock that wires the world and its systems together.
//!
//! Every tick advances the world by [`TICK_QUANTUM`] and then runs the wave
//! director, plant targeting and combat, enemy movement, erosion and sun
//! production in that order. Each stage reads fresh views and its commands
//! are applied before the next stage runs.

use std::time::Duration;

use lawn_defence_core::{
    CellCoord, Command, ConfigError, EnemySnapshot, Event, GameConfig, Outcome, PlacementError,
    PlantId, PlantKind, PlantSnapshot, PlantTarget, PowerupError, PowerupKind,
    ProjectileSnapshot, SunId, SunSnapshot, WaveNumber, TICK_QUANTUM,
};
use lawn_defence_system_movement::{Erosion, Movement};
use lawn_defence_system_plant_combat::PlantCombat;
use lawn_defence_system_plant_targeting::PlantTargeting;
use lawn_defence_system_spawning::WaveDirector;
use lawn_defence_system_sun_production::SunProduction;
use lawn_defence_world::{self as world, query, World};

/// Services provided by whoever hosts a round, notified when it ends.
pub trait GameHost {
    /// Called once when an enemy reaches the house.
    fn on_game_over(&mut self);

    /// Called once when the final wave is cleared.
    fn on_level_complete(&mut self, score: u64);
}

/// Everything a presentation layer needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSnapshot {
    /// Simulation time in milliseconds.
    pub clock_ms: u64,
    /// Sun available for purchases.
    pub sun: u32,
    /// Wave currently announced, spawning or being fought.
    pub wave: WaveNumber,
    /// Last configured wave, if any.
    pub final_wave: Option<WaveNumber>,
    /// Enemies of the current wave released so far.
    pub wave_spawned: u32,
    /// Enemies the current wave releases in total.
    pub wave_total: u32,
    /// Live enemies ordered by identifier.
    pub enemies: Vec<EnemySnapshot>,
    /// Planted plants ordered by identifier.
    pub plants: Vec<PlantSnapshot>,
    /// Projectiles in flight.
    pub projectiles: Vec<ProjectileSnapshot>,
    /// Suns waiting to be collected.
    pub suns: Vec<SunSnapshot>,
    /// Score accumulated from kills and wave bonuses.
    pub score: u64,
    /// Enemies killed so far.
    pub kills: u32,
    /// Whether an enemy reached the house.
    pub game_over: bool,
    /// Whether the final wave was cleared.
    pub won: bool,
    /// Announcement text, visible while present.
    pub announcement: Option<String>,
    /// Seconds until the next wave during an intermission.
    pub countdown_seconds: Option<u64>,
    /// Single-line status summary for debugging overlays and logs.
    pub debug_status: String,
}

/// Owns one round of play and advances it in fixed ticks.
#[derive(Debug)]
pub struct Engine {
    config: GameConfig,
    world: World,
    director: WaveDirector,
    targeting: PlantTargeting,
    combat: PlantCombat,
    movement: Movement,
    erosion: Erosion,
    sun_production: SunProduction,
    accumulator: Duration,
    pending_events: Vec<Event>,
    targets: Vec<PlantTarget>,
    commands: Vec<Command>,
    game_over_reported: bool,
    level_complete_reported: bool,
}

impl Engine {
    /// Validates the configuration and prepares a fresh round.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::info!(
            seed = config.seed,
            waves = config.waves.len(),
            rows = config.board.rows(),
            columns = config.board.columns(),
            "engine ready"
        );
        Ok(Self {
            world: World::new(config.clone()),
            director: WaveDirector::new(config.wave_timing),
            targeting: PlantTargeting::new(),
            combat: PlantCombat::new(),
            movement: Movement::new(),
            erosion: Erosion::new(),
            sun_production: SunProduction::new(&config.economy),
            accumulator: Duration::ZERO,
            pending_events: Vec::new(),
            targets: Vec::new(),
            commands: Vec::new(),
            game_over_reported: false,
            level_complete_reported: false,
            config,
        })
    }

    /// Read-only access to the world for adapters that need raw queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Configuration the round was created with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Terminal outcome of the round, if it ended.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        query::outcome(&self.world)
    }

    /// Accumulates real time and runs as many whole ticks as it covers.
    ///
    /// Returns the number of ticks that ran. Leftover time is kept for the
    /// next call; it is discarded once the round has ended.
    pub fn advance<H: GameHost + ?Sized>(&mut self, dt: Duration, host: &mut H) -> u32 {
        self.accumulator = self.accumulator.saturating_add(dt);
        let mut ticks = 0;
        while self.accumulator >= TICK_QUANTUM {
            if self.outcome().is_some() {
                self.accumulator = Duration::ZERO;
                break;
            }
            self.accumulator -= TICK_QUANTUM;
            self.tick(host);
            ticks += 1;
        }
        ticks
    }

    /// Runs a single fixed tick. Does nothing once the round has ended.
    pub fn tick<H: GameHost + ?Sized>(&mut self, host: &mut H) {
        if self.outcome().is_some() {
            return;
        }

        let mut tick_events = Vec::new();
        world::apply(
            &mut self.world,
            Command::Tick { dt: TICK_QUANTUM },
            &mut tick_events,
        );

        let mut director_events = std::mem::take(&mut self.pending_events);
        director_events.extend(tick_events.iter().cloned());
        self.director.handle(
            &director_events,
            &query::config(&self.world).waves,
            query::live_enemy_count(&self.world),
            &mut self.commands,
        );
        let mut stage_events = Vec::new();
        self.flush_commands(&mut stage_events);

        self.targeting.handle(
            &query::plant_view(&self.world),
            &query::enemy_view(&self.world),
            &query::config(&self.world).plants,
            query::board(&self.world),
            &mut self.targets,
        );
        self.combat.handle(
            &query::plant_view(&self.world),
            &query::config(&self.world).plants,
            &self.targets,
            &mut self.commands,
        );
        self.flush_commands(&mut stage_events);

        self.movement.handle(
            &tick_events,
            &query::enemy_view(&self.world),
            &query::plant_view(&self.world),
            query::board(&self.world),
            query::config(&self.world).combat.bite_reach,
            &mut self.commands,
        );
        self.flush_commands(&mut stage_events);

        self.erosion.handle(
            &tick_events,
            &query::enemy_view(&self.world),
            &query::plant_view(&self.world),
            &mut self.commands,
        );
        self.flush_commands(&mut stage_events);

        self.sun_production.handle(
            &tick_events,
            query::sun_producer_count(&self.world),
            &mut self.commands,
        );
        self.flush_commands(&mut stage_events);

        self.notify_host(&tick_events, host);
        self.notify_host(&stage_events, host);
        self.pending_events = stage_events;
    }

    /// Buys and places a plant, returning its identifier.
    pub fn place_plant(
        &mut self,
        kind: PlantKind,
        cell: CellCoord,
    ) -> Result<PlantId, PlacementError> {
        let events = self.issue(Command::PlacePlant { kind, cell });
        events
            .iter()
            .find_map(|event| match event {
                Event::PlantPlaced { plant, .. } => Some(Ok(*plant)),
                Event::PlacementRejected { reason, .. } => Some(Err(*reason)),
                _ => None,
            })
            .unwrap_or(Err(PlacementError::RoundOver))
    }

    /// Digs up a plant without refund. Returns whether a plant was removed.
    pub fn remove_plant(&mut self, plant: PlantId) -> bool {
        self.issue(Command::RemovePlant { plant })
            .iter()
            .any(|event| matches!(event, Event::PlantRemoved { .. }))
    }

    /// Collects a sun. Returns whether it was still on the lawn.
    pub fn collect_sun(&mut self, sun: SunId) -> bool {
        self.issue(Command::CollectSun { sun })
            .iter()
            .any(|event| matches!(event, Event::SunCollected { .. }))
    }

    /// Activates a powerup, leaving the round untouched when it is refused.
    pub fn use_powerup(&mut self, kind: PowerupKind) -> Result<(), PowerupError> {
        let events = self.issue(Command::UsePowerup { kind });
        events
            .iter()
            .find_map(|event| match event {
                Event::PowerupActivated { .. } => Some(Ok(())),
                Event::PowerupRejected { reason, .. } => Some(Err(*reason)),
                _ => None,
            })
            .unwrap_or(Err(PowerupError::RoundOver))
    }

    /// Throws the current round away and starts over with the same configuration.
    pub fn reset(&mut self) {
        tracing::info!(seed = self.config.seed, "round reset");
        self.world = World::new(self.config.clone());
        self.director = WaveDirector::new(self.config.wave_timing);
        self.targeting = PlantTargeting::new();
        self.combat = PlantCombat::new();
        self.movement = Movement::new();
        self.erosion = Erosion::new();
        self.sun_production = SunProduction::new(&self.config.economy);
        self.accumulator = Duration::ZERO;
        self.pending_events.clear();
        self.targets.clear();
        self.commands.clear();
        self.game_over_reported = false;
        self.level_complete_reported = false;
    }

    /// Captures the state a presentation layer draws.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let outcome = self.outcome();
        let wave = self.director.wave();
        let wave_total = self
            .config
            .waves
            .get(wave)
            .map_or(0, |settings| settings.enemy_count);
        let enemies = query::enemy_view(&self.world).into_vec();
        let plants = query::plant_view(&self.world).into_vec();
        let suns = query::suns(&self.world);
        let clock_ms = query::clock_ms(&self.world);
        let sun = query::sun_balance(&self.world);

        let debug_status = format!(
            "t={:.1}s wave={} phase={:?} spawned={}/{} enemies={} plants={} suns={} sun={} score={}",
            clock_ms as f64 / 1_000.0,
            wave,
            self.director.phase(),
            self.director.spawned(),
            wave_total,
            enemies.len(),
            plants.len(),
            suns.len(),
            sun,
            query::score(&self.world),
        );

        GameSnapshot {
            clock_ms,
            sun,
            wave,
            final_wave: self.config.waves.final_wave(),
            wave_spawned: self.director.spawned(),
            wave_total,
            enemies,
            plants,
            projectiles: query::projectiles(&self.world),
            suns,
            score: query::score(&self.world),
            kills: query::kills(&self.world),
            game_over: outcome == Some(Outcome::Lost),
            won: outcome == Some(Outcome::Won),
            announcement: self.director.announcement().map(str::to_owned),
            countdown_seconds: self.director.countdown_seconds(),
            debug_status,
        }
    }

    fn issue(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        self.pending_events.extend(events.iter().cloned());
        events
    }

    fn flush_commands(&mut self, out: &mut Vec<Event>) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, out);
        }
    }

    fn notify_host<H: GameHost + ?Sized>(&mut self, events: &[Event], host: &mut H) {
        for event in events {
            match event {
                Event::GameOver if !self.game_over_reported => {
                    self.game_over_reported = true;
                    tracing::info!(score = query::score(&self.world), "game over");
                    host.on_game_over();
                }
                Event::LevelComplete { score } if !self.level_complete_reported => {
                    self.level_complete_reported = true;
                    tracing::info!(score, "level complete");
                    host.on_level_complete(*score);
                }
                _ => {}
            }
        }
    }
}
