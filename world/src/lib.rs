#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Lawn Defence.

mod combat;
mod economy;
mod enemies;
pub mod factories;
mod plants;
mod powerups;

use lawn_defence_core::{
    Command, EnemyId, Event, GameConfig, Outcome, PlacementError, PowerupError, ProjectileId,
    SunId, SunSource, WaveNumber, WELCOME_BANNER,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use combat::Projectile;
pub use economy::Sun;
pub use enemies::Enemy;

use plants::PlantRegistry;

/// Represents the authoritative Lawn Defence world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: GameConfig,
    clock_ms: u64,
    last_tick_ms: u64,
    current_wave: WaveNumber,
    last_completed_wave: Option<WaveNumber>,
    enemies: Vec<Enemy>,
    plants: PlantRegistry,
    projectiles: Vec<Projectile>,
    suns: Vec<Sun>,
    pending_sun_drops: Vec<u64>,
    sun_balance: u32,
    score: u64,
    kills: u32,
    outcome: Option<Outcome>,
    next_enemy_id: EnemyId,
    next_projectile_id: ProjectileId,
    next_sun_id: SunId,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a new world for a round played with the provided configuration.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            banner: WELCOME_BANNER,
            clock_ms: 0,
            last_tick_ms: 0,
            current_wave: WaveNumber::FIRST,
            last_completed_wave: None,
            enemies: Vec::new(),
            plants: PlantRegistry::new(),
            projectiles: Vec::new(),
            suns: Vec::new(),
            pending_sun_drops: Vec::new(),
            sun_balance: config.economy.starting_sun,
            score: 0,
            kills: 0,
            outcome: None,
            next_enemy_id: EnemyId::new(0),
            next_projectile_id: ProjectileId::new(0),
            next_sun_id: SunId::new(0),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
        }
    }

    fn advance_clock(&mut self, elapsed_ms: u64, out_events: &mut Vec<Event>) {
        self.clock_ms = self.clock_ms.saturating_add(elapsed_ms);
        self.last_tick_ms = elapsed_ms;

        self.advance_projectiles(elapsed_ms);
        self.expire_slows();
        self.tick_damage_over_time(out_events);
        self.release_pending_drops(out_events);
        self.expire_suns(out_events);
        self.expire_boosts();
    }

    fn spawn_enemy(&mut self, wave: WaveNumber, out_events: &mut Vec<Event>) {
        let Some(settings) = self.config.waves.get(wave) else {
            tracing::warn!(wave = wave.get(), "spawn requested for unconfigured wave");
            return;
        };

        let id = self.next_enemy_id;
        self.next_enemy_id = EnemyId::new(id.get().saturating_add(1));
        let enemy = factories::create_enemy(
            id,
            settings,
            &self.config.enemies,
            &self.config.board,
            &mut self.rng,
        );
        self.current_wave = wave;
        tracing::debug!(
            enemy = id.get(),
            kind = %enemy.kind,
            row = enemy.row,
            wave = wave.get(),
            "enemy spawned"
        );
        out_events.push(Event::EnemySpawned {
            enemy: id,
            kind: enemy.kind,
            row: enemy.row,
            wave,
        });
        self.enemies.push(enemy);
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once the round has an outcome every command is ignored; placement and
/// powerup requests are answered with a `RoundOver` rejection.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.outcome.is_some() {
        match command {
            Command::PlacePlant { kind, cell } => out_events.push(Event::PlacementRejected {
                kind,
                cell,
                reason: PlacementError::RoundOver,
            }),
            Command::UsePowerup { kind } => out_events.push(Event::PowerupRejected {
                kind,
                reason: PowerupError::RoundOver,
            }),
            _ => {}
        }
        return;
    }

    match command {
        Command::Tick { dt } => {
            let elapsed_ms = u64::try_from(dt.as_millis()).unwrap_or(u64::MAX);
            let now_ms = world.clock_ms.saturating_add(elapsed_ms);
            out_events.push(Event::TimeAdvanced { dt, now_ms });
            world.advance_clock(elapsed_ms, out_events);
        }
        Command::SpawnEnemy { wave } => world.spawn_enemy(wave, out_events),
        Command::PlacePlant { kind, cell } => match world.place_plant(kind, cell) {
            Ok((plant, cost)) => {
                tracing::debug!(plant = plant.get(), %kind, ?cell, cost, "plant placed");
                out_events.push(Event::PlantPlaced {
                    plant,
                    kind,
                    cell,
                    cost,
                });
            }
            Err(reason) => {
                tracing::warn!(%kind, ?cell, %reason, "placement rejected");
                out_events.push(Event::PlacementRejected { kind, cell, reason });
            }
        },
        Command::RemovePlant { plant } => world.remove_plant(plant, out_events),
        Command::CollectSun { sun } => world.collect_sun(sun, out_events),
        Command::UsePowerup { kind } => {
            if let Err(reason) = world.use_powerup(kind, out_events) {
                tracing::warn!(%kind, %reason, "powerup rejected");
                out_events.push(Event::PowerupRejected { kind, reason });
            }
        }
        Command::FirePlant { plant, target } => world.fire_plant(plant, target, out_events),
        Command::ProducePlantSun { plant } => world.produce_plant_sun(plant, out_events),
        Command::BeginEating { enemy, plant } => world.begin_eating(enemy, plant, out_events),
        Command::ReleaseEnemy { enemy } => world.release_enemy(enemy, out_events),
        Command::StepEnemy { enemy } => world.step_enemy(enemy, out_events),
        Command::BitePlant { plant, damage } => world.bite_plant(plant, damage, out_events),
        Command::DropAmbientSun => world.drop_ambient_sun(SunSource::Ambient, out_events),
        Command::DropSunflowerSun => world.drop_sunflower_sun(out_events),
        Command::CompleteWave { wave } => world.complete_wave(wave, out_events),
        Command::DeclareVictory => world.declare_victory(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use lawn_defence_core::{
        Board, CellCoord, EnemyView, GameConfig, Outcome, PlantId, PlantView,
        ProjectileSnapshot, SunSnapshot, WaveNumber,
    };

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the configuration the round runs with.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Provides read-only access to the lawn geometry.
    #[must_use]
    pub fn board(world: &World) -> &Board {
        &world.config.board
    }

    /// Simulation clock in milliseconds.
    #[must_use]
    pub fn clock_ms(world: &World) -> u64 {
        world.clock_ms
    }

    /// Current sun balance.
    #[must_use]
    pub fn sun_balance(world: &World) -> u32 {
        world.sun_balance
    }

    /// Accumulated score.
    #[must_use]
    pub fn score(world: &World) -> u64 {
        world.score
    }

    /// Number of enemies killed so far.
    #[must_use]
    pub fn kills(world: &World) -> u32 {
        world.kills
    }

    /// Terminal outcome of the round, if it ended.
    #[must_use]
    pub fn outcome(world: &World) -> Option<Outcome> {
        world.outcome
    }

    /// Wave of the most recently spawned enemy.
    #[must_use]
    pub fn current_wave(world: &World) -> WaveNumber {
        world.current_wave
    }

    /// Number of enemies currently on the lawn.
    #[must_use]
    pub fn live_enemy_count(world: &World) -> usize {
        world.enemies.len()
    }

    /// Number of plants currently on the lawn.
    #[must_use]
    pub fn plant_count(world: &World) -> usize {
        world.plants.len()
    }

    /// Number of living plants that produce sun.
    #[must_use]
    pub fn sun_producer_count(world: &World) -> usize {
        world
            .plants
            .iter()
            .filter(|plant| {
                world
                    .config
                    .plants
                    .get(plant.kind)
                    .is_some_and(|template| template.produces_sun)
            })
            .count()
    }

    /// Plant occupying the provided cell, if any.
    #[must_use]
    pub fn plant_at(world: &World, cell: CellCoord) -> Option<PlantId> {
        world.plants.occupant(cell)
    }

    /// Captures a read-only view of the enemies on the lawn.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .enemies
                .iter()
                .map(|enemy| enemy.snapshot(&world.config.combat))
                .collect(),
        )
    }

    /// Captures a read-only view of the plants on the lawn.
    #[must_use]
    pub fn plant_view(world: &World) -> PlantView {
        PlantView::from_snapshots(
            world
                .plants
                .iter()
                .map(|plant| plant.snapshot(world.config.plants.get(plant.kind), world.clock_ms))
                .collect(),
        )
    }

    /// Captures the projectiles in flight.
    #[must_use]
    pub fn projectiles(world: &World) -> Vec<ProjectileSnapshot> {
        world
            .projectiles
            .iter()
            .map(|projectile| projectile.snapshot())
            .collect()
    }

    /// Captures the suns waiting to be collected.
    #[must_use]
    pub fn suns(world: &World) -> Vec<SunSnapshot> {
        world.suns.iter().map(|sun| sun.snapshot()).collect()
    }

    /// Number of sun boost drops still waiting to be released.
    #[must_use]
    pub fn pending_sun_drops(world: &World) -> usize {
        world.pending_sun_drops.len()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use lawn_defence_core::{
        CellCoord, EnemyKind, PlantId, PlantKind, PowerupKind, ProjectileKind, WaveSettings,
        WaveTable,
    };

    fn tick(world: &mut World, millis: u64) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::Tick {
                dt: Duration::from_millis(millis),
            },
            &mut events,
        );
        events
    }

    fn issue(world: &mut World, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, command, &mut events);
        events
    }

    fn place_enemy(world: &mut World, row: u32, position: f32) -> EnemyId {
        let _ = issue(
            world,
            Command::SpawnEnemy {
                wave: WaveNumber::FIRST,
            },
        );
        let enemy = world.enemies.last_mut().expect("spawned enemy");
        enemy.row = row;
        enemy.position = position;
        enemy.id
    }

    fn placed_plant(events: &[Event]) -> PlantId {
        events
            .iter()
            .find_map(|event| match event {
                Event::PlantPlaced { plant, .. } => Some(*plant),
                _ => None,
            })
            .expect("plant placed")
    }

    #[test]
    fn new_world_starts_with_configured_sun() {
        let world = World::new(GameConfig::default());
        assert_eq!(query::sun_balance(&world), 150);
        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
        assert!(query::outcome(&world).is_none());
    }

    #[test]
    fn tick_reports_the_advanced_clock() {
        let mut world = World::new(GameConfig::default());
        let events = tick(&mut world, 100);
        assert_eq!(
            events.first(),
            Some(&Event::TimeAdvanced {
                dt: Duration::from_millis(100),
                now_ms: 100,
            })
        );
        assert_eq!(query::clock_ms(&world), 100);
    }

    #[test]
    fn placement_debits_cost_and_blocks_the_cell() {
        let mut world = World::new(GameConfig::default());
        let cell = CellCoord::new(2, 1);
        let events = issue(
            &mut world,
            Command::PlacePlant {
                kind: PlantKind::Peashooter,
                cell,
            },
        );
        let plant = placed_plant(&events);
        assert_eq!(query::sun_balance(&world), 50);
        assert_eq!(query::plant_at(&world, cell), Some(plant));

        let events = issue(
            &mut world,
            Command::PlacePlant {
                kind: PlantKind::WallNut,
                cell,
            },
        );
        assert_eq!(
            events,
            vec![Event::PlacementRejected {
                kind: PlantKind::WallNut,
                cell,
                reason: PlacementError::Occupied,
            }]
        );
        assert_eq!(query::sun_balance(&world), 50);
    }

    #[test]
    fn placement_rejections_leave_balance_untouched() {
        let mut world = World::new(GameConfig::default());
        let out_of_bounds = issue(
            &mut world,
            Command::PlacePlant {
                kind: PlantKind::Sunflower,
                cell: CellCoord::new(9, 0),
            },
        );
        assert!(matches!(
            out_of_bounds.as_slice(),
            [Event::PlacementRejected {
                reason: PlacementError::OutOfBounds,
                ..
            }]
        ));

        let too_expensive = issue(
            &mut world,
            Command::PlacePlant {
                kind: PlantKind::LightningShooter,
                cell: CellCoord::new(0, 0),
            },
        );
        assert!(matches!(
            too_expensive.as_slice(),
            [Event::PlacementRejected {
                reason: PlacementError::InsufficientSun,
                ..
            }]
        ));
        assert_eq!(query::sun_balance(&world), 150);
    }

    #[test]
    fn peashooter_hits_enemy_in_its_lane() {
        let mut world = World::new(GameConfig::default());
        let events = issue(
            &mut world,
            Command::PlacePlant {
                kind: PlantKind::Peashooter,
                cell: CellCoord::new(2, 1),
            },
        );
        let plant = placed_plant(&events);
        let enemy = place_enemy(&mut world, 1, 850.0);
        let _ = tick(&mut world, 1_600);

        let events = issue(
            &mut world,
            Command::FirePlant {
                plant,
                target: enemy,
            },
        );

        assert!(matches!(
            events.as_slice(),
            [Event::PlantFired {
                kind: ProjectileKind::Pea,
                ..
            }]
        ));
        let snapshot = query::enemy_view(&world)
            .get(enemy)
            .cloned()
            .expect("enemy alive");
        assert_eq!(snapshot.health, snapshot.max_health - 20);
        let plant_snapshot = *query::plant_view(&world).get(plant).expect("plant");
        assert_eq!(plant_snapshot.last_fired_at_ms, Some(1_600));
        assert!(!plant_snapshot.ready);
        assert_eq!(query::projectiles(&world).len(), 1);
    }

    #[test]
    fn firing_out_of_lane_is_ignored() {
        let mut world = World::new(GameConfig::default());
        let plant = placed_plant(&issue(
            &mut world,
            Command::PlacePlant {
                kind: PlantKind::Peashooter,
                cell: CellCoord::new(2, 1),
            },
        ));
        let enemy = place_enemy(&mut world, 3, 850.0);
        let _ = tick(&mut world, 1_600);

        let events = issue(
            &mut world,
            Command::FirePlant {
                plant,
                target: enemy,
            },
        );
        assert!(events.is_empty());
        let plant_snapshot = *query::plant_view(&world).get(plant).expect("plant");
        assert!(plant_snapshot.ready, "cooldown preserved for a retry");
    }

    #[test]
    fn fire_at_a_killed_target_hits_the_nearest_enemy_in_reach() {
        let mut world = World::new(GameConfig::default());
        let plant = placed_plant(&issue(
            &mut world,
            Command::PlacePlant {
                kind: PlantKind::Peashooter,
                cell: CellCoord::new(0, 1),
            },
        ));
        let killed = place_enemy(&mut world, 1, 500.0);
        let _far = place_enemy(&mut world, 1, 850.0);
        let near = place_enemy(&mut world, 1, 600.0);
        let _other_lane = place_enemy(&mut world, 2, 300.0);
        let _ = tick(&mut world, 1_600);

        let mut kill_events = Vec::new();
        assert!(world.damage_enemy(killed, 1_000, &mut kill_events));

        let events = issue(
            &mut world,
            Command::FirePlant {
                plant,
                target: killed,
            },
        );
        assert!(matches!(
            events.first(),
            Some(Event::PlantFired { target, .. }) if *target == near
        ));
        let struck = query::enemy_view(&world)
            .get(near)
            .cloned()
            .expect("enemy alive");
        assert_eq!(struck.health, struck.max_health - 20);
    }

    #[test]
    fn lethal_damage_scores_once_and_removes_enemy() {
        let mut world = World::new(GameConfig::default());
        let enemy = place_enemy(&mut world, 0, 600.0);
        world.enemies[0].health = 10;

        let mut events = Vec::new();
        assert!(world.damage_enemy(enemy, 25, &mut events));
        assert!(!world.damage_enemy(enemy, 25, &mut events));
        assert_eq!(events, vec![Event::EnemyKilled { enemy, score: 10 }]);
        assert_eq!(query::score(&world), 10);
        assert_eq!(query::kills(&world), 1);
        assert_eq!(query::live_enemy_count(&world), 0);
    }

    #[test]
    fn fire_damage_is_dealt_over_time() {
        let mut world = World::new(GameConfig::default());
        let enemy = place_enemy(&mut world, 0, 600.0);
        world.enemies[0] = factories::apply_projectile_effects(
            &world.enemies[0],
            ProjectileKind::Fire,
            &world.config.combat,
            0,
        );
        let starting = world.enemies[0].health;

        let _ = tick(&mut world, 500);
        assert_eq!(world.enemies[0].health, starting - 5);
        let _ = tick(&mut world, 2_500);
        assert_eq!(world.enemies[0].health, starting - 30);
        assert!(!world.enemies[0].status.is_burning());
        assert_eq!(world.enemies[0].id, enemy);
    }

    #[test]
    fn enemy_crossing_the_goal_ends_the_round_once() {
        let mut world = World::new(GameConfig::default());
        let first = place_enemy(&mut world, 0, 5.0);
        let second = place_enemy(&mut world, 1, 3.0);
        world.enemies[0].base_speed = 50;
        world.enemies[1].base_speed = 50;
        let _ = tick(&mut world, 100);

        let mut events = Vec::new();
        apply(&mut world, Command::StepEnemy { enemy: first }, &mut events);
        apply(&mut world, Command::StepEnemy { enemy: second }, &mut events);

        assert_eq!(
            events,
            vec![
                Event::EnemyReachedGoal {
                    enemy: first,
                    row: 0
                },
                Event::GameOver,
            ]
        );
        assert_eq!(query::outcome(&world), Some(Outcome::Lost));
        assert!(tick(&mut world, 100).is_empty());
    }

    #[test]
    fn eating_enemy_is_released_when_the_plant_dies() {
        let mut world = World::new(GameConfig::default());
        let plant = placed_plant(&issue(
            &mut world,
            Command::PlacePlant {
                kind: PlantKind::Sunflower,
                cell: CellCoord::new(4, 2),
            },
        ));
        let enemy = place_enemy(&mut world, 2, 520.0);

        let events = issue(&mut world, Command::BeginEating { enemy, plant });
        assert_eq!(events, vec![Event::EnemyStartedEating { enemy, plant }]);
        assert_eq!(query::enemy_view(&world).get(enemy).map(|e| e.speed), Some(0));

        let events = issue(&mut world, Command::BitePlant { plant, damage: 100 });
        assert_eq!(
            events,
            vec![
                Event::PlantDestroyed {
                    plant,
                    cell: CellCoord::new(4, 2),
                },
                Event::EnemyReleased { enemy },
            ]
        );
        assert_eq!(query::plant_at(&world, CellCoord::new(4, 2)), None);
        assert_eq!(query::enemy_view(&world).get(enemy).map(|e| e.speed), Some(40));
    }

    #[test]
    fn collecting_a_sun_credits_it_once() {
        let mut world = World::new(GameConfig::default());
        let produced = issue(&mut world, Command::DropAmbientSun);
        let sun = match produced.as_slice() {
            [Event::SunProduced { sun, .. }] => *sun,
            other => panic!("unexpected events: {other:?}"),
        };

        let events = issue(&mut world, Command::CollectSun { sun });
        assert_eq!(
            events,
            vec![Event::SunCollected {
                sun,
                value: 25,
                balance: 175,
            }]
        );
        assert!(issue(&mut world, Command::CollectSun { sun }).is_empty());
        assert_eq!(query::sun_balance(&world), 175);
    }

    #[test]
    fn suns_expire_after_their_lifetime() {
        let mut world = World::new(GameConfig::default());
        let _ = issue(&mut world, Command::DropAmbientSun);
        assert!(tick(&mut world, 10_000)
            .iter()
            .all(|event| !matches!(event, Event::SunExpired { .. })));
        let events = tick(&mut world, 100);
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::SunExpired { .. })));
        assert!(query::suns(&world).is_empty());
    }

    #[test]
    fn cherry_bomb_without_funds_changes_nothing() {
        let mut world = World::new(GameConfig::default());
        world.sun_balance = 100;
        let enemy = place_enemy(&mut world, 0, 600.0);
        let before = query::enemy_view(&world).into_vec();

        let events = issue(
            &mut world,
            Command::UsePowerup {
                kind: PowerupKind::CherryBomb,
            },
        );
        assert_eq!(
            events,
            vec![Event::PowerupRejected {
                kind: PowerupKind::CherryBomb,
                reason: PowerupError::InsufficientSun,
            }]
        );
        assert_eq!(query::sun_balance(&world), 100);
        assert_eq!(query::enemy_view(&world).into_vec(), before);
        assert!(query::enemy_view(&world).get(enemy).is_some());
    }

    #[test]
    fn lawn_mower_only_reaches_the_first_third() {
        let mut world = World::new(GameConfig::default());
        world.sun_balance = 200;
        let near = place_enemy(&mut world, 0, 250.0);
        let far = place_enemy(&mut world, 1, 400.0);

        let events = issue(
            &mut world,
            Command::UsePowerup {
                kind: PowerupKind::LawnMower,
            },
        );
        assert!(events.contains(&Event::EnemyKilled {
            enemy: near,
            score: 10,
        }));
        assert!(query::enemy_view(&world).get(far).is_some());
        assert_eq!(query::sun_balance(&world), 0);
    }

    #[test]
    fn sun_boost_queues_bonus_drops() {
        let mut world = World::new(GameConfig::default());
        let _ = issue(
            &mut world,
            Command::UsePowerup {
                kind: PowerupKind::SunBoost,
            },
        );
        assert_eq!(query::sun_balance(&world), 175);
        assert_eq!(query::pending_sun_drops(&world), 4);

        let events = tick(&mut world, 800);
        let released = events
            .iter()
            .filter(|event| {
                matches!(
                    event,
                    Event::SunProduced {
                        source: SunSource::Powerup,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(released, 2);
        let _ = tick(&mut world, 800);
        assert_eq!(query::pending_sun_drops(&world), 0);
        assert_eq!(query::suns(&world).len(), 4);
    }

    #[test]
    fn plant_food_resets_cooldowns() {
        let mut world = World::new(GameConfig::default());
        let plant = placed_plant(&issue(
            &mut world,
            Command::PlacePlant {
                kind: PlantKind::Sunflower,
                cell: CellCoord::new(0, 0),
            },
        ));
        world.sun_balance = 75;
        let _ = issue(
            &mut world,
            Command::UsePowerup {
                kind: PowerupKind::PlantFood,
            },
        );
        let snapshot = *query::plant_view(&world).get(plant).expect("plant");
        assert!(snapshot.ready);
        assert_eq!(snapshot.boosted_until_ms, Some(15_000));

        let _ = tick(&mut world, 15_000);
        let snapshot = *query::plant_view(&world).get(plant).expect("plant");
        assert_eq!(snapshot.boosted_until_ms, None);
    }

    #[test]
    fn wave_bonus_is_awarded_once_per_wave() {
        let mut world = World::new(GameConfig::default());
        let wave = WaveNumber::new(2);
        let first = issue(&mut world, Command::CompleteWave { wave });
        let second = issue(&mut world, Command::CompleteWave { wave });
        assert_eq!(first, vec![Event::WaveCompleted { wave, bonus: 100 }]);
        assert!(second.is_empty());
        assert_eq!(query::score(&world), 100);
    }

    #[test]
    fn commands_after_victory_are_rejected() {
        let mut world = World::new(GameConfig::default());
        let events = issue(&mut world, Command::DeclareVictory);
        assert_eq!(events, vec![Event::LevelComplete { score: 0 }]);

        let events = issue(
            &mut world,
            Command::PlacePlant {
                kind: PlantKind::Sunflower,
                cell: CellCoord::new(0, 0),
            },
        );
        assert!(matches!(
            events.as_slice(),
            [Event::PlacementRejected {
                reason: PlacementError::RoundOver,
                ..
            }]
        ));
        assert!(issue(&mut world, Command::DeclareVictory).is_empty());
    }

    #[test]
    fn unconfigured_wave_spawns_nothing() {
        let config = GameConfig {
            waves: WaveTable::new(vec![WaveSettings {
                enemy_count: 1,
                base_speed: 40,
                base_health: 100,
                spawn_interval_ms: 1_000,
                allowed_kinds: vec![EnemyKind::Basic],
                message: None,
            }]),
            ..GameConfig::default()
        };
        let mut world = World::new(config);
        let events = issue(
            &mut world,
            Command::SpawnEnemy {
                wave: WaveNumber::new(2),
            },
        );
        assert!(events.is_empty());
        assert_eq!(query::live_enemy_count(&world), 0);
    }
}
