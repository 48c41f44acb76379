use std::time::Duration;

use lawn_defence_core::{
    Board, CellCoord, Command, EnemyKind, Event, GameConfig, Outcome, PlantKind, WaveNumber,
    WaveSettings, WaveTable,
};
use lawn_defence_system_movement::{Erosion, Movement};
use lawn_defence_world::{self as world, query, World};

struct Harness {
    world: World,
    movement: Movement,
    erosion: Erosion,
}

impl Harness {
    fn new(board: Board, base_speed: u32) -> Self {
        let config = GameConfig {
            board,
            waves: WaveTable::new(vec![WaveSettings {
                enemy_count: 2,
                base_speed,
                base_health: 100,
                spawn_interval_ms: 1_000,
                allowed_kinds: vec![EnemyKind::Basic],
                message: None,
            }]),
            ..GameConfig::default()
        };
        Self {
            world: World::new(config),
            movement: Movement::new(),
            erosion: Erosion::new(),
        }
    }

    fn issue(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        events
    }

    fn tick(&mut self) -> Vec<Event> {
        let tick_events = self.issue(Command::Tick {
            dt: Duration::from_millis(100),
        });
        let mut events = tick_events.clone();

        let mut commands = Vec::new();
        self.movement.handle(
            &tick_events,
            &query::enemy_view(&self.world),
            &query::plant_view(&self.world),
            query::board(&self.world),
            query::config(&self.world).combat.bite_reach,
            &mut commands,
        );
        for command in commands.drain(..) {
            world::apply(&mut self.world, command, &mut events);
        }

        self.erosion.handle(
            &tick_events,
            &query::enemy_view(&self.world),
            &query::plant_view(&self.world),
            &mut commands,
        );
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }
        events
    }
}

fn spawn(harness: &mut Harness) {
    let _ = harness.issue(Command::SpawnEnemy {
        wave: WaveNumber::FIRST,
    });
}

#[test]
fn enemy_crossing_the_goal_ends_the_round_once() {
    let mut harness = Harness::new(Board::new(5.0, 100.0, 1, 1), 50);
    spawn(&mut harness);
    spawn(&mut harness);

    let events = harness.tick();

    let reached = events
        .iter()
        .filter(|event| matches!(event, Event::EnemyReachedGoal { .. }))
        .count();
    let game_overs = events
        .iter()
        .filter(|event| matches!(event, Event::GameOver))
        .count();
    assert_eq!(reached, 1, "the second walker is ignored once the round is lost");
    assert_eq!(game_overs, 1);
    assert_eq!(query::outcome(&harness.world), Some(Outcome::Lost));

    let later = harness.tick();
    assert_eq!(later, Vec::new(), "a lost world stays silent");
}

#[test]
fn enemies_walk_toward_the_house_each_tick() {
    let mut harness = Harness::new(Board::new(900.0, 100.0, 1, 9), 40);
    spawn(&mut harness);

    for _ in 0..10 {
        let _ = harness.tick();
    }

    let enemy = query::enemy_view(&harness.world)
        .into_vec()
        .pop()
        .expect("enemy still walking");
    assert!((enemy.position - 860.0).abs() < 0.01, "got {}", enemy.position);
}

#[test]
fn wall_nut_holds_the_lane_until_eaten() {
    let mut harness = Harness::new(Board::new(900.0, 100.0, 1, 9), 40);
    let _ = harness.issue(Command::PlacePlant {
        kind: PlantKind::WallNut,
        cell: CellCoord::new(8, 0),
    });
    spawn(&mut harness);

    let first = harness.tick();
    assert!(first
        .iter()
        .any(|event| matches!(event, Event::EnemyStartedEating { .. })));

    let mut destroyed_at = None;
    for tick in 1..=450 {
        let events = harness.tick();
        if events
            .iter()
            .any(|event| matches!(event, Event::PlantDestroyed { .. }))
        {
            assert!(events
                .iter()
                .any(|event| matches!(event, Event::EnemyReleased { .. })));
            destroyed_at = Some(tick);
            break;
        }
        let enemy = query::enemy_view(&harness.world)
            .into_vec()
            .pop()
            .expect("enemy is eating");
        assert!((enemy.position - 900.0).abs() < f32::EPSILON);
        assert_eq!(enemy.speed, 0);
    }

    let destroyed_at = destroyed_at.expect("a basic zombie eats through a wall nut");
    assert_eq!(destroyed_at, 399, "one bite per tick against 400 health");
    assert_eq!(query::plant_at(&harness.world, CellCoord::new(8, 0)), None);

    let _ = harness.tick();
    let enemy = query::enemy_view(&harness.world)
        .into_vec()
        .pop()
        .expect("enemy resumes walking");
    assert!(enemy.position < 900.0);
    assert!(enemy.eating.is_none());
}

#[test]
fn removing_the_eaten_plant_releases_the_enemy() {
    let mut harness = Harness::new(Board::new(900.0, 100.0, 1, 9), 40);
    let placed = harness.issue(Command::PlacePlant {
        kind: PlantKind::WallNut,
        cell: CellCoord::new(8, 0),
    });
    let plant = placed
        .iter()
        .find_map(|event| match event {
            Event::PlantPlaced { plant, .. } => Some(*plant),
            _ => None,
        })
        .expect("wall nut placed");
    spawn(&mut harness);
    let _ = harness.tick();

    let removed = harness.issue(Command::RemovePlant { plant });
    assert!(removed
        .iter()
        .any(|event| matches!(event, Event::EnemyReleased { .. })));

    let _ = harness.tick();
    let enemy = query::enemy_view(&harness.world)
        .into_vec()
        .pop()
        .expect("enemy walking again");
    assert!(enemy.position < 900.0);
}

#[test]
fn replays_are_deterministic() {
    fn replay() -> Vec<Event> {
        let mut harness = Harness::new(Board::default(), 40);
        let mut log = Vec::new();
        for row in 0..5 {
            log.extend(harness.issue(Command::PlacePlant {
                kind: PlantKind::WallNut,
                cell: CellCoord::new(6, row),
            }));
        }
        for tick in 0..300 {
            if tick % 40 == 0 {
                log.extend(harness.issue(Command::SpawnEnemy {
                    wave: WaveNumber::FIRST,
                }));
            }
            log.extend(harness.tick());
        }
        log
    }

    assert_eq!(replay(), replay());
}
