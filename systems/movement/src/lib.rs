#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic lane movement: enemies walk toward the house and stop to
//! eat the plants blocking their lane.

use std::collections::BTreeMap;

use lawn_defence_core::{
    Board, Command, EnemySnapshot, EnemyView, Event, PlantId, PlantSnapshot, PlantView,
};

/// Pure system that reacts to world ticks and emits movement commands.
#[derive(Debug, Default)]
pub struct Movement {
    lane_workspace: Vec<LanePlant>,
}

impl Movement {
    /// Creates a new movement system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes world events and immutable views to emit movement commands.
    ///
    /// Enemies are visited in identifier order. An enemy eating a plant that
    /// still exists stays put; one whose plant vanished is released; one that
    /// reached a plant in its lane starts eating it; everyone else steps.
    pub fn handle(
        &mut self,
        events: &[Event],
        enemies: &EnemyView,
        plants: &PlantView,
        board: &Board,
        bite_reach: f32,
        out: &mut Vec<Command>,
    ) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        self.prepare_lane_workspace(plants, board, bite_reach);

        for enemy in enemies.iter() {
            match enemy.eating {
                Some(plant) if plants.get(plant).is_some() => {}
                Some(_) => out.push(Command::ReleaseEnemy { enemy: enemy.id }),
                None => match self.blocking_plant(enemy) {
                    Some(plant) => out.push(Command::BeginEating {
                        enemy: enemy.id,
                        plant,
                    }),
                    None => out.push(Command::StepEnemy { enemy: enemy.id }),
                },
            }
        }
    }

    fn prepare_lane_workspace(&mut self, plants: &PlantView, board: &Board, bite_reach: f32) {
        self.lane_workspace.clear();
        self.lane_workspace.reserve(plants.len());
        self.lane_workspace
            .extend(plants.iter().map(|plant| LanePlant::new(plant, board, bite_reach)));
    }

    /// First plant an enemy runs into: the one closest to it in its lane.
    fn blocking_plant(&self, enemy: &EnemySnapshot) -> Option<PlantId> {
        self.lane_workspace
            .iter()
            .filter(|plant| plant.blocks(enemy))
            .max_by_key(|plant| (plant.column, std::cmp::Reverse(plant.id)))
            .map(|plant| plant.id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct LanePlant {
    id: PlantId,
    row: u32,
    column: u32,
    bite_start: f32,
    bite_end: f32,
}

impl LanePlant {
    fn new(plant: &PlantSnapshot, board: &Board, bite_reach: f32) -> Self {
        let column = plant.cell.column();
        Self {
            id: plant.id,
            row: plant.cell.row(),
            column,
            bite_start: board.cell_left(column),
            bite_end: board.cell_right(column) + bite_reach,
        }
    }

    fn blocks(&self, enemy: &EnemySnapshot) -> bool {
        enemy.row == self.row && enemy.position >= self.bite_start && enemy.position <= self.bite_end
    }
}

/// Pure system that converts eating enemies into plant damage.
#[derive(Debug, Default)]
pub struct Erosion {
    totals: BTreeMap<PlantId, u32>,
}

impl Erosion {
    /// Creates a new erosion system with an empty scratch map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits one `Command::BitePlant` per eaten plant with the summed bite damage.
    pub fn handle(
        &mut self,
        events: &[Event],
        enemies: &EnemyView,
        plants: &PlantView,
        out: &mut Vec<Command>,
    ) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        self.totals.clear();
        for enemy in enemies.iter() {
            let Some(plant) = enemy.eating else {
                continue;
            };
            if plants.get(plant).is_none() {
                continue;
            }
            let total = self.totals.entry(plant).or_insert(0);
            *total = total.saturating_add(enemy.bite_damage);
        }

        out.extend(
            self.totals
                .iter()
                .filter(|(_, damage)| **damage > 0)
                .map(|(plant, damage)| Command::BitePlant {
                    plant: *plant,
                    damage: *damage,
                }),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use lawn_defence_core::{CellCoord, EnemyId, EnemyKind, PlantKind, StatusEffects};

    fn tick() -> Vec<Event> {
        vec![Event::TimeAdvanced {
            dt: Duration::from_millis(100),
            now_ms: 100,
        }]
    }

    fn plant(id: u32, column: u32, row: u32) -> PlantSnapshot {
        PlantSnapshot {
            id: PlantId::new(id),
            kind: PlantKind::WallNut,
            cell: CellCoord::new(column, row),
            health: 400,
            max_health: 400,
            last_fired_at_ms: None,
            boosted_until_ms: None,
            ready: true,
        }
    }

    fn enemy(id: u32, row: u32, position: f32, eating: Option<u32>) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            kind: EnemyKind::Buckethead,
            row,
            position,
            health: 100,
            max_health: 100,
            base_speed: 40,
            speed: if eating.is_some() { 0 } else { 40 },
            bite_damage: 2,
            eating: eating.map(PlantId::new),
            status: StatusEffects::default(),
        }
    }

    fn run(enemies: Vec<EnemySnapshot>, plants: Vec<PlantSnapshot>) -> Vec<Command> {
        let mut movement = Movement::new();
        let mut out = Vec::new();
        movement.handle(
            &tick(),
            &EnemyView::from_snapshots(enemies),
            &PlantView::from_snapshots(plants),
            &Board::default(),
            30.0,
            &mut out,
        );
        out
    }

    #[test]
    fn free_lane_enemies_step() {
        let out = run(vec![enemy(1, 0, 700.0, None)], vec![plant(1, 3, 1)]);
        assert_eq!(
            out,
            vec![Command::StepEnemy {
                enemy: EnemyId::new(1),
            }]
        );
    }

    #[test]
    fn enemy_within_bite_reach_starts_eating() {
        let out = run(
            vec![enemy(1, 1, 429.0, None), enemy(2, 1, 431.0, None)],
            vec![plant(7, 3, 1)],
        );
        assert_eq!(
            out,
            vec![
                Command::BeginEating {
                    enemy: EnemyId::new(1),
                    plant: PlantId::new(7),
                },
                Command::StepEnemy {
                    enemy: EnemyId::new(2),
                },
            ]
        );
    }

    #[test]
    fn nearest_plant_in_the_lane_is_eaten_first() {
        let out = run(
            vec![enemy(1, 2, 320.0, None)],
            vec![plant(4, 2, 2), plant(5, 3, 2)],
        );
        assert_eq!(
            out,
            vec![Command::BeginEating {
                enemy: EnemyId::new(1),
                plant: PlantId::new(5),
            }]
        );
    }

    #[test]
    fn eating_enemy_stays_until_its_plant_vanishes() {
        let out = run(vec![enemy(1, 0, 420.0, Some(3))], vec![plant(3, 3, 0)]);
        assert!(out.is_empty());

        let out = run(vec![enemy(1, 0, 420.0, Some(3))], Vec::new());
        assert_eq!(
            out,
            vec![Command::ReleaseEnemy {
                enemy: EnemyId::new(1),
            }]
        );
    }

    #[test]
    fn movement_waits_for_time_to_pass() {
        let mut movement = Movement::new();
        let mut out = Vec::new();
        movement.handle(
            &[],
            &EnemyView::from_snapshots(vec![enemy(1, 0, 700.0, None)]),
            &PlantView::default(),
            &Board::default(),
            30.0,
            &mut out,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn erosion_sums_bites_per_plant() {
        let mut erosion = Erosion::new();
        let mut out = Vec::new();
        erosion.handle(
            &tick(),
            &EnemyView::from_snapshots(vec![
                enemy(1, 0, 420.0, Some(3)),
                enemy(2, 0, 425.0, Some(3)),
                enemy(3, 1, 420.0, Some(9)),
                enemy(4, 1, 600.0, None),
            ]),
            &PlantView::from_snapshots(vec![plant(3, 3, 0)]),
            &mut out,
        );
        assert_eq!(
            out,
            vec![Command::BitePlant {
                plant: PlantId::new(3),
                damage: 4,
            }]
        );
    }
}
