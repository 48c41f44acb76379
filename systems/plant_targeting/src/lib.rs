#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that computes deterministic plant targets from world snapshots.

use lawn_defence_core::{Board, EnemyId, EnemyView, PlantCatalog, PlantId, PlantTarget, PlantView};

/// Plant targeting system that reuses scratch buffers to avoid repeated allocations.
#[derive(Debug, Default)]
pub struct PlantTargeting {
    plant_workspace: Vec<PlantWorkspace>,
}

impl PlantTargeting {
    /// Creates a new plant targeting system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes plant targets for the provided world snapshot.
    ///
    /// Each attacking plant targets the enemy in its lane that is closest to
    /// the house while inside its reach, which spans from the plant's own
    /// cell up to `range` pixels past its forward edge. The output buffer is
    /// cleared before populating it with the latest assignments.
    pub fn handle(
        &mut self,
        plants: &PlantView,
        enemies: &EnemyView,
        catalog: &PlantCatalog,
        board: &Board,
        out: &mut Vec<PlantTarget>,
    ) {
        out.clear();

        if plants.is_empty() || enemies.is_empty() {
            return;
        }

        self.prepare_plant_workspace(plants, catalog, board);

        for plant in &self.plant_workspace {
            let mut best: Option<BestCandidate> = None;

            for enemy in enemies.iter() {
                if enemy.row != plant.row
                    || enemy.position < plant.reach_start
                    || enemy.position > plant.reach_end
                {
                    continue;
                }

                let current = BestCandidate {
                    position: enemy.position,
                    enemy: enemy.id,
                };

                match &mut best {
                    Some(existing) => {
                        if current.precedes(existing) {
                            *existing = current;
                        }
                    }
                    None => best = Some(current),
                }
            }

            if let Some(best_candidate) = best {
                out.push(PlantTarget {
                    plant: plant.id,
                    enemy: best_candidate.enemy,
                    enemy_position: best_candidate.position,
                });
            }
        }
    }

    fn prepare_plant_workspace(&mut self, plants: &PlantView, catalog: &PlantCatalog, board: &Board) {
        self.plant_workspace.clear();
        self.plant_workspace.reserve(plants.len());

        for snapshot in plants.iter() {
            let Some(template) = catalog.get(snapshot.kind) else {
                continue;
            };
            if !template.is_attacker() {
                continue;
            }

            let column = snapshot.cell.column();
            self.plant_workspace.push(PlantWorkspace {
                id: snapshot.id,
                row: snapshot.cell.row(),
                reach_start: board.cell_left(column),
                reach_end: board.cell_right(column) + template.range,
            });
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PlantWorkspace {
    id: PlantId,
    row: u32,
    reach_start: f32,
    reach_end: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct BestCandidate {
    position: f32,
    enemy: EnemyId,
}

impl BestCandidate {
    fn precedes(&self, other: &Self) -> bool {
        if self.position != other.position {
            return self.position < other.position;
        }

        self.enemy < other.enemy
    }
}
