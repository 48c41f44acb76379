#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that emits plant actions from cooldowns and targeting data.

use lawn_defence_core::{Command, PlantCatalog, PlantId, PlantTarget, PlantView};

/// Plant combat system that queues actions for plants whose cooldown elapsed.
#[derive(Debug, Default)]
pub struct PlantCombat {
    scratch: Vec<Command>,
}

impl PlantCombat {
    /// Creates a new plant combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::ProducePlantSun` for ready producers and
    /// `Command::FirePlant` for ready attackers holding a target.
    ///
    /// `plant_targets` must be ordered by plant identifier, as produced by the
    /// targeting system.
    pub fn handle(
        &mut self,
        plants: &PlantView,
        catalog: &PlantCatalog,
        plant_targets: &[PlantTarget],
        out: &mut Vec<Command>,
    ) {
        if plants.is_empty() {
            return;
        }

        self.scratch.clear();

        for snapshot in plants.iter().filter(|snapshot| snapshot.ready) {
            let Some(template) = catalog.get(snapshot.kind) else {
                continue;
            };

            if template.produces_sun {
                self.scratch
                    .push(Command::ProducePlantSun { plant: snapshot.id });
            }

            if template.is_attacker() {
                if let Some(target) = find_target(plant_targets, snapshot.id) {
                    self.scratch.push(Command::FirePlant {
                        plant: snapshot.id,
                        target: target.enemy,
                    });
                }
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}

fn find_target(targets: &[PlantTarget], plant: PlantId) -> Option<&PlantTarget> {
    targets
        .binary_search_by_key(&plant, |target| target.plant)
        .ok()
        .map(|index| &targets[index])
}
