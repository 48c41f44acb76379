//! Sun resources, plant placement and score bookkeeping.

use lawn_defence_core::{
    CellCoord, Event, Outcome, PixelPoint, PlacementError, PlantId, PlantKind, SunId,
    SunSnapshot, SunSource, WaveNumber,
};
use rand::Rng;

use crate::{factories, World};

/// Sun resource lying on the lawn, waiting to be collected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sun {
    /// Identifier allocated by the world.
    pub id: SunId,
    /// Position of the sun in board pixels.
    pub position: PixelPoint,
    /// Simulation time at which the sun appeared.
    pub created_at_ms: u64,
    /// Sun awarded on collection.
    pub value: u32,
}

impl Sun {
    /// Captures an immutable snapshot of the sun.
    #[must_use]
    pub fn snapshot(&self) -> SunSnapshot {
        SunSnapshot {
            id: self.id,
            position: self.position,
            created_at_ms: self.created_at_ms,
            value: self.value,
        }
    }
}

impl World {
    pub(crate) fn place_plant(
        &mut self,
        kind: PlantKind,
        cell: CellCoord,
    ) -> Result<(PlantId, u32), PlacementError> {
        if !self.config.board.contains(cell) {
            return Err(PlacementError::OutOfBounds);
        }
        let template = self
            .config
            .plants
            .get(kind)
            .copied()
            .ok_or(PlacementError::UnknownPlant)?;
        if self.plants.occupant(cell).is_some() {
            return Err(PlacementError::Occupied);
        }
        if self.sun_balance < template.cost {
            return Err(PlacementError::InsufficientSun);
        }

        self.sun_balance -= template.cost;
        let plant = self
            .plants
            .insert(kind, cell, template.max_health, self.clock_ms);
        Ok((plant, template.cost))
    }

    pub(crate) fn remove_plant(&mut self, plant: PlantId, out: &mut Vec<Event>) {
        let Some(removed) = self.plants.remove(plant) else {
            return;
        };
        tracing::debug!(plant = plant.get(), kind = %removed.kind, "plant removed");
        out.push(Event::PlantRemoved {
            plant,
            cell: removed.cell,
        });
        self.release_eaters(plant, out);
    }

    pub(crate) fn collect_sun(&mut self, sun: SunId, out: &mut Vec<Event>) {
        let Some(index) = self.suns.iter().position(|candidate| candidate.id == sun) else {
            return;
        };
        let collected = self.suns.remove(index);
        self.sun_balance = self.sun_balance.saturating_add(collected.value);
        out.push(Event::SunCollected {
            sun,
            value: collected.value,
            balance: self.sun_balance,
        });
    }

    pub(crate) fn drop_ambient_sun(&mut self, source: SunSource, out: &mut Vec<Event>) {
        let id = self.allocate_sun_id();
        let economy = self.config.economy;
        let sun = factories::generate_random_sun(
            id,
            &self.config.board,
            economy.board_padding,
            economy.sun_value,
            self.clock_ms,
            &mut self.rng,
        );
        self.push_sun(sun, source, out);
    }

    pub(crate) fn drop_sunflower_sun(&mut self, out: &mut Vec<Event>) {
        let producers: Vec<PlantId> = self
            .plants
            .iter()
            .filter(|state| {
                self.config
                    .plants
                    .get(state.kind)
                    .is_some_and(|template| template.produces_sun)
            })
            .map(|state| state.id)
            .collect();
        if producers.is_empty() {
            return;
        }

        let chosen = producers[self.rng.gen_range(0..producers.len())];
        self.emit_sun_near_plant(chosen, out);
    }

    pub(crate) fn produce_plant_sun(&mut self, plant: PlantId, out: &mut Vec<Event>) {
        let now = self.clock_ms;
        let Some(state) = self.plants.get(plant) else {
            return;
        };
        let Some(template) = self.config.plants.get(state.kind) else {
            return;
        };
        if !template.produces_sun || !state.is_ready(template, now) {
            return;
        }

        if let Some(state) = self.plants.get_mut(plant) {
            state.last_fired_at_ms = Some(now);
        }
        self.emit_sun_near_plant(plant, out);
    }

    fn emit_sun_near_plant(&mut self, plant: PlantId, out: &mut Vec<Event>) {
        let Some(cell) = self.plants.get(plant).map(|state| state.cell) else {
            return;
        };
        let id = self.allocate_sun_id();
        let economy = self.config.economy;
        let sun = factories::generate_sun_near(
            id,
            self.config.board.cell_center(cell),
            &self.config.board,
            economy.sun_jitter,
            economy.board_padding,
            economy.sun_value,
            self.clock_ms,
            &mut self.rng,
        );
        self.push_sun(sun, SunSource::Plant(plant), out);
    }

    fn push_sun(&mut self, sun: Sun, source: SunSource, out: &mut Vec<Event>) {
        out.push(Event::SunProduced {
            sun: sun.id,
            position: sun.position,
            source,
        });
        self.suns.push(sun);
    }

    /// Releases queued sun boost drops that fell due by the current clock.
    pub(crate) fn release_pending_drops(&mut self, out: &mut Vec<Event>) {
        let now = self.clock_ms;
        let due = self
            .pending_sun_drops
            .iter()
            .filter(|release_at| **release_at <= now)
            .count();
        self.pending_sun_drops.retain(|release_at| *release_at > now);
        for _ in 0..due {
            self.drop_ambient_sun(SunSource::Powerup, out);
        }
    }

    pub(crate) fn expire_suns(&mut self, out: &mut Vec<Event>) {
        let now = self.clock_ms;
        let lifetime = self.config.economy.sun_lifetime_ms;
        self.suns.retain(|sun| {
            let expired = now.saturating_sub(sun.created_at_ms) > lifetime;
            if expired {
                out.push(Event::SunExpired { sun: sun.id });
            }
            !expired
        });
    }

    pub(crate) fn complete_wave(&mut self, wave: WaveNumber, out: &mut Vec<Event>) {
        if self.last_completed_wave.is_some_and(|completed| completed >= wave) {
            return;
        }

        let bonus = self.config.scoring.wave_bonus(wave);
        self.score = self.score.saturating_add(bonus);
        self.last_completed_wave = Some(wave);
        tracing::info!(wave = wave.get(), bonus, score = self.score, "wave cleared");
        out.push(Event::WaveCompleted { wave, bonus });
    }

    pub(crate) fn declare_victory(&mut self, out: &mut Vec<Event>) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(Outcome::Won);
        tracing::info!(score = self.score, "level complete");
        out.push(Event::LevelComplete { score: self.score });
    }

    fn allocate_sun_id(&mut self) -> SunId {
        let id = self.next_sun_id;
        self.next_sun_id = SunId::new(id.get().saturating_add(1));
        id
    }
}
