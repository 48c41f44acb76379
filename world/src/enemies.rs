//! Enemy records and lane movement.

use lawn_defence_core::{
    CombatConfig, EnemyId, EnemyKind, EnemySnapshot, Event, Outcome, PlantId, StatusEffects,
};

use crate::World;

/// Authoritative state of a single enemy walking along a lane.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    /// Identifier allocated by the world.
    pub id: EnemyId,
    /// Kind of enemy.
    pub kind: EnemyKind,
    /// Lane index in `0..rows`.
    pub row: u32,
    /// Pixel offset along the lane; zero is the goal line.
    pub position: f32,
    /// Remaining health.
    pub health: u32,
    /// Health at spawn time.
    pub max_health: u32,
    /// Speed before status effects.
    pub base_speed: u32,
    /// Damage dealt to an eaten plant per tick.
    pub bite_damage: u32,
    /// Plant being eaten, if any.
    pub eating: Option<PlantId>,
    /// Active status effects.
    pub status: StatusEffects,
}

impl Enemy {
    /// Speed after status effects, zero while eating.
    #[must_use]
    pub fn effective_speed(&self, combat: &CombatConfig) -> u32 {
        if self.eating.is_some() {
            return 0;
        }

        let mut factor = 100;
        if let Some(slow) = self.status.frozen {
            factor = factor.min(slow.factor_percent);
        }
        if self.status.electrified.is_some() {
            factor = factor.min(combat.shock_slow_percent);
        }

        let scaled = u64::from(self.base_speed) * u64::from(factor) / 100;
        u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
    }

    /// Captures an immutable snapshot of the enemy.
    #[must_use]
    pub fn snapshot(&self, combat: &CombatConfig) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            kind: self.kind,
            row: self.row,
            position: self.position,
            health: self.health,
            max_health: self.max_health,
            base_speed: self.base_speed,
            speed: self.effective_speed(combat),
            bite_damage: self.bite_damage,
            eating: self.eating,
            status: self.status,
        }
    }

    pub(crate) fn expire_slow(&mut self, now_ms: u64) {
        if self
            .status
            .frozen
            .is_some_and(|slow| slow.expires_at_ms <= now_ms)
        {
            self.status.frozen = None;
        }
    }
}

impl World {
    pub(crate) fn enemy_index(&self, enemy: EnemyId) -> Option<usize> {
        self.enemies.iter().position(|candidate| candidate.id == enemy)
    }

    pub(crate) fn enemy_mut(&mut self, enemy: EnemyId) -> Option<&mut Enemy> {
        self.enemies
            .iter_mut()
            .find(|candidate| candidate.id == enemy)
    }

    pub(crate) fn begin_eating(&mut self, enemy: EnemyId, plant: PlantId, out: &mut Vec<Event>) {
        let Some(plant_row) = self.plants.get(plant).map(|state| state.cell.row()) else {
            return;
        };
        let Some(record) = self.enemy_mut(enemy) else {
            return;
        };
        if record.eating.is_some() || record.row != plant_row {
            return;
        }

        record.eating = Some(plant);
        out.push(Event::EnemyStartedEating { enemy, plant });
    }

    pub(crate) fn release_enemy(&mut self, enemy: EnemyId, out: &mut Vec<Event>) {
        let resumed_speed = self.resumed_speed(enemy);
        let Some(record) = self.enemy_mut(enemy) else {
            return;
        };
        if record.eating.take().is_none() {
            return;
        }

        if let Some(speed) = resumed_speed {
            record.base_speed = speed;
        }
        out.push(Event::EnemyReleased { enemy });
    }

    /// Releases every enemy eating the provided plant.
    pub(crate) fn release_eaters(&mut self, plant: PlantId, out: &mut Vec<Event>) {
        let eaters: Vec<EnemyId> = self
            .enemies
            .iter()
            .filter(|enemy| enemy.eating == Some(plant))
            .map(|enemy| enemy.id)
            .collect();
        for enemy in eaters {
            self.release_enemy(enemy, out);
        }
    }

    fn resumed_speed(&self, enemy: EnemyId) -> Option<u32> {
        let kind = self.enemies.iter().find(|record| record.id == enemy)?.kind;
        let settings = self.config.waves.get(self.current_wave)?;
        let profile = self.config.enemies.get(kind)?;
        Some(profile.speed_for(settings.base_speed))
    }

    pub(crate) fn step_enemy(&mut self, enemy: EnemyId, out: &mut Vec<Event>) {
        let combat = self.config.combat;
        let elapsed_ms = self.last_tick_ms;
        let Some(index) = self.enemy_index(enemy) else {
            return;
        };

        let record = &mut self.enemies[index];
        if record.eating.is_some() {
            return;
        }
        let distance = record.effective_speed(&combat) as f32 * elapsed_ms as f32 / 1_000.0;
        record.position -= distance;
        if record.position > 0.0 {
            return;
        }

        let crossed = self.enemies.remove(index);
        out.push(Event::EnemyReachedGoal {
            enemy: crossed.id,
            row: crossed.row,
        });
        if self.outcome.is_none() {
            self.outcome = Some(Outcome::Lost);
            tracing::info!(enemy = crossed.id.get(), row = crossed.row, "enemy reached the house");
            out.push(Event::GameOver);
        }
    }
}
