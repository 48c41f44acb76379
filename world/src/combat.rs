//! Plant fire, status effects and the shared kill contract.

use lawn_defence_core::{
    DamageOverTime, EnemyId, Event, PlantId, ProjectileId, ProjectileKind, ProjectileSnapshot,
};

use crate::{factories, World};

/// Visual projectile travelling from a plant to the enemy it struck.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projectile {
    /// Identifier allocated by the world.
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

impl Projectile {
    /// Captures an immutable snapshot of the projectile.
    #[must_use]
    pub fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            kind: self.kind,
            row: self.row,
            start_x: self.start_x,
            end_x: self.end_x,
            progress: self.progress,
        }
    }
}

impl World {
    /// Applies damage to an enemy, removing and scoring it once health hits zero.
    ///
    /// Every damage source goes through here so kills are counted exactly once.
    /// Returns `true` when the enemy died.
    pub(crate) fn damage_enemy(
        &mut self,
        enemy: EnemyId,
        amount: u32,
        out: &mut Vec<Event>,
    ) -> bool {
        let Some(index) = self.enemy_index(enemy) else {
            return false;
        };

        let record = &mut self.enemies[index];
        record.health = record.health.saturating_sub(amount);
        if record.health > 0 {
            return false;
        }

        let _ = self.enemies.remove(index);
        let score = self.config.scoring.kill_score;
        self.score = self.score.saturating_add(u64::from(score));
        self.kills = self.kills.saturating_add(1);
        tracing::debug!(enemy = enemy.get(), score, "enemy killed");
        out.push(Event::EnemyKilled { enemy, score });
        true
    }

    pub(crate) fn fire_plant(&mut self, plant: PlantId, target: EnemyId, out: &mut Vec<Event>) {
        let now = self.clock_ms;
        let Some(state) = self.plants.get(plant) else {
            return;
        };
        let Some(template) = self.config.plants.get(state.kind).copied() else {
            return;
        };
        if !template.is_attacker() || !state.is_ready(&template, now) {
            return;
        }
        let cell = state.cell;
        let reach_start = self.config.board.cell_left(cell.column());
        let reach_end = self.config.board.cell_right(cell.column()) + template.range;

        // A target killed earlier in the same pass hands the shot to the next enemy in reach.
        let Some(index) = self
            .enemy_index(target)
            .or_else(|| self.closest_in_reach(cell.row(), reach_start, reach_end))
        else {
            return;
        };
        let enemy = &self.enemies[index];
        if enemy.row != cell.row() || enemy.position < reach_start || enemy.position > reach_end {
            return;
        }
        let target = enemy.id;
        let target_x = enemy.position;

        if let Some(state) = self.plants.get_mut(plant) {
            state.last_fired_at_ms = Some(now);
        }

        let kind = template.projectile.unwrap_or(ProjectileKind::Pea);
        let projectile = self.allocate_projectile_id();
        self.projectiles.push(factories::create_projectile(
            projectile,
            kind,
            cell,
            target_x,
            &self.config.board,
        ));
        self.enemies[index] =
            factories::apply_projectile_effects(&self.enemies[index], kind, &self.config.combat, now);
        out.push(Event::PlantFired {
            plant,
            target,
            projectile,
            kind,
        });

        let _ = self.damage_enemy(target, template.damage, out);
    }

    /// Index of the live enemy in `row` nearest the house within the reach, lower id first on ties.
    fn closest_in_reach(&self, row: u32, reach_start: f32, reach_end: f32) -> Option<usize> {
        self.enemies
            .iter()
            .enumerate()
            .filter(|(_, enemy)| {
                enemy.row == row && enemy.position >= reach_start && enemy.position <= reach_end
            })
            .min_by(|(_, left), (_, right)| {
                left.position
                    .total_cmp(&right.position)
                    .then_with(|| left.id.cmp(&right.id))
            })
            .map(|(index, _)| index)
    }

    pub(crate) fn advance_projectiles(&mut self, elapsed_ms: u64) {
        let flight_ms = self.config.combat.projectile_flight_ms;
        let step = if flight_ms == 0 {
            1.0
        } else {
            elapsed_ms as f32 / flight_ms as f32
        };
        for projectile in &mut self.projectiles {
            projectile.progress = (projectile.progress + step).min(1.0);
        }
        self.projectiles.retain(|projectile| projectile.progress < 1.0);
    }

    pub(crate) fn expire_slows(&mut self) {
        let now = self.clock_ms;
        for enemy in &mut self.enemies {
            enemy.expire_slow(now);
        }
    }

    /// Deals every damage-over-time tick that fell due by the current clock.
    pub(crate) fn tick_damage_over_time(&mut self, out: &mut Vec<Event>) {
        let now = self.clock_ms;
        let mut due: Vec<(EnemyId, u32)> = Vec::new();
        for enemy in &mut self.enemies {
            let burn = drain_due_ticks(&mut enemy.status.burning, now);
            let shock = drain_due_ticks(&mut enemy.status.electrified, now);
            let total = burn.saturating_add(shock);
            if total > 0 {
                due.push((enemy.id, total));
            }
        }

        for (enemy, damage) in due {
            let _ = self.damage_enemy(enemy, damage, out);
        }
    }

    pub(crate) fn bite_plant(&mut self, plant: PlantId, damage: u32, out: &mut Vec<Event>) {
        let Some(state) = self.plants.get_mut(plant) else {
            return;
        };
        state.health = state.health.saturating_sub(damage);
        if state.health > 0 {
            return;
        }

        let Some(destroyed) = self.plants.remove(plant) else {
            return;
        };
        tracing::debug!(plant = plant.get(), kind = %destroyed.kind, "plant eaten");
        out.push(Event::PlantDestroyed {
            plant,
            cell: destroyed.cell,
        });
        self.release_eaters(plant, out);
    }

    fn allocate_projectile_id(&mut self) -> ProjectileId {
        let id = self.next_projectile_id;
        self.next_projectile_id = ProjectileId::new(id.get().saturating_add(1));
        id
    }
}

/// Consumes the ticks of an effect due by `now_ms`, returning their total damage.
fn drain_due_ticks(effect: &mut Option<DamageOverTime>, now_ms: u64) -> u32 {
    let Some(active) = effect.as_mut() else {
        return 0;
    };

    let mut damage = 0u32;
    while active.remaining_ticks > 0 && active.next_tick_at_ms <= now_ms {
        damage = damage.saturating_add(active.damage_per_tick);
        active.remaining_ticks -= 1;
        active.next_tick_at_ms = active.next_tick_at_ms.saturating_add(active.interval_ms.max(1));
    }
    if active.remaining_ticks == 0 {
        *effect = None;
    }
    damage
}
