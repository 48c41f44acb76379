//! Sun-funded powerups.
//!
//! Activation is all or nothing: a rejected request leaves the world
//! untouched, an accepted one debits the cost and applies its effect within
//! the same command.

use lawn_defence_core::{EnemyId, Event, PowerupError, PowerupKind, Slow};

use crate::World;

impl World {
    pub(crate) fn use_powerup(
        &mut self,
        kind: PowerupKind,
        out: &mut Vec<Event>,
    ) -> Result<u32, PowerupError> {
        let cost = self.config.powerups.cost(kind);
        if self.sun_balance < cost {
            return Err(PowerupError::InsufficientSun);
        }
        self.sun_balance -= cost;
        out.push(Event::PowerupActivated { kind, cost });

        match kind {
            PowerupKind::PlantFood => self.feed_plants(),
            PowerupKind::Freeze => self.freeze_enemies(),
            PowerupKind::SunBoost => self.boost_sun(),
            PowerupKind::CherryBomb => {
                let damage = self.config.powerups.cherry_bomb_damage;
                let targets: Vec<EnemyId> = self.enemies.iter().map(|enemy| enemy.id).collect();
                self.blast(&targets, damage, out);
            }
            PowerupKind::LawnMower => {
                let reach = self.config.board.width() * self.config.powerups.lawn_mower_reach;
                let damage = self.config.powerups.lawn_mower_damage;
                let targets: Vec<EnemyId> = self
                    .enemies
                    .iter()
                    .filter(|enemy| enemy.position <= reach)
                    .map(|enemy| enemy.id)
                    .collect();
                self.blast(&targets, damage, out);
            }
        }

        Ok(cost)
    }

    fn feed_plants(&mut self) {
        let until = self
            .clock_ms
            .saturating_add(self.config.powerups.boost_duration_ms);
        for plant in self.plants.iter_mut() {
            plant.boosted_until_ms = Some(until);
            plant.last_fired_at_ms = None;
        }
    }

    fn freeze_enemies(&mut self) {
        let freeze = Slow {
            factor_percent: self.config.powerups.freeze_slow_percent,
            expires_at_ms: self
                .clock_ms
                .saturating_add(self.config.powerups.freeze_duration_ms),
        };
        for enemy in &mut self.enemies {
            enemy.status.frozen = Some(match enemy.status.frozen {
                Some(existing) => existing.merge(freeze),
                None => freeze,
            });
        }
    }

    fn boost_sun(&mut self) {
        let powerups = self.config.powerups;
        self.sun_balance = self.sun_balance.saturating_add(powerups.sun_boost_instant);
        for drop in 1..=u64::from(powerups.sun_boost_drops) {
            let release_at = self
                .clock_ms
                .saturating_add(drop.saturating_mul(powerups.sun_boost_drop_interval_ms));
            self.pending_sun_drops.push(release_at);
        }
    }

    fn blast(&mut self, targets: &[EnemyId], damage: u32, out: &mut Vec<Event>) {
        for enemy in targets {
            let _ = self.damage_enemy(*enemy, damage, out);
        }
    }

    pub(crate) fn expire_boosts(&mut self) {
        let now = self.clock_ms;
        for plant in self.plants.iter_mut() {
            if plant.boosted_until_ms.is_some_and(|until| until <= now) {
                plant.boosted_until_ms = None;
            }
        }
    }
}
