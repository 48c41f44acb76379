//! Data tables describing plants, enemies and waves.

use serde::{Deserialize, Serialize};

use crate::{EnemyKind, PlantKind, ProjectileKind, WaveNumber};

/// Static description of a plant type.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlantTemplate {
    /// Kind the template describes.
    pub kind: PlantKind,
    /// Sun required to place the plant.
    pub cost: u32,
    /// Damage dealt per shot; zero for non-attackers.
    pub damage: u32,
    /// Reach in pixels beyond the plant's forward cell edge.
    pub range: f32,
    /// Minimum time between shots or sun productions.
    pub cooldown_ms: u64,
    /// Health of a freshly placed plant.
    pub max_health: u32,
    /// Projectile fired on each shot.
    #[serde(default)]
    pub projectile: Option<ProjectileKind>,
    /// Indicates whether the plant produces sun instead of attacking.
    #[serde(default)]
    pub produces_sun: bool,
}

impl PlantTemplate {
    /// Reports whether the plant attacks enemies.
    #[must_use]
    pub const fn is_attacker(&self) -> bool {
        self.damage > 0
    }

    /// Cooldown in effect, halved while a plant food boost is active.
    #[must_use]
    pub const fn effective_cooldown_ms(&self, boosted: bool) -> u64 {
        if boosted {
            self.cooldown_ms / 2
        } else {
            self.cooldown_ms
        }
    }

    /// Reports whether a plant last active at `last_fired_at_ms` may act at `now_ms`.
    #[must_use]
    pub const fn is_ready(&self, last_fired_at_ms: Option<u64>, boosted: bool, now_ms: u64) -> bool {
        match last_fired_at_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > self.effective_cooldown_ms(boosted),
        }
    }
}

/// Plant templates keyed by kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlantCatalog {
    templates: Vec<PlantTemplate>,
}

impl PlantCatalog {
    /// Creates a catalog from the provided templates.
    #[must_use]
    pub fn new(templates: Vec<PlantTemplate>) -> Self {
        Self { templates }
    }

    /// Looks up the template of a plant kind.
    #[must_use]
    pub fn get(&self, kind: PlantKind) -> Option<&PlantTemplate> {
        self.templates.iter().find(|template| template.kind == kind)
    }

    /// Iterator over every template in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &PlantTemplate> {
        self.templates.iter()
    }
}

impl Default for PlantCatalog {
    fn default() -> Self {
        let template = |kind, cost, damage, range, cooldown_ms, max_health, projectile| {
            PlantTemplate {
                kind,
                cost,
                damage,
                range,
                cooldown_ms,
                max_health,
                projectile,
                produces_sun: false,
            }
        };
        Self::new(vec![
            PlantTemplate {
                produces_sun: true,
                ..template(PlantKind::Sunflower, 50, 0, 0.0, 10_000, 100, None)
            },
            template(
                PlantKind::Peashooter,
                100,
                20,
                900.0,
                1_500,
                100,
                Some(ProjectileKind::Pea),
            ),
            template(
                PlantKind::IceShooter,
                175,
                15,
                900.0,
                2_000,
                100,
                Some(ProjectileKind::Ice),
            ),
            template(
                PlantKind::FireShooter,
                200,
                25,
                900.0,
                2_000,
                100,
                Some(ProjectileKind::Fire),
            ),
            template(
                PlantKind::LightningShooter,
                250,
                30,
                900.0,
                2_500,
                100,
                Some(ProjectileKind::Lightning),
            ),
            template(PlantKind::WallNut, 50, 0, 0.0, 0, 400, None),
        ])
    }
}

/// Static description of an enemy type.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyProfile {
    /// Kind the profile describes.
    pub kind: EnemyKind,
    /// Multiplier applied to the wave's base health.
    pub health_multiplier: f32,
    /// Multiplier applied to the wave's base speed.
    pub speed_multiplier: f32,
    /// Damage dealt to an eaten plant per tick.
    pub bite_damage: u32,
}

impl EnemyProfile {
    /// Health of an enemy spawned with the provided wave base health.
    #[must_use]
    pub fn health_for(&self, base_health: u32) -> u32 {
        ((base_health as f32 * self.health_multiplier).floor() as u32).max(10)
    }

    /// Speed of an enemy spawned with the provided wave base speed.
    #[must_use]
    pub fn speed_for(&self, base_speed: u32) -> u32 {
        ((base_speed as f32 * self.speed_multiplier).floor() as u32).max(1)
    }
}

/// Enemy profiles keyed by kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnemyRoster {
    profiles: Vec<EnemyProfile>,
}

impl EnemyRoster {
    /// Creates a roster from the provided profiles.
    #[must_use]
    pub fn new(profiles: Vec<EnemyProfile>) -> Self {
        Self { profiles }
    }

    /// Looks up the profile of an enemy kind.
    #[must_use]
    pub fn get(&self, kind: EnemyKind) -> Option<&EnemyProfile> {
        self.profiles.iter().find(|profile| profile.kind == kind)
    }

    /// Iterator over every profile in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemyProfile> {
        self.profiles.iter()
    }
}

impl Default for EnemyRoster {
    fn default() -> Self {
        let profile = |kind, health_multiplier, speed_multiplier, bite_damage| EnemyProfile {
            kind,
            health_multiplier,
            speed_multiplier,
            bite_damage,
        };
        Self::new(vec![
            profile(EnemyKind::Basic, 1.0, 1.0, 1),
            profile(EnemyKind::Conehead, 1.8, 1.0, 1),
            profile(EnemyKind::Buckethead, 2.8, 0.8, 2),
            profile(EnemyKind::Runner, 0.7, 1.6, 1),
        ])
    }
}

/// Parameters of a single wave.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveSettings {
    /// Number of enemies spawned during the wave.
    pub enemy_count: u32,
    /// Base speed before kind multipliers.
    pub base_speed: u32,
    /// Base health before kind multipliers.
    pub base_health: u32,
    /// Time between consecutive spawns.
    pub spawn_interval_ms: u64,
    /// Enemy kinds the wave draws from.
    pub allowed_kinds: Vec<EnemyKind>,
    /// Announcement shown before the wave starts.
    #[serde(default)]
    pub message: Option<String>,
}

impl WaveSettings {
    /// Announcement text for the wave.
    #[must_use]
    pub fn announcement(&self, wave: WaveNumber) -> String {
        match &self.message {
            Some(message) => message.clone(),
            None => format!("Wave {wave} is approaching!"),
        }
    }
}

/// Ordered list of waves; wave `n` is entry `n - 1`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaveTable {
    waves: Vec<WaveSettings>,
}

impl WaveTable {
    /// Creates a wave table from the provided settings.
    #[must_use]
    pub fn new(waves: Vec<WaveSettings>) -> Self {
        Self { waves }
    }

    /// Looks up the settings of a wave.
    #[must_use]
    pub fn get(&self, wave: WaveNumber) -> Option<&WaveSettings> {
        let index = usize::try_from(wave.get()).ok()?.checked_sub(1)?;
        self.waves.get(index)
    }

    /// Number of configured waves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waves.len()
    }

    /// Reports whether no wave is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    /// Last configured wave, if any.
    #[must_use]
    pub fn final_wave(&self) -> Option<WaveNumber> {
        u32::try_from(self.waves.len())
            .ok()
            .filter(|len| *len > 0)
            .map(WaveNumber::new)
    }

    /// Iterator over waves paired with their numbers.
    pub fn iter(&self) -> impl Iterator<Item = (WaveNumber, &WaveSettings)> {
        self.waves
            .iter()
            .zip(1u32..)
            .map(|(settings, number)| (WaveNumber::new(number), settings))
    }
}

impl Default for WaveTable {
    fn default() -> Self {
        use EnemyKind::{Basic, Buckethead, Conehead, Runner};

        let wave = |enemy_count, base_speed, base_health, spawn_interval_ms, kinds: &[EnemyKind]| {
            WaveSettings {
                enemy_count,
                base_speed,
                base_health,
                spawn_interval_ms,
                allowed_kinds: kinds.to_vec(),
                message: None,
            }
        };
        let announce = |settings: WaveSettings, message: &str| WaveSettings {
            message: Some(message.to_owned()),
            ..settings
        };

        Self::new(vec![
            announce(
                wave(4, 40, 100, 5_000, &[Basic]),
                "The first zombies are shambling toward your house!",
            ),
            wave(6, 42, 110, 4_500, &[Basic]),
            wave(8, 44, 120, 4_200, &[Basic, Conehead]),
            wave(10, 46, 130, 4_000, &[Basic, Conehead]),
            announce(
                wave(12, 48, 140, 3_800, &[Basic, Conehead, Runner]),
                "Runners are joining the horde. Watch your lanes!",
            ),
            wave(14, 50, 150, 3_500, &[Basic, Conehead, Runner]),
            wave(16, 52, 165, 3_200, &[Conehead, Buckethead, Runner]),
            wave(18, 54, 180, 3_000, &[Basic, Conehead, Buckethead, Runner]),
            wave(20, 56, 195, 2_800, &[Basic, Conehead, Buckethead, Runner]),
            announce(
                wave(24, 60, 220, 2_500, &[Conehead, Buckethead, Runner]),
                "A huge wave of zombies is approaching!",
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_covers_every_plant_kind() {
        let catalog = PlantCatalog::default();
        for kind in PlantKind::ALL {
            assert!(catalog.get(*kind).is_some(), "{kind} missing");
        }
        let peashooter = catalog.get(PlantKind::Peashooter).expect("peashooter");
        assert_eq!(peashooter.cost, 100);
        assert_eq!(peashooter.projectile, Some(ProjectileKind::Pea));
        assert!(catalog.get(PlantKind::Sunflower).expect("sunflower").produces_sun);
        assert!(!catalog.get(PlantKind::WallNut).expect("wall nut").is_attacker());
    }

    #[test]
    fn boosted_cooldown_is_halved() {
        let catalog = PlantCatalog::default();
        let peashooter = catalog.get(PlantKind::Peashooter).expect("peashooter");
        assert_eq!(peashooter.effective_cooldown_ms(true), 750);
        assert!(!peashooter.is_ready(Some(1_000), false, 2_500));
        assert!(peashooter.is_ready(Some(1_000), false, 2_501));
        assert!(peashooter.is_ready(Some(1_000), true, 1_751));
        assert!(peashooter.is_ready(None, false, 0));
    }

    #[test]
    fn enemy_stats_follow_multipliers_with_floors() {
        let roster = EnemyRoster::default();
        let buckethead = roster.get(EnemyKind::Buckethead).expect("buckethead");
        assert_eq!(buckethead.health_for(100), 280);
        assert_eq!(buckethead.speed_for(40), 32);

        let runner = roster.get(EnemyKind::Runner).expect("runner");
        assert_eq!(runner.health_for(5), 10);
        assert_eq!(runner.speed_for(0), 1);
    }

    #[test]
    fn wave_lookup_is_one_based_and_bounded() {
        let table = WaveTable::default();
        assert_eq!(table.len(), 10);
        assert_eq!(table.final_wave(), Some(WaveNumber::new(10)));
        assert_eq!(
            table.get(WaveNumber::FIRST).map(|wave| wave.enemy_count),
            Some(4)
        );
        assert_eq!(
            table.get(WaveNumber::new(10)).map(|wave| wave.enemy_count),
            Some(24)
        );
        assert!(table.get(WaveNumber::new(11)).is_none());
        assert!(WaveTable::new(Vec::new()).final_wave().is_none());
    }

    #[test]
    fn announcement_falls_back_to_wave_number() {
        let table = WaveTable::default();
        let second = table.get(WaveNumber::new(2)).expect("wave 2");
        assert_eq!(
            second.announcement(WaveNumber::new(2)),
            "Wave 2 is approaching!"
        );
        let first = table.get(WaveNumber::FIRST).expect("wave 1");
        assert!(first.announcement(WaveNumber::FIRST).contains("first zombies"));
    }
}
