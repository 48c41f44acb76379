//! Constructors for enemies, projectiles and suns.
//!
//! Factories are pure apart from the random number generator they are
//! handed, so the world stays deterministic for a given seed.

use lawn_defence_core::{
    Board, CellCoord, CombatConfig, DamageOverTime, EnemyId, EnemyKind, EnemyProfile,
    EnemyRoster, PixelPoint, ProjectileId, ProjectileKind, Slow, StatusEffects, SunId,
    WaveSettings,
};
use rand::Rng;

use crate::{Enemy, Projectile, Sun};

const NEUTRAL_PROFILE: EnemyProfile = EnemyProfile {
    kind: EnemyKind::Basic,
    health_multiplier: 1.0,
    speed_multiplier: 1.0,
    bite_damage: 1,
};

/// Creates an enemy at the far edge of a random lane.
///
/// The kind is drawn uniformly from the wave's allowed kinds. A wave without
/// allowed kinds falls back to [`EnemyKind::Basic`], and a kind missing from
/// the roster uses neutral multipliers.
pub fn create_enemy<R>(
    id: EnemyId,
    settings: &WaveSettings,
    roster: &EnemyRoster,
    board: &Board,
    rng: &mut R,
) -> Enemy
where
    R: Rng + ?Sized,
{
    let row = board.clamp_row(rng.gen_range(0..board.rows().max(1)));
    let kind = if settings.allowed_kinds.is_empty() {
        EnemyKind::Basic
    } else {
        settings.allowed_kinds[rng.gen_range(0..settings.allowed_kinds.len())]
    };
    let profile = roster.get(kind).copied().unwrap_or(EnemyProfile {
        kind,
        ..NEUTRAL_PROFILE
    });
    let health = profile.health_for(settings.base_health);

    Enemy {
        id,
        kind,
        row,
        position: board.width(),
        health,
        max_health: health,
        base_speed: profile.speed_for(settings.base_speed),
        bite_damage: profile.bite_damage,
        eating: None,
        status: StatusEffects::default(),
    }
}

/// Creates the visual projectile for a shot fired from `cell` at `target_x`.
#[must_use]
pub fn create_projectile(
    id: ProjectileId,
    kind: ProjectileKind,
    cell: CellCoord,
    target_x: f32,
    board: &Board,
) -> Projectile {
    let center = board.cell_center(cell);
    Projectile {
        id,
        kind,
        row: cell.row(),
        start_x: center.x + board.cell_width() / 2.0,
        end_x: target_x,
        progress: 0.0,
    }
}

/// Returns a copy of `enemy` carrying the status effect of a projectile hit.
///
/// Re-applying ice keeps the stronger slow and the later expiry; fire and
/// lightning restart their damage-over-time schedule.
#[must_use]
pub fn apply_projectile_effects(
    enemy: &Enemy,
    kind: ProjectileKind,
    combat: &CombatConfig,
    now_ms: u64,
) -> Enemy {
    let mut affected = enemy.clone();
    match kind {
        ProjectileKind::Pea => {}
        ProjectileKind::Ice => {
            let chill = Slow {
                factor_percent: combat.ice_slow_percent,
                expires_at_ms: now_ms.saturating_add(combat.ice_duration_ms),
            };
            affected.status.frozen = Some(match affected.status.frozen {
                Some(existing) => existing.merge(chill),
                None => chill,
            });
        }
        ProjectileKind::Fire => {
            affected.status.burning = Some(DamageOverTime {
                damage_per_tick: combat.burn_damage_per_tick,
                remaining_ticks: combat.burn_ticks,
                next_tick_at_ms: now_ms.saturating_add(combat.burn_interval_ms),
                interval_ms: combat.burn_interval_ms,
            });
        }
        ProjectileKind::Lightning => {
            affected.status.electrified = Some(DamageOverTime {
                damage_per_tick: combat.shock_damage_per_tick,
                remaining_ticks: combat.shock_ticks,
                next_tick_at_ms: now_ms.saturating_add(combat.shock_interval_ms),
                interval_ms: combat.shock_interval_ms,
            });
        }
    }
    affected
}

/// Creates a sun at a random position inside the padded board.
pub fn generate_random_sun<R>(
    id: SunId,
    board: &Board,
    padding: f32,
    value: u32,
    now_ms: u64,
    rng: &mut R,
) -> Sun
where
    R: Rng + ?Sized,
{
    let x = sample_axis(rng, padding, board.width() - padding);
    let y = sample_axis(rng, padding, board.height() - padding);
    Sun {
        id,
        position: PixelPoint::new(x, y),
        created_at_ms: now_ms,
        value,
    }
}

/// Creates a sun jittered around `point`, clamped inside the padded board.
#[allow(clippy::too_many_arguments)]
pub fn generate_sun_near<R>(
    id: SunId,
    point: PixelPoint,
    board: &Board,
    jitter: f32,
    padding: f32,
    value: u32,
    now_ms: u64,
    rng: &mut R,
) -> Sun
where
    R: Rng + ?Sized,
{
    let x = clamp_axis(point.x + sample_offset(rng, jitter), padding, board.width() - padding);
    let y = clamp_axis(point.y + sample_offset(rng, jitter), padding, board.height() - padding);
    Sun {
        id,
        position: PixelPoint::new(x, y),
        created_at_ms: now_ms,
        value,
    }
}

fn sample_axis<R>(rng: &mut R, low: f32, high: f32) -> f32
where
    R: Rng + ?Sized,
{
    if high > low {
        rng.gen_range(low..=high)
    } else {
        (low + high) / 2.0
    }
}

fn sample_offset<R>(rng: &mut R, jitter: f32) -> f32
where
    R: Rng + ?Sized,
{
    if jitter > 0.0 {
        rng.gen_range(-jitter..=jitter)
    } else {
        0.0
    }
}

fn clamp_axis(value: f32, low: f32, high: f32) -> f32 {
    if high < low {
        return (low + high) / 2.0;
    }
    value.clamp(low, high)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lawn_defence_core::{PlantCatalog, PlantKind};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn single_basic_wave() -> WaveSettings {
        WaveSettings {
            enemy_count: 1,
            base_speed: 60,
            base_health: 100,
            spawn_interval_ms: 5_000,
            allowed_kinds: vec![EnemyKind::Basic],
            message: None,
        }
    }

    #[test]
    fn create_enemy_enters_at_far_edge_of_a_valid_lane() {
        let board = Board::default();
        let roster = EnemyRoster::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for raw in 0..32 {
            let enemy = create_enemy(
                EnemyId::new(raw),
                &single_basic_wave(),
                &roster,
                &board,
                &mut rng,
            );
            assert!(enemy.row <= 4);
            assert!((enemy.position - 900.0).abs() < f32::EPSILON);
            assert_eq!(enemy.health, 100);
            assert_eq!(enemy.max_health, 100);
            assert_eq!(enemy.base_speed, 60);
            assert_eq!(enemy.kind, EnemyKind::Basic);
            assert!(enemy.eating.is_none());
        }
    }

    #[test]
    fn create_enemy_applies_kind_multipliers() {
        let board = Board::default();
        let roster = EnemyRoster::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let settings = WaveSettings {
            allowed_kinds: vec![EnemyKind::Runner],
            base_speed: 50,
            ..single_basic_wave()
        };

        let enemy = create_enemy(EnemyId::new(0), &settings, &roster, &board, &mut rng);
        assert_eq!(enemy.kind, EnemyKind::Runner);
        assert_eq!(enemy.health, 70);
        assert_eq!(enemy.base_speed, 80);
    }

    #[test]
    fn create_enemy_without_allowed_kinds_falls_back_to_basic() {
        let board = Board::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let settings = WaveSettings {
            allowed_kinds: Vec::new(),
            ..single_basic_wave()
        };

        let enemy = create_enemy(
            EnemyId::new(0),
            &settings,
            &EnemyRoster::new(Vec::new()),
            &board,
            &mut rng,
        );
        assert_eq!(enemy.kind, EnemyKind::Basic);
        assert_eq!(enemy.health, 100);
    }

    #[test]
    fn projectile_starts_at_forward_edge_of_the_plant_cell() {
        let board = Board::default();
        let catalog = PlantCatalog::default();
        let kind = catalog
            .get(PlantKind::IceShooter)
            .and_then(|template| template.projectile)
            .expect("ice shooter fires");

        let projectile = create_projectile(
            ProjectileId::new(4),
            kind,
            CellCoord::new(2, 3),
            850.0,
            &board,
        );
        assert_eq!(projectile.kind, ProjectileKind::Ice);
        assert_eq!(projectile.row, 3);
        assert!((projectile.start_x - 300.0).abs() < f32::EPSILON);
        assert!((projectile.end_x - 850.0).abs() < f32::EPSILON);
        assert!(projectile.progress.abs() < f32::EPSILON);
    }

    #[test]
    fn projectile_effects_return_a_new_record() {
        let board = Board::default();
        let combat = CombatConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let enemy = create_enemy(
            EnemyId::new(0),
            &single_basic_wave(),
            &EnemyRoster::default(),
            &board,
            &mut rng,
        );

        let peppered = apply_projectile_effects(&enemy, ProjectileKind::Pea, &combat, 1_000);
        assert_eq!(peppered, enemy);

        let chilled = apply_projectile_effects(&enemy, ProjectileKind::Ice, &combat, 1_000);
        assert_eq!(
            chilled.status.frozen,
            Some(Slow {
                factor_percent: 50,
                expires_at_ms: 4_000,
            })
        );
        assert!(enemy.status.frozen.is_none(), "input stays untouched");

        let burning = apply_projectile_effects(&enemy, ProjectileKind::Fire, &combat, 1_000);
        let burn = burning.status.burning.expect("burning");
        assert_eq!(burn.remaining_ticks, 6);
        assert_eq!(burn.damage_per_tick, 5);
        assert_eq!(burn.next_tick_at_ms, 1_500);

        let shocked = apply_projectile_effects(&enemy, ProjectileKind::Lightning, &combat, 1_000);
        let shock = shocked.status.electrified.expect("electrified");
        assert_eq!(shock.remaining_ticks, 4);
        assert_eq!(shock.damage_per_tick, 4);
    }

    #[test]
    fn repeated_ice_keeps_the_later_expiry() {
        let combat = CombatConfig::default();
        let mut enemy = create_enemy(
            EnemyId::new(0),
            &single_basic_wave(),
            &EnemyRoster::default(),
            &Board::default(),
            &mut ChaCha8Rng::seed_from_u64(1),
        );
        enemy.status.frozen = Some(Slow {
            factor_percent: 20,
            expires_at_ms: 9_000,
        });

        let chilled = apply_projectile_effects(&enemy, ProjectileKind::Ice, &combat, 1_000);
        assert_eq!(
            chilled.status.frozen,
            Some(Slow {
                factor_percent: 20,
                expires_at_ms: 9_000,
            })
        );
    }

    #[test]
    fn random_suns_stay_inside_the_padded_board() {
        let board = Board::default();
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for raw in 0..64 {
            let sun = generate_random_sun(SunId::new(raw), &board, 40.0, 25, 10, &mut rng);
            assert!((40.0..=860.0).contains(&sun.position.x));
            assert!((40.0..=460.0).contains(&sun.position.y));
            assert_eq!(sun.value, 25);
            assert_eq!(sun.created_at_ms, 10);
        }
    }

    #[test]
    fn suns_near_a_point_are_jittered_and_clamped() {
        let board = Board::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let near = generate_sun_near(
            SunId::new(0),
            PixelPoint::new(450.0, 250.0),
            &board,
            20.0,
            40.0,
            25,
            0,
            &mut rng,
        );
        assert!((430.0..=470.0).contains(&near.position.x));
        assert!((230.0..=270.0).contains(&near.position.y));

        let corner = generate_sun_near(
            SunId::new(1),
            PixelPoint::new(0.0, 0.0),
            &board,
            20.0,
            40.0,
            25,
            0,
            &mut rng,
        );
        assert!((corner.position.x - 40.0).abs() < f32::EPSILON);
        assert!((corner.position.y - 40.0).abs() < f32::EPSILON);
    }
}
