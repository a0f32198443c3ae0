//! Builds the opening layout: asteroids first, then resources, then the rocket.

use log::{info, warn};
use rand::Rng;

use crate::config::GameConfig;
use crate::constants::ASTEROID_VARIANTS;
use crate::entities::{Entity, EntityKind};
use crate::types::Vector2D;

/// Per-axis drift of `max_speed / (k + 0.5)` with `k` uniform in `-3..=3`.
///
/// The divisor is never zero but can be as small as 0.5 in magnitude, so a few
/// bodies end up several times faster than `max_speed` and the sign is random.
pub fn drift_velocity(max_speed: f64, rng: &mut impl Rng) -> Vector2D {
    let vx = max_speed / (rng.gen_range(-3..=3) as f64 + 0.5);
    let vy = max_speed / (rng.gen_range(-3..=3) as f64 + 0.5);
    Vector2D::new(vx, vy)
}

/// Samples an integer grid point on the playfield until it is clear of the
/// start area on both axes. Gives up after `max_placement_attempts` and keeps
/// the last sample.
pub fn place_asteroid(config: &GameConfig, rng: &mut impl Rng) -> Vector2D {
    let center_x = (config.width as i64 / 2) as f64;
    let center_y = (config.height as i64 / 2) as f64;
    let mut candidate = Vector2D::ZERO;
    for _ in 0..config.max_placement_attempts.max(1) {
        candidate = random_grid_point(config.width, config.height, rng);
        if (candidate.x - center_x).abs() > config.start_clearance
            && (candidate.y - center_y).abs() > config.start_clearance
        {
            return candidate;
        }
    }
    warn!(
        "No clear asteroid position after {} attempts; keeping ({}, {})",
        config.max_placement_attempts, candidate.x, candidate.y
    );
    candidate
}

/// Asteroids split into three visual classes (`n/3`, `n/3`, remainder),
/// followed by resources. Order matters: the state partitions by index.
pub fn populate(config: &GameConfig, rng: &mut impl Rng) -> Vec<Entity> {
    let mut entities = Vec::with_capacity(config.asteroid_count + config.resource_count);
    let per_class = config.asteroid_count / ASTEROID_VARIANTS as usize;

    for i in 0..config.asteroid_count {
        let variant = if per_class == 0 {
            ASTEROID_VARIANTS - 1
        } else {
            (i / per_class).min(ASTEROID_VARIANTS as usize - 1) as u8
        };
        let position = place_asteroid(config, rng);
        let velocity = drift_velocity(config.max_asteroid_speed, rng);
        entities.push(
            Entity::new(EntityKind::Asteroid, position, velocity, config.asteroid_size).with_variant(variant),
        );
    }

    for _ in 0..config.resource_count {
        let position = random_grid_point(config.width, config.height, rng);
        let velocity = drift_velocity(config.max_resource_speed, rng);
        entities.push(Entity::new(EntityKind::Resource, position, velocity, config.resource_size));
    }

    info!(
        "Scenario built: {} asteroids, {} resources on {}x{}",
        config.asteroid_count, config.resource_count, config.width, config.height
    );
    entities
}

/// The rocket starts at rest in the middle of the cleared start area.
pub fn spawn_rocket(config: &GameConfig) -> Entity {
    let mut rocket = Entity::new(EntityKind::Rocket, Vector2D::ZERO, Vector2D::ZERO, config.rocket_size);
    rocket.set_center(Vector2D::new(config.width / 2.0, config.height / 2.0));
    rocket
}

/// Uniform integer point in `[0, width] x [0, height]`, both ends inclusive.
pub fn random_grid_point(width: f64, height: f64, rng: &mut impl Rng) -> Vector2D {
    let x = rng.gen_range(0..=width as i64);
    let y = rng.gen_range(0..=height as i64);
    Vector2D::new(x as f64, y as f64)
}
