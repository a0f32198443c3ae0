//! The per-tick simulation: motion, collision detection, and the crash and
//! pickup responses that follow from it.

use log::{info, warn};
use rand::Rng;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::entities::{Entity, EntityKind};
use crate::input::InputAdapter;
use crate::scenario;
use crate::types::Vector2D;

const COOLDOWN_EPSILON: f64 = 1e-9;

/// Whether the rocket is live or sitting out a crash penalty.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cooldown {
    Normal,
    Penalized { remaining: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// The clock ran out. Ticks are no-ops from here on.
    Finished,
}

/// What happened during a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub crashes: u32,
    pub pickups: u32,
}

pub struct GameState<R: Rng = StdRng> {
    config: GameConfig,
    entities: Vec<Entity>,
    rocket: Entity,
    score: u32,
    timer: f64,
    cooldown: Cooldown,
    phase: Phase,
    rng: R,
}

impl<R: Rng> GameState<R> {
    /// Builds a fresh randomized scenario from `config`.
    pub fn new(config: GameConfig, mut rng: R) -> Self {
        let entities = scenario::populate(&config, &mut rng);
        let rocket = scenario::spawn_rocket(&config);
        Self::with_entities(config, entities, rocket, rng)
    }

    /// Starts from a hand-made layout.
    pub fn with_entities(config: GameConfig, entities: Vec<Entity>, rocket: Entity, rng: R) -> Self {
        let timer = config.game_time;
        GameState {
            config,
            entities,
            rocket,
            score: 0,
            timer,
            cooldown: Cooldown::Normal,
            phase: Phase::Running,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn asteroids(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.kind == EntityKind::Asteroid)
    }

    pub fn resources(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.kind == EntityKind::Resource)
    }

    pub fn rocket(&self) -> &Entity {
        &self.rocket
    }

    pub fn rocket_mut(&mut self) -> &mut Entity {
        &mut self.rocket
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Seconds left. Can dip below zero after a late crash penalty.
    pub fn timer(&self) -> f64 {
        self.timer
    }

    pub fn cooldown(&self) -> Cooldown {
        self.cooldown
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn width(&self) -> f64 {
        self.config.width
    }

    pub fn height(&self) -> f64 {
        self.config.height
    }

    /// Advances the game by one tick of `dt` seconds.
    ///
    /// Order: rocket steering, clock, free-body drift, then (if the rocket was
    /// live when the tick began) the wall check, one crash per overlapping
    /// asteroid, and pickups.
    pub fn tick(&mut self, dt: f64, input: &mut InputAdapter) -> TickReport {
        let mut report = TickReport::default();
        if self.phase == Phase::Finished {
            return report;
        }

        let live = self.cooldown == Cooldown::Normal;
        if live {
            let direction = input.summary_status(&mut self.rng);
            self.rocket.steer(direction, self.config.max_rocket_speed);
        }

        self.timer -= dt;

        let (width, height, margin) = (self.config.width, self.config.height, self.config.margin);
        for entity in &mut self.entities {
            entity.drift(width, height, margin);
        }

        if live {
            if self.rocket.bounding_box().exits_playfield(width, height) {
                info!("Rocket left the playfield at ({:.1}, {:.1})", self.rocket.position.x, self.rocket.position.y);
                self.crash();
                report.crashes += 1;
            }

            for i in 0..self.entities.len() {
                if self.entities[i].kind == EntityKind::Asteroid && self.rocket.collides(&self.entities[i]) {
                    info!("Rocket hit asteroid {}", i);
                    self.crash();
                    report.crashes += 1;
                }
            }

            for i in 0..self.entities.len() {
                if self.entities[i].kind == EntityKind::Resource && self.rocket.collides(&self.entities[i]) {
                    self.collect(i);
                    report.pickups += 1;
                }
            }
        } else if let Cooldown::Penalized { remaining } = self.cooldown {
            let remaining = remaining - dt;
            self.cooldown = if remaining <= COOLDOWN_EPSILON {
                info!("Rocket back in play");
                Cooldown::Normal
            } else {
                Cooldown::Penalized { remaining }
            };
        }

        if self.timer <= 0.0 {
            self.phase = Phase::Finished;
            info!("Time is up. Final score: {}", self.score);
        }
        report
    }

    /// Crash into a wall or an asteroid: take the penalty off the clock, freeze
    /// the rocket for the penalty duration, and move it somewhere safe.
    fn crash(&mut self) {
        let penalty = self.config.collision_penalty;
        self.timer -= penalty;
        self.cooldown = if penalty > 0.0 {
            Cooldown::Penalized { remaining: penalty }
        } else {
            Cooldown::Normal
        };
        self.relocate_rocket();
    }

    /// Rejection-samples a rocket center inside the respawn inset until it
    /// clears every asteroid. Keeps the last sample if none qualifies.
    fn relocate_rocket(&mut self) {
        let inset = self.config.respawn_inset;
        let x_range = (inset as i64, (self.config.width - inset) as i64);
        let y_range = (inset as i64, (self.config.height - inset) as i64);
        let attempts = self.config.max_placement_attempts.max(1);

        for _ in 0..attempts {
            let x = sample_inclusive(&mut self.rng, x_range);
            let y = sample_inclusive(&mut self.rng, y_range);
            self.rocket.set_center(Vector2D::new(x as f64, y as f64));
            if !self.asteroids().any(|a| self.rocket.collides(a)) {
                info!("Rocket respawned at ({}, {})", x, y);
                return;
            }
        }
        let center = self.rocket.center();
        warn!(
            "No asteroid-free respawn after {} attempts; keeping ({}, {})",
            attempts, center.x, center.y
        );
    }

    /// Scores a resource and sends it back to enter from the edge at `-margin`.
    fn collect(&mut self, index: usize) {
        self.score += 1;
        let x = self.rng.gen_range(0..=self.config.width as i64) as f64;
        self.entities[index].position = Vector2D::new(x, -self.config.margin);
        info!("Resource {} collected. Score: {}", index, self.score);
    }
}

/// Uniform integer in `[lo, hi]`. A degenerate range collapses to its midpoint.
fn sample_inclusive(rng: &mut impl Rng, (lo, hi): (i64, i64)) -> i64 {
    if lo <= hi { rng.gen_range(lo..=hi) } else { (lo + hi) / 2 }
}
