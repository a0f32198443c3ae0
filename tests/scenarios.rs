//! End-to-end checks of the simulation through the public library API.
//!
//! Every test seeds its own `StdRng`, so runs are deterministic.

use rand::SeedableRng;
use rand::rngs::StdRng;

use rocket_harvest::config::GameConfig;
use rocket_harvest::entities::{Entity, EntityKind};
use rocket_harvest::input::{Aggregation, InputAdapter, InputDevice};
use rocket_harvest::state::{Cooldown, GameState};
use rocket_harvest::types::Vector2D;

const DT: f64 = 1.0 / 60.0;

// ── Helpers ───────────────────────────────────────────────────────────────────

struct HeldStick(Vector2D);

impl InputDevice for HeldStick {
    fn read(&mut self) -> Vector2D {
        self.0
    }
}

fn stick(x: f64, y: f64) -> InputAdapter {
    let mut adapter = InputAdapter::new(Aggregation::Sum, 10);
    adapter.connect(Box::new(HeldStick(Vector2D::new(x, y))));
    adapter
}

fn seeded_game(seed: u64) -> GameState {
    GameState::new(GameConfig::default(), StdRng::seed_from_u64(seed))
}

// ── Scenario initializer ──────────────────────────────────────────────────────

#[test]
fn default_scenario_keeps_asteroids_off_the_start_area() {
    let game = seeded_game(0x5EED);
    let asteroids: Vec<&Entity> = game.asteroids().collect();
    assert_eq!(asteroids.len(), 24);
    assert_eq!(game.resources().count(), 15);
    for a in asteroids {
        assert!((a.position.x - 450.0).abs() > 50.0, "asteroid too close on x: {:?}", a.position);
        assert!((a.position.y - 300.0).abs() > 50.0, "asteroid too close on y: {:?}", a.position);
    }
}

#[test]
fn drifting_bodies_have_nonzero_bounded_velocity() {
    let game = seeded_game(17);
    for e in game.entities() {
        assert!(e.velocity.x != 0.0 && e.velocity.y != 0.0);
        assert!(e.velocity.x.abs() <= 0.3 + 1e-12 && e.velocity.y.abs() <= 0.3 + 1e-12);
    }
}

#[test]
fn same_seed_same_layout() {
    let a = seeded_game(123);
    let b = seeded_game(123);
    assert_eq!(a.entities(), b.entities());
}

// ── Motion and wrap ───────────────────────────────────────────────────────────

#[test]
fn free_bodies_stay_inside_the_margin_band() {
    let mut game = seeded_game(8);
    // Crashes may happen along the way; only the drift band is checked.
    let mut input = stick(0.0, 0.0);
    for _ in 0..20_000 {
        game.tick(0.0, &mut input);
        for e in game.entities() {
            assert!(e.position.x >= -35.0 && e.position.x <= 935.0);
            assert!(e.position.y >= -35.0 && e.position.y <= 635.0);
        }
    }
}

// ── Pickup ────────────────────────────────────────────────────────────────────

#[test]
fn rocket_on_a_resource_scores_and_sends_it_to_the_margin() {
    let resource = Entity::new(EntityKind::Resource, Vector2D::new(600.0, 400.0), Vector2D::ZERO, 25.0);
    let mut rocket = Entity::new(EntityKind::Rocket, Vector2D::ZERO, Vector2D::ZERO, 30.0);
    rocket.set_center(Vector2D::new(610.0, 410.0));
    let mut game = GameState::with_entities(GameConfig::default(), vec![resource], rocket, StdRng::seed_from_u64(1));

    assert_eq!(game.score(), 0);
    let report = game.tick(DT, &mut stick(0.0, 0.0));
    assert_eq!(report.pickups, 1);
    assert_eq!(game.score(), 1);
    assert_eq!(game.entities()[0].position.y, -35.0);

    // Already relocated: the next tick must not count it again.
    game.tick(DT, &mut stick(0.0, 0.0));
    assert_eq!(game.score(), 1);
}

#[test]
fn two_resources_under_the_rocket_score_two() {
    let resources = vec![
        Entity::new(EntityKind::Resource, Vector2D::new(300.0, 300.0), Vector2D::ZERO, 25.0),
        Entity::new(EntityKind::Resource, Vector2D::new(305.0, 305.0), Vector2D::ZERO, 25.0),
    ];
    let mut rocket = Entity::new(EntityKind::Rocket, Vector2D::ZERO, Vector2D::ZERO, 30.0);
    rocket.set_center(Vector2D::new(315.0, 315.0));
    let mut game = GameState::with_entities(GameConfig::default(), resources, rocket, StdRng::seed_from_u64(2));
    game.tick(DT, &mut stick(0.0, 0.0));
    assert_eq!(game.score(), 2);
    assert!(game.resources().all(|r| r.position.y == -35.0));
}

// ── Crash response ────────────────────────────────────────────────────────────

#[test]
fn flying_off_the_right_edge_respawns_somewhere_safe() {
    let mut game = seeded_game(77);
    let mut rocket = game.rocket().clone();
    rocket.set_center(Vector2D::new(884.0, 300.0));
    *game.rocket_mut() = rocket;
    let timer_before = game.timer();

    let report = game.tick(DT, &mut stick(10.0, 0.0));
    assert!(report.crashes >= 1);
    assert!(game.timer() <= timer_before - DT - 2.0 + 1e-9);

    let c = game.rocket().center();
    assert!((100.0..=800.0).contains(&c.x), "respawn x out of range: {}", c.x);
    assert!((100.0..=500.0).contains(&c.y), "respawn y out of range: {}", c.y);
    assert!(!game.asteroids().any(|a| game.rocket().collides(a)));
    assert!(matches!(game.cooldown(), Cooldown::Penalized { .. }));
}

#[test]
fn timer_drops_by_dt_when_nothing_happens() {
    let mut game = GameState::with_entities(
        GameConfig::default(),
        Vec::new(),
        {
            let mut r = Entity::new(EntityKind::Rocket, Vector2D::ZERO, Vector2D::ZERO, 30.0);
            r.set_center(Vector2D::new(450.0, 300.0));
            r
        },
        StdRng::seed_from_u64(3),
    );
    let mut input = stick(0.0, 0.0);
    let mut previous = game.timer();
    for _ in 0..600 {
        game.tick(DT, &mut input);
        assert!((previous - game.timer() - DT).abs() < 1e-9);
        previous = game.timer();
    }
}

#[test]
fn a_random_pilot_eventually_runs_out_of_time() {
    let config = GameConfig { game_time: 20.0, ..GameConfig::default() };
    let mut game = GameState::new(config, StdRng::seed_from_u64(99));
    let mut input = InputAdapter::new(Aggregation::Sum, 10);
    let mut ticks = 0;
    while !game.is_finished() {
        game.tick(DT, &mut input);
        ticks += 1;
        assert!(ticks <= 1201, "game should end within its time limit");
    }
    assert!(game.timer() <= 0.0);
}
