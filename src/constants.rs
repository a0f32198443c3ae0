// --- Game Constants ---
pub const RESOURCE_COUNT: usize = 15;
pub const ASTEROID_COUNT: usize = 24;
pub const GAME_TIME: f64 = 180.0; // Seconds
pub const TIME_STEP: f64 = 1.0 / 60.0; // Seconds per tick

// --- Playfield ---
pub const PLAYFIELD_WIDTH: f64 = 900.0;
pub const PLAYFIELD_HEIGHT: f64 = 600.0;
pub const WRAP_MARGIN: f64 = 35.0; // Distance past the edge before a body wraps

// --- Speeds (world units per tick, per axis) ---
pub const MAX_ASTEROID_SPEED: f64 = 0.15;
pub const MAX_RESOURCE_SPEED: f64 = 0.15;
pub const MAX_ROCKET_SPEED: f64 = 0.3;

// --- Footprints (square side, world units) ---
pub const ROCKET_SIZE: f64 = 30.0;
pub const ASTEROID_SIZE: f64 = 35.0;
pub const RESOURCE_SIZE: f64 = 25.0;

// --- Input ---
pub const MAX_DEFLECTION: i32 = 10;

// --- Placement ---
pub const RESPAWN_INSET: f64 = 100.0;
pub const START_CLEARANCE: f64 = 50.0; // Asteroids start at least this far from center on both axes
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;

// --- Collision ---
pub const COLLISION_PENALTY: f64 = 2.0; // Seconds taken off the clock per crash
pub const ASTEROID_VARIANTS: u8 = 3;
