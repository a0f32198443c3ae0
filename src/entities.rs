use crate::collision::BoundingBox;
use crate::types::{Vector2D, wrap_coordinate};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Asteroid,
    Resource,
    Rocket,
}

/// A square body on the playfield.
///
/// `position` is the lower-left corner of the footprint and stays real-valued
/// between ticks; rounding only happens when something is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub size: f64,
    /// Visual class. Asteroids come in several looks with identical behavior.
    pub variant: u8,
}

impl Entity {
    pub fn new(kind: EntityKind, position: Vector2D, velocity: Vector2D, size: f64) -> Self {
        Entity { kind, position, velocity, size, variant: 0 }
    }

    pub fn with_variant(mut self, variant: u8) -> Self {
        self.variant = variant;
        self
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.position, self.size)
    }

    pub fn center(&self) -> Vector2D {
        self.position.add(Vector2D::new(self.size / 2.0, self.size / 2.0))
    }

    pub fn set_center(&mut self, center: Vector2D) {
        self.position = Vector2D::new(center.x - self.size / 2.0, center.y - self.size / 2.0);
    }

    pub fn collides(&self, other: &Entity) -> bool {
        self.bounding_box().overlaps(&other.bounding_box())
    }

    /// Moves a free body one tick and wraps it toroidally with an overshoot margin.
    pub fn drift(&mut self, width: f64, height: f64, margin: f64) {
        let next = self.position.add(self.velocity);
        self.position.x = wrap_coordinate(next.x, width, margin);
        self.position.y = wrap_coordinate(next.y, height, margin);
    }

    /// Replaces the velocity with `direction * max_speed` and moves once.
    ///
    /// No wrapping: leaving the playfield is a crash, handled by the game state.
    pub fn steer(&mut self, direction: Vector2D, max_speed: f64) {
        self.velocity = direction.scale(max_speed);
        self.position = self.position.add(self.velocity);
    }
}
