#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    pub fn scale(&self, scalar: f64) -> Self {
        Vector2D::new(self.x * scalar, self.y * scalar)
    }

    pub fn add(&self, other: Vector2D) -> Self {
        Vector2D::new(self.x + other.x, self.y + other.y)
    }

    /// Clamps each axis independently to `[-limit, limit]`.
    pub fn clamp_axes(&self, limit: f64) -> Self {
        Vector2D::new(self.x.clamp(-limit, limit), self.y.clamp(-limit, limit))
    }
}

/// Wraps a coordinate across `[-margin, bound + margin]`.
///
/// Values inside the range are returned untouched. A value that falls below
/// `-margin` reappears at `bound + margin` and vice versa, so a body leaves the
/// visible area completely before it shows up on the opposite edge.
pub fn wrap_coordinate(value: f64, bound: f64, margin: f64) -> f64 {
    if value < -margin {
        bound + margin
    } else if value > bound + margin {
        -margin
    } else {
        value
    }
}
