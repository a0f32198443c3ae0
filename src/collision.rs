use crate::types::Vector2D;

/// Closed axis-aligned rectangle. Touching edges count as contact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl BoundingBox {
    pub fn new(corner: Vector2D, size: f64) -> Self {
        BoundingBox {
            left: corner.x,
            bottom: corner.y,
            right: corner.x + size,
            top: corner.y + size,
        }
    }

    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.right >= other.left
            && other.right >= self.left
            && self.top >= other.bottom
            && other.top >= self.bottom
    }

    /// True when any side pokes out of `[0, width] x [0, height]`.
    pub fn exits_playfield(&self, width: f64, height: f64) -> bool {
        self.left < 0.0 || self.bottom < 0.0 || self.right > width || self.top > height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, size: f64) -> BoundingBox {
        BoundingBox::new(Vector2D::new(x, y), size)
    }

    #[test]
    fn overlap_needs_both_axes() {
        let a = square(0.0, 0.0, 10.0);
        assert!(a.overlaps(&square(5.0, 5.0, 10.0)));
        assert!(!a.overlaps(&square(5.0, 20.0, 10.0)));
        assert!(!a.overlaps(&square(20.0, 5.0, 10.0)));
    }

    #[test]
    fn touching_edges_collide() {
        let a = square(0.0, 0.0, 10.0);
        assert!(a.overlaps(&square(10.0, 0.0, 10.0)));
        assert!(a.overlaps(&square(10.0, 10.0, 4.0)));
        assert!(!a.overlaps(&square(10.01, 0.0, 10.0)));
    }

    #[test]
    fn overlap_is_symmetric() {
        let boxes = [
            square(0.0, 0.0, 30.0),
            square(29.0, -10.0, 35.0),
            square(100.0, 100.0, 25.0),
            square(-40.0, 12.0, 35.0),
            square(110.0, 90.0, 5.0),
        ];
        for a in &boxes {
            for b in &boxes {
                assert_eq!(a.overlaps(b), b.overlaps(a));
            }
        }
    }

    #[test]
    fn containment_counts_as_overlap() {
        assert!(square(0.0, 0.0, 100.0).overlaps(&square(40.0, 40.0, 5.0)));
    }

    #[test]
    fn playfield_exit_on_every_side() {
        assert!(!square(0.0, 0.0, 30.0).exits_playfield(900.0, 600.0));
        assert!(!square(870.0, 570.0, 30.0).exits_playfield(900.0, 600.0));
        assert!(square(-0.5, 10.0, 30.0).exits_playfield(900.0, 600.0));
        assert!(square(10.0, -0.5, 30.0).exits_playfield(900.0, 600.0));
        assert!(square(870.5, 10.0, 30.0).exits_playfield(900.0, 600.0));
        assert!(square(10.0, 570.5, 30.0).exits_playfield(900.0, 600.0));
    }
}
