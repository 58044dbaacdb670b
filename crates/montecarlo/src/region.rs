//! Region classifier for a single sampled point.
//!
//! - Rectangle: open box `2 < x < 3`, `-0.5 < y < 0.5`, checked first.
//! - Circle: closed unit disk at the origin.
//! - Other: everything else, including the rectangle's boundary.
//!
//! The two shapes are disjoint, so each point lands in exactly one region.

use nalgebra::Vector2;
use serde::Serialize;

use crate::cfg::{CIRCLE_RADIUS, RECT_X_MAX, RECT_X_MIN, RECT_Y_MAX, RECT_Y_MIN};

/// Classification outcome for one point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Rectangle,
    Circle,
    Other,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Rectangle, Region::Circle, Region::Other];
}

#[inline]
fn in_rectangle(p: Vector2<f64>) -> bool {
    RECT_X_MIN < p.x && p.x < RECT_X_MAX && RECT_Y_MIN < p.y && p.y < RECT_Y_MAX
}

#[inline]
fn in_circle(p: Vector2<f64>) -> bool {
    p.norm_squared() <= CIRCLE_RADIUS * CIRCLE_RADIUS
}

/// Classify `p` into exactly one region.
#[inline]
pub fn classify(p: Vector2<f64>) -> Region {
    if in_rectangle(p) {
        Region::Rectangle
    } else if in_circle(p) {
        Region::Circle
    } else {
        Region::Other
    }
}

/// Same as [`classify`] for raw coordinates.
#[inline]
pub fn classify_xy(x: f64, y: f64) -> Region {
    classify(Vector2::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn canonical_points() {
        assert_eq!(classify(vector![2.5, 0.0]), Region::Rectangle);
        assert_eq!(classify(vector![0.0, 0.0]), Region::Circle);
        assert_eq!(classify(vector![10.0, 10.0]), Region::Other);
    }

    #[test]
    fn circle_boundary_is_closed() {
        assert_eq!(classify_xy(1.0, 0.0), Region::Circle);
        assert_eq!(classify_xy(0.0, -1.0), Region::Circle);
        assert_eq!(classify_xy(0.6, 0.8), Region::Circle);
        assert_eq!(classify_xy(1.0 + 1e-12, 0.0), Region::Other);
    }

    #[test]
    fn rectangle_boundary_is_open() {
        assert_eq!(classify_xy(2.0, 0.0), Region::Other);
        assert_eq!(classify_xy(3.0, 0.0), Region::Other);
        assert_eq!(classify_xy(2.5, 0.5), Region::Other);
        assert_eq!(classify_xy(2.5, -0.5), Region::Other);
        assert_eq!(classify_xy(2.0 + 1e-9, 0.5 - 1e-9), Region::Rectangle);
    }

    #[test]
    fn shapes_are_disjoint() {
        // No point of the closed disk satisfies the rectangle test.
        for k in 0..360 {
            let th = (k as f64).to_radians();
            let p = vector![th.cos(), th.sin()];
            assert!(!in_rectangle(p));
        }
        assert!(!in_circle(vector![2.0 + 1e-9, 0.0]));
    }
}
