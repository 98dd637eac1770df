//! Overlap tests and road geometry
//!
//! Sprites are taller than they are wide, so overlap is an anisotropic box
//! test on the summed radii rather than a circle/circle test. The road is a
//! centred strip half the view wide, split into three equal lanes.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Horizontal overlap tolerance as a fraction of the summed radii
pub const OVERLAP_X_FACTOR: f64 = 0.25;
/// Vertical overlap tolerance as a fraction of the summed radii
pub const OVERLAP_Y_FACTOR: f64 = 0.6;

/// Anything with a position and a collision radius
pub trait Body {
    fn position(&self) -> DVec2;
    fn radius(&self) -> f64;
}

/// Check whether two bodies overlap
///
/// True iff |dx| < 0.25 * (r1 + r2) and |dy| < 0.6 * (r1 + r2). Both
/// comparisons are strict, so bodies exactly on the boundary do not overlap.
pub fn overlaps<A, B>(a: &A, b: &B) -> bool
where
    A: Body + ?Sized,
    B: Body + ?Sized,
{
    let delta = (a.position() - b.position()).abs();
    let radius_sum = a.radius() + b.radius();
    delta.x < radius_sum * OVERLAP_X_FACTOR && delta.y < radius_sum * OVERLAP_Y_FACTOR
}

/// One of the three road lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    Left,
    Middle,
    Right,
}

impl Lane {
    pub const ALL: [Lane; LANE_COUNT] = [Lane::Left, Lane::Middle, Lane::Right];

    pub fn index(self) -> usize {
        match self {
            Lane::Left => 0,
            Lane::Middle => 1,
            Lane::Right => 2,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % LANE_COUNT]
    }

    /// The lane to try after this one, wrapping right to left
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

/// Visible area of the world, from (0, 0) at the bottom left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: VIEW_WIDTH,
            height: VIEW_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Height of one sprite cell (also the spray step)
    #[inline]
    pub fn sprite_height(&self) -> f64 {
        self.height / SPRITES_PER_VIEW
    }

    #[inline]
    pub fn road_center(&self) -> f64 {
        self.width / 2.0
    }

    #[inline]
    pub fn road_width(&self) -> f64 {
        self.width / 2.0
    }

    #[inline]
    pub fn road_left(&self) -> f64 {
        self.road_center() - self.road_width() / 2.0
    }

    #[inline]
    pub fn road_right(&self) -> f64 {
        self.road_center() + self.road_width() / 2.0
    }

    #[inline]
    pub fn lane_width(&self) -> f64 {
        self.road_width() / LANE_COUNT as f64
    }

    /// Lane containing `x`, or `None` off the road
    ///
    /// Each lane is the half-open range [left, right).
    pub fn lane_of(&self, x: f64) -> Option<Lane> {
        if x < self.road_left() || x >= self.road_right() {
            return None;
        }
        let index = ((x - self.road_left()) / self.lane_width()) as usize;
        Some(Lane::from_index(index.min(LANE_COUNT - 1)))
    }

    /// Centre x coordinate of a lane
    pub fn lane_center(&self, lane: Lane) -> f64 {
        self.road_center() + (lane.index() as f64 - 1.0) * self.lane_width()
    }

    /// Whether a point lies inside the visible rectangle (edges inclusive)
    pub fn contains(&self, pos: DVec2) -> bool {
        pos.x >= 0.0 && pos.y >= 0.0 && pos.x <= self.width && pos.y <= self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Dot {
        pos: DVec2,
        radius: f64,
    }

    impl Body for Dot {
        fn position(&self) -> DVec2 {
            self.pos
        }

        fn radius(&self) -> f64 {
            self.radius
        }
    }

    fn dot(x: f64, y: f64, radius: f64) -> Dot {
        Dot {
            pos: DVec2::new(x, y),
            radius,
        }
    }

    #[test]
    fn test_overlap_boundary_is_exclusive() {
        // radius sum 16: x tolerance 4, y tolerance 9.6
        let a = dot(0.0, 0.0, 8.0);
        let eps = 1e-6;
        assert!(overlaps(&a, &dot(4.0 - eps, 9.6 - eps, 8.0)));
        assert!(overlaps(&a, &dot(-4.0 + eps, -9.6 + eps, 8.0)));
        assert!(!overlaps(&a, &dot(4.0, 0.0, 8.0)));
        assert!(!overlaps(&a, &dot(0.0, 9.6, 8.0)));
    }

    #[test]
    fn test_overlap_is_anisotropic() {
        let a = dot(0.0, 0.0, 8.0);
        // 6 px apart vertically overlaps, 6 px apart horizontally does not
        assert!(overlaps(&a, &dot(0.0, 6.0, 8.0)));
        assert!(!overlaps(&a, &dot(6.0, 0.0, 8.0)));
    }

    #[test]
    fn test_lane_of_default_view() {
        let view = Viewport::default();
        assert_eq!(view.road_left(), 64.0);
        assert_eq!(view.road_right(), 192.0);
        assert_eq!(view.lane_of(64.0), Some(Lane::Left));
        assert_eq!(view.lane_of(128.0), Some(Lane::Middle));
        assert_eq!(view.lane_of(191.9), Some(Lane::Right));
        assert_eq!(view.lane_of(192.0), None);
        assert_eq!(view.lane_of(63.9), None);
    }

    #[test]
    fn test_lane_centers_fall_in_their_lane() {
        let view = Viewport::default();
        for lane in Lane::ALL {
            assert_eq!(view.lane_of(view.lane_center(lane)), Some(lane));
        }
        assert_eq!(view.lane_center(Lane::Middle), 128.0);
    }

    #[test]
    fn test_lane_next_cycles() {
        assert_eq!(Lane::Left.next(), Lane::Middle);
        assert_eq!(Lane::Middle.next(), Lane::Right);
        assert_eq!(Lane::Right.next(), Lane::Left);
    }

    #[test]
    fn test_viewport_contains_edges() {
        let view = Viewport::default();
        assert!(view.contains(DVec2::new(0.0, 0.0)));
        assert!(view.contains(DVec2::new(256.0, 256.0)));
        assert!(!view.contains(DVec2::new(-0.1, 10.0)));
        assert!(!view.contains(DVec2::new(10.0, 256.1)));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -300.0f64..300.0, ay in -300.0f64..300.0, ar in 0.0f64..40.0,
            bx in -300.0f64..300.0, by in -300.0f64..300.0, br in 0.0f64..40.0,
        ) {
            let a = dot(ax, ay, ar);
            let b = dot(bx, by, br);
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn prop_overlap_matches_boundary(r1 in 1.0f64..40.0, r2 in 1.0f64..40.0) {
            let sum = r1 + r2;
            let a = dot(0.0, 0.0, r1);
            let inside = dot(sum * 0.25 * 0.999, sum * 0.6 * 0.999, r2);
            let on_x = dot(sum * 0.25, 0.0, r2);
            let on_y = dot(0.0, sum * 0.6, r2);
            prop_assert!(overlaps(&a, &inside));
            prop_assert!(!overlaps(&a, &on_x));
            prop_assert!(!overlaps(&a, &on_y));
        }
    }
}
