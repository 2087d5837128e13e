use crate::math::{Point2, Real, Vector2};
use na::{self, Unit};

/// A line segment in the plane.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2d {
    /// The first point of the segment.
    pub start: Point2<Real>,
    /// The second point of the segment.
    pub end: Point2<Real>,
}

impl Line2d {
    /// Creates the segment going from `start` to `end`.
    pub fn new(start: Point2<Real>, end: Point2<Real>) -> Self {
        Self { start, end }
    }

    /// The length of this segment.
    pub fn length(&self) -> Real {
        na::distance(&self.start, &self.end)
    }

    /// The unit direction from `start` to `end`, or `None` if the segment is degenerate.
    pub fn direction(&self) -> Option<Unit<Vector2<Real>>> {
        Unit::try_new(self.end - self.start, crate::math::DEFAULT_EPSILON)
    }
}
