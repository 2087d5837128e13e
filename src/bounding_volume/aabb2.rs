//! Axis Aligned Bounding Rectangle.

use crate::math::{Point2, Real, Vector2};
use na;
use rand::Rng;

/// A 2D axis-aligned box, defined by its minimum and maximum corners.
///
/// Like [`crate::bounding_volume::Aabb`], the corners are expected (but not
/// required) to satisfy `mins <= maxs` componentwise.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb2 {
    /// The point with minimum coordinates.
    pub mins: Point2<Real>,
    /// The point with maximum coordinates.
    pub maxs: Point2<Real>,
}

impl Aabb2 {
    /// Creates a new rectangle from its two corners.
    #[inline]
    pub fn new(mins: Point2<Real>, maxs: Point2<Real>) -> Self {
        Self { mins, maxs }
    }

    /// Creates an invalid rectangle, used as the initial value when merging points.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector2::repeat(Real::MAX).into(),
            Vector2::repeat(-Real::MAX).into(),
        )
    }

    /// Creates the smallest rectangle enclosing all the given points.
    pub fn from_points<'a, I>(pts: I) -> Self
    where
        I: IntoIterator<Item = &'a Point2<Real>>,
    {
        let mut aabb = Self::new_invalid();
        for pt in pts {
            aabb.take_point(*pt);
        }
        aabb
    }

    /// The center of this rectangle.
    #[inline]
    pub fn center(&self) -> Point2<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The extents of this rectangle.
    #[inline]
    pub fn extents(&self) -> Vector2<Real> {
        self.maxs - self.mins
    }

    /// Enlarges this rectangle so it also contains the point `pt`.
    pub fn take_point(&mut self, pt: Point2<Real>) {
        self.mins = self.mins.coords.inf(&pt.coords).into();
        self.maxs = self.maxs.coords.sup(&pt.coords).into();
    }

    /// Checks if this rectangle contains the given point.
    #[inline]
    pub fn contains_local_point(&self, point: &Point2<Real>) -> bool {
        point.x >= self.mins.x
            && point.x <= self.maxs.x
            && point.y >= self.mins.y
            && point.y <= self.maxs.y
    }

    /// Samples `n` points uniformly distributed inside of this rectangle.
    pub fn sample_points<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Point2<Real>> {
        let extents = self.extents();
        (0..n)
            .map(|_| {
                let t = Vector2::new(rng.gen::<Real>(), rng.gen::<Real>());
                self.mins + extents.component_mul(&t)
            })
            .collect()
    }
}
