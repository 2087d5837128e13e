use crate::math::{Point, Real, Vector};
use na::Unit;

/// An infinite plane going through `point`, with the unit normal `normal`.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// A point on the plane.
    pub point: Point<Real>,
    /// The plane's normal.
    pub normal: Unit<Vector<Real>>,
}

impl Plane {
    /// Builds a new plane from a point and a (not necessarily normalized) normal.
    ///
    /// Returns `None` if the normal is zero.
    #[inline]
    pub fn new(point: Point<Real>, normal: Vector<Real>) -> Option<Plane> {
        let normal = Unit::try_new(normal, crate::math::DEFAULT_EPSILON)?;
        Some(Plane { point, normal })
    }

    /// Builds a new plane from a point and a unit normal.
    #[inline]
    pub fn from_unit_normal(point: Point<Real>, normal: Unit<Vector<Real>>) -> Plane {
        Plane { point, normal }
    }

    /// The signed distance from `pt` to this plane, positive on the side the normal points to.
    #[inline]
    pub fn distance_to_point(&self, pt: &Point<Real>) -> Real {
        self.normal.dot(&(pt - self.point))
    }

    /// The orthogonal projection of `pt` onto this plane.
    #[inline]
    pub fn project_point(&self, pt: &Point<Real>) -> Point<Real> {
        pt - *self.normal * self.distance_to_point(pt)
    }
}
