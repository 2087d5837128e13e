//! Bounding sphere.

use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Matrix, Point, Real, Vector, DEFAULT_EPSILON};
use na;
use num::Zero;

/// A Bounding Sphere.
///
/// This is also the sphere shape shown by the viewer.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct BoundingSphere {
    /// The sphere center.
    pub center: Point<Real>,
    /// The sphere radius.
    pub radius: Real,
}

impl BoundingSphere {
    /// Creates a new bounding sphere.
    pub fn new(center: Point<Real>, radius: Real) -> BoundingSphere {
        BoundingSphere { center, radius }
    }

    /// The smallest sphere having the segment `[a, b]` as a diameter.
    pub fn from_diameter(a: &Point<Real>, b: &Point<Real>) -> BoundingSphere {
        let center = na::center(a, b);
        BoundingSphere::new(center, na::distance(&center, a))
    }

    /// The smallest sphere passing through the three given points.
    ///
    /// Its center lies on the plane of the triangle `a, b, c`. Returns `None` if
    /// the three points are collinear.
    pub fn circumsphere3(
        a: &Point<Real>,
        b: &Point<Real>,
        c: &Point<Real>,
    ) -> Option<BoundingSphere> {
        let ab = b - a;
        let ac = c - a;
        let n = ab.cross(&ac);
        let denom = 2.0 * n.norm_squared();

        if denom <= DEFAULT_EPSILON * ab.norm_squared() * ac.norm_squared() {
            return None;
        }

        let offset = (n.cross(&ab) * ac.norm_squared() + ac.cross(&n) * ab.norm_squared()) / denom;
        Some(BoundingSphere::new(a + offset, offset.norm()))
    }

    /// The unique sphere passing through the four given points.
    ///
    /// Returns `None` if the four points are coplanar.
    pub fn circumsphere4(
        a: &Point<Real>,
        b: &Point<Real>,
        c: &Point<Real>,
        d: &Point<Real>,
    ) -> Option<BoundingSphere> {
        let ab = b - a;
        let ac = c - a;
        let ad = d - a;
        let m = Matrix::from_rows(&[ab.transpose(), ac.transpose(), ad.transpose()]);
        let det = m.determinant();

        if det.abs() <= DEFAULT_EPSILON * ab.norm() * ac.norm() * ad.norm() {
            return None;
        }

        let rhs = Vector::new(ab.norm_squared(), ac.norm_squared(), ad.norm_squared()) * 0.5;
        let offset = m.try_inverse()? * rhs;
        Some(BoundingSphere::new(a + offset, offset.norm()))
    }

    /// The bounding sphere center.
    #[inline]
    pub fn center(&self) -> &Point<Real> {
        &self.center
    }

    /// The bounding sphere radius.
    #[inline]
    pub fn radius(&self) -> Real {
        self.radius
    }

    /// Checks if the given point is inside of this sphere (boundary included).
    #[inline]
    pub fn contains_local_point(&self, pt: &Point<Real>) -> bool {
        na::distance_squared(&self.center, pt) <= self.radius * self.radius
    }

    /// Checks if the given point is inside of this sphere, up to a relative tolerance.
    ///
    /// The radius is enlarged by `rel_tol * radius + rel_tol` before the test, so
    /// points lying on the boundary are accepted despite rounding errors.
    #[inline]
    pub fn contains_local_point_with_tolerance(&self, pt: &Point<Real>, rel_tol: Real) -> bool {
        let r = self.radius + rel_tol * (self.radius + 1.0);
        na::distance_squared(&self.center, pt) <= r * r
    }

    /// The smallest `Aabb` enclosing this sphere.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_half_extents(self.center, Vector::repeat(self.radius))
    }
}

impl BoundingVolume for BoundingSphere {
    #[inline]
    fn center(&self) -> Point<Real> {
        *self.center()
    }

    #[inline]
    fn intersects(&self, other: &BoundingSphere) -> bool {
        let delta_pos = other.center - self.center;
        let distance_squared = delta_pos.norm_squared();
        let sum_radius = self.radius + other.radius;

        distance_squared <= sum_radius * sum_radius
    }

    #[inline]
    fn contains(&self, other: &BoundingSphere) -> bool {
        let delta_pos = other.center - self.center;
        let distance = delta_pos.norm();

        distance + other.radius <= self.radius
    }

    #[inline]
    fn merge(&mut self, other: &BoundingSphere) {
        let mut dir = *other.center() - *self.center();
        let norm = dir.normalize_mut();

        if norm.is_zero() {
            if other.radius > self.radius {
                self.radius = other.radius
            }
        } else {
            let s_center_dir = self.center.coords.dot(&dir);
            let o_center_dir = other.center.coords.dot(&dir);

            let right = if s_center_dir + self.radius > o_center_dir + other.radius {
                self.center + dir * self.radius
            } else {
                other.center + dir * other.radius
            };

            let left = if -s_center_dir + self.radius > -o_center_dir + other.radius {
                self.center - dir * self.radius
            } else {
                other.center - dir * other.radius
            };

            self.center = na::center(&left, &right);
            self.radius = na::distance(&right, &self.center);
        }
    }

    #[inline]
    fn merged(&self, other: &BoundingSphere) -> BoundingSphere {
        let mut res = *self;
        res.merge(other);
        res
    }

    #[inline]
    fn loosen(&mut self, amount: Real) {
        assert!(amount >= 0.0, "The loosening margin must be positive.");
        self.radius += amount
    }

    #[inline]
    fn loosened(&self, amount: Real) -> BoundingSphere {
        assert!(amount >= 0.0, "The loosening margin must be positive.");
        BoundingSphere::new(self.center, self.radius + amount)
    }
}
