//! Axis Aligned Bounding Box.

use crate::bounding_volume::{BoundingSphere, BoundingVolume};
use crate::math::{Point, Real, Vector, DIM};
use na;
use rand::Rng;

/// An Axis-Aligned Bounding Box (AABB), the 3D box of this crate.
///
/// An AABB is defined by its minimum and maximum corners. Its edges are always
/// parallel to the coordinate axes.
///
/// # Structure
///
/// - **mins**: The point with the smallest coordinates on each axis.
/// - **maxs**: The point with the largest coordinates on each axis.
/// - **Invariant**: `mins.x ≤ maxs.x`, `mins.y ≤ maxs.y` and `mins.z ≤ maxs.z`.
///   This is not enforced by [`Aabb::new`]: it is up to the caller to provide
///   properly ordered corners.
///
/// # Example
///
/// ```rust
/// use galgeom::bounding_volume::Aabb;
/// use galgeom::math::Point;
///
/// let aabb = Aabb::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0));
///
/// assert!(aabb.contains_local_point(&Point::origin()));
/// assert_eq!(aabb.center(), Point::origin());
/// assert_eq!(aabb.extents().x, 2.0);
/// assert_eq!(aabb.volume(), 8.0);
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point<Real>,
    /// The point with maximum coordinates.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new Aabb from its two corners.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid `Aabb` with `mins` components set to `Real::MAX` and `maxs`
    /// components set to `-Real::MAX`.
    ///
    /// This is often used as the initial value of some `Aabb` merging algorithms.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::MAX).into(),
            Vector::repeat(-Real::MAX).into(),
        )
    }

    /// Creates a new `Aabb` from its center and its half-extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Creates a new `Aabb` enclosing all the given points.
    ///
    /// Returns [`Aabb::new_invalid`] if the iterator is empty.
    pub fn from_points<'a, I>(pts: I) -> Self
    where
        I: IntoIterator<Item = &'a Point<Real>>,
    {
        let mut aabb = Self::new_invalid();
        for pt in pts {
            aabb.take_point(*pt);
        }
        aabb
    }

    /// Returns `true` if every component of `mins` is smaller or equal to the
    /// matching component of `maxs`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (0..DIM).all(|i| self.mins[i] <= self.maxs[i])
    }

    /// The center of this `Aabb`.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The half extents of this `Aabb`.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        let half: Real = na::convert::<f64, Real>(0.5);
        (self.maxs - self.mins) * half
    }

    /// The extents of this `Aabb`.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// The volume of this `Aabb`.
    #[inline]
    pub fn volume(&self) -> Real {
        let extents = self.extents();
        extents.x * extents.y * extents.z
    }

    /// Enlarges this `Aabb` so it also contains the point `pt`.
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.coords.inf(&pt.coords).into();
        self.maxs = self.maxs.coords.sup(&pt.coords).into();
    }

    /// Returns a copy of this `Aabb` translated by `translation`.
    #[inline]
    pub fn translated(mut self, translation: &Vector<Real>) -> Self {
        self.mins += translation;
        self.maxs += translation;
        self
    }

    /// Returns a copy of this `Aabb` with its corners multiplied componentwise by `scale`.
    #[inline]
    pub fn scaled(self, scale: &Vector<Real>) -> Self {
        let a = self.mins.coords.component_mul(scale);
        let b = self.maxs.coords.component_mul(scale);
        Self {
            mins: a.inf(&b).into(),
            maxs: a.sup(&b).into(),
        }
    }

    /// The smallest bounding sphere containing this `Aabb`.
    #[inline]
    pub fn bounding_sphere(&self) -> BoundingSphere {
        let center = self.center();
        let radius = na::distance(&self.mins, &self.maxs) * 0.5;
        BoundingSphere::new(center, radius)
    }

    /// Does this `Aabb` contains a point expressed in the same coordinate frame as `self`?
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        for i in 0..DIM {
            if point[i] < self.mins[i] || point[i] > self.maxs[i] {
                return false;
            }
        }

        true
    }

    /// Computes the vertices of this `Aabb`.
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 8] {
        [
            Point::new(self.mins.x, self.mins.y, self.mins.z),
            Point::new(self.maxs.x, self.mins.y, self.mins.z),
            Point::new(self.maxs.x, self.maxs.y, self.mins.z),
            Point::new(self.mins.x, self.maxs.y, self.mins.z),
            Point::new(self.mins.x, self.mins.y, self.maxs.z),
            Point::new(self.maxs.x, self.mins.y, self.maxs.z),
            Point::new(self.maxs.x, self.maxs.y, self.maxs.z),
            Point::new(self.mins.x, self.maxs.y, self.maxs.z),
        ]
    }

    /// Samples `n` points uniformly distributed inside of this `Aabb`.
    ///
    /// Each coordinate is drawn independently and uniformly between the matching
    /// components of `mins` and `maxs`. A flat axis (`mins[i] == maxs[i]`) yields
    /// exactly that coordinate.
    pub fn sample_points<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Point<Real>> {
        let extents = self.extents();
        (0..n)
            .map(|_| {
                let t = Vector::new(rng.gen::<Real>(), rng.gen::<Real>(), rng.gen::<Real>());
                self.mins + extents.component_mul(&t)
            })
            .collect()
    }
}

impl BoundingVolume for Aabb {
    #[inline]
    fn center(&self) -> Point<Real> {
        self.center()
    }

    #[inline]
    fn intersects(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.maxs) && na::partial_ge(&self.maxs, &other.mins)
    }

    #[inline]
    fn contains(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.mins) && na::partial_ge(&self.maxs, &other.maxs)
    }

    #[inline]
    fn merge(&mut self, other: &Aabb) {
        self.mins = self.mins.inf(&other.mins);
        self.maxs = self.maxs.sup(&other.maxs);
    }

    #[inline]
    fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }

    #[inline]
    fn loosen(&mut self, amount: Real) {
        assert!(amount >= 0.0, "The loosening margin must be positive.");
        self.mins += Vector::repeat(-amount);
        self.maxs += Vector::repeat(amount);
    }

    #[inline]
    fn loosened(&self, amount: Real) -> Aabb {
        assert!(amount >= 0.0, "The loosening margin must be positive.");
        Aabb {
            mins: self.mins + Vector::repeat(-amount),
            maxs: self.maxs + Vector::repeat(amount),
        }
    }
}
