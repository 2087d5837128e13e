use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::utils;
use rand::Rng;
use std::ops::Deref;

/// An unordered collection of 3D points.
///
/// The points are stored in a `Vec` whose order is kept stable, even though
/// no geometric property of the cloud depends on it.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointCloud {
    points: Vec<Point<Real>>,
}

impl PointCloud {
    /// Creates a point cloud from the given points.
    pub fn new(points: Vec<Point<Real>>) -> Self {
        Self { points }
    }

    /// Creates a point cloud of `n` points sampled uniformly inside of `aabb`.
    pub fn from_aabb_samples<R: Rng + ?Sized>(aabb: &Aabb, n: usize, rng: &mut R) -> Self {
        Self::new(aabb.sample_points(n, rng))
    }

    /// The points of this cloud.
    #[inline]
    pub fn points(&self) -> &[Point<Real>] {
        &self.points
    }

    /// Consumes the cloud, returning its points.
    #[inline]
    pub fn into_points(self) -> Vec<Point<Real>> {
        self.points
    }

    /// The smallest `Aabb` containing every point of this cloud.
    ///
    /// This is an invalid `Aabb` if the cloud is empty.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(&self.points)
    }

    /// The centroid of this cloud, or `None` if it is empty.
    pub fn center(&self) -> Option<Point<Real>> {
        (!self.points.is_empty()).then(|| utils::center(&self.points))
    }
}

impl Deref for PointCloud {
    type Target = [Point<Real>];

    #[inline]
    fn deref(&self) -> &[Point<Real>] {
        &self.points
    }
}

impl From<Vec<Point<Real>>> for PointCloud {
    fn from(points: Vec<Point<Real>>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Point<Real>> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Point<Real>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
