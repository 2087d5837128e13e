use crate::math::{Point, Real};

/// The centroid of a set of points, all weighted equally.
///
/// # Panics
///
/// Panics if `pts` is empty.
///
/// # Example
///
/// ```
/// use galgeom::utils::center;
/// use galgeom::math::Point;
///
/// let points = [
///     Point::new(0.0, 0.0, 0.0),
///     Point::new(4.0, 0.0, 0.0),
///     Point::new(0.0, 4.0, 0.0),
/// ];
///
/// let c = center(&points);
/// assert!((c.x - 4.0 / 3.0).abs() < 1e-6);
/// assert!((c.y - 4.0 / 3.0).abs() < 1e-6);
/// assert!(c.z.abs() < 1e-6);
/// ```
#[inline]
pub fn center(pts: &[Point<Real>]) -> Point<Real> {
    assert!(!pts.is_empty(), "Cannot compute the center of an empty point set.");

    let sum = pts.iter().fold(Point::origin(), |acc, pt| acc + pt.coords);
    sum / pts.len() as Real
}
