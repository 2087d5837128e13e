use crate::math::{Point, Real, Vector};

/// Computes the index of the support point of a cloud of points.
///
/// The support point is the point maximizing the dot product with `dir`.
/// Returns `None` if the cloud is empty or if every dot product is NaN.
#[inline]
pub fn point_cloud_support_point_id(dir: &Vector<Real>, points: &[Point<Real>]) -> Option<usize> {
    let mut best_pt = None;
    let mut best_dot = -Real::MAX;

    for (i, p) in points.iter().enumerate() {
        let dot = p.coords.dot(dir);

        if dot > best_dot {
            best_dot = dot;
            best_pt = Some(i);
        }
    }

    best_pt
}
