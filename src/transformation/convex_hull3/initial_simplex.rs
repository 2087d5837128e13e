use super::ConvexHullError;
use crate::math::{Point, Real};
use crate::utils;

/// Finds four affinely independent points to start the hull from.
///
/// Points closer than `eps` to the line (resp. plane) spanned by the
/// previously selected points are considered degenerate.
pub fn initial_simplex(points: &[Point<Real>], eps: Real) -> Result<[usize; 4], ConvexHullError> {
    // Extremal points along each axis.
    let mut extremes = Vec::with_capacity(6);
    for axis in 0..3 {
        let mut dir = na::Vector3::zeros();
        dir[axis] = 1.0;
        extremes.extend(utils::point_cloud_support_point_id(&dir, points));
        extremes.extend(utils::point_cloud_support_point_id(&-dir, points));
    }

    let mut best = (0.0, 0, 0);
    for (k, i) in extremes.iter().enumerate() {
        for j in &extremes[k + 1..] {
            let d = na::distance_squared(&points[*i], &points[*j]);
            if d > best.0 {
                best = (d, *i, *j);
            }
        }
    }

    let (d2, i0, i1) = best;
    if d2.sqrt() <= eps {
        return Err(ConvexHullError::MissingSupportPoint);
    }

    let p0 = points[i0];
    let dir = (points[i1] - p0).normalize();
    let (i2, dist_to_line) = furthest(points, |pt| {
        let v = pt - p0;
        (v - dir * v.dot(&dir)).norm()
    });
    if dist_to_line <= eps {
        return Err(ConvexHullError::MissingSupportPoint);
    }

    let normal = (points[i1] - p0).cross(&(points[i2] - p0)).normalize();
    let (i3, dist_to_plane) = furthest(points, |pt| normal.dot(&(pt - p0)).abs());
    if dist_to_plane <= eps {
        return Err(ConvexHullError::MissingSupportPoint);
    }

    Ok([i0, i1, i2, i3])
}

fn furthest(points: &[Point<Real>], dist: impl Fn(&Point<Real>) -> Real) -> (usize, Real) {
    points
        .iter()
        .enumerate()
        .map(|(i, pt)| (i, dist(pt)))
        .fold((0, -1.0), |best, curr| if curr.1 > best.1 { curr } else { best })
}
