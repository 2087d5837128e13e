use super::{initial_simplex, ConvexHullError, HullFace};
use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::utils;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Relative tolerance under which a point is considered to lie on a face.
const PLANE_TOLERANCE: Real = 1.0e-5;

/// Computes the convex hull of a set of 3d points.
///
/// Returns an empty mesh if the hull can't be computed, see [`try_convex_hull`]
/// for the fallible version.
pub fn convex_hull(points: &[Point<Real>]) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
    try_convex_hull(points).unwrap_or_else(|err| {
        log::warn!("convex hull of {} points failed: {}", points.len(), err);
        (Vec::new(), Vec::new())
    })
}

/// Computes the convex hull of a set of 3d points.
///
/// The returned vertex buffer only contains the hull vertices, and the
/// triangles are oriented counter-clockwise when seen from outside.
pub fn try_convex_hull(
    points: &[Point<Real>],
) -> Result<(Vec<Point<Real>>, Vec<[u32; 3]>), ConvexHullError> {
    if points.len() < 4 {
        return Err(ConvexHullError::IncompleteInput);
    }

    if points.iter().any(|pt| !pt.coords.iter().all(|x| x.is_finite())) {
        return Err(ConvexHullError::MissingSupportPoint);
    }

    let extents = Aabb::from_points(points).extents();
    let eps = PLANE_TOLERANCE * extents.norm().max(1.0);

    let simplex = initial_simplex(points, eps)?;
    let simplex_center = utils::center(&simplex.map(|i| points[i]));

    let mut faces = Vec::new();
    for pts in [
        [simplex[0], simplex[1], simplex[2]],
        [simplex[0], simplex[3], simplex[1]],
        [simplex[1], simplex[3], simplex[2]],
        [simplex[2], simplex[3], simplex[0]],
    ] {
        let mut face = HullFace::new(pts, points);
        if face.distance_to(&simplex_center) > 0.0 {
            face.flip();
        }
        faces.push(face);
    }

    // Maps each directed edge to the face it belongs to.
    let mut edges = HashMap::new();
    for (fid, face) in faces.iter().enumerate() {
        for edge in face.edges() {
            let _ = edges.insert(edge, fid);
        }
    }

    let candidates = (0..points.len()).filter(|i| !simplex.contains(i));
    assign_outside_points(candidates, points, &mut faces, 0, eps);

    let mut pending: Vec<usize> = (0..faces.len()).collect();
    let mut visible: SmallVec<[usize; 32]> = SmallVec::new();
    let mut horizon: SmallVec<[(usize, usize); 32]> = SmallVec::new();
    let mut orphans = Vec::new();

    while let Some(fid) = pending.pop() {
        if !faces[fid].valid {
            continue;
        }
        let Some(eye) = faces[fid].furthest_outside_point(points) else {
            continue;
        };
        let eye_pt = points[eye];

        // Flood-fill the faces visible from the eye point.
        visible.clear();
        visible.push(fid);
        faces[fid].valid = false;
        let mut k = 0;
        while k < visible.len() {
            let curr = visible[k];
            k += 1;

            for (a, b) in faces[curr].edges() {
                let neighbor = *edges
                    .get(&(b, a))
                    .ok_or(ConvexHullError::InternalError("missing adjacent face"))?;
                if faces[neighbor].valid && faces[neighbor].distance_to(&eye_pt) > eps {
                    faces[neighbor].valid = false;
                    visible.push(neighbor);
                }
            }
        }

        horizon.clear();
        orphans.clear();
        for curr in &visible {
            for (a, b) in faces[*curr].edges() {
                let neighbor = edges[&(b, a)];
                if faces[neighbor].valid {
                    horizon.push((a, b));
                }
            }
            orphans.append(&mut faces[*curr].outside);
        }

        for curr in &visible {
            for edge in faces[*curr].edges() {
                let _ = edges.remove(&edge);
            }
        }

        let first_new = faces.len();
        for (a, b) in horizon.iter().copied() {
            let face = HullFace::new([a, b, eye], points);
            let new_id = faces.len();
            for edge in face.edges() {
                if edges.insert(edge, new_id).is_some() {
                    return Err(ConvexHullError::InternalError(
                        "non-manifold horizon while expanding the hull",
                    ));
                }
            }
            faces.push(face);
        }

        let candidates = orphans.iter().copied().filter(|i| *i != eye);
        assign_outside_points(candidates, points, &mut faces, first_new, eps);
        pending.extend(first_new..faces.len());
    }

    let mut vertices = points.to_vec();
    let mut indices: Vec<[u32; 3]> = faces
        .iter()
        .filter(|face| face.valid)
        .map(|face| face.pts.map(|i| i as u32))
        .collect();
    utils::remove_unused_points(&mut vertices, &mut indices);

    log::debug!(
        "convex hull of {} points: {} vertices, {} triangles",
        points.len(),
        vertices.len(),
        indices.len()
    );

    Ok((vertices, indices))
}

/// Assigns each candidate point to the face (among `faces[first_face..]`) it is
/// furthest in front of. Points behind every face are inside the hull and dropped.
fn assign_outside_points(
    candidates: impl Iterator<Item = usize>,
    points: &[Point<Real>],
    faces: &mut [HullFace],
    first_face: usize,
    eps: Real,
) {
    for i in candidates {
        let mut best = None;
        let mut best_dist = eps;

        for (fid, face) in faces.iter().enumerate().skip(first_face) {
            if !face.valid {
                continue;
            }
            let dist = face.distance_to(&points[i]);
            if dist > best_dist {
                best_dist = dist;
                best = Some(fid);
            }
        }

        if let Some(fid) = best {
            faces[fid].outside.push(i);
        }
    }
}
