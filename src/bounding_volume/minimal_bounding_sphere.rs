use crate::bounding_volume::BoundingSphere;
use crate::math::{Point, Real};
use arrayvec::ArrayVec;

/// The points lying on the boundary of a minimal bounding sphere.
///
/// Between one and four points fully determine the smallest sphere enclosing a
/// point cloud.
pub type SupportPoints = ArrayVec<Point<Real>, 4>;

/// Relative tolerance of the containment tests.
const CONTAINMENT_TOLERANCE: Real = 1.0e-5;

/// Errors that can occur while computing the minimal bounding sphere.
#[derive(thiserror::Error, Debug, PartialEq, Eq, Copy, Clone)]
pub enum BoundingSphereError {
    /// The point set is empty.
    #[error("Cannot compute the bounding sphere of an empty point set.")]
    EmptyPointSet,
    /// At least one point has a NaN or infinite coordinate.
    #[error("The point {0} has a non-finite coordinate.")]
    NonFinitePoint(usize),
}

#[derive(Clone)]
struct Candidate {
    sphere: BoundingSphere,
    support: SupportPoints,
}

impl Candidate {
    fn contains(&self, pt: &Point<Real>) -> bool {
        self.sphere
            .contains_local_point_with_tolerance(pt, CONTAINMENT_TOLERANCE)
    }

    fn point(pt: Point<Real>) -> Self {
        Self::from_support(BoundingSphere::new(pt, 0.0), &[pt])
    }

    fn diameter(a: Point<Real>, b: Point<Real>) -> Self {
        Self::from_support(BoundingSphere::from_diameter(&a, &b), &[a, b])
    }

    fn from_support(sphere: BoundingSphere, support: &[Point<Real>]) -> Self {
        Self {
            sphere,
            support: support.iter().copied().collect(),
        }
    }

    /// Smallest sphere having the three given points on its boundary, or the
    /// smallest diameter sphere containing them if they are collinear.
    fn three(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Self {
        match BoundingSphere::circumsphere3(&a, &b, &c) {
            Some(sphere) => Self::from_support(sphere, &[a, b, c]),
            None => smallest_enclosing(&[a, b, c]),
        }
    }

    /// Smallest sphere having the four given points on its boundary, or the smallest
    /// sphere through a subset of them containing the others if they are coplanar.
    fn four(a: Point<Real>, b: Point<Real>, c: Point<Real>, d: Point<Real>) -> Self {
        match BoundingSphere::circumsphere4(&a, &b, &c, &d) {
            Some(sphere) => Self::from_support(sphere, &[a, b, c, d]),
            None => smallest_enclosing(&[a, b, c, d]),
        }
    }
}

/// Brute-force fallback for degenerate support sets (at most four points).
fn smallest_enclosing(pts: &[Point<Real>]) -> Candidate {
    let mut candidates = Vec::new();

    for i in 0..pts.len() {
        for j in i + 1..pts.len() {
            candidates.push(Candidate::diameter(pts[i], pts[j]));

            for k in j + 1..pts.len() {
                if let Some(sphere) = BoundingSphere::circumsphere3(&pts[i], &pts[j], &pts[k]) {
                    candidates.push(Candidate::from_support(sphere, &[pts[i], pts[j], pts[k]]));
                }
            }
        }
    }

    candidates
        .into_iter()
        .filter(|c| pts.iter().all(|pt| c.contains(pt)))
        .min_by(|a, b| a.sphere.radius.total_cmp(&b.sphere.radius))
        .unwrap_or_else(|| Candidate::point(pts[0]))
}

fn with_three(pts: &[Point<Real>], q1: Point<Real>, q2: Point<Real>, q3: Point<Real>) -> Candidate {
    let mut result = Candidate::three(q1, q2, q3);

    for pt in pts {
        if !result.contains(pt) {
            result = Candidate::four(*pt, q1, q2, q3);
        }
    }

    result
}

fn with_two(pts: &[Point<Real>], q1: Point<Real>, q2: Point<Real>) -> Candidate {
    let mut result = Candidate::diameter(q1, q2);

    for (i, pt) in pts.iter().enumerate() {
        if !result.contains(pt) {
            result = with_three(&pts[..i], *pt, q1, q2);
        }
    }

    result
}

fn with_one(pts: &[Point<Real>], q: Point<Real>) -> Candidate {
    let mut result = Candidate::point(q);

    for (i, pt) in pts.iter().enumerate() {
        if !result.contains(pt) {
            result = with_two(&pts[..i], *pt, q);
        }
    }

    result
}

/// Computes the smallest sphere enclosing all the given points.
///
/// This is Welzl's algorithm written in its iterative move-to-front form: every
/// point found outside of the current sphere becomes a boundary point of a new
/// sphere computed from the points seen so far.
///
/// Returns the sphere together with its support points, i.e., the one to four
/// input points lying on the sphere boundary and determining it.
///
/// # Example
///
/// ```
/// use galgeom::bounding_volume::minimal_bounding_sphere;
/// use galgeom::math::Point;
///
/// let pts = [
///     Point::new(-1.0, 0.0, 0.0),
///     Point::new(1.0, 0.0, 0.0),
///     Point::new(0.0, 0.5, 0.0),
/// ];
/// let (sphere, support) = minimal_bounding_sphere(&pts).unwrap();
///
/// assert!((sphere.radius - 1.0).abs() < 1.0e-6);
/// assert_eq!(support.len(), 2);
/// ```
pub fn minimal_bounding_sphere(
    pts: &[Point<Real>],
) -> Result<(BoundingSphere, SupportPoints), BoundingSphereError> {
    if let Some(i) = pts.iter().position(|pt| !pt.coords.iter().all(|x| x.is_finite())) {
        return Err(BoundingSphereError::NonFinitePoint(i));
    }

    let (first, rest) = pts
        .split_first()
        .ok_or(BoundingSphereError::EmptyPointSet)?;
    let mut result = Candidate::point(*first);

    for (i, pt) in rest.iter().enumerate() {
        if !result.contains(pt) {
            // `pts[..i + 1]` are the points preceding `pt`.
            result = with_one(&pts[..i + 1], *pt);
        }
    }

    log::trace!(
        "Minimal bounding sphere of {} points: radius {}, {} support points.",
        pts.len(),
        result.sphere.radius,
        result.support.len()
    );

    Ok((result.sphere, result.support))
}

#[cfg(test)]
mod test {
    use super::{minimal_bounding_sphere, BoundingSphereError};
    use crate::bounding_volume::{Aabb, BoundingSphere};
    use crate::math::{Point, Real};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn empty_and_single_point() {
        assert_eq!(
            minimal_bounding_sphere(&[]),
            Err(BoundingSphereError::EmptyPointSet)
        );

        let pt = Point::new(1.0, 2.0, 3.0);
        let (sphere, support) = minimal_bounding_sphere(&[pt]).unwrap();
        assert_eq!(sphere, BoundingSphere::new(pt, 0.0));
        assert_eq!(support.as_slice(), &[pt]);
    }

    #[test]
    fn non_finite_points_are_rejected() {
        let pts = [Point::origin(), Point::new(Real::NAN, 0.0, 0.0)];
        assert_eq!(
            minimal_bounding_sphere(&pts),
            Err(BoundingSphereError::NonFinitePoint(1))
        );
    }

    #[test]
    fn obtuse_triangle_uses_its_longest_edge() {
        let pts = [
            Point::new(-2.0, 0.0, 0.0),
            Point::new(0.0, 0.1, 0.0),
            Point::new(2.0, 0.0, 0.0),
        ];
        let (sphere, support) = minimal_bounding_sphere(&pts).unwrap();

        assert_relative_eq!(sphere.center, Point::origin(), epsilon = 1.0e-6);
        assert_relative_eq!(sphere.radius, 2.0, epsilon = 1.0e-6);
        assert_eq!(support.len(), 2);
    }

    #[test]
    fn cube_corners() {
        let aabb = Aabb::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0));
        let mut pts = aabb.vertices().to_vec();
        pts.push(Point::origin());
        pts.push(Point::new(0.5, -0.25, 0.1));

        let (sphere, _) = minimal_bounding_sphere(&pts).unwrap();
        assert_relative_eq!(sphere.center, Point::origin(), epsilon = 1.0e-4);
        assert_relative_eq!(sphere.radius, 3.0f32.sqrt(), epsilon = 1.0e-4);
    }

    #[test]
    fn random_clouds_are_enclosed_by_their_support() {
        let aabb = Aabb::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0));
        let mut rng = StdRng::seed_from_u64(1234);

        for n in [2, 5, 25, 50, 200] {
            let pts = aabb.sample_points(n, &mut rng);
            let (sphere, support) = minimal_bounding_sphere(&pts).unwrap();

            assert!(!support.is_empty() && support.len() <= 4);
            assert!(sphere.radius <= aabb.bounding_sphere().radius + 1.0e-5);

            for pt in &pts {
                assert!(sphere.contains_local_point_with_tolerance(pt, 1.0e-4));
            }

            for s in &support {
                assert!(pts.contains(s));
                assert_relative_eq!(
                    na::distance(&sphere.center, s),
                    sphere.radius,
                    epsilon = 1.0e-4
                );
            }
        }
    }

    #[test]
    fn result_does_not_depend_on_point_order() {
        let aabb = Aabb::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0));
        let mut rng = StdRng::seed_from_u64(99);
        let mut pts = aabb.sample_points(40, &mut rng);

        let (sphere1, _) = minimal_bounding_sphere(&pts).unwrap();
        pts.reverse();
        let (sphere2, _) = minimal_bounding_sphere(&pts).unwrap();

        assert_relative_eq!(sphere1.center, sphere2.center, epsilon = 1.0e-4);
        assert_relative_eq!(sphere1.radius, sphere2.radius, epsilon = 1.0e-4);
    }
}
