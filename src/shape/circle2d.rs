use crate::bounding_volume::Aabb2;
use crate::math::{Matrix, Point2, Real, Vector2, DEFAULT_EPSILON};
use na;

/// Relative tolerance of the containment tests used by the minimal bounding circle.
const CONTAINMENT_TOLERANCE: Real = 1.0e-5;

/// A circle in the plane.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle2d {
    center: Point2<Real>,
    radius: Real,
}

impl Circle2d {
    /// Creates a new circle. The absolute value of `radius` is stored.
    pub fn new(center: Point2<Real>, radius: Real) -> Self {
        Self {
            center,
            radius: radius.abs(),
        }
    }

    /// The circle center.
    #[inline]
    pub fn center(&self) -> &Point2<Real> {
        &self.center
    }

    /// The circle radius.
    #[inline]
    pub fn radius(&self) -> Real {
        self.radius
    }

    /// Checks if `pt` is inside of this circle (boundary included).
    #[inline]
    pub fn contains(&self, pt: &Point2<Real>) -> bool {
        na::distance_squared(&self.center, pt) <= self.radius * self.radius
    }

    fn contains_with_tolerance(&self, pt: &Point2<Real>) -> bool {
        let r = self.radius + CONTAINMENT_TOLERANCE * (self.radius + 1.0);
        na::distance_squared(&self.center, pt) <= r * r
    }

    /// The smallest rectangle containing this circle.
    pub fn aabb(&self) -> Aabb2 {
        let r = Vector2::repeat(self.radius);
        Aabb2::new(self.center - r, self.center + r)
    }

    /// The circle having the segment `[a, b]` as a diameter.
    pub fn from_diameter(a: &Point2<Real>, b: &Point2<Real>) -> Self {
        let center = na::center(a, b);
        Self::new(center, na::distance(&center, a))
    }

    /// The circle passing through the three given points.
    ///
    /// Returns `None` if the points are collinear.
    pub fn circumcircle(a: &Point2<Real>, b: &Point2<Real>, c: &Point2<Real>) -> Option<Self> {
        let a2 = a.coords.norm_squared();
        let b2 = b.coords.norm_squared();
        let c2 = c.coords.norm_squared();

        let det = Matrix::new(a.x, a.y, 1.0, b.x, b.y, 1.0, c.x, c.y, 1.0).determinant();
        let scale = (b - a).norm() * (c - a).norm();

        if det.abs() <= DEFAULT_EPSILON * scale || relative_eq!(scale, 0.0) {
            return None;
        }

        let center = Point2::new(
            Matrix::new(a2, a.y, 1.0, b2, b.y, 1.0, c2, c.y, 1.0).determinant(),
            Matrix::new(a.x, a2, 1.0, b.x, b2, 1.0, c.x, c2, 1.0).determinant(),
        ) * (0.5 / det);

        Some(Self::new(center, na::distance(&center, a)))
    }

    /// The smallest circle containing all the given points.
    ///
    /// Returns `None` if `pts` is empty.
    pub fn minimal_bounding_circle(pts: &[Point2<Real>]) -> Option<Self> {
        let (first, _) = pts.split_first()?;
        let mut circ = Self::new(*first, 0.0);

        for i in 1..pts.len() {
            if !circ.contains_with_tolerance(&pts[i]) {
                circ = bounding_circle_with_one(&pts[..i], &pts[i]);
            }
        }

        Some(circ)
    }
}

fn bounding_circle_with_one(pts: &[Point2<Real>], q: &Point2<Real>) -> Circle2d {
    let mut circ = Circle2d::new(*q, 0.0);

    for i in 0..pts.len() {
        if !circ.contains_with_tolerance(&pts[i]) {
            circ = bounding_circle_with_two(&pts[..i], &pts[i], q);
        }
    }

    circ
}

fn bounding_circle_with_two(pts: &[Point2<Real>], p: &Point2<Real>, q: &Point2<Real>) -> Circle2d {
    let mut circ = Circle2d::from_diameter(p, q);

    for pt in pts {
        if !circ.contains_with_tolerance(pt) {
            // Collinear points can't be outside of the diameter circle of two of
            // them, unless `pt` lies outside of `[p, q]`.
            circ = Circle2d::circumcircle(pt, p, q).unwrap_or_else(|| {
                let (a, b) = [(pt, p), (pt, q), (p, q)]
                    .into_iter()
                    .max_by(|x, y| {
                        na::distance_squared(x.0, x.1).total_cmp(&na::distance_squared(y.0, y.1))
                    })
                    .unwrap_or((p, q));
                Circle2d::from_diameter(a, b)
            });
        }
    }

    circ
}

#[cfg(test)]
mod test {
    use super::Circle2d;
    use crate::bounding_volume::Aabb2;
    use crate::math::Point2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn circumcircle_of_right_triangle() {
        let circ = Circle2d::circumcircle(
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
            &Point2::new(0.0, 2.0),
        )
        .unwrap();

        assert_relative_eq!(*circ.center(), Point2::new(1.0, 1.0), epsilon = 1.0e-6);
        assert_relative_eq!(circ.radius(), 2.0f32.sqrt(), epsilon = 1.0e-6);
        assert!(Circle2d::circumcircle(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 1.0),
            &Point2::new(2.0, 2.0)
        )
        .is_none());
    }

    #[test]
    fn minimal_bounding_circle() {
        assert!(Circle2d::minimal_bounding_circle(&[]).is_none());

        let rect = Aabb2::new(Point2::new(-1.0, -1.0), Point2::new(1.0, 1.0));
        let mut rng = StdRng::seed_from_u64(5);
        let pts = rect.sample_points(100, &mut rng);
        let circ = Circle2d::minimal_bounding_circle(&pts).unwrap();

        assert!(circ.radius() <= 2.0f32.sqrt() + 1.0e-5);
        for pt in &pts {
            let d = na::distance(circ.center(), pt);
            assert!(d <= circ.radius() + 1.0e-4);
        }
    }

    #[test]
    fn collinear_points() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(3.0, 0.0),
            Point2::new(2.0, 0.0),
        ];
        let circ = Circle2d::minimal_bounding_circle(&pts).unwrap();

        assert_relative_eq!(*circ.center(), Point2::new(1.5, 0.0), epsilon = 1.0e-6);
        assert_relative_eq!(circ.radius(), 1.5, epsilon = 1.0e-6);
    }
}
