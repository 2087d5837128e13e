use crate::math::{Point, Real};

/// The feature of a triangle a projected point lies on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrianglePointLocation {
    /// The projection is the vertex `a`, `b` or `c` (index 0, 1 or 2).
    OnVertex(u32),
    /// The projection lies on the edge `ab`, `bc` or `ca` (index 0, 1 or 2).
    OnEdge(u32),
    /// The projection lies inside of the triangle.
    OnFace,
}

/// Computes the point of the triangle `abc` closest to `pt`.
#[inline]
pub fn closest_point_on_triangle(
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
    pt: &Point<Real>,
) -> Point<Real> {
    closest_point_on_triangle_with_location(a, b, c, pt).0
}

/// Computes the point of the triangle `abc` closest to `pt`, and the feature it lies on.
///
/// The point is located by testing the Voronoi regions of the vertices, then of
/// the edges, before projecting on the triangle plane.
pub fn closest_point_on_triangle_with_location(
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
    pt: &Point<Real>,
) -> (Point<Real>, TrianglePointLocation) {
    let ab = b - a;
    let ac = c - a;
    let ap = pt - a;

    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return (*a, TrianglePointLocation::OnVertex(0));
    }

    let bp = pt - b;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    if d3 >= 0.0 && d4 <= d3 {
        return (*b, TrianglePointLocation::OnVertex(1));
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return (a + ab * v, TrianglePointLocation::OnEdge(0));
    }

    let cp = pt - c;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    if d6 >= 0.0 && d5 <= d6 {
        return (*c, TrianglePointLocation::OnVertex(2));
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return (a + ac * w, TrianglePointLocation::OnEdge(2));
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return (b + (c - b) * w, TrianglePointLocation::OnEdge(1));
    }

    let denom = va + vb + vc;
    if denom == 0.0 {
        // Degenerate triangle: fall back to the closest vertex.
        let (i, closest) = [a, b, c]
            .into_iter()
            .enumerate()
            .min_by(|(_, p1), (_, p2)| {
                na::distance_squared(*p1, pt).total_cmp(&na::distance_squared(*p2, pt))
            })
            .unwrap_or((0, a));
        return (*closest, TrianglePointLocation::OnVertex(i as u32));
    }

    let v = vb / denom;
    let w = vc / denom;
    (a + ab * v + ac * w, TrianglePointLocation::OnFace)
}

#[cfg(test)]
mod test {
    use super::{closest_point_on_triangle_with_location, TrianglePointLocation};
    use crate::math::Point;

    #[test]
    fn project_on_each_feature() {
        let a = Point::new(0.0, 0.0, 0.0);
        let b = Point::new(1.0, 0.0, 0.0);
        let c = Point::new(0.0, 1.0, 0.0);

        let cases = [
            (Point::new(-1.0, -1.0, 0.5), a, TrianglePointLocation::OnVertex(0)),
            (Point::new(2.0, -0.5, 0.0), b, TrianglePointLocation::OnVertex(1)),
            (Point::new(-0.1, 3.0, 1.0), c, TrianglePointLocation::OnVertex(2)),
            (
                Point::new(0.5, -1.0, 0.0),
                Point::new(0.5, 0.0, 0.0),
                TrianglePointLocation::OnEdge(0),
            ),
            (
                Point::new(1.0, 1.0, 0.0),
                Point::new(0.5, 0.5, 0.0),
                TrianglePointLocation::OnEdge(1),
            ),
            (
                Point::new(-2.0, 0.5, 0.0),
                Point::new(0.0, 0.5, 0.0),
                TrianglePointLocation::OnEdge(2),
            ),
            (
                Point::new(0.25, 0.25, 5.0),
                Point::new(0.25, 0.25, 0.0),
                TrianglePointLocation::OnFace,
            ),
        ];

        for (pt, expected, location) in cases {
            let (proj, loc) = closest_point_on_triangle_with_location(&a, &b, &c, &pt);
            assert_relative_eq!(proj, expected, epsilon = 1.0e-6);
            assert_eq!(loc, location);
        }
    }
}
