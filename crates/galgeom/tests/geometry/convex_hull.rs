use galgeom::bounding_volume::Aabb;
use galgeom::math::{Point, Real};
use galgeom::shape::{MeshCentroidType, TriMesh};
use galgeom::transformation;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn hull_of_points_on_a_sphere() {
    let mut rng = StdRng::seed_from_u64(5);
    let pts: Vec<Point<Real>> = (0..300)
        .map(|_| {
            let theta: Real = rng.gen_range(0.0..std::f32::consts::TAU);
            let z: Real = rng.gen_range(-1.0..1.0);
            let r = (1.0 - z * z).sqrt();
            Point::new(r * theta.cos(), r * theta.sin(), z)
        })
        .collect();

    let (vertices, indices) = transformation::try_convex_hull(&pts).unwrap();
    let hull = TriMesh::new(vertices, indices).unwrap();

    // Closed genus-0 triangle mesh.
    assert_eq!(hull.num_triangles(), 2 * hull.vertices().len() - 4);
    // Bounded by the unit ball.
    let volume = hull.volume();
    assert!(volume > 0.0 && volume <= 4.0 / 3.0 * std::f32::consts::PI);
    assert_relative_eq!(
        hull.centroid(MeshCentroidType::VolumeBased),
        Point::origin(),
        epsilon = 0.1
    );
}

#[test]
fn hull_of_a_sampled_box_stays_inside_of_it() {
    let aabb = Aabb::new(Point::new(-1.0, -2.0, -3.0), Point::new(1.0, 2.0, 3.0));
    let pts = aabb.sample_points(1000, &mut StdRng::seed_from_u64(9));
    let (vertices, indices) = transformation::try_convex_hull(&pts).unwrap();
    let hull = TriMesh::new(vertices, indices).unwrap();

    assert!(hull.vertices().iter().all(|v| pts.contains(v)));
    assert!(hull.volume() <= aabb.volume());
    // 1000 uniform samples fill most of the box.
    assert!(hull.volume() > 0.8 * aabb.volume());

    for [a, b, c] in hull.triangles() {
        let n = (b - a).cross(&(c - a));
        assert!(pts.iter().all(|p| n.dot(&(p - a)) <= 1.0e-3));
    }
}

#[test]
fn convex_hull_logs_and_returns_nothing_on_failure() {
    let flat = [
        Point::new(0.0, 0.0, 0.0),
        Point::new(1.0, 0.0, 0.0),
        Point::new(0.0, 1.0, 0.0),
        Point::new(1.0, 1.0, 0.0),
    ];
    let (vertices, indices) = transformation::convex_hull(&flat);
    assert!(vertices.is_empty());
    assert!(indices.is_empty());
}
