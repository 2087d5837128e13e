use galgeom::bounding_volume::BoundingSphere;
use galgeom::math::{Point, Real, Vector};
use galgeom::shape::TriMesh;
use galgeom::transformation;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn cube_hull() -> TriMesh {
    let corners: Vec<_> = (0..8)
        .map(|i| {
            Point::new(
                (i & 1) as Real * 2.0 - 1.0,
                ((i >> 1) & 1) as Real * 2.0 - 1.0,
                ((i >> 2) & 1) as Real * 2.0 - 1.0,
            )
        })
        .collect();
    let (vertices, indices) = transformation::try_convex_hull(&corners).unwrap();
    TriMesh::new(vertices, indices).unwrap()
}

#[test]
fn closest_points_on_a_cube() {
    let cube = cube_hull();
    let mut rng = StdRng::seed_from_u64(1);

    for _ in 0..100 {
        let dir = Vector::<Real>::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let pt = Point::origin() + dir * 3.0;
        if pt.coords.amax() <= 1.0 {
            continue;
        }
        let expected = pt.map(|x: Real| x.clamp(-1.0, 1.0));
        let closest = cube.closest_point(&pt, Real::MAX).unwrap();
        assert_relative_eq!(closest, expected, epsilon = 1.0e-4);
    }

    assert!(cube
        .closest_point(&Point::new(5.0, 0.0, 0.0), 1.0)
        .is_none());
}

#[test]
fn sphere_queries_on_a_cube() {
    let cube = cube_hull();

    // Touches only the two triangles of the +x face.
    let sphere = BoundingSphere::new(Point::new(1.5, 0.0, 0.0), 0.6);
    let faces = cube.query_sphere(&sphere);
    assert_eq!(faces.len(), 2);
    for face in &faces {
        assert!(cube.triangle(*face).iter().all(|v| v.x == 1.0));
    }

    let everything = BoundingSphere::new(Point::origin(), 2.0);
    assert_eq!(cube.query_sphere(&everything).len(), 12);

    let nothing = BoundingSphere::new(Point::new(0.0, 0.0, 3.0), 1.5);
    assert!(cube.query_sphere(&nothing).is_empty());

    let sub = cube.extract_faces(&faces);
    assert_eq!(sub.num_triangles(), 2);
    assert_eq!(sub.vertices().len(), 4);
    assert_relative_eq!(sub.area(), 4.0, epsilon = 1.0e-5);
}
