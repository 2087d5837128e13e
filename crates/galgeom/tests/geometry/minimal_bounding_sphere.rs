use galgeom::bounding_volume::{details, minimal_bounding_sphere, Aabb, BoundingSphereError};
use galgeom::math::{Point, Real};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn unit_box() -> Aabb {
    Aabb::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0))
}

#[test]
fn minimal_sphere_encloses_random_clouds() {
    let mut rng = StdRng::seed_from_u64(0);

    for n in [1, 2, 3, 5, 25, 50, 500] {
        let pts = unit_box().sample_points(n, &mut rng);
        let (sphere, support) = minimal_bounding_sphere(&pts).unwrap();

        assert!(!support.is_empty() && support.len() <= 4);
        for pt in &pts {
            assert!(na::distance(pt, &sphere.center) <= sphere.radius * (1.0 + 1.0e-4) + 1.0e-6);
        }
        for pt in &support {
            assert_relative_eq!(
                na::distance(pt, &sphere.center),
                sphere.radius,
                epsilon = 1.0e-4
            );
        }

        // Never larger than the centroid-based approximation.
        let approx = details::point_cloud_bounding_sphere(&pts).unwrap();
        assert!(sphere.radius <= approx.radius + 1.0e-5);
    }
}

#[test]
fn minimal_sphere_of_cube_corners() {
    let corners = unit_box().vertices();
    let (sphere, _) = minimal_bounding_sphere(&corners).unwrap();

    assert_relative_eq!(sphere.center, Point::origin(), epsilon = 1.0e-5);
    assert_relative_eq!(sphere.radius, (3.0 as Real).sqrt(), epsilon = 1.0e-5);
}

#[test]
fn minimal_sphere_rejects_invalid_input() {
    assert_eq!(
        minimal_bounding_sphere(&[]).unwrap_err(),
        BoundingSphereError::EmptyPointSet
    );
    assert_eq!(
        minimal_bounding_sphere(&[Point::origin(), Point::new(0.0, Real::NAN, 0.0)]).unwrap_err(),
        BoundingSphereError::NonFinitePoint(1)
    );
}
