use galgeom::math::{Point2, Real};
use galgeom::shape::Circle2d;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn bounding_circle_encloses_random_points() {
    let mut rng = StdRng::seed_from_u64(12);
    let pts: Vec<_> = (0..200)
        .map(|_| Point2::<Real>::new(rng.gen_range(-3.0..3.0), rng.gen_range(-1.0..1.0)))
        .collect();

    let circle = Circle2d::minimal_bounding_circle(&pts).unwrap();
    let on_boundary = pts
        .iter()
        .filter(|pt| (na::distance(*pt, circle.center()) - circle.radius()).abs() < 1.0e-4)
        .count();

    assert!(pts
        .iter()
        .all(|pt| na::distance(pt, circle.center()) <= circle.radius() + 1.0e-4));
    assert!(on_boundary >= 2);
}

#[test]
fn bounding_circle_of_a_square() {
    let pts = [
        Point2::new(0.0, 0.0),
        Point2::new(2.0, 0.0),
        Point2::new(2.0, 2.0),
        Point2::new(0.0, 2.0),
        Point2::new(1.0, 1.0),
    ];
    let circle = Circle2d::minimal_bounding_circle(&pts).unwrap();

    assert_relative_eq!(*circle.center(), Point2::new(1.0, 1.0), epsilon = 1.0e-5);
    assert_relative_eq!(circle.radius(), (2.0 as Real).sqrt(), epsilon = 1.0e-5);
    assert!(Circle2d::minimal_bounding_circle(&[]).is_none());
}
