use galgeom::bounding_volume::BoundingSphere;
use galgeom::func::{geom, mesh, Store};
use galgeom::math::Point;
use galgeom::shape::PointCloud;

#[test]
fn hull_of_a_random_cloud_through_the_graph() {
    let mut store = Store::with_seed(3);
    let lo = geom::number_f32(&mut store, 0.0);
    let hi = geom::number_f32(&mut store, 2.0);
    let mins = geom::vec3(&mut store, lo, lo, lo).unwrap();
    let maxs = geom::vec3(&mut store, hi, hi, hi).unwrap();
    let aabb = geom::box3(&mut store, mins, maxs).unwrap();
    let count = store.variable(200);
    let cloud = geom::random_point_cloud_from_box(&mut store, aabb, count.output()).unwrap();
    let hull = geom::point_cloud_convex_hull(&mut store, cloud).unwrap();
    let volume = mesh::mesh_volume(&mut store, hull).unwrap();
    let bbox = mesh::mesh_bbox(&mut store, hull).unwrap();
    let centroid = mesh::mesh_centroid(&mut store, hull).unwrap();

    let v = *store.get(volume).unwrap();
    assert!(v > 4.0 && v <= 8.0);
    let bbox = store.get(bbox).unwrap();
    assert!(bbox.mins.x >= 0.0 && bbox.maxs.x <= 2.0);
    assert_relative_eq!(*store.get(centroid).unwrap(), Point::new(1.0, 1.0, 1.0), epsilon = 0.15);

    let factor = geom::number_f32(&mut store, 0.5);
    let scaled = mesh::scale_mesh(&mut store, hull, factor).unwrap();
    let scaled_volume = mesh::mesh_volume(&mut store, scaled).unwrap();
    assert_relative_eq!(*store.get(scaled_volume).unwrap(), v / 8.0, max_relative = 1.0e-4);
}

#[test]
fn sphere_query_and_projection() {
    let mut store = Store::with_seed(4);
    let corners = store.constant(vec![
        Point::new(0.0, 0.0, 0.0),
        Point::new(1.0, 0.0, 0.0),
        Point::new(0.0, 1.0, 0.0),
        Point::new(0.0, 0.0, 1.0),
    ]);
    let cloud = geom::point_cloud_3d(&mut store, corners).unwrap();
    let tetra = geom::point_cloud_convex_hull(&mut store, cloud).unwrap();
    let sphere = store.constant(BoundingSphere::new(Point::new(2.0, 2.0, 2.0), 0.5));
    let (sub, faces, count) = mesh::mesh_sphere_query(&mut store, tetra, sphere).unwrap();

    assert_eq!(*store.get(count).unwrap(), 0);
    assert!(store.get(faces).unwrap().is_empty());
    assert!(store.get(sub).unwrap().is_empty());

    let probes = store.constant(PointCloud::new(vec![
        Point::new(-1.0, 0.0, 0.0),
        Point::new(0.1, 0.1, -3.0),
    ]));
    let projected = mesh::closest_points_on_mesh(&mut store, tetra, probes).unwrap();
    let projected = store.get(projected).unwrap();
    assert_eq!(projected.len(), 2);
    assert_relative_eq!(projected[0], Point::origin(), epsilon = 1.0e-5);
    assert_relative_eq!(projected[1], Point::new(0.1, 0.1, 0.0), epsilon = 1.0e-5);
}
