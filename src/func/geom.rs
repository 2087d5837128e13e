//! Graph functions building and processing geometric values.

use super::{input, Datum, FuncError, Output, Store};
use crate::bounding_volume::{self, Aabb, Aabb2, BoundingSphere};
use crate::math::{Point, Point2, Real};
use crate::shape::{Circle2d, Line2d, Plane, PointCloud, TriMesh};
use crate::transformation;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::any::type_name;
use std::sync::Arc;

/// A constant scalar.
pub fn number_f32(store: &mut Store, value: Real) -> Output<Real> {
    store.constant(value)
}

/// A constant integer.
pub fn number_i32(store: &mut Store, value: i32) -> Output<i32> {
    store.constant(value)
}

/// A 3D point from its coordinates.
pub fn vec3(
    store: &mut Store,
    x: Output<Real>,
    y: Output<Real>,
    z: Output<Real>,
) -> Result<Output<Point<Real>>, FuncError> {
    store.map3("vec3", x, y, z, |x: &Real, y: &Real, z: &Real| {
        Ok(Point::new(*x, *y, *z))
    })
}

/// A 2D point from its coordinates.
pub fn vec2(
    store: &mut Store,
    x: Output<Real>,
    y: Output<Real>,
) -> Result<Output<Point2<Real>>, FuncError> {
    store.map2("vec2", x, y, |x: &Real, y: &Real| Ok(Point2::new(*x, *y)))
}

/// The plane going through `point` with the given normal.
///
/// Fails with [`FuncError::InvalidInput`] if the normal is zero.
pub fn plane(
    store: &mut Store,
    point: Output<Point<Real>>,
    normal: Output<Point<Real>>,
) -> Result<Output<Plane>, FuncError> {
    store.map2("plane", point, normal, |pt: &Point<Real>, n: &Point<Real>| {
        Plane::new(*pt, n.coords).ok_or_else(|| FuncError::InvalidInput {
            function: "plane",
            reason: "the plane normal is zero".to_string(),
        })
    })
}

/// The 3D box with the given corners.
///
/// The corners are taken as they are: `mins <= maxs` isn't checked.
pub fn box3(
    store: &mut Store,
    mins: Output<Point<Real>>,
    maxs: Output<Point<Real>>,
) -> Result<Output<Aabb>, FuncError> {
    store.map2("box3", mins, maxs, |mins: &Point<Real>, maxs: &Point<Real>| {
        Ok(Aabb::new(*mins, *maxs))
    })
}

/// The 2D box with the given corners.
pub fn box2(
    store: &mut Store,
    mins: Output<Point2<Real>>,
    maxs: Output<Point2<Real>>,
) -> Result<Output<Aabb2>, FuncError> {
    store.map2("box2", mins, maxs, |mins: &Point2<Real>, maxs: &Point2<Real>| {
        Ok(Aabb2::new(*mins, *maxs))
    })
}

/// `count` points sampled uniformly inside of a box.
///
/// The function gets its own random generator, seeded from the store's, so
/// a store created with [`Store::with_seed`] samples reproducibly. A negative
/// count fails with [`FuncError::InvalidInput`].
pub fn random_point_cloud_from_box(
    store: &mut Store,
    aabb: Output<Aabb>,
    count: Output<i32>,
) -> Result<Output<PointCloud>, FuncError> {
    let mut rng = StdRng::seed_from_u64(store.rng().gen());
    store.map2(
        "random_point_cloud_from_box",
        aabb,
        count,
        move |aabb: &Aabb, count: &i32| {
            let n = usize::try_from(*count).map_err(|_| FuncError::InvalidInput {
                function: "random_point_cloud_from_box",
                reason: format!("negative point count {}", count),
            })?;
            log::debug!("sampling {} points in {:?}", n, aabb);
            Ok(PointCloud::from_aabb_samples(aabb, n, &mut rng))
        },
    )
}

/// A point cloud made of the given points.
pub fn point_cloud_3d(
    store: &mut Store,
    points: Output<Vec<Point<Real>>>,
) -> Result<Output<PointCloud>, FuncError> {
    store.map1("point_cloud_3d", points, |pts: &Vec<Point<Real>>| {
        Ok(PointCloud::new(pts.clone()))
    })
}

/// The convex hull of a point cloud, as a triangle mesh.
pub fn point_cloud_convex_hull(
    store: &mut Store,
    cloud: Output<PointCloud>,
) -> Result<Output<TriMesh>, FuncError> {
    store.map1("point_cloud_convex_hull", cloud, |cloud: &PointCloud| {
        let (vertices, indices) = transformation::try_convex_hull(cloud.points())?;
        Ok(TriMesh::new(vertices, indices)?)
    })
}

/// The minimal bounding sphere of a point cloud.
///
/// The second output holds the support points: the 1 to 4 points of the
/// cloud lying on the sphere and defining it. An empty cloud fails with
/// [`FuncError::Geometry`].
pub fn bounding_sphere(
    store: &mut Store,
    cloud: Output<PointCloud>,
) -> Result<(Output<BoundingSphere>, Output<PointCloud>), FuncError> {
    let func = |inputs: &[Arc<dyn Datum>]| -> Result<Vec<Arc<dyn Datum>>, FuncError> {
        let cloud: &PointCloud = input(inputs, 0)?;
        let (sphere, support) = bounding_volume::minimal_bounding_sphere(cloud.points())?;
        log::debug!(
            "bounding sphere of {} points: {:?} ({} support points)",
            cloud.len(),
            sphere,
            support.len()
        );
        let support: PointCloud = support.into_iter().collect();
        Ok(vec![
            Arc::new(sphere) as Arc<dyn Datum>,
            Arc::new(support) as Arc<dyn Datum>,
        ])
    };

    let (_, outputs) = store.add_function(
        "bounding_sphere",
        &[cloud.register()],
        &[type_name::<BoundingSphere>(), type_name::<PointCloud>()],
        Box::new(func),
    )?;
    Ok((outputs[0].typed()?, outputs[1].typed()?))
}

/// The minimal bounding circle of a set of 2D points.
pub fn bounding_circle(
    store: &mut Store,
    points: Output<Vec<Point2<Real>>>,
) -> Result<Output<Circle2d>, FuncError> {
    store.map1("bounding_circle", points, |pts: &Vec<Point2<Real>>| {
        Circle2d::minimal_bounding_circle(pts).ok_or_else(|| FuncError::InvalidInput {
            function: "bounding_circle",
            reason: "empty point set".to_string(),
        })
    })
}

/// The 2D segment between two points.
pub fn line2d(
    store: &mut Store,
    start: Output<Point2<Real>>,
    end: Output<Point2<Real>>,
) -> Result<Output<Line2d>, FuncError> {
    store.map2("line2d", start, end, |start: &Point2<Real>, end: &Point2<Real>| {
        Ok(Line2d::new(*start, *end))
    })
}
