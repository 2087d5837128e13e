use crate::bounding_volume::{Aabb, BoundingSphere};
use crate::func::{geom, Output};
use crate::shape::PointCloud;
use crate::view::{Context, ShowId, ViewError};

/// The graph handles created by [`bounding_sphere`].
#[derive(Copy, Clone, Debug)]
pub struct BoundingSphereDemo {
    /// The `[-1, 1]³` box the points are sampled in.
    pub aabb: Output<Aabb>,
    /// The value of the "Point count" slider.
    pub count: Output<i32>,
    /// The sampled points.
    pub cloud: Output<PointCloud>,
    /// The minimal bounding sphere of the sampled points.
    pub sphere: Output<BoundingSphere>,
    /// The display registration of the points.
    pub cloud_show: ShowId,
    /// The display registration of the sphere.
    pub sphere_show: ShowId,
}

/// A random point cloud in the `[-1, 1]³` box, and its minimal bounding sphere.
///
/// The number of points is read from a "Point count" slider. Nothing is
/// computed until the context evaluates its outputs.
pub fn bounding_sphere(ctx: &mut Context) -> Result<BoundingSphereDemo, ViewError> {
    let store = ctx.store_mut();
    let lo = geom::number_f32(store, -1.0);
    let hi = geom::number_f32(store, 1.0);
    let mins = geom::vec3(store, lo, lo, lo)?;
    let maxs = geom::vec3(store, hi, hi, hi)?;
    let aabb = geom::box3(store, mins, maxs)?;

    let count = ctx.slider_i32("Point count", 5, 50, 25)?;

    let store = ctx.store_mut();
    let cloud = geom::random_point_cloud_from_box(store, aabb, count)?;
    let (sphere, _) = geom::bounding_sphere(store, cloud)?;

    let cloud_show = ctx.show("cloud", cloud);
    let sphere_show = ctx.show("sphere", sphere);

    Ok(BoundingSphereDemo {
        aabb,
        count,
        cloud,
        sphere,
        cloud_show,
        sphere_show,
    })
}
