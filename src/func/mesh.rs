//! Graph functions operating on triangle meshes.

use super::{input, Datum, FuncError, Output, Store};
use crate::bounding_volume::{Aabb, BoundingSphere};
use crate::math::{Point, Real};
use crate::shape::{MeshCentroidType, Plane, PointCloud, TriMesh};
use std::any::type_name;
use std::sync::Arc;

/// The distance below which a vertex is considered on a clipping plane.
const CLIP_EPSILON: Real = 1.0e-6;

/// The volume-based centroid of a mesh.
pub fn mesh_centroid(
    store: &mut Store,
    mesh: Output<TriMesh>,
) -> Result<Output<Point<Real>>, FuncError> {
    store.map1("mesh_centroid", mesh, |mesh: &TriMesh| {
        Ok(mesh.centroid(MeshCentroidType::VolumeBased))
    })
}

/// The signed volume enclosed by a mesh.
pub fn mesh_volume(store: &mut Store, mesh: Output<TriMesh>) -> Result<Output<Real>, FuncError> {
    store.map1("mesh_volume", mesh, |mesh: &TriMesh| Ok(mesh.volume()))
}

/// The surface area of a mesh.
pub fn mesh_surface_area(
    store: &mut Store,
    mesh: Output<TriMesh>,
) -> Result<Output<Real>, FuncError> {
    store.map1("mesh_surface_area", mesh, |mesh: &TriMesh| Ok(mesh.area()))
}

/// Loads a mesh from a Wavefront (`.obj`) file.
///
/// This function is enabled by the `wavefront` feature flag.
#[cfg(feature = "wavefront")]
pub fn load_obj_file(
    store: &mut Store,
    path: Output<String>,
) -> Result<Output<TriMesh>, FuncError> {
    store.map1("load_obj_file", path, |path: &String| {
        Ok(TriMesh::from_obj_file(path)?)
    })
}

/// A copy of the mesh scaled uniformly about the origin.
pub fn scale_mesh(
    store: &mut Store,
    mesh: Output<TriMesh>,
    scale: Output<Real>,
) -> Result<Output<TriMesh>, FuncError> {
    store.map2("scale_mesh", mesh, scale, |mesh: &TriMesh, scale: &Real| {
        Ok(mesh.scaled(*scale))
    })
}

/// The part of a mesh behind a plane, opposite to the plane normal.
///
/// Triangles crossing the plane are split along it.
pub fn clip_mesh(
    store: &mut Store,
    mesh: Output<TriMesh>,
    plane: Output<Plane>,
) -> Result<Output<TriMesh>, FuncError> {
    store.map2("clip_mesh", mesh, plane, |mesh: &TriMesh, plane: &Plane| {
        Ok(mesh.clip_with_plane(plane, CLIP_EPSILON))
    })
}

/// The faces of a mesh touching a sphere.
///
/// Outputs the sub-mesh made of these faces, their indices in the input
/// mesh, and their count.
pub fn mesh_sphere_query(
    store: &mut Store,
    mesh: Output<TriMesh>,
    sphere: Output<BoundingSphere>,
) -> Result<(Output<TriMesh>, Output<Vec<i32>>, Output<i32>), FuncError> {
    let func = |inputs: &[Arc<dyn Datum>]| -> Result<Vec<Arc<dyn Datum>>, FuncError> {
        let mesh: &TriMesh = input(inputs, 0)?;
        let sphere: &BoundingSphere = input(inputs, 1)?;
        let faces = mesh.query_sphere(sphere);
        let submesh = mesh.extract_faces(&faces);
        let indices: Vec<i32> = faces.iter().map(|i| *i as i32).collect();
        let count = indices.len() as i32;

        Ok(vec![
            Arc::new(submesh) as Arc<dyn Datum>,
            Arc::new(indices) as Arc<dyn Datum>,
            Arc::new(count) as Arc<dyn Datum>,
        ])
    };

    let (_, outputs) = store.add_function(
        "mesh_sphere_query",
        &[mesh.register(), sphere.register()],
        &[
            type_name::<TriMesh>(),
            type_name::<Vec<i32>>(),
            type_name::<i32>(),
        ],
        Box::new(func),
    )?;
    Ok((outputs[0].typed()?, outputs[1].typed()?, outputs[2].typed()?))
}

/// The points of a mesh closest to each point of a cloud, in the same order.
///
/// Fails with [`FuncError::InvalidInput`] if the mesh has no face.
pub fn closest_points_on_mesh(
    store: &mut Store,
    mesh: Output<TriMesh>,
    cloud: Output<PointCloud>,
) -> Result<Output<PointCloud>, FuncError> {
    store.map2(
        "closest_points_on_mesh",
        mesh,
        cloud,
        |mesh: &TriMesh, cloud: &PointCloud| {
            cloud
                .iter()
                .map(|pt| {
                    mesh.closest_point(pt, Real::MAX)
                        .ok_or_else(|| FuncError::InvalidInput {
                            function: "closest_points_on_mesh",
                            reason: "the mesh has no face".to_string(),
                        })
                })
                .collect()
        },
    )
}

/// The bounding box of a mesh.
pub fn mesh_bbox(store: &mut Store, mesh: Output<TriMesh>) -> Result<Output<Aabb>, FuncError> {
    store.map1("mesh_bbox", mesh, |mesh: &TriMesh| Ok(mesh.aabb()))
}
