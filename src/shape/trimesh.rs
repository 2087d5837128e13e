use crate::bounding_volume::{Aabb, BoundingSphere};
use crate::math::{Point, Real, Vector};
use crate::query;
use crate::shape::Plane;
use crate::utils;
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::RTree;
use std::collections::HashMap;
use std::fmt;

type FaceEnvelope = GeomWithData<Rectangle<[Real; 3]>, u32>;

/// Indicated an inconsistency while building a triangle mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriMeshBuilderError {
    /// A triangle references a vertex that doesn't exist.
    #[error("the triangle {triangle} references the vertex {vertex} which is out of bounds.")]
    IndexOutOfBounds {
        /// The index of the faulty triangle.
        triangle: u32,
        /// The out-of-bounds vertex index.
        vertex: u32,
    },
}

/// How the centroid of a mesh is computed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum MeshCentroidType {
    /// The center of mass of the solid enclosed by the mesh.
    ///
    /// Falls back to [`MeshCentroidType::AreaBased`] if the mesh encloses no volume.
    #[default]
    VolumeBased,
    /// The center of mass of the mesh surface.
    AreaBased,
    /// The average of the mesh vertices.
    VertexBased,
}

/// A triangle mesh.
///
/// The faces are indexed by an R-tree over their bounding boxes, which
/// accelerates the sphere and closest-point queries.
#[derive(Clone)]
pub struct TriMesh {
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
    face_tree: RTree<FaceEnvelope>,
}

impl fmt::Debug for TriMesh {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TriMesh")
            .field("vertices", &self.vertices)
            .field("indices", &self.indices)
            .finish()
    }
}

impl PartialEq for TriMesh {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices && self.indices == other.indices
    }
}

impl Default for TriMesh {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            face_tree: RTree::new(),
        }
    }
}

impl TriMesh {
    /// Creates a new triangle mesh from a vertex buffer and an index buffer.
    ///
    /// Every index must refer to an element of `vertices`. An empty mesh is allowed.
    pub fn new(
        vertices: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
    ) -> Result<Self, TriMeshBuilderError> {
        for (triangle, idx) in indices.iter().enumerate() {
            if let Some(vertex) = idx.iter().find(|i| **i as usize >= vertices.len()) {
                return Err(TriMeshBuilderError::IndexOutOfBounds {
                    triangle: triangle as u32,
                    vertex: *vertex,
                });
            }
        }

        let face_tree = Self::build_face_tree(&vertices, &indices);
        Ok(Self {
            vertices,
            indices,
            face_tree,
        })
    }

    fn build_face_tree(vertices: &[Point<Real>], indices: &[[u32; 3]]) -> RTree<FaceEnvelope> {
        let envelopes: Vec<FaceEnvelope> = indices
            .iter()
            .enumerate()
            .map(|(i, idx)| {
                let aabb = Aabb::from_points(idx.iter().map(|k| &vertices[*k as usize]));
                let mins: [Real; 3] = aabb.mins.coords.into();
                let maxs: [Real; 3] = aabb.maxs.coords.into();
                GeomWithData::new(Rectangle::from_corners(mins, maxs), i as u32)
            })
            .collect();
        RTree::bulk_load(envelopes)
    }

    /// The vertex buffer of this mesh.
    #[inline]
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The index buffer of this mesh.
    #[inline]
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// The number of triangles of this mesh.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if this mesh has no triangle.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The three vertices of the `i`-th triangle.
    #[inline]
    pub fn triangle(&self, i: u32) -> [Point<Real>; 3] {
        let idx = self.indices[i as usize];
        idx.map(|k| self.vertices[k as usize])
    }

    /// An iterator through all the triangles of this mesh.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = [Point<Real>; 3]> + '_ {
        (0..self.indices.len() as u32).map(move |i| self.triangle(i))
    }

    /// The smallest `Aabb` containing every vertex of this mesh.
    ///
    /// This is an invalid `Aabb` if the mesh has no vertex.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(&self.vertices)
    }

    /// The signed volume enclosed by this mesh.
    ///
    /// This is positive for a closed mesh with outward-facing, counter-clockwise triangles.
    pub fn volume(&self) -> Real {
        self.triangles()
            .map(|[a, b, c]| a.coords.dot(&b.coords.cross(&c.coords)))
            .sum::<Real>()
            / 6.0
    }

    /// The total area of the mesh triangles.
    pub fn area(&self) -> Real {
        self.triangles()
            .map(|[a, b, c]| (b - a).cross(&(c - a)).norm() * 0.5)
            .sum()
    }

    /// The centroid of this mesh, computed with the given method.
    ///
    /// Returns the origin if the mesh is empty.
    pub fn centroid(&self, centroid_type: MeshCentroidType) -> Point<Real> {
        match centroid_type {
            MeshCentroidType::VertexBased => {
                if self.vertices.is_empty() {
                    Point::origin()
                } else {
                    utils::center(&self.vertices)
                }
            }
            MeshCentroidType::AreaBased => {
                let mut total = 0.0;
                let mut weighted = Vector::zeros();
                for [a, b, c] in self.triangles() {
                    let area = (b - a).cross(&(c - a)).norm() * 0.5;
                    weighted += (a.coords + b.coords + c.coords) * (area / 3.0);
                    total += area;
                }

                if total > crate::math::DEFAULT_EPSILON {
                    Point::from(weighted / total)
                } else {
                    self.centroid(MeshCentroidType::VertexBased)
                }
            }
            MeshCentroidType::VolumeBased => {
                let mut total = 0.0;
                let mut weighted = Vector::zeros();
                for [a, b, c] in self.triangles() {
                    // Tetrahedron formed with the origin.
                    let vol = a.coords.dot(&b.coords.cross(&c.coords)) / 6.0;
                    weighted += (a.coords + b.coords + c.coords) * (vol / 4.0);
                    total += vol;
                }

                if total.abs() > crate::math::DEFAULT_EPSILON {
                    Point::from(weighted / total)
                } else {
                    self.centroid(MeshCentroidType::AreaBased)
                }
            }
        }
    }

    /// Returns a copy of this mesh with all its vertices scaled uniformly about the origin.
    pub fn scaled(&self, scale: Real) -> Self {
        let vertices: Vec<_> = self.vertices.iter().map(|pt| pt * scale).collect();
        let face_tree = Self::build_face_tree(&vertices, &self.indices);
        Self {
            vertices,
            indices: self.indices.clone(),
            face_tree,
        }
    }

    /// Returns a copy of this mesh with all its vertices translated by `shift`.
    pub fn translated(&self, shift: &Vector<Real>) -> Self {
        let vertices: Vec<_> = self.vertices.iter().map(|pt| pt + shift).collect();
        let face_tree = Self::build_face_tree(&vertices, &self.indices);
        Self {
            vertices,
            indices: self.indices.clone(),
            face_tree,
        }
    }

    /// The part of this mesh behind `plane`, i.e., on the side opposite to its normal.
    ///
    /// Triangles crossing the plane are split along it and the cut is left
    /// open. Vertices closer than `epsilon` to the plane are considered to lie
    /// on it, so triangles lying on the plane are kept. Vertices no longer
    /// referenced by a triangle are dropped.
    pub fn clip_with_plane(&self, plane: &Plane, epsilon: Real) -> Self {
        let mut dists: Vec<Real> = self
            .vertices
            .iter()
            .map(|pt| plane.distance_to_point(pt))
            .collect();
        // -1 behind the plane, 0 on it, 1 in front of it.
        let mut sides: Vec<i8> = dists
            .iter()
            .map(|d| {
                if *d < -epsilon {
                    -1
                } else if *d > epsilon {
                    1
                } else {
                    0
                }
            })
            .collect();

        if !sides.contains(&1) {
            return self.clone();
        }

        // Split the triangles with an edge crossing the plane.
        let mut vertices = self.vertices.clone();
        let mut indices = self.indices.clone();
        let mut intersections = HashMap::new();
        let mut k = 0;

        while k != indices.len() {
            let mut ic = 0;
            while ic < 3 {
                let idx = indices[k];
                let ia = idx[(ic + 1) % 3];
                let ib = idx[(ic + 2) % 3];
                let icorner = idx[ic];

                if sides[ia as usize] * sides[ib as usize] == -1 {
                    let mid = *intersections
                        .entry((ia.min(ib), ia.max(ib)))
                        .or_insert_with(|| {
                            let (da, db) = (dists[ia as usize], dists[ib as usize]);
                            let (a, b) = (vertices[ia as usize], vertices[ib as usize]);
                            vertices.push(a + (b - a) * (da / (da - db)));
                            dists.push(0.0);
                            sides.push(0);
                            (vertices.len() - 1) as u32
                        });

                    indices[k] = [icorner, ia, mid];
                    indices.push([ib, icorner, mid]);
                    // The remaining crossing edge of `indices[k]`, if any, is opposite to `mid`.
                    ic = 2;
                    continue;
                }

                ic += 1;
            }

            k += 1;
        }

        let mut remap = vec![u32::MAX; vertices.len()];
        let mut kept_vertices = Vec::new();
        let mut kept_indices = Vec::new();

        for idx in indices {
            if idx.iter().any(|i| sides[*i as usize] > 0) {
                continue;
            }

            kept_indices.push(idx.map(|i| {
                let new_id = &mut remap[i as usize];
                if *new_id == u32::MAX {
                    *new_id = kept_vertices.len() as u32;
                    kept_vertices.push(vertices[i as usize]);
                }
                *new_id
            }));
        }

        log::trace!(
            "clipped {} triangles into {}",
            self.indices.len(),
            kept_indices.len()
        );
        let face_tree = Self::build_face_tree(&kept_vertices, &kept_indices);
        Self {
            vertices: kept_vertices,
            indices: kept_indices,
            face_tree,
        }
    }

    /// Builds the sub-mesh made of the given faces, in the given order.
    ///
    /// Only the vertices referenced by these faces are kept. Out-of-range face
    /// indices are ignored.
    pub fn extract_faces(&self, faces: &[u32]) -> Self {
        let mut vertices = self.vertices.clone();
        let mut indices: Vec<[u32; 3]> = faces
            .iter()
            .filter_map(|i| self.indices.get(*i as usize).copied())
            .collect();
        utils::remove_unused_points(&mut vertices, &mut indices);
        let face_tree = Self::build_face_tree(&vertices, &indices);
        Self {
            vertices,
            indices,
            face_tree,
        }
    }

    /// The indices of the faces having at least one point inside of `sphere`, in increasing order.
    pub fn query_sphere(&self, sphere: &BoundingSphere) -> Vec<u32> {
        let center = sphere.center();
        let r2 = sphere.radius() * sphere.radius();
        let query: [Real; 3] = center.coords.into();
        let mut result: Vec<u32> = self
            .face_tree
            .locate_within_distance(query, r2)
            .map(|face| face.data)
            .filter(|i| {
                let [a, b, c] = self.triangle(*i);
                let proj = query::closest_point_on_triangle(&a, &b, &c, center);
                na::distance_squared(&proj, center) <= r2
            })
            .collect();
        result.sort_unstable();
        result
    }

    /// The point of this mesh closest to `pt`.
    ///
    /// Returns `None` if the mesh is empty or if no point is closer than `max_dist`.
    pub fn closest_point(&self, pt: &Point<Real>, max_dist: Real) -> Option<Point<Real>> {
        let max_dist2 = if max_dist.is_finite() {
            max_dist * max_dist
        } else {
            Real::MAX
        };
        let query: [Real; 3] = pt.coords.into();
        let mut best: Option<(Real, Point<Real>)> = None;

        for (face, envelope_dist2) in self
            .face_tree
            .nearest_neighbor_iter_with_distance_2(&query)
        {
            let best_dist2 = best.map(|b| b.0).unwrap_or(max_dist2);
            if envelope_dist2 > best_dist2 {
                break;
            }

            let [a, b, c] = self.triangle(face.data);
            let proj = query::closest_point_on_triangle(&a, &b, &c, pt);
            let dist2 = na::distance_squared(&proj, pt);
            if dist2 <= best_dist2 {
                best = Some((dist2, proj));
            }
        }

        best.map(|b| b.1)
    }
}

#[cfg(test)]
mod test {
    use super::{MeshCentroidType, TriMesh, TriMeshBuilderError};
    use crate::bounding_volume::BoundingSphere;
    use crate::math::{Point, Real, Vector};
    use crate::shape::Plane;

    fn unit_cube() -> TriMesh {
        let vertices = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
            Point::new(1.0, 0.0, 1.0),
            Point::new(1.0, 1.0, 1.0),
            Point::new(0.0, 1.0, 1.0),
        ];
        let indices = vec![
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [1, 2, 6],
            [1, 6, 5],
            [2, 3, 7],
            [2, 7, 6],
            [3, 0, 4],
            [3, 4, 7],
        ];
        TriMesh::new(vertices, indices).unwrap()
    }

    #[test]
    fn reject_out_of_bounds_index() {
        let err = TriMesh::new(vec![Point::origin(); 2], vec![[0, 1, 2]]).unwrap_err();
        assert_eq!(
            err,
            TriMeshBuilderError::IndexOutOfBounds {
                triangle: 0,
                vertex: 2
            }
        );
        assert!(TriMesh::new(vec![], vec![]).unwrap().is_empty());
    }

    #[test]
    fn cube_volume_area_and_centroids() {
        let cube = unit_cube();
        let half = Point::new(0.5, 0.5, 0.5);

        assert_relative_eq!(cube.volume(), 1.0, epsilon = 1.0e-6);
        assert_relative_eq!(cube.area(), 6.0, epsilon = 1.0e-6);
        assert_relative_eq!(cube.centroid(MeshCentroidType::VolumeBased), half, epsilon = 1.0e-6);
        assert_relative_eq!(cube.centroid(MeshCentroidType::AreaBased), half, epsilon = 1.0e-6);
        assert_relative_eq!(cube.centroid(MeshCentroidType::VertexBased), half, epsilon = 1.0e-6);

        let scaled = cube.scaled(2.0);
        assert_relative_eq!(scaled.volume(), 8.0, epsilon = 1.0e-5);
        assert_relative_eq!(scaled.aabb().maxs, Point::new(2.0, 2.0, 2.0));

        let shifted = cube.translated(&Vector::new(1.0, 0.0, 0.0));
        assert_relative_eq!(shifted.volume(), 1.0, epsilon = 1.0e-5);
        assert_relative_eq!(
            shifted.centroid(MeshCentroidType::VolumeBased),
            Point::new(1.5, 0.5, 0.5),
            epsilon = 1.0e-5
        );
    }

    #[test]
    fn sphere_query_and_extraction() {
        let cube = unit_cube();
        // Only touches the bottom face (z = 0), away from the sides.
        let sphere = BoundingSphere::new(Point::new(0.5, 0.5, -0.2), 0.3);
        let faces = cube.query_sphere(&sphere);
        assert_eq!(faces, vec![0, 1]);

        let sub = cube.extract_faces(&faces);
        assert_eq!(sub.num_triangles(), 2);
        assert_eq!(sub.vertices().len(), 4);
        assert_relative_eq!(sub.area(), 1.0, epsilon = 1.0e-6);

        let far = BoundingSphere::new(Point::new(10.0, 10.0, 10.0), 1.0);
        assert!(cube.query_sphere(&far).is_empty());
    }

    #[test]
    fn closest_points() {
        let cube = unit_cube();
        let pt = Point::new(0.5, 0.25, 3.0);
        let proj = cube.closest_point(&pt, Real::MAX).unwrap();
        assert_relative_eq!(proj, Point::new(0.5, 0.25, 1.0), epsilon = 1.0e-6);

        let inside = Point::new(0.5, 0.5, 0.9);
        let proj = cube.closest_point(&inside, Real::MAX).unwrap();
        assert_relative_eq!(proj, Point::new(0.5, 0.5, 1.0), epsilon = 1.0e-6);

        assert!(cube.closest_point(&pt, 1.0).is_none());
        assert!(TriMesh::default().closest_point(&pt, Real::MAX).is_none());
    }

    #[test]
    fn clip_with_plane() {
        let cube = unit_cube();
        let eps = 1.0e-6;
        let half = Plane::new(Point::new(0.0, 0.0, 0.5), Vector::z()).unwrap();

        let bottom = cube.clip_with_plane(&half, eps);
        assert_relative_eq!(bottom.area(), 3.0, epsilon = 1.0e-5);
        assert_relative_eq!(bottom.aabb().mins, Point::origin());
        assert_relative_eq!(bottom.aabb().maxs, Point::new(1.0, 1.0, 0.5), epsilon = 1.0e-6);
        assert!(bottom.vertices().iter().all(|pt| half.distance_to_point(pt) <= eps));

        let flipped = Plane::new(Point::new(0.0, 0.0, 0.5), -Vector::z()).unwrap();
        let top = cube.clip_with_plane(&flipped, eps);
        assert_relative_eq!(top.area(), 3.0, epsilon = 1.0e-5);
        assert_relative_eq!(top.aabb().mins, Point::new(0.0, 0.0, 0.5), epsilon = 1.0e-6);

        // Faces lying on the plane are kept.
        let floor = Plane::new(Point::origin(), Vector::z()).unwrap();
        let face = cube.clip_with_plane(&floor, eps);
        assert_eq!(face.num_triangles(), 2);
        assert_eq!(face.vertices().len(), 4);

        let above = Plane::new(Point::new(0.0, 0.0, 2.0), Vector::z()).unwrap();
        assert_eq!(cube.clip_with_plane(&above, eps), cube);
        let below = Plane::new(Point::new(0.0, 0.0, -1.0), Vector::z()).unwrap();
        let nothing = cube.clip_with_plane(&below, eps);
        assert!(nothing.is_empty());
        assert!(nothing.vertices().is_empty());
    }

    #[test]
    fn clip_through_a_corner() {
        let cube = unit_cube();
        let normal = Vector::new(1.0, 1.0, 1.0);
        let plane = Plane::new(Point::new(0.5, 0.5, 0.5), normal).unwrap();
        let clipped = cube.clip_with_plane(&plane, 1.0e-6);

        // The diagonal plane splits the surface in two halves of equal area.
        assert_relative_eq!(clipped.area(), 3.0, epsilon = 1.0e-4);
        assert!(clipped
            .vertices()
            .iter()
            .all(|pt| plane.distance_to_point(pt) <= 1.0e-5));
        assert!(clipped.triangles().all(|[a, b, c]| {
            let n = (b - a).cross(&(c - a));
            n.norm() > 0.0
        }));
    }
}
