use crate::math::Point;
use crate::shape::{TriMesh, TriMeshBuilderError};
use obj::{Group, IndexTuple, ObjData, ObjError, Object, SimplePolygon};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Errors raised while reading or writing Wavefront (`.obj`) files.
#[derive(thiserror::Error, Debug)]
pub enum WavefrontError {
    /// The file couldn't be opened or created.
    #[error("cannot access {path}: {source}")]
    Io {
        /// The path of the file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },
    /// The obj data couldn't be parsed or written.
    #[error("invalid obj data: {0:?}")]
    Obj(ObjError),
    /// The polygons reference vertices that don't exist.
    #[error(transparent)]
    Mesh(#[from] TriMeshBuilderError),
}

impl TriMesh {
    /// Loads a triangle mesh from a Wavefront (`.obj`) file.
    ///
    /// All the objects and groups of the file are merged into a single mesh, and
    /// polygons with more than three vertices are triangulated as fans.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    pub fn from_obj_file(path: impl AsRef<Path>) -> Result<Self, WavefrontError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| WavefrontError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let data = ObjData::load_buf(BufReader::new(file)).map_err(WavefrontError::Obj)?;

        let vertices: Vec<_> = data
            .position
            .iter()
            .map(|p| Point::new(p[0], p[1], p[2]))
            .collect();

        let mut indices = Vec::new();
        for poly in data
            .objects
            .iter()
            .flat_map(|obj| obj.groups.iter())
            .flat_map(|group| group.polys.iter())
        {
            let corners = &poly.0;
            for k in 2..corners.len() {
                indices.push([
                    corners[0].0 as u32,
                    corners[k - 1].0 as u32,
                    corners[k].0 as u32,
                ]);
            }
        }

        log::debug!(
            "loaded {}: {} vertices, {} triangles",
            path.display(),
            vertices.len(),
            indices.len()
        );

        Ok(TriMesh::new(vertices, indices)?)
    }

    /// Outputs a Wavefront (`.obj`) file at the given path.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    pub fn to_obj_file(&self, path: impl AsRef<Path>) -> Result<(), WavefrontError> {
        let path = path.as_ref();
        let mut file = File::create(path).map_err(|source| WavefrontError::Io {
            path: path.display().to_string(),
            source,
        })?;

        ObjData {
            position: self.vertices().iter().map(|v| [v.x, v.y, v.z]).collect(),
            objects: vec![Object {
                groups: vec![Group {
                    polys: self
                        .indices()
                        .iter()
                        .map(|tri| {
                            SimplePolygon(
                                tri.iter()
                                    .map(|i| IndexTuple(*i as usize, None, None))
                                    .collect(),
                            )
                        })
                        .collect(),
                    name: String::new(),
                    index: 0,
                    material: None,
                }],
                name: String::new(),
            }],
            ..Default::default()
        }
        .write_to_buf(&mut file)
        .map_err(WavefrontError::Obj)
    }
}
