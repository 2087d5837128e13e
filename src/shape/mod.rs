//! Shapes supported by galgeom.

pub use self::circle2d::Circle2d;
pub use self::line2d::Line2d;
pub use self::plane::Plane;
pub use self::point_cloud::PointCloud;
pub use self::trimesh::{MeshCentroidType, TriMesh, TriMeshBuilderError};

mod circle2d;
mod line2d;
mod plane;
mod point_cloud;
mod trimesh;
