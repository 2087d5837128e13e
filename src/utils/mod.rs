//! Various unsorted geometrical and logical operators.

pub use self::center::center;
pub use self::cleanup::remove_unused_points;
pub use self::point_cloud_support_point::point_cloud_support_point_id;

mod center;
mod cleanup;
mod point_cloud_support_point;
