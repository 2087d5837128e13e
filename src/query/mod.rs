//! Non-persistent geometric queries.

pub use self::point_triangle::{
    closest_point_on_triangle, closest_point_on_triangle_with_location, TrianglePointLocation,
};

mod point_triangle;
