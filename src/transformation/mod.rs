//! Transformation of point sets and meshes.

pub use self::convex_hull3::{convex_hull, try_convex_hull, ConvexHullError};
#[cfg(feature = "wavefront")]
pub use self::wavefront::WavefrontError;

mod convex_hull3;
#[cfg(feature = "wavefront")]
mod wavefront;
