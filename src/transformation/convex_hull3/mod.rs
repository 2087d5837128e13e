pub use self::convex_hull::{convex_hull, try_convex_hull};
pub use self::error::ConvexHullError;
use self::hull_face::HullFace;
use self::initial_simplex::initial_simplex;

mod convex_hull;
mod error;
mod hull_face;
mod initial_simplex;
