/*!
galgeom
========

**galgeom** is a small geometric library written with the rust programming
language. It provides:

- geometric primitives (boxes, spheres, circles, planes, point clouds and
  triangle meshes) together with the classic algorithms operating on them
  (minimal bounding sphere/circle, convex hull, closest-point queries);
- a lazily evaluated function graph ([`func`]) that wires these algorithms
  together, re-running only what depends on a changed input;
- a headless viewer context ([`view`]) with slider inputs and named
  drawables, driven by small demo scripts ([`demos`]).

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod demos;
pub mod func;
pub mod query;
pub mod shape;
pub mod transformation;
pub mod utils;
pub mod view;

/// Aliases for the mathematical types used throughout this crate.
pub mod math {
    /// The scalar type used throughout this crate.
    pub type Real = f32;

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub type Point<N> = na::Point3<N>;

    /// The 2D point type, for the geometry of the `z = 0` plane.
    pub type Point2<N> = na::Point2<N>;

    /// The vector type.
    pub type Vector<N> = na::Vector3<N>;

    /// The 2D vector type.
    pub type Vector2<N> = na::Vector2<N>;

    /// The matrix type.
    pub type Matrix<N> = na::Matrix3<N>;
}
