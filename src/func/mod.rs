//! A lazily evaluated function graph.
//!
//! A [`Store`] owns registers holding values and the functions computing
//! them. Functions are only run when one of their outputs is read while
//! dirty, and setting a [`Variable`] invalidates everything downstream:
//!
//! ```
//! use galgeom::func::{geom, Store};
//!
//! let mut store = Store::with_seed(0);
//! let lo = geom::number_f32(&mut store, -1.0);
//! let hi = geom::number_f32(&mut store, 1.0);
//! let mins = geom::vec3(&mut store, lo, lo, lo).unwrap();
//! let maxs = geom::vec3(&mut store, hi, hi, hi).unwrap();
//! let aabb = geom::box3(&mut store, mins, maxs).unwrap();
//! let count = store.variable(10);
//! let cloud = geom::random_point_cloud_from_box(&mut store, aabb, count.output()).unwrap();
//!
//! assert_eq!(store.get(cloud).unwrap().len(), 10);
//! store.set(&count, 20).unwrap();
//! assert_eq!(store.get(cloud).unwrap().len(), 20);
//! ```

pub use self::error::FuncError;
pub use self::store::{
    input, AnyOutput, Datum, Function, FunctionId, Output, RegisterId, Store, Variable,
};

mod error;
pub mod geom;
pub mod mesh;
mod store;
