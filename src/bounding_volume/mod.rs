//! Bounding volumes.

#[doc(inline)]
pub use crate::bounding_volume::aabb::Aabb;
#[doc(inline)]
pub use crate::bounding_volume::aabb2::Aabb2;
#[doc(inline)]
pub use crate::bounding_volume::bounding_sphere::BoundingSphere;
#[doc(inline)]
pub use crate::bounding_volume::bounding_volume::BoundingVolume;
pub use crate::bounding_volume::minimal_bounding_sphere::{
    minimal_bounding_sphere, BoundingSphereError, SupportPoints,
};

#[doc(hidden)]
pub mod aabb;
#[doc(hidden)]
pub mod aabb2;
#[doc(hidden)]
pub mod bounding_sphere;
mod bounding_sphere_utils;
#[doc(hidden)]
pub mod bounding_volume;
mod minimal_bounding_sphere;

/// Free functions for some special cases of bounding-volume computation.
pub mod details {
    pub use super::bounding_sphere_utils::{
        point_cloud_bounding_sphere, point_cloud_bounding_sphere_with_center,
    };
}
