//! Small scripts wiring graph functions to a viewer [`Context`](crate::view::Context).

pub use self::bounding_sphere::{bounding_sphere, BoundingSphereDemo};

mod bounding_sphere;

/// The names of the demos, as accepted by [`run`].
pub const DEMOS: &[&str] = &["bounding-sphere"];

/// Builds the demo with the given name into `ctx`.
///
/// Returns `Ok(false)` if no demo has this name.
pub fn run(name: &str, ctx: &mut crate::view::Context) -> Result<bool, crate::view::ViewError> {
    match name {
        "bounding-sphere" => bounding_sphere(ctx).map(|_| true),
        _ => Ok(false),
    }
}
