/// Errors that can occur during convex hull computation.
///
/// ```
/// use galgeom::math::Point;
/// use galgeom::transformation::{try_convex_hull, ConvexHullError};
///
/// let flat = [
///     Point::new(0.0, 0.0, 0.0),
///     Point::new(1.0, 0.0, 0.0),
///     Point::new(0.0, 1.0, 0.0),
///     Point::new(1.0, 1.0, 0.0),
/// ];
/// assert_eq!(try_convex_hull(&flat), Err(ConvexHullError::MissingSupportPoint));
/// ```
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ConvexHullError {
    /// The hull topology became inconsistent, usually because of rounding errors.
    #[error("Internal error: {0}")]
    InternalError(&'static str),
    /// The input points are not finite, or they are all collinear or coplanar.
    #[error("Input points are either invalid (NaN) or are almost coplanar.")]
    MissingSupportPoint,
    /// Less than four points were given.
    #[error("Less than four points found in the input.")]
    IncompleteInput,
}
