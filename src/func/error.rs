use super::{FunctionId, RegisterId};
use crate::bounding_volume::BoundingSphereError;
use crate::shape::TriMeshBuilderError;
use crate::transformation::ConvexHullError;

/// Errors raised while building or evaluating the function graph.
#[derive(thiserror::Error, Debug)]
pub enum FuncError {
    /// The register doesn't exist, or was freed with the function owning it.
    #[error("the register {0:?} does not exist")]
    MissingRegister(RegisterId),
    /// The function doesn't exist.
    #[error("the function {0:?} does not exist")]
    MissingFunction(FunctionId),
    /// A register was read as a type different from the one it holds.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// The requested type.
        expected: &'static str,
        /// The type of the stored value.
        found: &'static str,
    },
    /// A function read an input it wasn't given.
    #[error("the input {0} is missing")]
    MissingInput(usize),
    /// A function was given an input it can't process.
    #[error("invalid input to {function}: {reason}")]
    InvalidInput {
        /// The name of the function.
        function: &'static str,
        /// Why the input was rejected.
        reason: String,
    },
    /// A function returned a number of values different from its number of outputs.
    #[error("{function} returned {found} values instead of {expected}")]
    OutputCount {
        /// The name of the function.
        function: String,
        /// The number of output registers of the function.
        expected: usize,
        /// The number of values returned.
        found: usize,
    },
    /// A geometric algorithm failed.
    #[error("geometry error: {0}")]
    Geometry(String),
    /// A function failed while being evaluated.
    #[error("evaluation of {function} failed: {source}")]
    Evaluation {
        /// The name of the failed function.
        function: String,
        /// The error returned by the function.
        source: Box<FuncError>,
    },
}

impl FuncError {
    /// The innermost error, skipping the `Evaluation` wrappers.
    pub fn root_cause(&self) -> &FuncError {
        match self {
            FuncError::Evaluation { source, .. } => source.root_cause(),
            err => err,
        }
    }
}

impl From<BoundingSphereError> for FuncError {
    fn from(err: BoundingSphereError) -> Self {
        FuncError::Geometry(err.to_string())
    }
}

impl From<ConvexHullError> for FuncError {
    fn from(err: ConvexHullError) -> Self {
        FuncError::Geometry(err.to_string())
    }
}

impl From<TriMeshBuilderError> for FuncError {
    fn from(err: TriMeshBuilderError) -> Self {
        FuncError::Geometry(err.to_string())
    }
}

#[cfg(feature = "wavefront")]
impl From<crate::transformation::WavefrontError> for FuncError {
    fn from(err: crate::transformation::WavefrontError) -> Self {
        FuncError::Geometry(err.to_string())
    }
}
