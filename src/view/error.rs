use crate::func::FuncError;

/// Errors raised by the viewer context.
#[derive(thiserror::Error, Debug)]
pub enum ViewError {
    /// No widget of the input panel has this label.
    #[error("no widget labeled {0:?}")]
    UnknownWidget(String),
    /// A widget with the same label already exists.
    #[error("a widget labeled {0:?} already exists")]
    DuplicateWidget(String),
    /// The slider range is empty or not a number.
    #[error("invalid range for the slider {0:?}")]
    InvalidRange(String),
    /// A widget was given an infinite or NaN value.
    #[error("the value given to {0:?} is not finite")]
    NonFiniteValue(String),
    /// A shown value has a type the viewer can't draw.
    #[error("{name}: the type {type_name} is not drawable")]
    NotDrawable {
        /// The name given to the shown value.
        name: String,
        /// The type of the shown value.
        type_name: &'static str,
    },
    /// Evaluating the function graph failed.
    #[error(transparent)]
    Func(#[from] FuncError),
}
