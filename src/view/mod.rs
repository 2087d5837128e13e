//! A headless viewer driven by the function graph.

pub use self::context::{Context, ShowId, ShowStatus};
pub use self::error::ViewError;
pub use self::scene::{DrawId, Drawable, Scene};
pub use self::widget::{Panel, Slider, SliderValue, Widget};

mod context;
mod error;
mod scene;
mod widget;
