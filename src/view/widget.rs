use crate::func::{Datum, FuncError, Output, Store, Variable};
use crate::math::Real;
use std::fmt;

/// A numeric type a [`Slider`] can produce.
pub trait SliderValue: Datum + Copy + PartialOrd + fmt::Display {
    /// Converts from `f64`, rounding and saturating if needed.
    fn from_f64(value: f64) -> Self;
    /// Converts to `f64`.
    fn to_f64(self) -> f64;
}

impl SliderValue for i32 {
    fn from_f64(value: f64) -> Self {
        value.round() as i32
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl SliderValue for Real {
    fn from_f64(value: f64) -> Self {
        value as Real
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// An input widget of a [`Panel`].
pub trait Widget: fmt::Debug + Send {
    /// The label identifying this widget on its panel.
    fn label(&self) -> &str;
    /// The current value.
    fn value(&self) -> f64;
    /// The inclusive range of accepted values.
    fn range(&self) -> (f64, f64);
    /// Whether the widget only produces integers.
    fn is_integer(&self) -> bool;
    /// Sets the value, clamped into the widget range, and updates the graph.
    ///
    /// Returns `true` if the value changed.
    fn set_value(&mut self, store: &mut Store, value: f64) -> Result<bool, FuncError>;
}

/// A slider bound to a variable of the function graph.
#[derive(Debug)]
pub struct Slider<T> {
    label: String,
    min: T,
    max: T,
    value: T,
    variable: Variable<T>,
}

impl<T: SliderValue> Slider<T> {
    /// Creates a slider and its variable, initialized to `value` clamped into `[min, max]`.
    ///
    /// `min` must not be greater than `max`.
    pub fn new(store: &mut Store, label: impl Into<String>, min: T, max: T, value: T) -> Self {
        let value = clamp(value, min, max);
        Self {
            label: label.into(),
            min,
            max,
            value,
            variable: store.variable(value),
        }
    }

    /// The graph register holding the slider value.
    pub fn output(&self) -> Output<T> {
        self.variable.output()
    }

    /// The bounds of this slider.
    pub fn bounds(&self) -> (T, T) {
        (self.min, self.max)
    }

    /// The current value of this slider.
    pub fn get(&self) -> T {
        self.value
    }

    /// Sets the slider value, clamped into its range.
    ///
    /// The variable (and everything depending on it) is only invalidated when
    /// the clamped value differs from the current one.
    pub fn set(&mut self, store: &mut Store, value: T) -> Result<bool, FuncError> {
        let value = clamp(value, self.min, self.max);
        if value == self.value {
            return Ok(false);
        }

        log::debug!("slider {:?}: {} -> {}", self.label, self.value, value);
        self.value = value;
        store.set(&self.variable, value)?;
        Ok(true)
    }
}

fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

impl<T: SliderValue> Widget for Slider<T> {
    fn label(&self) -> &str {
        &self.label
    }

    fn value(&self) -> f64 {
        self.value.to_f64()
    }

    fn range(&self) -> (f64, f64) {
        (self.min.to_f64(), self.max.to_f64())
    }

    fn is_integer(&self) -> bool {
        std::any::TypeId::of::<T>() == std::any::TypeId::of::<i32>()
    }

    fn set_value(&mut self, store: &mut Store, value: f64) -> Result<bool, FuncError> {
        self.set(store, T::from_f64(value))
    }
}

/// A titled list of widgets.
#[derive(Debug, Default)]
pub struct Panel {
    title: String,
    widgets: Vec<Box<dyn Widget>>,
}

impl Panel {
    /// Creates an empty panel.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            widgets: Vec::new(),
        }
    }

    /// The title of this panel.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Appends a widget to this panel.
    pub fn add_widget(&mut self, widget: Box<dyn Widget>) {
        self.widgets.push(widget);
    }

    /// The widget with the given label.
    pub fn find(&self, label: &str) -> Option<&dyn Widget> {
        self.widgets
            .iter()
            .find(|w| w.label() == label)
            .map(|w| &**w)
    }

    /// The widget with the given label.
    pub fn find_mut(&mut self, label: &str) -> Option<&mut (dyn Widget + 'static)> {
        self.widgets
            .iter_mut()
            .find(|w| w.label() == label)
            .map(|w| &mut **w)
    }

    /// The widgets of this panel, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Widget> {
        self.widgets.iter().map(|w| &**w)
    }

    /// The number of widgets of this panel.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Returns `true` if this panel has no widget.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::{Slider, Widget};
    use crate::func::Store;

    #[test]
    fn slider_clamps_and_invalidates() {
        let mut store = Store::new();
        let mut slider = Slider::new(&mut store, "Point count", 5, 50, 80);
        assert_eq!(slider.get(), 50);

        let doubled = store
            .map1("double", slider.output(), |v: &i32| Ok(v * 2))
            .unwrap();
        assert_eq!(*store.get(doubled).unwrap(), 100);

        assert!(!slider.set(&mut store, 60).unwrap());
        assert!(!store.is_dirty(doubled.register()).unwrap());

        assert!(slider.set_value(&mut store, 7.4).unwrap());
        assert_eq!(slider.get(), 7);
        assert!(store.is_dirty(doubled.register()).unwrap());
        assert_eq!(*store.get(doubled).unwrap(), 14);

        assert!(slider.set(&mut store, -1).unwrap());
        assert_eq!(*store.get(slider.output()).unwrap(), 5);
        assert_eq!(slider.range(), (5.0, 50.0));
        assert!(slider.is_integer());
    }
}
