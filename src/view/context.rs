use super::{DrawId, Drawable, Panel, Scene, Slider, SliderValue, ViewError};
use crate::func::{AnyOutput, Datum, Output, Store};
use crate::math::Real;
use std::sync::Arc;

/// The identifier of a [`Context::show`] registration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShowId(pub usize);

/// The outcome of the last evaluation of a show registration.
#[derive(Debug)]
pub enum ShowStatus {
    /// Not evaluated yet.
    Pending,
    /// The value is in the scene.
    Shown(DrawId),
    /// The value couldn't be computed or drawn.
    Failed(ViewError),
}

#[derive(Debug)]
struct ShowEntry {
    name: String,
    output: AnyOutput,
    draw_id: Option<DrawId>,
    last: Option<Arc<dyn Datum>>,
    status: ShowStatus,
}

/// A headless viewer.
///
/// The context owns the function graph, a panel of input widgets bound to
/// graph variables, and the scene of drawables produced by the registered
/// outputs. Frontends drive it by forwarding widget changes to
/// [`Context::set_slider`] and calling [`Context::eval_outputs`] before drawing
/// [`Context::scene`].
#[derive(Debug)]
pub struct Context {
    store: Store,
    inputs: Panel,
    scene: Scene,
    shows: Vec<ShowEntry>,
    mode_2d: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self::new(Store::new())
    }
}

impl Context {
    /// Creates a viewer context around a function graph.
    pub fn new(store: Store) -> Self {
        Self {
            store,
            inputs: Panel::new("Inputs"),
            scene: Scene::new(),
            shows: Vec::new(),
            mode_2d: false,
        }
    }

    /// The function graph.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The function graph.
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// The input panel.
    pub fn inputs(&self) -> &Panel {
        &self.inputs
    }

    /// The drawables produced by the last call to [`Context::eval_outputs`].
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Switches between the 3D view and the 2D (top-down, `z = 0`) view.
    pub fn set_2d_mode(&mut self, flag: bool) {
        self.mode_2d = flag;
    }

    /// Whether the 2D view is active.
    pub fn is_2d_mode(&self) -> bool {
        self.mode_2d
    }

    /// Adds an integer slider to the input panel.
    ///
    /// The returned register holds the slider value, starting with `value`
    /// clamped into `[min, max]`.
    pub fn slider_i32(
        &mut self,
        label: &str,
        min: i32,
        max: i32,
        value: i32,
    ) -> Result<Output<i32>, ViewError> {
        self.slider(label, min, max, value)
    }

    /// Adds a scalar slider to the input panel.
    pub fn slider_f32(
        &mut self,
        label: &str,
        min: Real,
        max: Real,
        value: Real,
    ) -> Result<Output<Real>, ViewError> {
        self.slider(label, min, max, value)
    }

    fn slider<T: SliderValue>(
        &mut self,
        label: &str,
        min: T,
        max: T,
        value: T,
    ) -> Result<Output<T>, ViewError> {
        // Also rejects NaN bounds.
        if !(min <= max) {
            return Err(ViewError::InvalidRange(label.to_string()));
        }
        if self.inputs.find(label).is_some() {
            return Err(ViewError::DuplicateWidget(label.to_string()));
        }

        let slider = Slider::new(&mut self.store, label, min, max, value);
        let output = slider.output();
        self.inputs.add_widget(Box::new(slider));
        Ok(output)
    }

    /// Sets the value of the widget with the given label.
    ///
    /// The value is clamped into the widget range, and rounded for integer
    /// sliders. Returns `true` if the value changed. Infinite and NaN values
    /// are rejected and leave the widget untouched.
    pub fn set_slider(&mut self, label: &str, value: f64) -> Result<bool, ViewError> {
        let widget = self
            .inputs
            .find_mut(label)
            .ok_or_else(|| ViewError::UnknownWidget(label.to_string()))?;
        if !value.is_finite() {
            return Err(ViewError::NonFiniteValue(label.to_string()));
        }
        Ok(widget.set_value(&mut self.store, value)?)
    }

    /// Registers an output to be drawn under `name` by [`Context::eval_outputs`].
    pub fn show(&mut self, name: &str, output: impl Into<AnyOutput>) -> ShowId {
        let output = output.into();
        log::debug!("show {:?} from {:?}", name, output);
        self.shows.push(ShowEntry {
            name: name.to_string(),
            output,
            draw_id: None,
            last: None,
            status: ShowStatus::Pending,
        });
        ShowId(self.shows.len() - 1)
    }

    /// The show registrations, in registration order.
    pub fn shows(&self) -> impl Iterator<Item = (ShowId, &str, &ShowStatus)> {
        self.shows
            .iter()
            .enumerate()
            .map(|(i, s)| (ShowId(i), s.name.as_str(), &s.status))
    }

    /// The status of a show registration.
    pub fn show_status(&self, id: ShowId) -> Option<&ShowStatus> {
        self.shows.get(id.0).map(|s| &s.status)
    }

    /// Evaluates every shown output, in registration order, and updates the scene.
    ///
    /// The scene draws the shown values in registration order.
    ///
    /// A failing registration is logged and recorded in its [`ShowStatus`];
    /// the following ones are still evaluated. Values that didn't change since
    /// the last evaluation are left untouched in the scene.
    ///
    /// Returns the number of failed registrations.
    pub fn eval_outputs(&mut self) -> usize {
        let mut failures = 0;

        for entry in &mut self.shows {
            match refresh(&mut self.store, &mut self.scene, entry) {
                Ok(draw_id) => entry.status = ShowStatus::Shown(draw_id),
                Err(err) => {
                    log::warn!("cannot show {:?}: {}", entry.name, err);
                    if let Some(id) = entry.draw_id.take() {
                        let _ = self.scene.remove(id);
                    }
                    entry.last = None;
                    entry.status = ShowStatus::Failed(err);
                    failures += 1;
                }
            }
        }
        self.scene
            .set_draw_order(self.shows.iter().filter_map(|s| s.draw_id));

        log::debug!(
            "evaluated {} outputs ({} failed), {} drawables",
            self.shows.len(),
            failures,
            self.scene.len()
        );
        failures
    }
}

fn refresh(
    store: &mut Store,
    scene: &mut Scene,
    entry: &mut ShowEntry,
) -> Result<DrawId, ViewError> {
    let value = store.get_any(entry.output.register())?;

    if let (Some(last), Some(draw_id)) = (&entry.last, entry.draw_id) {
        if Arc::ptr_eq(last, &value) {
            return Ok(draw_id);
        }
    }

    let drawable =
        Drawable::from_datum(value.clone()).map_err(|value| ViewError::NotDrawable {
            name: entry.name.clone(),
            type_name: (*value).datum_type_name(),
        })?;
    let draw_id = scene.replace_drawable(entry.draw_id, &entry.name, drawable);
    entry.draw_id = Some(draw_id);
    entry.last = Some(value);
    Ok(draw_id)
}
