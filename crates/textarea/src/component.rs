//! The autosizing textarea component.

use crate::events::ResizeEvents;
use autosize::{HeightCalculator, MeasurementCache, NodeHeights, RenderEnvironment, StylePriority};
use autosize_units::format_px;
use log::{debug, trace};

/// Invoked with the new height whenever the applied height changes.
pub type HeightChangeCallback = Box<dyn FnMut(f64, &NodeHeights)>;

/// Invoked with the element's value after every edit, controlled or not.
pub type ChangeCallback = Box<dyn FnMut(&str)>;

/// Caller-facing options of one textarea.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AutosizeProps {
    pub min_rows: Option<u32>,
    pub max_rows: Option<u32>,
    /// Reuse the measured styling across renders.
    pub cache_measurements: bool,
    /// The caller owns the value; edits do not trigger a resize by
    /// themselves.
    pub controlled: bool,
    /// Initial height, in px, until the first measurement lands.
    pub style_height: Option<f64>,
    /// Caller's own `max-height`, in px.
    pub style_max_height: Option<f64>,
}

/// The last applied height triple.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Heights {
    /// Height applied to the element.
    pub height: f64,
    /// Lower bound from `min_rows`; `-inf` when unbounded.
    pub min_height: f64,
    /// Upper bound from `max_rows`; `+inf` when unbounded.
    pub max_height: f64,
}

impl Heights {
    fn initial(props: &AutosizeProps) -> Self {
        Self {
            height: props.style_height.unwrap_or(0.0),
            min_height: f64::NEG_INFINITY,
            max_height: f64::INFINITY,
        }
    }

    const fn of(node_heights: &NodeHeights) -> Self {
        Self {
            height: node_heights.height,
            min_height: node_heights.min_height,
            max_height: node_heights.max_height,
        }
    }
}

/// Inline style the component puts on its element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderedStyle {
    /// `height` to set, in px.
    pub height: f64,
    /// The caller's `max-height`, passed through untouched.
    pub max_height: Option<f64>,
    /// Content can exceed the height; scrolling is suppressed.
    pub overflow_hidden: bool,
}

/// One autosizing textarea bound to `element`.
pub struct TextareaAutosize<E: RenderEnvironment + ResizeEvents> {
    element: E::Element,
    props: AutosizeProps,
    heights: Heights,
    cache: MeasurementCache,
    on_height_change: Option<HeightChangeCallback>,
    on_change: Option<ChangeCallback>,
    listener: Option<E::Listener>,
}

impl<E: RenderEnvironment + ResizeEvents> TextareaAutosize<E> {
    /// Bind a component to `element`.
    ///
    /// # Arguments
    ///
    /// * `element` - The textarea to size
    /// * `props` - Row bounds, caching policy and initial style
    ///
    /// # Returns
    ///
    /// An unmounted component whose heights start at `props.style_height`
    pub fn new(element: E::Element, props: AutosizeProps) -> Self {
        Self {
            element,
            heights: Heights::initial(&props),
            props,
            cache: None,
            on_height_change: None,
            on_change: None,
            listener: None,
        }
    }

    /// Call `callback` with the new height each time it changes.
    #[must_use]
    pub fn on_height_change(mut self, callback: impl FnMut(f64, &NodeHeights) + 'static) -> Self {
        self.on_height_change = Some(Box::new(callback));
        self
    }

    /// Call `callback` with the element's value on every edit, after any
    /// resize it caused.
    #[must_use]
    pub fn on_change(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// The textarea this component sizes.
    pub const fn element(&self) -> &E::Element {
        &self.element
    }

    /// Props used by the next render and resize.
    pub const fn props(&self) -> &AutosizeProps {
        &self.props
    }

    /// Replace the props; the next render and resize use them.
    pub fn set_props(&mut self, props: AutosizeProps) {
        self.props = props;
    }

    /// The last stored height triple.
    pub const fn heights(&self) -> Heights {
        self.heights
    }

    /// Whether a resize subscription is held.
    pub const fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    /// Whether a measurement is currently cached.
    pub const fn has_cached_measurements(&self) -> bool {
        self.cache.is_some()
    }

    /// Start a render cycle and return the style for the element.
    ///
    /// Without `cache_measurements` the cached styling is dropped here, so
    /// the next resize probes again.
    pub fn render(&mut self) -> RenderedStyle {
        if !self.props.cache_measurements {
            self.cache = None;
        }
        let height = self.heights.height;
        let final_max_height = self
            .props
            .style_max_height
            .unwrap_or(f64::INFINITY)
            .max(self.heights.max_height);
        RenderedStyle {
            height,
            max_height: self.props.style_max_height,
            overflow_hidden: final_max_height < height,
        }
    }

    /// Render and write the result onto the element.
    pub fn apply_rendered_style(&mut self, env: &mut E) -> RenderedStyle {
        let style = self.render();
        env.set_style_property(&self.element, "height", &format_px(style.height as f32), StylePriority::Normal);
        let max_height = style
            .max_height
            .map(|max_height| format_px(max_height as f32))
            .unwrap_or_default();
        env.set_style_property(&self.element, "max-height", &max_height, StylePriority::Normal);
        let overflow = if style.overflow_hidden { "hidden" } else { "" };
        env.set_style_property(&self.element, "overflow", overflow, StylePriority::Normal);
        trace!("textarea: applied {style:?}");
        style
    }

    /// Measure and store new heights. Returns whether they changed.
    pub fn resize(&mut self, calculator: &mut HeightCalculator<E>, env: &mut E) -> bool {
        let Some(node_heights) = calculator.calculate(
            env,
            &self.element,
            &mut self.cache,
            self.props.min_rows,
            self.props.max_rows,
        ) else {
            return false;
        };
        let heights = Heights::of(&node_heights);
        if heights == self.heights {
            return false;
        }
        debug!("textarea: height {} -> {}", self.heights.height, heights.height);
        self.heights = heights;
        if let Some(callback) = self.on_height_change.as_mut() {
            callback(heights.height, &node_heights);
        }
        true
    }

    /// The user edited the text.
    ///
    /// Uncontrolled components resize first; the change callback then sees
    /// the new value either way. Returns whether the heights changed.
    pub fn handle_change(&mut self, calculator: &mut HeightCalculator<E>, env: &mut E) -> bool {
        let resized = !self.props.controlled && self.resize(calculator, env);
        if let Some(callback) = self.on_change.as_mut() {
            callback(&env.value(&self.element));
        }
        resized
    }

    /// Subscribe to viewport resizes. Does nothing when already mounted.
    pub fn mount(&mut self, env: &mut E) {
        if self.listener.is_none() {
            self.listener = Some(env.subscribe_resize());
        }
    }

    /// Drop the viewport-resize subscription taken by [`Self::mount`].
    pub fn unmount(&mut self, env: &mut E) {
        if let Some(listener) = self.listener.take() {
            env.unsubscribe_resize(&listener);
        }
    }

    /// Deliver a viewport resize to `listener`; resizes when it is ours.
    pub fn handle_resize(
        &mut self,
        listener: &E::Listener,
        calculator: &mut HeightCalculator<E>,
        env: &mut E,
    ) -> bool {
        if self.listener.as_ref() != Some(listener) {
            return false;
        }
        self.resize(calculator, env)
    }
}
