use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{Bounds, HorizontalMapping, LayerDimensions, Ranges};
use crate::error::{ChartError, ChartResult};

use super::animation::{AnimationSpec, Fling, FlingConfig, ScrollAnimation};

/// Where the scroll position lands the first time content is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InitialScroll {
    #[default]
    Start,
    End,
}

/// When new data triggers an automatic scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AutoScrollCondition {
    #[default]
    Never,
    /// Scrolls when new data extends `max_x` or adds entries.
    OnModelGrowth,
}

impl AutoScrollCondition {
    #[must_use]
    pub fn should_scroll(self, old: &Ranges, new: &Ranges) -> bool {
        match self {
            Self::Never => false,
            Self::OnModelGrowth => {
                !new.is_empty()
                    && (new.max_x > old.max_x || new.entry_count() > old.entry_count())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AbsoluteScroll {
    Start,
    End,
    /// Brings `x` to `bias` of the layer width (0 = left edge, 1 = right edge).
    X { x: f64, bias: f64 },
    Pixels(f64),
}

impl AbsoluteScroll {
    pub fn x(x: f64, bias: f64) -> ChartResult<Self> {
        if !(0.0..=1.0).contains(&bias) {
            return Err(ChartError::InvalidFraction {
                name: "scroll bias",
                value: bias,
            });
        }
        if !x.is_finite() {
            return Err(ChartError::InvalidData(
                "scroll target x must be finite".to_owned(),
            ));
        }
        Ok(Self::X { x, bias })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RelativeScroll {
    /// Scrolls by a distance expressed in x units.
    X(f64),
    Pixels(f64),
}

/// A programmatic scroll request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Scroll {
    Absolute(AbsoluteScroll),
    Relative(RelativeScroll),
}

impl Default for Scroll {
    fn default() -> Self {
        Self::Absolute(AbsoluteScroll::End)
    }
}

/// Measurement results needed to resolve x-based scroll requests.
///
/// `dimensions` must already be scaled by the zoom factor.
#[derive(Debug, Clone, Copy)]
pub struct ScrollContext<'a> {
    pub ranges: &'a Ranges,
    pub dimensions: LayerDimensions,
    pub layer_bounds: Bounds,
}

impl Scroll {
    /// Resolves the unclamped target value.
    #[must_use]
    pub fn target(&self, current: f64, max_value: f64, context: &ScrollContext<'_>) -> f64 {
        match *self {
            Self::Absolute(AbsoluteScroll::Start) => 0.0,
            Self::Absolute(AbsoluteScroll::End) => max_value,
            Self::Absolute(AbsoluteScroll::Pixels(value)) => value,
            Self::Absolute(AbsoluteScroll::X { x, bias }) => {
                let mapping = HorizontalMapping::new(
                    context.ranges,
                    context.dimensions,
                    context.layer_bounds,
                    0.0,
                );
                mapping.x_to_content_pixel(x) - bias * context.layer_bounds.width()
            }
            Self::Relative(RelativeScroll::Pixels(delta)) => current + delta,
            Self::Relative(RelativeScroll::X(delta_x)) => {
                current + delta_x / context.ranges.x_step * context.dimensions.x_spacing
            }
        }
    }
}

/// Persistable scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollSnapshot {
    pub value: f64,
    pub initial_scroll_handled: bool,
}

/// Scroll notifications for dependent UI (scrollbars, minimaps).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScrollEvent {
    ValueChanged { old: f64, new: f64 },
    MaxValueChanged { old: f64, new: f64 },
}

pub trait ScrollListener: Send {
    fn on_scroll_event(&mut self, event: ScrollEvent);
}

impl<F> ScrollListener for F
where
    F: FnMut(ScrollEvent) + Send,
{
    fn on_scroll_event(&mut self, event: ScrollEvent) {
        self(event);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollPhase {
    Idle,
    Animating,
    Flinging,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    pub scroll_enabled: bool,
    pub initial_scroll: InitialScroll,
    pub auto_scroll_condition: AutoScrollCondition,
    pub auto_scroll: Scroll,
    pub fling: FlingConfig,
    pub animation: AnimationSpec,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            scroll_enabled: true,
            initial_scroll: InitialScroll::Start,
            auto_scroll_condition: AutoScrollCondition::Never,
            auto_scroll: Scroll::Absolute(AbsoluteScroll::End),
            fling: FlingConfig::default(),
            animation: AnimationSpec::default(),
        }
    }
}

impl ScrollConfig {
    pub fn validate(self) -> ChartResult<Self> {
        self.fling.validate()?;
        self.animation.validate()?;
        Ok(self)
    }
}

/// Owns the horizontal scroll position.
///
/// `0 <= value <= max_value` holds after every mutation. At most one
/// animation or fling runs at a time; starting another, or any gesture
/// delta, cancels it and leaves `value` where it was.
pub struct ScrollController {
    value: f64,
    max_value: f64,
    config: ScrollConfig,
    initial_scroll_handled: bool,
    pending_restore: Option<f64>,
    animation: Option<ScrollAnimation>,
    fling: Option<Fling>,
    listeners: Vec<Box<dyn ScrollListener>>,
}

impl Default for ScrollController {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollController {
    #[must_use]
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            value: 0.0,
            max_value: 0.0,
            config,
            initial_scroll_handled: false,
            pending_restore: None,
            animation: None,
            fling: None,
            listeners: Vec::new(),
        }
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    #[must_use]
    pub fn config(&self) -> ScrollConfig {
        self.config
    }

    pub fn set_config(&mut self, config: ScrollConfig) -> ChartResult<()> {
        self.config = config.validate()?;
        if !self.config.scroll_enabled {
            self.cancel_animation();
        }
        Ok(())
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.scroll_enabled
    }

    #[must_use]
    pub fn phase(&self) -> ScrollPhase {
        if self.animation.is_some() {
            ScrollPhase::Animating
        } else if self.fling.is_some() {
            ScrollPhase::Flinging
        } else {
            ScrollPhase::Idle
        }
    }

    #[must_use]
    pub fn initial_scroll_handled(&self) -> bool {
        self.initial_scroll_handled
    }

    pub fn add_listener(&mut self, listener: impl ScrollListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    /// Recomputes `max_value` from measured widths and re-clamps `value`.
    ///
    /// The first update with non-empty content applies the initial scroll.
    pub fn update(&mut self, content_width: f64, surface_width: f64) {
        if !content_width.is_finite() || !surface_width.is_finite() {
            debug!(content_width, surface_width, "ignoring non-finite scroll bounds");
            return;
        }
        let max_value = (content_width - surface_width).max(0.0);
        if max_value != self.max_value {
            let old = self.max_value;
            self.max_value = max_value;
            self.emit(ScrollEvent::MaxValueChanged {
                old,
                new: max_value,
            });
        }
        let current = self.value.min(max_value);
        if let Some(animation) = self.animation.as_mut() {
            if animation.target() > max_value {
                animation.clamp_target(current, max_value);
            }
        }
        self.set_value(self.value);

        if content_width <= 0.0 {
            return;
        }
        if !self.initial_scroll_handled {
            self.initial_scroll_handled = true;
            self.pending_restore = None;
            let seeded = match self.config.initial_scroll {
                InitialScroll::Start => 0.0,
                InitialScroll::End => self.max_value,
            };
            debug!(seeded, "initial scroll applied");
            self.set_value(seeded);
        } else if let Some(restored) = self.pending_restore.take() {
            self.set_value(restored);
        }
    }

    /// Applies a gesture delta and returns the part actually consumed.
    ///
    /// Cancels any running animation or fling first.
    pub fn scroll_by(&mut self, delta: f64) -> f64 {
        if !self.config.scroll_enabled || !delta.is_finite() {
            return 0.0;
        }
        self.interrupt();
        self.apply_delta(delta)
    }

    /// Jumps to a programmatic target; returns the consumed delta.
    pub fn scroll(&mut self, scroll: &Scroll, context: &ScrollContext<'_>) -> f64 {
        if !self.config.scroll_enabled {
            return 0.0;
        }
        self.interrupt();
        let target = scroll.target(self.value, self.max_value, context);
        self.jump_to(target)
    }

    /// Starts an animated scroll toward `scroll`, replacing any running one.
    ///
    /// Returns `false` when there is nowhere to go.
    pub fn animate_scroll(
        &mut self,
        scroll: &Scroll,
        context: &ScrollContext<'_>,
        spec: AnimationSpec,
    ) -> bool {
        if !self.config.scroll_enabled {
            return false;
        }
        self.interrupt();
        let target = scroll.target(self.value, self.max_value, context);
        if !target.is_finite() {
            return false;
        }
        let target = target.clamp(0.0, self.max_value);
        if target == self.value {
            return false;
        }
        if spec.duration_seconds <= 0.0 {
            self.set_value(target);
            return true;
        }
        trace!(from = self.value, to = target, "animated scroll started");
        self.animation = Some(ScrollAnimation::new(self.value, target, spec));
        true
    }

    /// Starts a decelerating fling; positive velocity scrolls toward the end.
    pub fn fling(&mut self, velocity_px_per_sec: f64) -> bool {
        if !self.config.scroll_enabled || !velocity_px_per_sec.is_finite() {
            return false;
        }
        self.interrupt();
        let fling = Fling::new(velocity_px_per_sec);
        if fling.is_stopped(self.config.fling) {
            return false;
        }
        self.fling = Some(fling);
        true
    }

    /// Advances a running animation or fling. Returns `true` when `value` moved.
    pub fn step(&mut self, delta_seconds: f64) -> bool {
        if !delta_seconds.is_finite() || delta_seconds < 0.0 {
            return false;
        }
        let before = self.value;

        if let Some(mut animation) = self.animation.take() {
            let (value, finished) = animation.advance(delta_seconds);
            if !finished {
                self.animation = Some(animation);
            }
            self.set_value(value);
        } else if let Some(mut fling) = self.fling.take() {
            let config = self.config.fling;
            let distance = fling.advance(delta_seconds, config);
            trace!(velocity = fling.velocity(), distance, "fling stepped");
            let consumed = self.apply_delta(distance);
            let hit_bound = (consumed - distance).abs() > f64::EPSILON;
            if !hit_bound && !fling.is_stopped(config) {
                self.fling = Some(fling);
            }
        }

        self.value != before
    }

    /// Stops any animation or fling, leaving `value` where it is.
    pub fn cancel_animation(&mut self) {
        let had_animation = self.animation.take().is_some();
        let had_fling = self.fling.take().is_some();
        if had_animation || had_fling {
            trace!(value = self.value, "scroll animation cancelled");
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> ScrollSnapshot {
        ScrollSnapshot {
            value: self.value,
            initial_scroll_handled: self.initial_scroll_handled,
        }
    }

    /// Restores a saved position.
    ///
    /// The value is clamped right away. When clamping cut it short (content
    /// not measured yet, or narrower than when saved), the saved value is
    /// re-applied by the next non-empty `update` unless the user scrolls
    /// first.
    pub fn restore(&mut self, snapshot: ScrollSnapshot) {
        self.interrupt();
        self.initial_scroll_handled = snapshot.initial_scroll_handled;
        if snapshot.value.is_finite() {
            self.set_value(snapshot.value);
            if self.value != snapshot.value {
                self.pending_restore = Some(snapshot.value);
            }
        }
    }

    /// Returns to the pre-measurement state; the initial scroll runs again.
    pub fn reset(&mut self) {
        self.cancel_animation();
        self.initial_scroll_handled = false;
        self.pending_restore = None;
        self.update(0.0, 0.0);
        self.set_value(0.0);
    }

    /// Cancels motion and moves to `target` clamped; returns the consumed delta.
    pub(crate) fn jump_to(&mut self, target: f64) -> f64 {
        if !target.is_finite() {
            return 0.0;
        }
        self.interrupt();
        let before = self.value;
        self.set_value(target);
        self.value - before
    }

    /// Explicit moves supersede motion and any saved position still waiting
    /// for content.
    fn interrupt(&mut self) {
        self.cancel_animation();
        if let Some(discarded) = self.pending_restore.take() {
            trace!(discarded, "pending scroll restore dropped");
        }
    }

    fn apply_delta(&mut self, delta: f64) -> f64 {
        if delta == 0.0 {
            return 0.0;
        }
        let before = self.value;
        self.set_value(before + delta);
        self.value - before
    }

    fn set_value(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        let clamped = value.clamp(0.0, self.max_value);
        if clamped != self.value {
            let old = self.value;
            self.value = clamped;
            self.emit(ScrollEvent::ValueChanged { old, new: clamped });
        }
    }

    fn emit(&mut self, event: ScrollEvent) {
        for listener in &mut self.listeners {
            listener.on_scroll_event(event);
        }
    }
}

impl fmt::Debug for ScrollController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollController")
            .field("value", &self.value)
            .field("max_value", &self.max_value)
            .field("config", &self.config)
            .field("initial_scroll_handled", &self.initial_scroll_handled)
            .field("phase", &self.phase())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
