use tracing::trace;

use crate::core::HorizontalMapping;
use crate::error::ChartResult;
use crate::interaction::{
    AnimationSpec, Scroll, ScrollConfig, ScrollContext, ScrollListener, ScrollPhase,
    ScrollSnapshot, ZoomConfig, ZoomContext, ZoomSnapshot,
};
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn scroll_value(&self) -> f64 {
        self.scroll.value()
    }

    #[must_use]
    pub fn max_scroll_value(&self) -> f64 {
        self.scroll.max_value()
    }

    #[must_use]
    pub fn scroll_phase(&self) -> ScrollPhase {
        self.scroll.phase()
    }

    #[must_use]
    pub fn scroll_config(&self) -> ScrollConfig {
        self.scroll.config()
    }

    pub fn set_scroll_config(&mut self, config: ScrollConfig) -> ChartResult<()> {
        self.scroll.set_config(config)?;
        self.needs_measure = true;
        Ok(())
    }

    pub fn add_scroll_listener(&mut self, listener: impl ScrollListener + 'static) {
        self.scroll.add_listener(listener);
    }

    /// Applies a gesture delta in pixels; returns the consumed part.
    pub fn scroll_by(&mut self, delta_px: f64) -> f64 {
        self.scroll.scroll_by(delta_px)
    }

    /// Jumps to `target` using the last measurement; returns the consumed delta.
    pub fn scroll_to(&mut self, target: Scroll) -> f64 {
        let scaled = self.scaled_dimensions();
        let context = ScrollContext {
            ranges: &self.ranges,
            dimensions: scaled,
            layer_bounds: self.layer_bounds,
        };
        self.scroll.scroll(&target, &context)
    }

    /// Animates toward `target` with the configured scroll animation.
    pub fn animate_scroll(&mut self, target: Scroll) -> bool {
        let spec = self.scroll.config().animation;
        self.animate_scroll_with(target, spec)
    }

    pub fn animate_scroll_with(&mut self, target: Scroll, spec: AnimationSpec) -> bool {
        let scaled = self.scaled_dimensions();
        let context = ScrollContext {
            ranges: &self.ranges,
            dimensions: scaled,
            layer_bounds: self.layer_bounds,
        };
        self.scroll.animate_scroll(&target, &context, spec)
    }

    pub fn fling(&mut self, velocity_px_per_sec: f64) -> bool {
        self.scroll.fling(velocity_px_per_sec)
    }

    /// Advances scroll animations and flings by host-supplied elapsed time.
    pub fn step_scroll(&mut self, delta_seconds: f64) -> bool {
        self.scroll.step(delta_seconds)
    }

    pub fn cancel_scroll_animation(&mut self) {
        self.scroll.cancel_animation();
    }

    #[must_use]
    pub fn scroll_snapshot(&self) -> ScrollSnapshot {
        self.scroll.snapshot()
    }

    pub fn restore_scroll(&mut self, snapshot: ScrollSnapshot) {
        self.scroll.restore(snapshot);
    }

    #[must_use]
    pub fn zoom_value(&self) -> f64 {
        self.zoom.value()
    }

    #[must_use]
    pub fn zoom_bounds(&self) -> (f64, f64) {
        self.zoom.bounds()
    }

    #[must_use]
    pub fn zoom_config(&self) -> &ZoomConfig {
        self.zoom.config()
    }

    pub fn set_zoom_config(&mut self, config: ZoomConfig) -> ChartResult<()> {
        self.zoom.set_config(config)?;
        self.needs_measure = true;
        Ok(())
    }

    /// Multiplies zoom by `factor` around `focal_x` (surface pixels).
    ///
    /// The x value under `focal_x` stays put unless scroll has to clamp.
    pub fn zoom_by(&mut self, factor: f64, focal_x: f64) -> bool {
        let focal_px = focal_x - self.layer_bounds.left;
        let context = ZoomContext {
            ranges: &self.ranges,
            dimensions: self.dimensions,
            layer_bounds: self.layer_bounds,
        };
        let changed = self
            .zoom
            .zoom_by(factor, focal_px, &mut self.scroll, &context);
        if changed {
            trace!(factor, focal_x, zoom = self.zoom.value(), "engine zoom changed");
        }
        changed
    }

    /// Sets an absolute zoom, keeping the layer's left edge stationary.
    pub fn set_zoom(&mut self, value: f64) -> bool {
        let context = ZoomContext {
            ranges: &self.ranges,
            dimensions: self.dimensions,
            layer_bounds: self.layer_bounds,
        };
        self.zoom.set_zoom(value, &mut self.scroll, &context)
    }

    #[must_use]
    pub fn zoom_snapshot(&self) -> ZoomSnapshot {
        self.zoom.snapshot()
    }

    /// Restores a saved zoom; bounds are re-applied by the next pass.
    pub fn restore_zoom(&mut self, snapshot: ZoomSnapshot) {
        self.zoom.restore(snapshot);
        self.needs_measure = true;
    }

    fn horizontal_mapping(&self) -> HorizontalMapping<'_> {
        HorizontalMapping::new(
            &self.ranges,
            self.scaled_dimensions(),
            self.layer_bounds,
            self.scroll.value(),
        )
    }

    /// Surface x pixel of value `x` under the current scroll and zoom.
    #[must_use]
    pub fn x_to_pixel(&self, x: f64) -> f64 {
        self.horizontal_mapping().x_to_pixel(x)
    }

    #[must_use]
    pub fn pixel_to_x(&self, pixel: f64) -> f64 {
        self.horizontal_mapping().pixel_to_x(pixel)
    }

    /// X values at the layer edges, clamped to the data range.
    #[must_use]
    pub fn visible_x_range(&self) -> (f64, f64) {
        self.horizontal_mapping().visible_x_range()
    }
}
