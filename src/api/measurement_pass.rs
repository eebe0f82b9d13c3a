use tracing::{debug, trace};

use crate::core::{DimensionsContributor, MeasuringContext, fit_to_surface, negotiate_into};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{ScrollContext, ZoomContext};
use crate::render::{RenderFrame, Renderer};

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    /// Runs one measurement pass.
    ///
    /// Order: cache generation flip, ranges, axis insets, layer bounds,
    /// dimension negotiation, auto-scale-up, zoom, scroll and finally the
    /// auto-scroll decided by the range change.
    pub fn measure(&mut self) -> ChartResult<()> {
        if !self.surface.is_valid() {
            return Err(ChartError::InvalidSurface {
                width: self.surface.width,
                height: self.surface.height,
            });
        }
        self.cache.purge();

        let new_ranges =
            self.range_tracker
                .update(&self.series, self.range_provider.as_ref(), &self.extra_store);
        let auto_scroll = self.data_changed
            && self
                .scroll
                .config()
                .auto_scroll_condition
                .should_scroll(&self.ranges, &new_ranges);
        self.ranges = new_ranges;
        self.data_changed = false;

        self.insets = self.resolve_axis_insets();
        self.layer_bounds = self.insets.layer_bounds(self.surface);
        let layer_width = self.layer_bounds.width();

        let extreme_label_padding = self.resolve_extreme_label_padding();
        let context = MeasuringContext {
            surface: self.surface,
            ranges: &self.ranges,
            extra: &self.extra_store,
            layer_width,
            scroll_enabled: self.scroll.is_enabled(),
            zoom_enabled: self.zoom.is_enabled(),
        };
        let mut contributors: Vec<&dyn DimensionsContributor> = self
            .layers
            .iter()
            .map(|layer| layer.as_ref() as &dyn DimensionsContributor)
            .collect();
        contributors.push(&extreme_label_padding);
        negotiate_into(&contributors, &context, &mut self.dimensions);

        let scaled_up = fit_to_surface(
            &mut self.dimensions,
            &self.ranges,
            layer_width,
            self.auto_scale_up,
            self.scroll.is_enabled(),
        );

        let zoom = self.zoom.update(&ZoomContext {
            ranges: &self.ranges,
            dimensions: self.dimensions,
            layer_bounds: self.layer_bounds,
        });
        let scaled = self.dimensions.scaled(zoom);
        self.scroll
            .update(scaled.content_width(&self.ranges), layer_width);

        if auto_scroll {
            let target = self.scroll.config().auto_scroll;
            let spec = self.scroll.config().animation;
            let context = ScrollContext {
                ranges: &self.ranges,
                dimensions: scaled,
                layer_bounds: self.layer_bounds,
            };
            let started = self.scroll.animate_scroll(&target, &context, spec);
            trace!(started, "auto-scroll after range change");
        }

        self.needs_measure = false;
        debug!(
            entry_count = self.ranges.entry_count(),
            layer_width,
            x_spacing = scaled.x_spacing,
            zoom,
            scroll = self.scroll.value(),
            max_scroll = self.scroll.max_value(),
            scaled_up,
            "measurement pass finished"
        );
        Ok(())
    }

    /// Snapshot of the last measurement handed to the renderer.
    pub(super) fn build_render_frame(&mut self) -> RenderFrame {
        let labels = self.build_axis_labels();
        RenderFrame {
            surface: self.surface,
            ranges: self.ranges.clone(),
            dimensions: self.scaled_dimensions(),
            insets: self.insets,
            layer_bounds: self.layer_bounds,
            scroll: self.scroll.value(),
            max_scroll: self.scroll.max_value(),
            zoom: self.zoom.value(),
            labels,
        }
    }
}
