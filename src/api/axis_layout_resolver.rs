use tracing::trace;

use crate::cache_args;
use crate::core::{
    AxisPosition, DimensionsContributor, DimensionsRequest, HorizontalAxisPosition, HorizontalMapping,
    Insets, LayerDimensions, MeasuringContext, VerticalAxisPosition, YRange,
};
use crate::render::{AxisLabel, Renderer};

use super::{AxisSizeConstraint, ChartEngine, TextSize, VerticalAxisConfig};

/// Upper bound on horizontal labels emitted for one frame.
const MAX_HORIZONTAL_LABELS: usize = 1_000;

/// Half of the first and last horizontal label widths, kept outside the
/// zoomable content so extreme labels are never clipped.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(super) struct ExtremeLabelPadding {
    pub start: f64,
    pub end: f64,
}

impl DimensionsContributor for ExtremeLabelPadding {
    fn update_dimensions(&self, _context: &MeasuringContext<'_>, dimensions: &mut LayerDimensions) {
        dimensions.ensure_values_at_least(DimensionsRequest {
            unscalable_start_padding: Some(self.start),
            unscalable_end_padding: Some(self.end),
            ..DimensionsRequest::default()
        });
    }
}

/// Evenly spaced label values covering `range`, both ends included.
pub(super) fn vertical_label_values(range: YRange, label_count: usize) -> Vec<f64> {
    match label_count {
        0 => Vec::new(),
        1 => vec![range.min_y],
        _ if range.length() <= 0.0 => vec![range.min_y],
        _ => {
            let step = range.length() / (label_count - 1) as f64;
            (0..label_count)
                .map(|index| range.min_y + step * index as f64)
                .collect()
        }
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Measures label text through the two-generation cache.
    pub(super) fn measure_label(&mut self, text: &str, font_size_px: f64) -> TextSize {
        let measurer = &self.text_measurer;
        *self.cache.get_or_set(
            self.label_namespace,
            cache_args![text, font_size_px],
            || measurer.measure(text, font_size_px),
        )
    }

    fn vertical_axis_labels_width(&mut self, axis: &VerticalAxisConfig, range: YRange) -> f64 {
        let font_size_px = self.surface.sp_to_px(axis.style.font_size_sp);
        vertical_label_values(range, axis.label_count)
            .into_iter()
            .map(|value| {
                let text = axis.formatter.format(value);
                self.measure_label(&text, font_size_px).width
            })
            .fold(0.0, f64::max)
    }

    /// Resolved width and label height of a vertical axis.
    fn vertical_axis_extent(&mut self, axis: &VerticalAxisConfig) -> (f64, f64) {
        let font_size_px = self.surface.sp_to_px(axis.style.font_size_sp);
        let decoration = self
            .surface
            .dp_to_px(axis.style.tick_length_dp + axis.style.label_padding_dp);
        let label_height = self.measure_label("0", font_size_px).height;
        let range = self.ranges.y_range(Some(axis.position));

        let width = match &axis.size_constraint {
            AxisSizeConstraint::Auto { min_dp, max_dp } => {
                let labels_width = self.vertical_axis_labels_width(axis, range);
                (labels_width + decoration).clamp(
                    self.surface.dp_to_px(*min_dp),
                    self.surface.dp_to_px(*max_dp),
                )
            }
            AxisSizeConstraint::Exact(size_dp) => self.surface.dp_to_px(*size_dp),
            AxisSizeConstraint::Fraction(fraction) => self.surface.width * fraction,
            AxisSizeConstraint::TextWidth(text) => {
                self.measure_label(text, font_size_px).width + decoration
            }
        };
        (width, label_height)
    }

    /// Space every axis needs around the layer area.
    pub(super) fn resolve_axis_insets(&mut self) -> Insets {
        let mut insets = Insets::default();

        let vertical_axes = self.vertical_axes.clone();
        for axis in &vertical_axes {
            let (width, label_height) = self.vertical_axis_extent(axis);
            let half_label = label_height / 2.0;
            let request = match axis.position {
                VerticalAxisPosition::Start => Insets::new(width, half_label, 0.0, half_label),
                VerticalAxisPosition::End => Insets::new(0.0, half_label, width, half_label),
            };
            insets.ensure_values_at_least(request);
        }

        let horizontal_axes = self.horizontal_axes.clone();
        for axis in &horizontal_axes {
            let font_size_px = self.surface.sp_to_px(axis.style.font_size_sp);
            let height = self.measure_label("0", font_size_px).height
                + self
                    .surface
                    .dp_to_px(axis.style.tick_length_dp + axis.style.label_padding_dp);
            let request = match axis.position {
                HorizontalAxisPosition::Top => Insets::new(0.0, height, 0.0, 0.0),
                HorizontalAxisPosition::Bottom => Insets::new(0.0, 0.0, 0.0, height),
            };
            insets.ensure_values_at_least(request);
        }

        trace!(
            start = insets.start,
            top = insets.top,
            end = insets.end,
            bottom = insets.bottom,
            "axis insets resolved"
        );
        insets
    }

    pub(super) fn resolve_extreme_label_padding(&mut self) -> ExtremeLabelPadding {
        let mut padding = ExtremeLabelPadding::default();
        if self.ranges.is_empty() {
            return padding;
        }
        let (min_x, max_x) = (self.ranges.min_x, self.ranges.max_x);
        let horizontal_axes = self.horizontal_axes.clone();
        for axis in horizontal_axes
            .iter()
            .filter(|axis| axis.add_extreme_labels_padding)
        {
            let font_size_px = self.surface.sp_to_px(axis.style.font_size_sp);
            let first = self.measure_label(&axis.formatter.format(min_x), font_size_px);
            let last = self.measure_label(&axis.formatter.format(max_x), font_size_px);
            padding.start = padding.start.max(first.width / 2.0);
            padding.end = padding.end.max(last.width / 2.0);
        }
        padding
    }

    /// Labels visible in the current frame, positioned in surface pixels.
    pub(super) fn build_axis_labels(&mut self) -> Vec<AxisLabel> {
        let mut labels = Vec::new();
        if self.ranges.is_empty() {
            return labels;
        }
        let bounds = self.layer_bounds;

        let vertical_axes = self.vertical_axes.clone();
        for axis in &vertical_axes {
            let font_size_px = self.surface.sp_to_px(axis.style.font_size_sp);
            let range = self.ranges.y_range(Some(axis.position));
            for value in vertical_label_values(range, axis.label_count) {
                let text = axis.formatter.format(value);
                let size = self.measure_label(&text, font_size_px);
                labels.push(AxisLabel {
                    position: AxisPosition::Vertical(axis.position),
                    value,
                    text,
                    pixel: range.y_to_pixel(value, bounds.top, bounds.height()),
                    width: size.width,
                    height: size.height,
                });
            }
        }

        let scaled = self.scaled_dimensions();
        let ranges = self.ranges.clone();
        let mapping = HorizontalMapping::new(&ranges, scaled, bounds, self.scroll.value());
        let (visible_start, visible_end) = mapping.visible_x_range();
        let horizontal_axes = self.horizontal_axes.clone();
        for axis in &horizontal_axes {
            let font_size_px = self.surface.sp_to_px(axis.style.font_size_sp);
            let step = ranges.x_step * axis.label_spacing as f64;
            if !(step.is_finite() && step > 0.0) {
                continue;
            }
            let epsilon = step * 1e-9;
            let first_index = ((visible_start - ranges.min_x) / step - 1e-9).ceil().max(0.0);
            for offset in 0..MAX_HORIZONTAL_LABELS {
                let x = ranges.min_x + (first_index + offset as f64) * step;
                if x > visible_end + epsilon || x > ranges.max_x + epsilon {
                    break;
                }
                let text = axis.formatter.format(x);
                let size = self.measure_label(&text, font_size_px);
                labels.push(AxisLabel {
                    position: AxisPosition::Horizontal(axis.position),
                    value: x,
                    text,
                    pixel: mapping.x_to_pixel(x),
                    width: size.width,
                    height: size.height,
                });
            }
        }
        labels
    }
}
