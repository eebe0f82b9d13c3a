use crate::core::dimensions::LayerDimensions;
use crate::core::ranges::Ranges;
use crate::core::types::Bounds;

/// Maps x values to surface pixels under the current scroll and zoom.
///
/// `dimensions` must already be scaled by the zoom factor.
#[derive(Debug, Clone, Copy)]
pub struct HorizontalMapping<'a> {
    ranges: &'a Ranges,
    dimensions: LayerDimensions,
    layer_bounds: Bounds,
    scroll: f64,
}

impl<'a> HorizontalMapping<'a> {
    #[must_use]
    pub fn new(
        ranges: &'a Ranges,
        dimensions: LayerDimensions,
        layer_bounds: Bounds,
        scroll: f64,
    ) -> Self {
        Self {
            ranges,
            dimensions,
            layer_bounds,
            scroll,
        }
    }

    /// Distance of `x` from the start of the content, in pixels.
    #[must_use]
    pub fn x_to_content_pixel(&self, x: f64) -> f64 {
        self.dimensions.start_padding()
            + (x - self.ranges.min_x) / self.ranges.x_step * self.dimensions.x_spacing
    }

    #[must_use]
    pub fn content_pixel_to_x(&self, content_px: f64) -> f64 {
        if self.dimensions.x_spacing <= 0.0 {
            return self.ranges.min_x;
        }
        self.ranges.min_x
            + (content_px - self.dimensions.start_padding()) / self.dimensions.x_spacing
                * self.ranges.x_step
    }

    #[must_use]
    pub fn x_to_pixel(&self, x: f64) -> f64 {
        self.layer_bounds.left + self.x_to_content_pixel(x) - self.scroll
    }

    #[must_use]
    pub fn pixel_to_x(&self, pixel: f64) -> f64 {
        self.content_pixel_to_x(pixel - self.layer_bounds.left + self.scroll)
    }

    /// X values at the left and right edges of the layer area, clamped to
    /// the data range.
    #[must_use]
    pub fn visible_x_range(&self) -> (f64, f64) {
        let start = self
            .pixel_to_x(self.layer_bounds.left)
            .max(self.ranges.min_x)
            .min(self.ranges.max_x);
        let end = self
            .pixel_to_x(self.layer_bounds.right)
            .max(self.ranges.min_x)
            .min(self.ranges.max_x);
        (start, end)
    }
}
