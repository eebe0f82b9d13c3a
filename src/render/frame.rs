use crate::core::{AxisPosition, Bounds, Insets, LayerDimensions, Ranges, Surface};
use crate::error::{ChartError, ChartResult};

/// A measured axis label with its resolved pixel anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub position: AxisPosition,
    pub value: f64,
    pub text: String,
    /// Center of the label along the axis (x for horizontal, y for vertical).
    pub pixel: f64,
    pub width: f64,
    pub height: f64,
}

/// Backend-agnostic result of one measurement pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub surface: Surface,
    pub ranges: Ranges,
    /// Dimensions already scaled by `zoom`.
    pub dimensions: LayerDimensions,
    pub insets: Insets,
    pub layer_bounds: Bounds,
    pub scroll: f64,
    pub max_scroll: f64,
    pub zoom: f64,
    pub labels: Vec<AxisLabel>,
}

impl RenderFrame {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.surface.is_valid() {
            return Err(ChartError::InvalidSurface {
                width: self.surface.width,
                height: self.surface.height,
            });
        }

        let values = [
            self.dimensions.x_spacing,
            self.dimensions.start_padding(),
            self.dimensions.end_padding(),
            self.scroll,
            self.max_scroll,
            self.zoom,
        ];
        if values.iter().any(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData(
                "frame dimensions, scroll and zoom must be finite".to_owned(),
            ));
        }
        if self.scroll < 0.0 || self.scroll > self.max_scroll {
            return Err(ChartError::InvalidData(format!(
                "scroll {} outside [0, {}]",
                self.scroll, self.max_scroll
            )));
        }
        if self.labels.iter().any(|label| !label.pixel.is_finite()) {
            return Err(ChartError::InvalidData(
                "axis label positions must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}
