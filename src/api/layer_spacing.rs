use crate::core::{DimensionsContributor, DimensionsRequest, LayerDimensions, MeasuringContext};
use crate::error::{ChartError, ChartResult};

fn validate_non_negative(values: &[(f64, &str)]) -> ChartResult<()> {
    for (value, name) in values {
        if !value.is_finite() || *value < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "{name} must be finite and >= 0"
            )));
        }
    }
    Ok(())
}

/// Spacing needs of a column layer, in density-independent units.
///
/// Each x holds `columns_per_x` side-by-side columns separated by
/// `inner_spacing_dp`; neighbouring groups are `outer_spacing_dp` apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnLayerSpacing {
    pub column_width_dp: f64,
    pub columns_per_x: usize,
    pub inner_spacing_dp: f64,
    pub outer_spacing_dp: f64,
}

impl Default for ColumnLayerSpacing {
    fn default() -> Self {
        Self {
            column_width_dp: 8.0,
            columns_per_x: 1,
            inner_spacing_dp: 0.0,
            outer_spacing_dp: 32.0,
        }
    }
}

impl ColumnLayerSpacing {
    pub fn new(
        column_width_dp: f64,
        columns_per_x: usize,
        inner_spacing_dp: f64,
        outer_spacing_dp: f64,
    ) -> ChartResult<Self> {
        validate_non_negative(&[
            (column_width_dp, "column width"),
            (inner_spacing_dp, "column inner spacing"),
            (outer_spacing_dp, "column outer spacing"),
        ])?;
        Ok(Self {
            column_width_dp,
            columns_per_x: columns_per_x.max(1),
            inner_spacing_dp,
            outer_spacing_dp,
        })
    }

    /// Width of one x slot in density-independent units.
    #[must_use]
    pub fn x_spacing_dp(&self) -> f64 {
        let columns = self.columns_per_x.max(1) as f64;
        columns * self.column_width_dp
            + (columns - 1.0) * self.inner_spacing_dp
            + self.outer_spacing_dp
    }
}

impl DimensionsContributor for ColumnLayerSpacing {
    fn update_dimensions(&self, context: &MeasuringContext<'_>, dimensions: &mut LayerDimensions) {
        let x_spacing = context.surface.dp_to_px(self.x_spacing_dp());
        dimensions.ensure_values_at_least(DimensionsRequest {
            x_spacing: Some(x_spacing),
            scalable_start_padding: Some(x_spacing / 2.0),
            scalable_end_padding: Some(x_spacing / 2.0),
            ..DimensionsRequest::default()
        });
    }
}

/// Spacing needs of a point/line layer, in density-independent units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLayerSpacing {
    pub point_spacing_dp: f64,
    pub point_size_dp: f64,
}

impl Default for PointLayerSpacing {
    fn default() -> Self {
        Self {
            point_spacing_dp: 32.0,
            point_size_dp: 8.0,
        }
    }
}

impl PointLayerSpacing {
    pub fn new(point_spacing_dp: f64, point_size_dp: f64) -> ChartResult<Self> {
        validate_non_negative(&[
            (point_spacing_dp, "point spacing"),
            (point_size_dp, "point size"),
        ])?;
        Ok(Self {
            point_spacing_dp,
            point_size_dp,
        })
    }
}

impl DimensionsContributor for PointLayerSpacing {
    fn update_dimensions(&self, context: &MeasuringContext<'_>, dimensions: &mut LayerDimensions) {
        let half_point = context.surface.dp_to_px(self.point_size_dp) / 2.0;
        dimensions.ensure_values_at_least(DimensionsRequest {
            x_spacing: Some(context.surface.dp_to_px(self.point_spacing_dp)),
            unscalable_start_padding: Some(half_point),
            unscalable_end_padding: Some(half_point),
            ..DimensionsRequest::default()
        });
    }
}

/// Fixed spacing request, mostly for hosts with custom layers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedSpacing {
    pub request: DimensionsRequest,
}

impl DimensionsContributor for FixedSpacing {
    fn update_dimensions(&self, _context: &MeasuringContext<'_>, dimensions: &mut LayerDimensions) {
        dimensions.ensure_values_at_least(self.request);
    }
}
