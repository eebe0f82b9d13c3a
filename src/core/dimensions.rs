use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::extra_store::ExtraStore;
use crate::core::ranges::Ranges;
use crate::core::types::Surface;

/// Negotiated horizontal spacing and paddings shared by every layer and
/// axis during one measurement pass.
///
/// Scalable values are multiplied by the zoom factor; unscalable values are
/// fixed pixels (half a point marker, half an axis label).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayerDimensions {
    /// Pixels per `x_step`.
    pub x_spacing: f64,
    pub scalable_start_padding: f64,
    pub scalable_end_padding: f64,
    pub unscalable_start_padding: f64,
    pub unscalable_end_padding: f64,
}

/// A contribution to [`LayerDimensions`]; `None` fields leave a value alone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DimensionsRequest {
    pub x_spacing: Option<f64>,
    pub scalable_start_padding: Option<f64>,
    pub scalable_end_padding: Option<f64>,
    pub unscalable_start_padding: Option<f64>,
    pub unscalable_end_padding: Option<f64>,
}

impl LayerDimensions {
    #[must_use]
    pub fn start_padding(&self) -> f64 {
        self.scalable_start_padding + self.unscalable_start_padding
    }

    #[must_use]
    pub fn end_padding(&self) -> f64 {
        self.scalable_end_padding + self.unscalable_end_padding
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Raises each requested value to at least the requested amount.
    ///
    /// Values never shrink, so contributions combine by maximum.
    pub fn ensure_values_at_least(&mut self, request: DimensionsRequest) {
        fn grow(slot: &mut f64, requested: Option<f64>) {
            if let Some(value) = requested.filter(|value| value.is_finite()) {
                *slot = slot.max(value);
            }
        }

        grow(&mut self.x_spacing, request.x_spacing);
        grow(&mut self.scalable_start_padding, request.scalable_start_padding);
        grow(&mut self.scalable_end_padding, request.scalable_end_padding);
        grow(
            &mut self.unscalable_start_padding,
            request.unscalable_start_padding,
        );
        grow(&mut self.unscalable_end_padding, request.unscalable_end_padding);
    }

    /// Returns a copy with spacing and scalable paddings multiplied by `zoom`.
    #[must_use]
    pub fn scaled(&self, zoom: f64) -> Self {
        Self {
            x_spacing: self.x_spacing * zoom,
            scalable_start_padding: self.scalable_start_padding * zoom,
            scalable_end_padding: self.scalable_end_padding * zoom,
            unscalable_start_padding: self.unscalable_start_padding,
            unscalable_end_padding: self.unscalable_end_padding,
        }
    }

    /// Width of the part that zoom stretches.
    #[must_use]
    pub fn scalable_content_width(&self, ranges: &Ranges) -> f64 {
        self.x_spacing * ranges.x_step_count()
            + self.scalable_start_padding
            + self.scalable_end_padding
    }

    /// Total content width: `(entry slots - 1) * x_spacing + paddings`.
    #[must_use]
    pub fn content_width(&self, ranges: &Ranges) -> f64 {
        self.scalable_content_width(ranges)
            + self.unscalable_start_padding
            + self.unscalable_end_padding
    }
}

/// Explicit measurement inputs handed to every contributor.
#[derive(Debug, Clone, Copy)]
pub struct MeasuringContext<'a> {
    pub surface: Surface,
    pub ranges: &'a Ranges,
    pub extra: &'a ExtraStore,
    /// Width available to chart layers once axis insets are removed.
    pub layer_width: f64,
    pub scroll_enabled: bool,
    pub zoom_enabled: bool,
}

/// Anything that needs horizontal room: chart layers and horizontal axes.
pub trait DimensionsContributor {
    fn update_dimensions(&self, context: &MeasuringContext<'_>, dimensions: &mut LayerDimensions);
}

/// Clears `dimensions` and folds every contribution into it.
pub fn negotiate_into(
    contributors: &[&dyn DimensionsContributor],
    context: &MeasuringContext<'_>,
    dimensions: &mut LayerDimensions,
) {
    dimensions.clear();
    for contributor in contributors {
        contributor.update_dimensions(context, dimensions);
    }
    trace!(
        x_spacing = dimensions.x_spacing,
        start_padding = dimensions.start_padding(),
        end_padding = dimensions.end_padding(),
        "layer dimensions negotiated"
    );
}

#[must_use]
pub fn negotiate(
    contributors: &[&dyn DimensionsContributor],
    context: &MeasuringContext<'_>,
) -> LayerDimensions {
    let mut dimensions = LayerDimensions::default();
    negotiate_into(contributors, context, &mut dimensions);
    dimensions
}

/// Whether short content is stretched to fill the layer width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AutoScaleUp {
    /// Content keeps its negotiated width.
    None,
    /// Stretches only when scrolling is disabled.
    #[default]
    WhenScrollDisabled,
    /// Always stretches short content, even with scrolling enabled.
    Full,
}

impl AutoScaleUp {
    #[must_use]
    pub fn permits(self, scroll_enabled: bool) -> bool {
        match self {
            Self::None => false,
            Self::WhenScrollDisabled => !scroll_enabled,
            Self::Full => true,
        }
    }
}

/// Stretches spacing and scalable paddings so content exactly fills
/// `available_width` when it is narrower and `policy` permits it.
///
/// Returns `true` when `dimensions` changed.
pub fn fit_to_surface(
    dimensions: &mut LayerDimensions,
    ranges: &Ranges,
    available_width: f64,
    policy: AutoScaleUp,
    scroll_enabled: bool,
) -> bool {
    if !policy.permits(scroll_enabled) || !available_width.is_finite() {
        return false;
    }
    let content_width = dimensions.content_width(ranges);
    if content_width >= available_width {
        return false;
    }
    let scalable_width = dimensions.scalable_content_width(ranges);
    if scalable_width <= 0.0 {
        return false;
    }
    let fixed_width = dimensions.unscalable_start_padding + dimensions.unscalable_end_padding;
    let factor = (available_width - fixed_width) / scalable_width;
    if !factor.is_finite() || factor <= 1.0 {
        return false;
    }

    dimensions.x_spacing *= factor;
    dimensions.scalable_start_padding *= factor;
    dimensions.scalable_end_padding *= factor;
    trace!(factor, "layer dimensions scaled up to fill surface");
    true
}
