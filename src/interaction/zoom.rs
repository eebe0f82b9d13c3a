use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Bounds, LayerDimensions, Ranges};
use crate::error::{ChartError, ChartResult};

use super::scroll::ScrollController;

/// A zoom level, either fixed or derived from the measured content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Zoom {
    Fixed(f64),
    /// Fits the whole content into the layer width.
    Content,
    /// Shows an x range of the given length across the layer width.
    X(f64),
    Min(Box<Zoom>, Box<Zoom>),
    Max(Box<Zoom>, Box<Zoom>),
}

impl Default for Zoom {
    fn default() -> Self {
        Self::Fixed(1.0)
    }
}

/// Unscaled measurement results zoom levels are resolved against.
#[derive(Debug, Clone, Copy)]
pub struct ZoomContext<'a> {
    pub ranges: &'a Ranges,
    pub dimensions: LayerDimensions,
    pub layer_bounds: Bounds,
}

impl Zoom {
    pub fn fixed(value: f64) -> ChartResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidZoom(value));
        }
        Ok(Self::Fixed(value))
    }

    pub fn x(length: f64) -> ChartResult<Self> {
        if !length.is_finite() || length <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom x length must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self::X(length))
    }

    #[must_use]
    pub fn min(a: Zoom, b: Zoom) -> Self {
        Self::Min(Box::new(a), Box::new(b))
    }

    #[must_use]
    pub fn max(a: Zoom, b: Zoom) -> Self {
        Self::Max(Box::new(a), Box::new(b))
    }

    /// Resolves to a positive factor; degenerate content resolves to `1`.
    #[must_use]
    pub fn resolve(&self, context: &ZoomContext<'_>) -> f64 {
        let value = match self {
            Self::Fixed(value) => *value,
            Self::Content => {
                let scalable = context.dimensions.scalable_content_width(context.ranges);
                let fixed = context.dimensions.unscalable_start_padding
                    + context.dimensions.unscalable_end_padding;
                (context.layer_bounds.width() - fixed) / scalable
            }
            Self::X(length) => {
                let width = context.dimensions.x_spacing * length / context.ranges.x_step;
                context.layer_bounds.width() / width
            }
            Self::Min(a, b) => a.resolve(context).min(b.resolve(context)),
            Self::Max(a, b) => a.resolve(context).max(b.resolve(context)),
        };
        if value.is_finite() && value > 0.0 {
            value
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomConfig {
    pub zoom_enabled: bool,
    pub min_zoom: Zoom,
    pub max_zoom: Zoom,
    pub initial_zoom: Zoom,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            zoom_enabled: true,
            min_zoom: Zoom::min(Zoom::Content, Zoom::Fixed(1.0)),
            max_zoom: Zoom::max(Zoom::Fixed(10.0), Zoom::Content),
            initial_zoom: Zoom::Fixed(1.0),
        }
    }
}

impl ZoomConfig {
    pub fn validate(self) -> ChartResult<Self> {
        for zoom in [&self.min_zoom, &self.max_zoom, &self.initial_zoom] {
            validate_zoom(zoom)?;
        }
        Ok(self)
    }
}

fn validate_zoom(zoom: &Zoom) -> ChartResult<()> {
    match zoom {
        Zoom::Fixed(value) => Zoom::fixed(*value).map(|_| ()),
        Zoom::X(length) => Zoom::x(*length).map(|_| ()),
        Zoom::Content => Ok(()),
        Zoom::Min(a, b) | Zoom::Max(a, b) => {
            validate_zoom(a)?;
            validate_zoom(b)
        }
    }
}

/// Persistable zoom state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoomSnapshot {
    pub value: f64,
    pub initial_zoom_handled: bool,
}

/// Owns the horizontal zoom factor applied to scalable dimensions.
#[derive(Debug, Clone)]
pub struct ZoomController {
    value: f64,
    min_value: f64,
    max_value: f64,
    config: ZoomConfig,
    initial_zoom_handled: bool,
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

impl ZoomController {
    #[must_use]
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            value: 1.0,
            min_value: 1.0,
            max_value: 1.0,
            config,
            initial_zoom_handled: false,
        }
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Resolved `(min, max)` from the last `update`.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        (self.min_value, self.max_value)
    }

    #[must_use]
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ZoomConfig) -> ChartResult<()> {
        self.config = config.validate()?;
        Ok(())
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.zoom_enabled
    }

    /// Re-resolves zoom bounds for new measurements and clamps the value.
    ///
    /// The initial zoom is applied by the first update only.
    pub fn update(&mut self, context: &ZoomContext<'_>) -> f64 {
        let min_value = self.config.min_zoom.resolve(context);
        let max_value = self.config.max_zoom.resolve(context);
        self.min_value = min_value.min(max_value);
        self.max_value = min_value.max(max_value);

        if !self.initial_zoom_handled {
            self.initial_zoom_handled = true;
            self.value = self.config.initial_zoom.resolve(context);
        }
        self.value = self.value.clamp(self.min_value, self.max_value);
        self.value
    }

    /// Sets the zoom directly, clamped to the resolved bounds.
    ///
    /// Keeps the value at the layer's left edge stationary.
    pub fn set_zoom(
        &mut self,
        value: f64,
        scroll: &mut ScrollController,
        context: &ZoomContext<'_>,
    ) -> bool {
        if !value.is_finite() || value <= 0.0 {
            return false;
        }
        self.zoom_by(value / self.value, 0.0, scroll, context)
    }

    /// Multiplies the zoom by `factor` around `focal_px` (layer coordinates).
    ///
    /// The x value under `focal_px` stays under it unless the resulting
    /// scroll has to be clamped. Out-of-range factors are clamped.
    pub fn zoom_by(
        &mut self,
        factor: f64,
        focal_px: f64,
        scroll: &mut ScrollController,
        context: &ZoomContext<'_>,
    ) -> bool {
        if !self.config.zoom_enabled || !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        if !focal_px.is_finite() {
            return false;
        }
        let old_zoom = self.value;
        let new_zoom = (old_zoom * factor).clamp(self.min_value, self.max_value);
        if new_zoom == old_zoom {
            return false;
        }

        let unscalable_start = context.dimensions.unscalable_start_padding;
        let old_scroll = scroll.value();
        let target = unscalable_start
            + (old_scroll + focal_px - unscalable_start) * new_zoom / old_zoom
            - focal_px;

        self.value = new_zoom;
        let content_width = context
            .dimensions
            .scaled(new_zoom)
            .content_width(context.ranges);
        scroll.update(content_width, context.layer_bounds.width());
        if scroll.is_enabled() {
            scroll.jump_to(target);
        }
        trace!(old_zoom, new_zoom, focal_px, scroll = scroll.value(), "zoom changed");
        true
    }

    #[must_use]
    pub fn snapshot(&self) -> ZoomSnapshot {
        ZoomSnapshot {
            value: self.value,
            initial_zoom_handled: self.initial_zoom_handled,
        }
    }

    /// Restores a saved zoom; it is re-clamped on the next `update`.
    pub fn restore(&mut self, snapshot: ZoomSnapshot) {
        if snapshot.value.is_finite() && snapshot.value > 0.0 {
            self.value = snapshot.value;
            self.initial_zoom_handled = snapshot.initial_zoom_handled;
        }
    }
}
