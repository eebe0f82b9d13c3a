use serde::{Deserialize, Serialize};

use crate::core::types::{Bounds, Surface};

/// Space reserved around the layer area, mostly by axes.
///
/// Like [`LayerDimensions`](crate::core::LayerDimensions), insets only grow
/// during a pass: requests for the same edge combine by maximum.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Insets {
    pub start: f64,
    pub top: f64,
    pub end: f64,
    pub bottom: f64,
}

impl Insets {
    #[must_use]
    pub fn new(start: f64, top: f64, end: f64, bottom: f64) -> Self {
        Self {
            start,
            top,
            end,
            bottom,
        }
    }

    #[must_use]
    pub fn horizontal(&self) -> f64 {
        self.start + self.end
    }

    #[must_use]
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn ensure_values_at_least(&mut self, other: Insets) {
        self.start = self.start.max(other.start);
        self.top = self.top.max(other.top);
        self.end = self.end.max(other.end);
        self.bottom = self.bottom.max(other.bottom);
    }

    /// Layer area left inside `surface` once insets are removed.
    ///
    /// Insets larger than the surface collapse the area to zero size instead
    /// of inverting it.
    #[must_use]
    pub fn layer_bounds(&self, surface: Surface) -> Bounds {
        let left = self.start.min(surface.width);
        let top = self.top.min(surface.height);
        let right = (surface.width - self.end).max(left);
        let bottom = (surface.height - self.bottom).max(top);
        Bounds::new(left, top, right, bottom)
    }
}
