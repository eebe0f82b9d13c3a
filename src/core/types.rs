use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::ChartResult;

/// Drawing surface geometry supplied by the host for one measurement pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
    /// Pixels per density-independent unit.
    pub density: f64,
    pub font_scale: f64,
}

impl Surface {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            density: 1.0,
            font_scale: 1.0,
        }
    }

    #[must_use]
    pub fn with_density(mut self, density: f64, font_scale: f64) -> Self {
        self.density = density;
        self.font_scale = font_scale;
        self
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
            && self.density.is_finite()
            && self.density > 0.0
            && self.font_scale.is_finite()
            && self.font_scale > 0.0
    }

    /// Converts density-independent units to pixels.
    #[must_use]
    pub fn dp_to_px(self, dp: f64) -> f64 {
        dp * self.density
    }

    /// Converts scale-independent font units to pixels.
    #[must_use]
    pub fn sp_to_px(self, sp: f64) -> f64 {
        sp * self.density * self.font_scale
    }
}

/// A single `(x, y)` sample within a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub x: f64,
    pub y: f64,
}

impl Entry {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> ChartResult<Self> {
        Ok(Self {
            x: datetime_to_unix_seconds(time),
            y: decimal_to_f64(value, "value")?,
        })
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Start or end edge of the layer area, in layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VerticalAxisPosition {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HorizontalAxisPosition {
    Top,
    Bottom,
}

/// Where an axis is attached to the layer area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisPosition {
    Vertical(VerticalAxisPosition),
    Horizontal(HorizontalAxisPosition),
}

impl AxisPosition {
    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical(_))
    }
}

/// Ordered entries that share one visual layer and one vertical axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Series {
    pub entries: Vec<Entry>,
    /// Vertical axis scaling this series; `None` uses the shared range.
    #[serde(default)]
    pub axis: Option<VerticalAxisPosition>,
}

impl Series {
    #[must_use]
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            axis: None,
        }
    }

    /// Builds a series from `(x, y)` pairs.
    #[must_use]
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        Self::new(pairs.iter().map(|&(x, y)| Entry::new(x, y)).collect())
    }

    #[must_use]
    pub fn on_axis(mut self, axis: VerticalAxisPosition) -> Self {
        self.axis = Some(axis);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        (self.right - self.left).max(0.0)
    }

    #[must_use]
    pub fn height(self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }
}
