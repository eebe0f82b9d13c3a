use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Size of a single corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CornerSize {
    /// Fixed size in density-independent units.
    Absolute(f64),
    /// Percentage of the shorter side of the shape, in `[0, 100]`.
    Relative(f64),
}

impl CornerSize {
    pub fn absolute(size_dp: f64) -> ChartResult<Self> {
        if !size_dp.is_finite() || size_dp < 0.0 {
            return Err(ChartError::InvalidData(
                "absolute corner size must be finite and >= 0".to_owned(),
            ));
        }
        Ok(Self::Absolute(size_dp))
    }

    pub fn relative(percentage: f64) -> ChartResult<Self> {
        if !(0.0..=100.0).contains(&percentage) {
            return Err(ChartError::InvalidPercentage {
                name: "relative corner size",
                value: percentage,
            });
        }
        Ok(Self::Relative(percentage))
    }

    /// Corner size in pixels before any scale-down.
    #[must_use]
    pub fn resolve(self, shorter_side: f64, density: f64) -> f64 {
        match self {
            Self::Absolute(size_dp) => size_dp * density,
            Self::Relative(percentage) => shorter_side * percentage / 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CornerTreatment {
    #[default]
    Sharp,
    Rounded,
    Cut,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corner {
    pub size: CornerSize,
    pub treatment: CornerTreatment,
}

impl Corner {
    pub const SHARP: Corner = Corner {
        size: CornerSize::Absolute(0.0),
        treatment: CornerTreatment::Sharp,
    };

    #[must_use]
    pub fn new(size: CornerSize, treatment: CornerTreatment) -> Self {
        Self { size, treatment }
    }

    pub fn rounded_percent(percentage: f64) -> ChartResult<Self> {
        Ok(Self::new(
            CornerSize::relative(percentage)?,
            CornerTreatment::Rounded,
        ))
    }

    pub fn cut_percent(percentage: f64) -> ChartResult<Self> {
        Ok(Self::new(CornerSize::relative(percentage)?, CornerTreatment::Cut))
    }
}

/// Corner sizes of a rectangle, in pixels, after scale-down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResolvedCorners {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

/// Four corners of a rectangular shape (column, label background).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerShape {
    pub top_left: Corner,
    pub top_right: Corner,
    pub bottom_right: Corner,
    pub bottom_left: Corner,
}

impl Default for CornerShape {
    fn default() -> Self {
        Self::uniform(Corner::SHARP)
    }
}

impl CornerShape {
    #[must_use]
    pub fn uniform(corner: Corner) -> Self {
        Self {
            top_left: corner,
            top_right: corner,
            bottom_right: corner,
            bottom_left: corner,
        }
    }

    /// Resolves pixel corner sizes for a `width` × `height` rectangle.
    ///
    /// When two corners sharing an edge need more than the edge's length,
    /// every corner is multiplied by the same factor: the smallest
    /// `edge / (corner_a + corner_b)` over the four edges. Proportions
    /// between corners are preserved; no corner takes precedence.
    #[must_use]
    pub fn resolve(&self, width: f64, height: f64, density: f64) -> ResolvedCorners {
        let width = width.max(0.0);
        let height = height.max(0.0);
        let shorter = width.min(height);
        let raw = ResolvedCorners {
            top_left: self.top_left.size.resolve(shorter, density),
            top_right: self.top_right.size.resolve(shorter, density),
            bottom_right: self.bottom_right.size.resolve(shorter, density),
            bottom_left: self.bottom_left.size.resolve(shorter, density),
        };
        let scale = corner_scale(&raw, width, height);
        ResolvedCorners {
            top_left: raw.top_left * scale,
            top_right: raw.top_right * scale,
            bottom_right: raw.bottom_right * scale,
            bottom_left: raw.bottom_left * scale,
        }
    }
}

fn corner_scale(corners: &ResolvedCorners, width: f64, height: f64) -> f64 {
    let edges = [
        (width, corners.top_left + corners.top_right),
        (width, corners.bottom_left + corners.bottom_right),
        (height, corners.top_left + corners.bottom_left),
        (height, corners.top_right + corners.bottom_right),
    ];
    edges
        .iter()
        .filter(|(_, demand)| *demand > 0.0)
        .map(|(edge, demand)| edge / demand)
        .fold(1.0, f64::min)
}
