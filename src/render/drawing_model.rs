use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::primitives::lerp;

/// Renderer-specific geometry of one entry that can be blended between
/// two snapshots.
pub trait EntryGeometry: Clone + Send + Sync {
    /// Blends from `from` (fraction 0) to `self` (fraction 1).
    #[must_use]
    fn interpolate(&self, from: &Self, fraction: f64) -> Self;

    /// The neutral state entries grow from when added and shrink to when
    /// removed (zero height, zero offset).
    #[must_use]
    fn baseline(&self) -> Self;
}

impl EntryGeometry for f64 {
    fn interpolate(&self, from: &Self, fraction: f64) -> Self {
        lerp(*from, *self, fraction)
    }

    fn baseline(&self) -> Self {
        0.0
    }
}

/// Column height as a fraction of the y range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnGeometry {
    pub height: f64,
}

impl EntryGeometry for ColumnGeometry {
    fn interpolate(&self, from: &Self, fraction: f64) -> Self {
        Self {
            height: lerp(from.height, self.height, fraction),
        }
    }

    fn baseline(&self) -> Self {
        Self { height: 0.0 }
    }
}

/// Point position as a fraction of the y range, with its opacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    pub y: f64,
    pub opacity: f64,
}

impl EntryGeometry for PointGeometry {
    fn interpolate(&self, from: &Self, fraction: f64) -> Self {
        Self {
            y: lerp(from.y, self.y, fraction),
            opacity: lerp(from.opacity, self.opacity, fraction),
        }
    }

    fn baseline(&self) -> Self {
        Self {
            y: 0.0,
            opacity: 0.0,
        }
    }
}

pub type SeriesGeometry<G> = BTreeMap<OrderedFloat<f64>, G>;

/// Per-series, per-x snapshot of entry geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingModel<G> {
    series: Vec<SeriesGeometry<G>>,
}

impl<G> Default for DrawingModel<G> {
    fn default() -> Self {
        Self { series: Vec::new() }
    }
}

impl<G> DrawingModel<G> {
    #[must_use]
    pub fn new(series: Vec<SeriesGeometry<G>>) -> Self {
        Self { series }
    }

    /// Builds a model from `(x, geometry)` pairs per series.
    ///
    /// Later pairs replace earlier ones with the same x.
    #[must_use]
    pub fn from_pairs<S, I>(series: S) -> Self
    where
        S: IntoIterator<Item = I>,
        I: IntoIterator<Item = (f64, G)>,
    {
        Self {
            series: series
                .into_iter()
                .map(|entries| {
                    entries
                        .into_iter()
                        .map(|(x, geometry)| (OrderedFloat(x), geometry))
                        .collect()
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn series(&self) -> &[SeriesGeometry<G>] {
        &self.series
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(BTreeMap::is_empty)
    }

    #[must_use]
    pub fn get(&self, series_index: usize, x: f64) -> Option<&G> {
        self.series.get(series_index)?.get(&OrderedFloat(x))
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.series.iter().map(BTreeMap::len).sum()
    }
}
