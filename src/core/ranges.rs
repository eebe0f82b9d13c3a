use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::extra_store::ExtraStore;
use crate::core::primitives::float_gcd;
use crate::core::types::{Series, VerticalAxisPosition};

/// Below this fraction of the smallest x gap the gap GCD is treated as noise.
const MIN_STEP_TO_GAP_RATIO: f64 = 1e-4;

/// Vertical value range of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YRange {
    pub min_y: f64,
    pub max_y: f64,
}

impl YRange {
    #[must_use]
    pub fn new(min_y: f64, max_y: f64) -> Self {
        Self {
            min_y: min_y.min(max_y),
            max_y: min_y.max(max_y),
        }
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    fn union(self, other: YRange) -> YRange {
        YRange {
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Maps `y` to an inverted pixel coordinate inside `[top, top + height]`.
    ///
    /// A zero-length range maps every value to the bottom edge.
    #[must_use]
    pub fn y_to_pixel(self, y: f64, top: f64, height: f64) -> f64 {
        let length = self.length();
        if length <= 0.0 {
            return top + height;
        }
        top + height - (y - self.min_y) / length * height
    }
}

/// Value ranges shared by all layers and axes for one measurement pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranges {
    pub min_x: f64,
    pub max_x: f64,
    pub x_step: f64,
    y: YRange,
    axis_y: IndexMap<VerticalAxisPosition, YRange>,
    entry_count: usize,
}

impl Default for Ranges {
    fn default() -> Self {
        Self::empty()
    }
}

impl Ranges {
    /// Degenerate ranges meaning "nothing to draw".
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min_x: 0.0,
            max_x: 0.0,
            x_step: 1.0,
            y: YRange::new(0.0, 0.0),
            axis_y: IndexMap::new(),
            entry_count: 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    #[must_use]
    pub fn x_length(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Number of `x_step` intervals between `min_x` and `max_x`.
    #[must_use]
    pub fn x_step_count(&self) -> f64 {
        self.x_length() / self.x_step
    }

    /// Returns the y range of `axis`, or the union of all axes for `None`.
    ///
    /// An axis without series of its own falls back to the union.
    #[must_use]
    pub fn y_range(&self, axis: Option<VerticalAxisPosition>) -> YRange {
        axis.and_then(|axis| self.axis_y.get(&axis).copied())
            .unwrap_or(self.y)
    }

    pub fn axis_y_ranges(&self) -> impl Iterator<Item = (VerticalAxisPosition, YRange)> + '_ {
        self.axis_y.iter().map(|(axis, range)| (*axis, *range))
    }
}

/// Caller hooks replacing computed bounds (fixed-range axes, zero baselines).
///
/// Every hook receives the computed values and returns the value to use.
pub trait RangeProvider: Send + Sync {
    fn min_x(&self, min_x: f64, _max_x: f64, _extra: &ExtraStore) -> f64 {
        min_x
    }

    fn max_x(&self, _min_x: f64, max_x: f64, _extra: &ExtraStore) -> f64 {
        max_x
    }

    fn x_step(&self, x_step: f64, _extra: &ExtraStore) -> f64 {
        x_step
    }

    fn min_y(
        &self,
        _axis: Option<VerticalAxisPosition>,
        min_y: f64,
        _max_y: f64,
        _extra: &ExtraStore,
    ) -> f64 {
        min_y
    }

    fn max_y(
        &self,
        _axis: Option<VerticalAxisPosition>,
        _min_y: f64,
        max_y: f64,
        _extra: &ExtraStore,
    ) -> f64 {
        max_y
    }
}

/// Uses the computed bounds as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoRangeProvider;

impl RangeProvider for AutoRangeProvider {}

/// Pins the y bounds of one axis (or every axis when `axis` is `None`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FixedYRange {
    pub axis: Option<VerticalAxisPosition>,
    pub min_y: Option<f64>,
    pub max_y: Option<f64>,
}

impl FixedYRange {
    #[must_use]
    pub fn new(min_y: Option<f64>, max_y: Option<f64>) -> Self {
        Self {
            axis: None,
            min_y,
            max_y,
        }
    }

    #[must_use]
    pub fn for_axis(mut self, axis: VerticalAxisPosition) -> Self {
        self.axis = Some(axis);
        self
    }

    fn applies_to(&self, axis: Option<VerticalAxisPosition>) -> bool {
        self.axis.is_none() || self.axis == axis
    }
}

impl RangeProvider for FixedYRange {
    fn min_y(
        &self,
        axis: Option<VerticalAxisPosition>,
        min_y: f64,
        _max_y: f64,
        _extra: &ExtraStore,
    ) -> f64 {
        match self.min_y {
            Some(fixed) if self.applies_to(axis) && fixed.is_finite() => fixed,
            _ => min_y,
        }
    }

    fn max_y(
        &self,
        axis: Option<VerticalAxisPosition>,
        _min_y: f64,
        max_y: f64,
        _extra: &ExtraStore,
    ) -> f64 {
        match self.max_y {
            Some(fixed) if self.applies_to(axis) && fixed.is_finite() => fixed,
            _ => max_y,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Bounds1d {
    min: f64,
    max: f64,
}

impl Bounds1d {
    fn include(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn of(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }
}

/// Folds series into [`Ranges`].
///
/// The tracker keeps accumulators between `include` calls; `reset` returns
/// it to the empty sentinel so bounds never leak across datasets.
#[derive(Debug, Default)]
pub struct RangeTracker {
    x: Option<Bounds1d>,
    x_gcd: Option<f64>,
    min_x_gap: Option<f64>,
    y: Option<Bounds1d>,
    axis_y: IndexMap<VerticalAxisPosition, Bounds1d>,
    entry_count: usize,
}

impl RangeTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.x = None;
        self.x_gcd = None;
        self.min_x_gap = None;
        self.y = None;
        self.axis_y.clear();
        self.entry_count = 0;
    }

    /// Accumulates one series.
    pub fn include(&mut self, series: &Series) {
        let mut previous_x: Option<f64> = None;
        let mut skipped = 0usize;

        for entry in &series.entries {
            if !entry.is_finite() {
                skipped += 1;
                continue;
            }
            self.entry_count += 1;

            match self.x.as_mut() {
                Some(bounds) => bounds.include(entry.x),
                None => self.x = Some(Bounds1d::of(entry.x)),
            }
            match self.y.as_mut() {
                Some(bounds) => bounds.include(entry.y),
                None => self.y = Some(Bounds1d::of(entry.y)),
            }
            if let Some(axis) = series.axis {
                self.axis_y
                    .entry(axis)
                    .and_modify(|bounds| bounds.include(entry.y))
                    .or_insert_with(|| Bounds1d::of(entry.y));
            }

            if let Some(previous) = previous_x {
                let gap = (entry.x - previous).abs();
                if gap > 0.0 {
                    self.x_gcd = Some(match self.x_gcd {
                        Some(gcd) => float_gcd(gcd, gap),
                        None => gap,
                    });
                    self.min_x_gap = Some(self.min_x_gap.map_or(gap, |min_gap| min_gap.min(gap)));
                }
            }
            previous_x = Some(entry.x);
        }

        if skipped > 0 {
            warn!(skipped, "skipping non-finite entries while tracking ranges");
        }
    }

    /// Produces ranges from the accumulated series, applying `provider` overrides.
    #[must_use]
    pub fn finish(&self, provider: &dyn RangeProvider, extra: &ExtraStore) -> Ranges {
        let Some(x) = self.x else {
            return Ranges::empty();
        };
        let y = self.y.unwrap_or(Bounds1d::of(0.0));

        let computed_step = self.computed_x_step();
        let x_step = match provider.x_step(computed_step, extra) {
            step if step.is_finite() && step > 0.0 => step,
            _ => computed_step,
        };

        let min_x = finite_or("min_x", provider.min_x(x.min, x.max, extra), x.min);
        let max_x = finite_or("max_x", provider.max_x(x.min, x.max, extra), x.max);
        let (min_x, max_x) = ordered("x", min_x, max_x);

        let resolve_y = |axis: Option<VerticalAxisPosition>, bounds: Bounds1d| {
            let min_y = finite_or(
                "min_y",
                provider.min_y(axis, bounds.min, bounds.max, extra),
                bounds.min,
            );
            let max_y = finite_or(
                "max_y",
                provider.max_y(axis, bounds.min, bounds.max, extra),
                bounds.max,
            );
            let (min_y, max_y) = ordered("y", min_y, max_y);
            YRange { min_y, max_y }
        };

        let axis_y: IndexMap<VerticalAxisPosition, YRange> = self
            .axis_y
            .iter()
            .map(|(axis, bounds)| (*axis, resolve_y(Some(*axis), *bounds)))
            .collect();
        let combined = axis_y
            .values()
            .fold(resolve_y(None, y), |acc, range| acc.union(*range));

        let ranges = Ranges {
            min_x,
            max_x,
            x_step,
            y: combined,
            axis_y,
            entry_count: self.entry_count,
        };
        debug!(
            min_x = ranges.min_x,
            max_x = ranges.max_x,
            x_step = ranges.x_step,
            min_y = ranges.y.min_y,
            max_y = ranges.y.max_y,
            entries = ranges.entry_count,
            "ranges updated"
        );
        ranges
    }

    /// GCD of the x gaps, or the smallest gap when the gaps share no
    /// usable common step (e.g. 1 and pi).
    fn computed_x_step(&self) -> f64 {
        match (self.x_gcd, self.min_x_gap) {
            (Some(gcd), Some(min_gap)) if gcd < min_gap * MIN_STEP_TO_GAP_RATIO => {
                debug!(gcd, min_gap, "x gaps share no common step, using smallest gap");
                min_gap
            }
            (Some(gcd), _) => gcd,
            _ => 1.0,
        }
    }

    /// Resets, folds every series and returns the resulting ranges.
    pub fn update(
        &mut self,
        series: &[Series],
        provider: &dyn RangeProvider,
        extra: &ExtraStore,
    ) -> Ranges {
        self.reset();
        for item in series {
            self.include(item);
        }
        self.finish(provider, extra)
    }
}

fn finite_or(bound: &'static str, value: f64, computed: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        debug!(bound, value, computed, "ignoring non-finite range override");
        computed
    }
}

fn ordered(axis: &'static str, min: f64, max: f64) -> (f64, f64) {
    if min > max {
        debug!(axis, min, max, "range override produced inverted bounds, swapping");
        (max, min)
    } else {
        (min, max)
    }
}
