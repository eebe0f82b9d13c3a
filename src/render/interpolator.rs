use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use ordered_float::OrderedFloat;
use tracing::{debug, trace};

#[cfg(feature = "parallel-transform")]
use rayon::prelude::*;

use super::cancellation::{Cancelled, CancellationToken};
use super::drawing_model::{DrawingModel, EntryGeometry, SeriesGeometry};

/// Entries folded between two cancellation checks inside one series.
const CANCELLATION_CHECK_INTERVAL: usize = 256;

/// Produces intermediate drawing models between two snapshots.
pub trait DrawingModelInterpolator<G>: Send + Sync {
    /// Replaces both snapshots and rebuilds the transformation map.
    fn set_models(&self, old: Option<&DrawingModel<G>>, new: Option<&DrawingModel<G>>);

    /// Samples the transition at `fraction` (clamped to `[0, 1]`).
    ///
    /// Returns `Ok(None)` when neither snapshot has entries to draw.
    fn transform(
        &self,
        fraction: f64,
        token: &CancellationToken,
    ) -> Result<Option<DrawingModel<G>>, Cancelled>;
}

/// Geometry of one x key in the old and new snapshots.
#[derive(Debug, Clone, PartialEq)]
struct Transformation<G> {
    old: Option<G>,
    new: Option<G>,
}

impl<G: EntryGeometry> Transformation<G> {
    fn sample(&self, fraction: f64) -> Option<G> {
        match (&self.old, &self.new) {
            (Some(old), Some(new)) => Some(new.interpolate(old, fraction)),
            (None, Some(new)) => Some(new.interpolate(&new.baseline(), fraction)),
            (Some(old), None) if fraction < 1.0 => Some(old.baseline().interpolate(old, fraction)),
            _ => None,
        }
    }
}

type SeriesTransformations<G> = BTreeMap<OrderedFloat<f64>, Transformation<G>>;

/// Keyed diff of two drawing models behind a mutex.
///
/// `set_models` builds the new map first and swaps it in under the lock;
/// `transform` holds the lock for the whole fold, so it always sees one
/// complete map.
#[derive(Debug)]
pub struct DefaultDrawingModelInterpolator<G> {
    transformations: Mutex<Vec<SeriesTransformations<G>>>,
}

impl<G> Default for DefaultDrawingModelInterpolator<G> {
    fn default() -> Self {
        Self {
            transformations: Mutex::new(Vec::new()),
        }
    }
}

impl<G: EntryGeometry> DefaultDrawingModelInterpolator<G> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SeriesTransformations<G>>> {
        self.transformations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn build_transformations<G: EntryGeometry>(
    old: Option<&DrawingModel<G>>,
    new: Option<&DrawingModel<G>>,
) -> Vec<SeriesTransformations<G>> {
    let series_count = old
        .map_or(0, DrawingModel::series_count)
        .max(new.map_or(0, DrawingModel::series_count));
    let mut transformations: Vec<SeriesTransformations<G>> =
        (0..series_count).map(|_| BTreeMap::new()).collect();

    if let Some(old) = old {
        for (series, entries) in transformations.iter_mut().zip(old.series()) {
            for (x, geometry) in entries {
                series.insert(
                    *x,
                    Transformation {
                        old: Some(geometry.clone()),
                        new: None,
                    },
                );
            }
        }
    }
    if let Some(new) = new {
        for (series, entries) in transformations.iter_mut().zip(new.series()) {
            for (x, geometry) in entries {
                series
                    .entry(*x)
                    .and_modify(|transformation| transformation.new = Some(geometry.clone()))
                    .or_insert_with(|| Transformation {
                        old: None,
                        new: Some(geometry.clone()),
                    });
            }
        }
    }
    transformations
}

fn transform_series<G: EntryGeometry>(
    transformations: &SeriesTransformations<G>,
    fraction: f64,
    token: &CancellationToken,
) -> Result<SeriesGeometry<G>, Cancelled> {
    token.check()?;
    let mut series = SeriesGeometry::new();
    for (index, (x, transformation)) in transformations.iter().enumerate() {
        if index % CANCELLATION_CHECK_INTERVAL == CANCELLATION_CHECK_INTERVAL - 1 {
            token.check()?;
        }
        if let Some(geometry) = transformation.sample(fraction) {
            series.insert(*x, geometry);
        }
    }
    Ok(series)
}

impl<G: EntryGeometry> DrawingModelInterpolator<G> for DefaultDrawingModelInterpolator<G> {
    fn set_models(&self, old: Option<&DrawingModel<G>>, new: Option<&DrawingModel<G>>) {
        let rebuilt = build_transformations(old, new);
        debug!(
            series = rebuilt.len(),
            entries = rebuilt.iter().map(BTreeMap::len).sum::<usize>(),
            "drawing model transformations rebuilt"
        );
        *self.lock() = rebuilt;
    }

    fn transform(
        &self,
        fraction: f64,
        token: &CancellationToken,
    ) -> Result<Option<DrawingModel<G>>, Cancelled> {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let transformations = self.lock();

        #[cfg(feature = "parallel-transform")]
        let series: Vec<SeriesGeometry<G>> = transformations
            .par_iter()
            .map(|series| transform_series(series, fraction, token))
            .collect::<Result<_, _>>()?;

        #[cfg(not(feature = "parallel-transform"))]
        let series: Vec<SeriesGeometry<G>> = transformations
            .iter()
            .map(|series| transform_series(series, fraction, token))
            .collect::<Result<_, _>>()?;

        drop(transformations);
        let series: Vec<SeriesGeometry<G>> = series
            .into_iter()
            .filter(|entries| !entries.is_empty())
            .collect();
        trace!(fraction, series = series.len(), "drawing model transformed");

        if series.is_empty() {
            Ok(None)
        } else {
            Ok(Some(DrawingModel::new(series)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removed_entry_reaches_baseline_then_disappears() {
        let transformation = Transformation {
            old: Some(8.0_f64),
            new: None,
        };
        assert_eq!(transformation.sample(0.0), Some(8.0));
        assert_eq!(transformation.sample(0.75), Some(2.0));
        assert_eq!(transformation.sample(1.0), None);
    }

    #[test]
    fn added_entry_grows_from_baseline() {
        let transformation = Transformation {
            old: None,
            new: Some(8.0_f64),
        };
        assert_eq!(transformation.sample(0.0), Some(0.0));
        assert_eq!(transformation.sample(0.5), Some(4.0));
        assert_eq!(transformation.sample(1.0), Some(8.0));
    }

    #[test]
    fn rebuild_keeps_series_count_of_larger_model() {
        let old = DrawingModel::from_pairs([vec![(1.0, 1.0_f64)]]);
        let new = DrawingModel::from_pairs([vec![(1.0, 2.0_f64)], vec![(5.0, 3.0)]]);
        let transformations = build_transformations(Some(&old), Some(&new));
        assert_eq!(transformations.len(), 2);
        let shared = &transformations[0][&OrderedFloat(1.0)];
        assert_eq!(shared.old, Some(1.0));
        assert_eq!(shared.new, Some(2.0));
        assert_eq!(transformations[1][&OrderedFloat(5.0)].old, None);
    }
}
