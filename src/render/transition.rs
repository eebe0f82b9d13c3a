use std::sync::Arc;

use tracing::debug;

use crate::interaction::{AnimationSpec, Timeline};

use super::cancellation::{Cancelled, CancellationToken};
use super::drawing_model::{DrawingModel, EntryGeometry};
use super::interpolator::{DefaultDrawingModelInterpolator, DrawingModelInterpolator};

/// Drives a drawing-model interpolation from a frame clock.
///
/// The interpolator is shared, so a data-loading task can swap models
/// through [`ModelTransition::interpolator`] while the animation task keeps
/// stepping.
#[derive(Debug)]
pub struct ModelTransition<G> {
    interpolator: Arc<DefaultDrawingModelInterpolator<G>>,
    timeline: Timeline,
}

impl<G: EntryGeometry> ModelTransition<G> {
    #[must_use]
    pub fn new(spec: AnimationSpec) -> Self {
        let mut timeline = Timeline::new(spec);
        timeline.advance(spec.duration_seconds);
        Self {
            interpolator: Arc::new(DefaultDrawingModelInterpolator::new()),
            timeline,
        }
    }

    #[must_use]
    pub fn interpolator(&self) -> Arc<DefaultDrawingModelInterpolator<G>> {
        Arc::clone(&self.interpolator)
    }

    /// Starts a new transition between `old` and `new`.
    pub fn start(
        &mut self,
        old: Option<&DrawingModel<G>>,
        new: Option<&DrawingModel<G>>,
        spec: AnimationSpec,
    ) {
        self.interpolator.set_models(old, new);
        self.timeline = Timeline::new(spec);
        debug!(duration = spec.duration_seconds, "model transition started");
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.timeline.is_finished()
    }

    #[must_use]
    pub fn fraction(&self) -> f64 {
        self.timeline.fraction()
    }

    /// Advances the clock and samples the interpolated model.
    ///
    /// A cancelled step leaves the clock advanced; the next step samples
    /// the later fraction.
    pub fn step(
        &mut self,
        delta_seconds: f64,
        token: &CancellationToken,
    ) -> Result<Option<DrawingModel<G>>, Cancelled> {
        let fraction = self.timeline.advance(delta_seconds);
        self.interpolator.transform(fraction, token)
    }
}
