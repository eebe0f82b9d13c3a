mod cancellation;
mod drawing_model;
mod frame;
mod interpolator;
mod null_renderer;
mod transition;

pub use cancellation::{CancellationToken, Cancelled};
pub use drawing_model::{ColumnGeometry, DrawingModel, EntryGeometry, PointGeometry, SeriesGeometry};
pub use frame::{AxisLabel, RenderFrame};
pub use interpolator::{DefaultDrawingModelInterpolator, DrawingModelInterpolator};
pub use null_renderer::NullRenderer;
pub use transition::ModelTransition;

use crate::error::ChartResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive a fully measured `RenderFrame` so drawing code stays
/// isolated from negotiation, scroll and zoom logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
