use tracing::debug;

use crate::core::{
    AutoRangeProvider, AutoScaleUp, Bounds, CacheNamespace, CacheStore, CacheStoreStats,
    DimensionsContributor, ExtraStore, Insets, LayerDimensions, RangeProvider, RangeTracker,
    Ranges, Series, Surface,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{AnimationSpec, ScrollController, ZoomController};
use crate::render::{EntryGeometry, ModelTransition, Renderer};

use super::{
    ChartEngineConfig, EstimatingTextMeasurer, HorizontalAxisConfig, TextMeasurer,
    VerticalAxisConfig,
};

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the data, the negotiated layout and the scroll/zoom
/// state, and hands each measured frame to the renderer.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) surface: Surface,
    pub(super) auto_scale_up: AutoScaleUp,
    pub(super) model_transition: AnimationSpec,
    pub(super) series: Vec<Series>,
    pub(super) extra_store: ExtraStore,
    pub(super) range_provider: Box<dyn RangeProvider>,
    pub(super) range_tracker: RangeTracker,
    pub(super) layers: Vec<Box<dyn DimensionsContributor>>,
    pub(super) vertical_axes: Vec<VerticalAxisConfig>,
    pub(super) horizontal_axes: Vec<HorizontalAxisConfig>,
    pub(super) text_measurer: Box<dyn TextMeasurer>,
    pub(super) cache: CacheStore,
    pub(super) label_namespace: CacheNamespace,
    pub(super) ranges: Ranges,
    /// Negotiated dimensions at zoom 1.
    pub(super) dimensions: LayerDimensions,
    pub(super) insets: Insets,
    pub(super) layer_bounds: Bounds,
    pub(super) scroll: ScrollController,
    pub(super) zoom: ZoomController,
    pub(super) needs_measure: bool,
    pub(super) data_changed: bool,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        debug!(
            width = config.surface.width,
            height = config.surface.height,
            density = config.surface.density,
            "chart engine created"
        );
        Ok(Self {
            renderer,
            surface: config.surface,
            auto_scale_up: config.auto_scale_up,
            model_transition: config.model_transition,
            series: Vec::new(),
            extra_store: ExtraStore::new(),
            range_provider: Box::new(AutoRangeProvider),
            range_tracker: RangeTracker::new(),
            layers: Vec::new(),
            vertical_axes: Vec::new(),
            horizontal_axes: Vec::new(),
            text_measurer: Box::new(EstimatingTextMeasurer::default()),
            cache: CacheStore::new(),
            label_namespace: CacheNamespace::new("axis_label_size"),
            ranges: Ranges::empty(),
            dimensions: LayerDimensions::default(),
            insets: Insets::default(),
            layer_bounds: Bounds::default(),
            scroll: ScrollController::new(config.scroll),
            zoom: ZoomController::new(config.zoom),
            needs_measure: true,
            data_changed: false,
        })
    }

    #[must_use]
    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn set_surface(&mut self, surface: Surface) -> ChartResult<()> {
        if !surface.is_valid() {
            return Err(ChartError::InvalidSurface {
                width: surface.width,
                height: surface.height,
            });
        }
        if surface != self.surface {
            self.surface = surface;
            self.needs_measure = true;
        }
        Ok(())
    }

    #[must_use]
    pub fn auto_scale_up(&self) -> AutoScaleUp {
        self.auto_scale_up
    }

    pub fn set_auto_scale_up(&mut self, auto_scale_up: AutoScaleUp) {
        self.auto_scale_up = auto_scale_up;
        self.needs_measure = true;
    }

    #[must_use]
    pub fn model_transition_spec(&self) -> AnimationSpec {
        self.model_transition
    }

    /// Idle transition timed by the configured model-transition spec.
    #[must_use]
    pub fn new_model_transition<G: EntryGeometry>(&self) -> ModelTransition<G> {
        ModelTransition::new(self.model_transition)
    }

    /// Registers a chart layer's spacing needs for every following pass.
    pub fn add_layer(&mut self, layer: impl DimensionsContributor + 'static) {
        self.layers.push(Box::new(layer));
        self.needs_measure = true;
    }

    pub fn clear_layers(&mut self) {
        self.layers.clear();
        self.needs_measure = true;
    }

    pub fn add_vertical_axis(&mut self, axis: VerticalAxisConfig) -> ChartResult<()> {
        let axis = axis.validate()?;
        self.vertical_axes.retain(|existing| existing.position != axis.position);
        self.vertical_axes.push(axis);
        self.needs_measure = true;
        Ok(())
    }

    pub fn add_horizontal_axis(&mut self, axis: HorizontalAxisConfig) -> ChartResult<()> {
        let axis = axis.validate()?;
        self.horizontal_axes
            .retain(|existing| existing.position != axis.position);
        self.horizontal_axes.push(axis);
        self.needs_measure = true;
        Ok(())
    }

    pub fn clear_axes(&mut self) {
        self.vertical_axes.clear();
        self.horizontal_axes.clear();
        self.needs_measure = true;
    }

    pub fn set_text_measurer(&mut self, measurer: impl TextMeasurer + 'static) {
        self.text_measurer = Box::new(measurer);
        self.cache.clear();
        self.needs_measure = true;
    }

    #[must_use]
    pub fn ranges(&self) -> &Ranges {
        &self.ranges
    }

    /// Negotiated dimensions before zoom is applied.
    #[must_use]
    pub fn dimensions(&self) -> LayerDimensions {
        self.dimensions
    }

    #[must_use]
    pub fn scaled_dimensions(&self) -> LayerDimensions {
        self.dimensions.scaled(self.zoom.value())
    }

    #[must_use]
    pub fn insets(&self) -> Insets {
        self.insets
    }

    #[must_use]
    pub fn layer_bounds(&self) -> Bounds {
        self.layer_bounds
    }

    #[must_use]
    pub fn needs_measure(&self) -> bool {
        self.needs_measure
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStoreStats {
        self.cache.stats()
    }

    pub fn render(&mut self) -> ChartResult<()> {
        if self.needs_measure {
            self.measure()?;
        }
        let frame = self.build_render_frame();
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
