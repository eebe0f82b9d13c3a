use chartflow::core::{
    AutoRangeProvider, Bounds, ExtraStore, HorizontalMapping, LayerDimensions, RangeTracker,
    Ranges, Series,
};
use chartflow::interaction::{
    ScrollConfig, ScrollController, Zoom, ZoomConfig, ZoomContext, ZoomController,
};
use chartflow::ChartError;

fn ten_step_ranges() -> Ranges {
    let pairs: Vec<(f64, f64)> = (0..=10).map(|i| (f64::from(i), 1.0)).collect();
    RangeTracker::new().update(
        &[Series::from_pairs(&pairs)],
        &AutoRangeProvider,
        &ExtraStore::new(),
    )
}

fn dimensions() -> LayerDimensions {
    LayerDimensions {
        x_spacing: 20.0,
        unscalable_start_padding: 5.0,
        ..LayerDimensions::default()
    }
}

fn layer_bounds() -> Bounds {
    Bounds::new(0.0, 0.0, 100.0, 100.0)
}

fn measured(ranges: &Ranges, config: ZoomConfig) -> (ZoomController, ScrollController) {
    let context = ZoomContext {
        ranges,
        dimensions: dimensions(),
        layer_bounds: layer_bounds(),
    };
    let mut zoom = ZoomController::new(config);
    let value = zoom.update(&context);
    let mut scroll = ScrollController::new(ScrollConfig::default());
    scroll.update(
        dimensions().scaled(value).content_width(ranges),
        layer_bounds().width(),
    );
    (zoom, scroll)
}

#[test]
fn default_bounds_resolve_against_content() {
    let ranges = ten_step_ranges();
    let (zoom, scroll) = measured(&ranges, ZoomConfig::default());

    let (min, max) = zoom.bounds();
    assert!((min - 0.475).abs() <= 1e-9);
    assert_eq!(max, 10.0);
    assert_eq!(zoom.value(), 1.0);
    assert_eq!(scroll.max_value(), 105.0);
}

#[test]
fn zoom_keeps_focal_value_stationary() {
    let ranges = ten_step_ranges();
    let (mut zoom, mut scroll) = measured(&ranges, ZoomConfig::default());
    scroll.scroll_by(40.0);

    let before = HorizontalMapping::new(
        &ranges,
        dimensions().scaled(zoom.value()),
        layer_bounds(),
        scroll.value(),
    )
    .pixel_to_x(30.0);
    assert!((before - 3.25).abs() <= 1e-9);

    let context = ZoomContext {
        ranges: &ranges,
        dimensions: dimensions(),
        layer_bounds: layer_bounds(),
    };
    assert!(zoom.zoom_by(2.0, 30.0, &mut scroll, &context));
    assert_eq!(zoom.value(), 2.0);
    assert!((scroll.value() - 105.0).abs() <= 1e-9);
    assert_eq!(scroll.max_value(), 305.0);

    let after = HorizontalMapping::new(
        &ranges,
        dimensions().scaled(zoom.value()),
        layer_bounds(),
        scroll.value(),
    )
    .pixel_to_x(30.0);
    assert!((after - before).abs() <= 1e-9);
}

#[test]
fn zoom_requests_are_clamped_to_bounds() {
    let ranges = ten_step_ranges();
    let (mut zoom, mut scroll) = measured(&ranges, ZoomConfig::default());
    let context = ZoomContext {
        ranges: &ranges,
        dimensions: dimensions(),
        layer_bounds: layer_bounds(),
    };

    assert!(zoom.zoom_by(100.0, 0.0, &mut scroll, &context));
    assert_eq!(zoom.value(), 10.0);
    assert!(!zoom.zoom_by(2.0, 0.0, &mut scroll, &context));

    assert!(zoom.zoom_by(1e-6, 0.0, &mut scroll, &context));
    assert!((zoom.value() - 0.475).abs() <= 1e-9);
    assert_eq!(scroll.max_value(), 0.0);
    assert_eq!(scroll.value(), 0.0);

    assert!(!zoom.zoom_by(f64::NAN, 0.0, &mut scroll, &context));
    assert!(!zoom.zoom_by(-1.0, 0.0, &mut scroll, &context));
}

#[test]
fn disabled_zoom_ignores_requests() {
    let ranges = ten_step_ranges();
    let config = ZoomConfig {
        zoom_enabled: false,
        ..ZoomConfig::default()
    };
    let (mut zoom, mut scroll) = measured(&ranges, config);
    let context = ZoomContext {
        ranges: &ranges,
        dimensions: dimensions(),
        layer_bounds: layer_bounds(),
    };
    assert!(!zoom.zoom_by(2.0, 10.0, &mut scroll, &context));
    assert_eq!(zoom.value(), 1.0);
}

#[test]
fn zoom_variants_resolve() {
    let ranges = ten_step_ranges();
    let context = ZoomContext {
        ranges: &ranges,
        dimensions: dimensions(),
        layer_bounds: layer_bounds(),
    };
    assert_eq!(Zoom::Fixed(3.0).resolve(&context), 3.0);
    assert!((Zoom::Content.resolve(&context) - 0.475).abs() <= 1e-9);
    assert!((Zoom::X(5.0).resolve(&context) - 1.0).abs() <= 1e-9);
    assert_eq!(Zoom::min(Zoom::Fixed(3.0), Zoom::Fixed(2.0)).resolve(&context), 2.0);
    assert_eq!(Zoom::max(Zoom::Fixed(3.0), Zoom::Fixed(2.0)).resolve(&context), 3.0);

    let empty = Ranges::empty();
    let degenerate = ZoomContext {
        ranges: &empty,
        dimensions: LayerDimensions::default(),
        layer_bounds: layer_bounds(),
    };
    assert_eq!(Zoom::Content.resolve(&degenerate), 1.0);
}

#[test]
fn invalid_fixed_zoom_fails_at_construction() {
    assert!(matches!(Zoom::fixed(0.0), Err(ChartError::InvalidZoom(_))));
    assert!(Zoom::fixed(f64::INFINITY).is_err());
    assert!(Zoom::fixed(2.5).is_ok());

    let config = ZoomConfig {
        initial_zoom: Zoom::Fixed(-1.0),
        ..ZoomConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn initial_zoom_applies_once_and_snapshot_restores() {
    let ranges = ten_step_ranges();
    let config = ZoomConfig {
        initial_zoom: Zoom::Fixed(4.0),
        ..ZoomConfig::default()
    };
    let (mut zoom, mut scroll) = measured(&ranges, config);
    assert_eq!(zoom.value(), 4.0);

    let context = ZoomContext {
        ranges: &ranges,
        dimensions: dimensions(),
        layer_bounds: layer_bounds(),
    };
    assert!(zoom.set_zoom(2.0, &mut scroll, &context));
    assert_eq!(zoom.update(&context), 2.0);

    let snapshot = zoom.snapshot();
    let mut restored = ZoomController::new(ZoomConfig::default());
    restored.restore(snapshot);
    assert_eq!(restored.update(&context), 2.0);
}
