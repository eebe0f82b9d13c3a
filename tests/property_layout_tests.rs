use chartflow::api::{ChartEngine, ChartEngineConfig, FixedSpacing, PointLayerSpacing};
use chartflow::core::{
    DimensionsContributor, DimensionsRequest, ExtraStore, MeasuringContext, Ranges, Series,
    Surface, negotiate,
};
use chartflow::interaction::{ScrollConfig, ScrollController};
use chartflow::render::NullRenderer;
use proptest::prelude::*;

fn fixed(x_spacing: f64, start_padding: f64) -> FixedSpacing {
    FixedSpacing {
        request: DimensionsRequest {
            x_spacing: Some(x_spacing),
            scalable_start_padding: Some(start_padding),
            ..DimensionsRequest::default()
        },
    }
}

proptest! {
    #[test]
    fn scroll_value_stays_within_bounds(
        content_width in 0.0f64..5_000.0,
        surface_width in 1.0f64..2_000.0,
        deltas in prop::collection::vec(-1_500.0f64..1_500.0, 1..24)
    ) {
        let mut scroll = ScrollController::new(ScrollConfig::default());
        scroll.update(content_width, surface_width);
        let max = scroll.max_value();
        prop_assert!((max - (content_width - surface_width).max(0.0)).abs() <= 1e-9);

        for delta in deltas {
            let before = scroll.value();
            let consumed = scroll.scroll_by(delta);
            let after = scroll.value();
            prop_assert!(after >= 0.0 && after <= max);
            prop_assert!((consumed - (after - before)).abs() <= 1e-9);
            prop_assert!(consumed.abs() <= delta.abs() + 1e-9);
        }
    }

    #[test]
    fn shrinking_content_reclamps_scroll(
        content_width in 500.0f64..5_000.0,
        shrink in 0.0f64..1.0,
        delta in 0.0f64..5_000.0
    ) {
        let mut scroll = ScrollController::new(ScrollConfig::default());
        scroll.update(content_width, 400.0);
        scroll.scroll_by(delta);
        scroll.update(content_width * shrink, 400.0);
        prop_assert!(scroll.value() >= 0.0);
        prop_assert!(scroll.value() <= scroll.max_value());
    }

    #[test]
    fn negotiation_takes_the_maximum_request(
        requests in prop::collection::vec((0.0f64..200.0, 0.0f64..50.0), 0..12)
    ) {
        let ranges = Ranges::empty();
        let extra = ExtraStore::new();
        let context = MeasuringContext {
            surface: Surface::new(400.0, 300.0),
            ranges: &ranges,
            extra: &extra,
            layer_width: 400.0,
            scroll_enabled: true,
            zoom_enabled: true,
        };
        let layers: Vec<FixedSpacing> = requests
            .iter()
            .map(|(x_spacing, padding)| fixed(*x_spacing, *padding))
            .collect();
        let contributors: Vec<&dyn DimensionsContributor> = layers
            .iter()
            .map(|layer| layer as &dyn DimensionsContributor)
            .collect();

        let first = negotiate(&contributors, &context);
        let second = negotiate(&contributors, &context);
        prop_assert_eq!(first, second);

        let expected_spacing = requests.iter().map(|(x, _)| *x).fold(0.0, f64::max);
        let expected_padding = requests.iter().map(|(_, p)| *p).fold(0.0, f64::max);
        prop_assert_eq!(first.x_spacing, expected_spacing);
        prop_assert_eq!(first.scalable_start_padding, expected_padding);

        let mut reversed = contributors.clone();
        reversed.reverse();
        prop_assert_eq!(negotiate(&reversed, &context), first);
    }

    #[test]
    fn zoom_keeps_value_under_focal_point(
        point_spacing in 8.0f64..40.0,
        entry_count in 30i32..200,
        scroll_fraction in 0.0f64..1.0,
        factor in 0.4f64..3.0,
        focal_x in 0.0f64..400.0
    ) {
        let surface = Surface::new(400.0, 240.0);
        let mut engine =
            ChartEngine::new(NullRenderer::default(), ChartEngineConfig::new(surface))
                .expect("engine init");
        engine.add_layer(PointLayerSpacing::new(point_spacing, 6.0).expect("valid spacing"));
        let pairs: Vec<(f64, f64)> = (0..entry_count).map(|i| (f64::from(i), 1.0)).collect();
        engine.set_series(vec![Series::from_pairs(&pairs)]);
        engine.measure().expect("measure");
        engine.scroll_by(engine.max_scroll_value() * scroll_fraction);

        let before = engine.pixel_to_x(focal_x);
        engine.zoom_by(factor, focal_x);
        let (min_zoom, max_zoom) = engine.zoom_bounds();
        prop_assert!(engine.zoom_value() >= min_zoom - 1e-12);
        prop_assert!(engine.zoom_value() <= max_zoom + 1e-12);

        let scroll = engine.scroll_value();
        let max_scroll = engine.max_scroll_value();
        prop_assert!(scroll >= 0.0 && scroll <= max_scroll);
        if scroll > 1e-6 && scroll < max_scroll - 1e-6 {
            let after = engine.pixel_to_x(focal_x);
            prop_assert!((after - before).abs() <= 1e-6 * (1.0 + before.abs()));
        }
    }
}
