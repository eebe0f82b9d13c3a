use chartflow::core::{
    AutoRangeProvider, Entry, ExtraKey, ExtraStore, FixedYRange, RangeProvider, RangeTracker,
    Series, VerticalAxisPosition,
};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

#[test]
fn single_series_ranges_use_gcd_step() {
    let series = Series::from_pairs(&[(0.0, 1.0), (1.0, 4.0), (3.0, 2.0)]);
    let mut tracker = RangeTracker::new();
    let ranges = tracker.update(&[series], &AutoRangeProvider, &ExtraStore::new());

    assert_eq!(ranges.min_x, 0.0);
    assert_eq!(ranges.max_x, 3.0);
    assert_eq!(ranges.x_step, 1.0);
    let y = ranges.y_range(None);
    assert_eq!(y.min_y, 1.0);
    assert_eq!(y.max_y, 4.0);
    assert_eq!(ranges.entry_count(), 3);
}

#[test]
fn fractional_gaps_reduce_to_common_step() {
    let series = Series::from_pairs(&[(0.0, 0.0), (0.5, 1.0), (2.0, 1.0), (2.25, 3.0)]);
    let mut tracker = RangeTracker::new();
    let ranges = tracker.update(&[series], &AutoRangeProvider, &ExtraStore::new());

    assert!((ranges.x_step - 0.25).abs() <= 1e-9);
    assert!((ranges.x_step_count() - 9.0).abs() <= 1e-9);
}

#[test]
fn incommensurate_gaps_fall_back_to_smallest_gap() {
    let series = Series::from_pairs(&[(0.0, 1.0), (1.0, 2.0), (std::f64::consts::PI, 3.0)]);
    let mut tracker = RangeTracker::new();
    let ranges = tracker.update(&[series], &AutoRangeProvider, &ExtraStore::new());

    assert!((ranges.x_step - 1.0).abs() <= 1e-9);
    assert!((ranges.x_step_count() - std::f64::consts::PI).abs() <= 1e-9);
}

#[test]
fn smallest_gap_is_tracked_across_series_and_reset() {
    let mut tracker = RangeTracker::new();
    let uneven = [
        Series::from_pairs(&[(0.0, 1.0), (2.0, 1.0)]),
        Series::from_pairs(&[(10.0, 1.0), (10.0 + std::f64::consts::E, 1.0)]),
    ];
    let ranges = tracker.update(&uneven, &AutoRangeProvider, &ExtraStore::new());
    assert!((ranges.x_step - 2.0).abs() <= 1e-9);

    let ranges = tracker.update(
        &[Series::from_pairs(&[(0.0, 1.0), (3.0, 1.0), (9.0, 1.0)])],
        &AutoRangeProvider,
        &ExtraStore::new(),
    );
    assert!((ranges.x_step - 3.0).abs() <= 1e-9);
}

#[test]
fn empty_input_yields_empty_ranges() {
    let mut tracker = RangeTracker::new();
    let ranges = tracker.update(&[], &AutoRangeProvider, &ExtraStore::new());
    assert!(ranges.is_empty());
    assert_eq!(ranges.x_step, 1.0);

    let ranges = tracker.update(&[Series::default()], &AutoRangeProvider, &ExtraStore::new());
    assert!(ranges.is_empty());
}

#[test]
fn single_entry_defaults_step_to_one() {
    let mut tracker = RangeTracker::new();
    let ranges = tracker.update(
        &[Series::from_pairs(&[(7.0, 3.0)])],
        &AutoRangeProvider,
        &ExtraStore::new(),
    );
    assert_eq!(ranges.min_x, 7.0);
    assert_eq!(ranges.max_x, 7.0);
    assert_eq!(ranges.x_step, 1.0);
    assert_eq!(ranges.x_step_count(), 0.0);
}

#[test]
fn non_finite_entries_are_skipped() {
    let series = Series::new(vec![
        Entry::new(0.0, 1.0),
        Entry::new(f64::NAN, 100.0),
        Entry::new(2.0, f64::INFINITY),
        Entry::new(4.0, 2.0),
    ]);
    let mut tracker = RangeTracker::new();
    let ranges = tracker.update(&[series], &AutoRangeProvider, &ExtraStore::new());

    assert_eq!(ranges.entry_count(), 2);
    assert_eq!(ranges.max_x, 4.0);
    assert_eq!(ranges.y_range(None).max_y, 2.0);
}

#[test]
fn reset_prevents_stale_bounds() {
    let mut tracker = RangeTracker::new();
    let _ = tracker.update(
        &[Series::from_pairs(&[(-100.0, -50.0), (100.0, 50.0)])],
        &AutoRangeProvider,
        &ExtraStore::new(),
    );
    let ranges = tracker.update(
        &[Series::from_pairs(&[(1.0, 1.0), (2.0, 2.0)])],
        &AutoRangeProvider,
        &ExtraStore::new(),
    );
    assert_eq!(ranges.min_x, 1.0);
    assert_eq!(ranges.max_x, 2.0);
    assert_eq!(ranges.y_range(None).min_y, 1.0);
}

#[test]
fn per_axis_ranges_union_into_combined_range() {
    let start = Series::from_pairs(&[(0.0, 10.0), (1.0, 20.0)]).on_axis(VerticalAxisPosition::Start);
    let end = Series::from_pairs(&[(0.0, -5.0), (2.0, 5.0)]).on_axis(VerticalAxisPosition::End);
    let mut tracker = RangeTracker::new();
    let ranges = tracker.update(&[start, end], &AutoRangeProvider, &ExtraStore::new());

    let start_range = ranges.y_range(Some(VerticalAxisPosition::Start));
    let end_range = ranges.y_range(Some(VerticalAxisPosition::End));
    assert_eq!((start_range.min_y, start_range.max_y), (10.0, 20.0));
    assert_eq!((end_range.min_y, end_range.max_y), (-5.0, 5.0));

    let combined = ranges.y_range(None);
    assert_eq!((combined.min_y, combined.max_y), (-5.0, 20.0));
    assert_eq!(ranges.axis_y_ranges().count(), 2);
}

#[test]
fn fixed_y_range_overrides_only_its_axis() {
    let start = Series::from_pairs(&[(0.0, 10.0), (1.0, 20.0)]).on_axis(VerticalAxisPosition::Start);
    let end = Series::from_pairs(&[(0.0, 1.0), (1.0, 2.0)]).on_axis(VerticalAxisPosition::End);
    let provider = FixedYRange::new(Some(0.0), Some(100.0)).for_axis(VerticalAxisPosition::Start);
    let mut tracker = RangeTracker::new();
    let ranges = tracker.update(&[start, end], &provider, &ExtraStore::new());

    let start_range = ranges.y_range(Some(VerticalAxisPosition::Start));
    assert_eq!((start_range.min_y, start_range.max_y), (0.0, 100.0));
    let end_range = ranges.y_range(Some(VerticalAxisPosition::End));
    assert_eq!((end_range.min_y, end_range.max_y), (1.0, 2.0));
}

struct InvertingProvider;

impl RangeProvider for InvertingProvider {
    fn min_y(
        &self,
        _axis: Option<VerticalAxisPosition>,
        _min_y: f64,
        _max_y: f64,
        _extra: &ExtraStore,
    ) -> f64 {
        50.0
    }

    fn max_y(
        &self,
        _axis: Option<VerticalAxisPosition>,
        _min_y: f64,
        _max_y: f64,
        _extra: &ExtraStore,
    ) -> f64 {
        -50.0
    }
}

#[test]
fn inverted_overrides_are_reordered() {
    let mut tracker = RangeTracker::new();
    let ranges = tracker.update(
        &[Series::from_pairs(&[(0.0, 1.0), (1.0, 2.0)])],
        &InvertingProvider,
        &ExtraStore::new(),
    );
    let y = ranges.y_range(None);
    assert_eq!((y.min_y, y.max_y), (-50.0, 50.0));
}

struct PaddedMaxX {
    padding: ExtraKey<f64>,
}

impl RangeProvider for PaddedMaxX {
    fn max_x(&self, _min_x: f64, max_x: f64, extra: &ExtraStore) -> f64 {
        max_x + extra.get(&self.padding).copied().unwrap_or(0.0)
    }
}

#[test]
fn provider_reads_extra_store() {
    let padding = ExtraKey::<f64>::new("max_x_padding");
    let mut extra = ExtraStore::new();
    extra.set(&padding, 2.0);

    let provider = PaddedMaxX { padding };
    let mut tracker = RangeTracker::new();
    let ranges = tracker.update(&[Series::from_pairs(&[(0.0, 1.0), (1.0, 1.0)])], &provider, &extra);
    assert_eq!(ranges.max_x, 3.0);
}

struct NonFiniteXProvider;

impl RangeProvider for NonFiniteXProvider {
    fn min_x(&self, _min_x: f64, _max_x: f64, _extra: &ExtraStore) -> f64 {
        f64::NAN
    }

    fn max_x(&self, _min_x: f64, _max_x: f64, _extra: &ExtraStore) -> f64 {
        f64::INFINITY
    }

    fn max_y(
        &self,
        _axis: Option<VerticalAxisPosition>,
        _min_y: f64,
        _max_y: f64,
        _extra: &ExtraStore,
    ) -> f64 {
        f64::NAN
    }
}

#[test]
fn non_finite_overrides_keep_computed_bounds() {
    let mut tracker = RangeTracker::new();
    let ranges = tracker.update(
        &[Series::from_pairs(&[(2.0, 1.0), (5.0, 4.0)])],
        &NonFiniteXProvider,
        &ExtraStore::new(),
    );
    assert_eq!((ranges.min_x, ranges.max_x), (2.0, 5.0));
    let y = ranges.y_range(None);
    assert_eq!((y.min_y, y.max_y), (1.0, 4.0));
}

#[test]
fn decimal_time_entries_convert_to_unix_seconds() {
    let time = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid time");
    let entry = Entry::from_decimal_time(time, Decimal::new(12_345, 2)).expect("entry");
    assert_eq!(entry.x, 1_704_067_200.0);
    assert!((entry.y - 123.45).abs() <= 1e-9);
}
