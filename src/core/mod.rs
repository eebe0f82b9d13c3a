pub mod cache_store;
pub mod corners;
pub mod dimensions;
pub mod extra_store;
pub mod insets;
pub mod primitives;
pub mod ranges;
pub mod scale;
pub mod types;

pub use cache_store::{CacheArg, CacheArgs, CacheNamespace, CacheStore, CacheStoreStats};
pub use corners::{Corner, CornerShape, CornerSize, CornerTreatment, ResolvedCorners};
pub use dimensions::{
    AutoScaleUp, DimensionsContributor, DimensionsRequest, LayerDimensions, MeasuringContext,
    fit_to_surface, negotiate, negotiate_into,
};
pub use extra_store::{ExtraKey, ExtraStore};
pub use insets::Insets;
pub use ranges::{AutoRangeProvider, FixedYRange, RangeProvider, RangeTracker, Ranges, YRange};
pub use scale::HorizontalMapping;
pub use types::{
    AxisPosition, Bounds, Entry, HorizontalAxisPosition, Series, Surface, VerticalAxisPosition,
};
