mod axis_config;
mod axis_layout_resolver;
mod data_controller;
mod engine;
mod engine_config;
mod layer_spacing;
mod measurement_pass;
mod scroll_zoom_controller;
mod text_measurer;

pub use axis_config::{
    AxisLabelStyle, AxisSizeConstraint, HorizontalAxisConfig, LabelFormatter, LabelFormatterFn,
    VerticalAxisConfig,
};
pub use engine::ChartEngine;
pub use engine_config::{
    ChartEngineConfig, ChartEngineConfigJsonContractV1, ENGINE_CONFIG_JSON_SCHEMA_V1,
};
pub use layer_spacing::{ColumnLayerSpacing, FixedSpacing, PointLayerSpacing};
pub use text_measurer::{EstimatingTextMeasurer, TextMeasurer, TextSize};
