use chartflow::api::{ChartEngineConfig, ChartEngineConfigJsonContractV1, ENGINE_CONFIG_JSON_SCHEMA_V1};
use chartflow::core::{AutoScaleUp, Surface};
use chartflow::interaction::{
    AnimationSpec, AutoScrollCondition, Easing, InitialScroll, ScrollConfig, Zoom, ZoomConfig,
};

fn custom_config() -> ChartEngineConfig {
    ChartEngineConfig::new(Surface::new(640.0, 360.0).with_density(2.0, 1.5))
        .with_scroll(ScrollConfig {
            initial_scroll: InitialScroll::End,
            auto_scroll_condition: AutoScrollCondition::OnModelGrowth,
            ..ScrollConfig::default()
        })
        .with_zoom(ZoomConfig {
            initial_zoom: Zoom::X(20.0),
            ..ZoomConfig::default()
        })
        .with_auto_scale_up(AutoScaleUp::Full)
        .with_model_transition(AnimationSpec::new(0.25, Easing::EaseOut).expect("valid spec"))
}

#[test]
fn contract_v1_round_trip() {
    let config = custom_config();
    let json = config.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains("\"schema_version\": 1"));

    let payload: ChartEngineConfigJsonContractV1 = serde_json::from_str(&json).expect("contract");
    assert_eq!(payload.schema_version, ENGINE_CONFIG_JSON_SCHEMA_V1);

    let restored = ChartEngineConfig::from_json_compat_str(&json).expect("parse");
    assert_eq!(restored, config);
}

#[test]
fn bare_payload_is_accepted_with_defaults() {
    let json = r#"{"surface":{"width":320.0,"height":200.0,"density":1.0,"font_scale":1.0}}"#;
    let config = ChartEngineConfig::from_json_compat_str(json).expect("parse");
    assert_eq!(config, ChartEngineConfig::new(Surface::new(320.0, 200.0)));
    assert_eq!(config.auto_scale_up, AutoScaleUp::WhenScrollDisabled);

    let full = serde_json::to_string(&custom_config()).expect("serialize");
    assert_eq!(
        ChartEngineConfig::from_json_compat_str(&full).expect("parse"),
        custom_config()
    );
}

#[test]
fn unknown_schema_version_is_rejected() {
    let config = custom_config();
    let payload = ChartEngineConfigJsonContractV1 {
        schema_version: 2,
        config,
    };
    let json = serde_json::to_string(&payload).expect("serialize");
    let error = ChartEngineConfig::from_json_compat_str(&json).expect_err("must reject");
    assert!(error.to_string().contains("schema version"));
}

#[test]
fn invalid_payloads_are_rejected() {
    assert!(ChartEngineConfig::from_json_compat_str("not json").is_err());

    let zero_surface = r#"{"surface":{"width":0.0,"height":200.0,"density":1.0,"font_scale":1.0}}"#;
    assert!(ChartEngineConfig::from_json_compat_str(zero_surface).is_err());

    let mut config = custom_config();
    config.zoom.max_zoom = Zoom::Fixed(-2.0);
    let json = config.to_json_contract_v1_pretty().expect("serialize");
    assert!(ChartEngineConfig::from_json_compat_str(&json).is_err());
}
