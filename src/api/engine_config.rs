use serde::{Deserialize, Serialize};

use crate::core::{AutoScaleUp, Surface};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{AnimationSpec, ScrollConfig, ZoomConfig};

pub const ENGINE_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub surface: Surface,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default)]
    pub auto_scale_up: AutoScaleUp,
    /// Default timing of drawing-model transitions started by the host.
    #[serde(default)]
    pub model_transition: AnimationSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: ChartEngineConfig,
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            scroll: ScrollConfig::default(),
            zoom: ZoomConfig::default(),
            auto_scale_up: AutoScaleUp::default(),
            model_transition: AnimationSpec::default(),
        }
    }

    #[must_use]
    pub fn with_scroll(mut self, scroll: ScrollConfig) -> Self {
        self.scroll = scroll;
        self
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom: ZoomConfig) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_auto_scale_up(mut self, auto_scale_up: AutoScaleUp) -> Self {
        self.auto_scale_up = auto_scale_up;
        self
    }

    #[must_use]
    pub fn with_model_transition(mut self, spec: AnimationSpec) -> Self {
        self.model_transition = spec;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.surface.is_valid() {
            return Err(ChartError::InvalidSurface {
                width: self.surface.width,
                height: self.surface.height,
            });
        }
        let scroll = self.scroll.validate()?;
        let zoom = self.zoom.validate()?;
        let model_transition = self.model_transition.validate()?;
        Ok(Self {
            scroll,
            zoom,
            model_transition,
            ..self
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartEngineConfigJsonContractV1 {
            schema_version: ENGINE_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize engine config contract v1: {e}"))
        })
    }

    /// Accepts both a bare config and a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(config) = serde_json::from_str::<ChartEngineConfig>(input) {
            return config.validate();
        }
        let payload: ChartEngineConfigJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse engine config json payload: {e}"))
            })?;
        if payload.schema_version != ENGINE_CONFIG_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported engine config schema version: {}",
                payload.schema_version
            )));
        }
        payload.config.validate()
    }
}
