use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::VizResult;
use crate::flow::FlowLineConfig;
use crate::scene::SceneEngineConfig;
use crate::session::AuthConfig;

/// Top-level configuration bundle.
///
/// Every section is optional in JSON and falls back to its defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VizConfig {
    #[serde(default)]
    pub scene_engine: SceneEngineConfig,
    #[serde(default)]
    pub flow_lines: FlowLineConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl VizConfig {
    pub fn from_json_str(input: &str) -> VizResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> VizResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let config = Self::from_json_str(&raw)?;
        debug!(path = %path.display(), scenes = config.scene_engine.scenes.len(), "loaded config");
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> VizResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> VizResult<()> {
        self.scene_engine.validate()?;
        self.flow_lines.validate()
    }
}
