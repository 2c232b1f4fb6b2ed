use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VizError;

/// Identifier of one generative scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SceneKind {
    Introduction,
    Multiple,
    Memory,
    History,
    DifferentDimensions,
    NewBeginnings,
    MoreRandom,
}

impl SceneKind {
    /// Every scene, in presentation order.
    pub const ALL: [SceneKind; 7] = [
        SceneKind::Introduction,
        SceneKind::Multiple,
        SceneKind::Memory,
        SceneKind::History,
        SceneKind::DifferentDimensions,
        SceneKind::NewBeginnings,
        SceneKind::MoreRandom,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SceneKind::Introduction => "introduction",
            SceneKind::Multiple => "multiple",
            SceneKind::Memory => "memory",
            SceneKind::History => "history",
            SceneKind::DifferentDimensions => "different-dimensions",
            SceneKind::NewBeginnings => "new-beginnings",
            SceneKind::MoreRandom => "more-random",
        }
    }

    /// Id of the mount node the scene surface is created in.
    #[must_use]
    pub fn mount_id(self) -> String {
        format!("container-{}", self.as_str())
    }

    /// Id given to the scene drawing surface.
    #[must_use]
    pub fn surface_id(self) -> String {
        format!("canvas-{}", self.as_str())
    }

    /// Exposure scenes accumulate dots instead of redrawing every frame.
    #[must_use]
    pub const fn is_exposure(self) -> bool {
        matches!(
            self,
            SceneKind::History
                | SceneKind::DifferentDimensions
                | SceneKind::NewBeginnings
                | SceneKind::MoreRandom
        )
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SceneKind {
    type Err = VizError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        SceneKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| VizError::UnknownScene(value.to_owned()))
    }
}
