use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{VizError, VizResult};
use crate::render::Color;

use super::{SceneColors, SceneKind};

/// Rule mapping the window size to a scene surface size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSizing {
    #[serde(default = "default_horizontal_inset")]
    pub horizontal_inset: f64,
    #[serde(default = "default_min_width")]
    pub min_width: f64,
    #[serde(default = "default_height_ratio")]
    pub height_ratio: f64,
    #[serde(default = "default_min_height")]
    pub min_height: f64,
    #[serde(default = "default_fallback")]
    pub fallback: Viewport,
}

impl Default for SurfaceSizing {
    fn default() -> Self {
        Self {
            horizontal_inset: default_horizontal_inset(),
            min_width: default_min_width(),
            height_ratio: default_height_ratio(),
            min_height: default_min_height(),
            fallback: default_fallback(),
        }
    }
}

impl SurfaceSizing {
    /// `max(window_w - inset, min_width) x max(ratio * window_h, min_height)`,
    /// or the fallback size when there is no window.
    #[must_use]
    pub fn viewport_for(&self, window: Option<(f64, f64)>) -> Viewport {
        let Some((window_width, window_height)) = window else {
            return self.fallback;
        };
        let width = (window_width - self.horizontal_inset).max(self.min_width);
        let height = (self.height_ratio * window_height).max(self.min_height);
        Viewport::new(to_pixels(width), to_pixels(height))
    }
}

fn to_pixels(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.floor().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// Scene engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneEngineConfig {
    #[serde(default = "default_scenes")]
    pub scenes: Vec<SceneKind>,
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default = "default_foreground")]
    pub foreground: Color,
    #[serde(default)]
    pub surface: SurfaceSizing,
    #[serde(default = "default_show_dots")]
    pub show_dots: bool,
}

impl Default for SceneEngineConfig {
    fn default() -> Self {
        Self {
            scenes: default_scenes(),
            background: default_background(),
            foreground: default_foreground(),
            surface: SurfaceSizing::default(),
            show_dots: default_show_dots(),
        }
    }
}

impl SceneEngineConfig {
    #[must_use]
    pub fn with_scenes(mut self, scenes: impl IntoIterator<Item = SceneKind>) -> Self {
        self.scenes = scenes.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_colors(mut self, background: Color, foreground: Color) -> Self {
        self.background = background;
        self.foreground = foreground;
        self
    }

    #[must_use]
    pub fn with_surface(mut self, surface: SurfaceSizing) -> Self {
        self.surface = surface;
        self
    }

    #[must_use]
    pub fn with_show_dots(mut self, show_dots: bool) -> Self {
        self.show_dots = show_dots;
        self
    }

    #[must_use]
    pub fn colors(&self) -> SceneColors {
        SceneColors {
            background: self.background,
            foreground: self.foreground,
        }
    }

    pub fn validate(&self) -> VizResult<()> {
        self.background.validate()?;
        self.foreground.validate()?;
        let sizing = &self.surface;
        let dims = [
            sizing.horizontal_inset,
            sizing.min_width,
            sizing.height_ratio,
            sizing.min_height,
        ];
        if dims.iter().any(|value| !value.is_finite() || *value < 0.0) {
            return Err(VizError::InvalidData(
                "surface sizing values must be finite and >= 0".to_owned(),
            ));
        }
        if !sizing.fallback.is_valid() {
            return Err(VizError::InvalidViewport {
                width: sizing.fallback.width,
                height: sizing.fallback.height,
            });
        }
        Ok(())
    }
}

fn default_horizontal_inset() -> f64 {
    60.0
}

fn default_min_width() -> f64 {
    320.0
}

fn default_height_ratio() -> f64 {
    0.6
}

fn default_min_height() -> f64 {
    400.0
}

fn default_fallback() -> Viewport {
    Viewport::new(800, 600)
}

fn default_scenes() -> Vec<SceneKind> {
    SceneKind::ALL.to_vec()
}

fn default_background() -> Color {
    Color::rgb(1.0, 1.0, 1.0)
}

fn default_foreground() -> Color {
    Color::rgba8(43, 95, 111, 0.6)
}

fn default_show_dots() -> bool {
    true
}
