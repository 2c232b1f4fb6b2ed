//! Decorative flow-line animation.
//!
//! Two variants share one driver: evenly spaced vertical strokes whose length
//! oscillates, and flowing curves built from three stacked sine waves. Unlike
//! the scenes there is no visibility gating; the loop runs from `start` until
//! `stop`.

mod animation;
mod projection;

pub use animation::FlowLineAnimation;
pub use projection::{CURVE_SEGMENTS, curved_line, project_lines, vertical_line};

use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{VizError, VizResult};
use crate::render::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowLineStyle {
    #[default]
    Vertical,
    Curved,
}

impl FlowLineStyle {
    /// Time accumulated per frame.
    #[must_use]
    pub const fn time_step(self) -> f64 {
        match self {
            FlowLineStyle::Vertical => 0.01,
            FlowLineStyle::Curved => 0.016,
        }
    }
}

/// Per-line parameters, drawn once when the animation is created.
///
/// Vertical lines only use `phase`, as a noise offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineDescriptor {
    pub phase: f64,
    pub frequency: f64,
    pub amplitude: f64,
    pub speed: f64,
}

impl LineDescriptor {
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        style: FlowLineStyle,
        index: usize,
        count: usize,
    ) -> Self {
        match style {
            FlowLineStyle::Vertical => Self {
                phase: rng.r#gen::<f64>() * 1000.0,
                frequency: 1.0,
                amplitude: 1.0,
                speed: 1.0,
            },
            FlowLineStyle::Curved => Self {
                phase: index as f64 / count.max(1) as f64 * TAU,
                frequency: 0.5 + rng.r#gen::<f64>() * 0.5,
                amplitude: 0.3 + rng.r#gen::<f64>() * 0.7,
                speed: 0.01 + rng.r#gen::<f64>() * 0.02,
            },
        }
    }
}

/// Flow-line animation settings.
///
/// Missing JSON fields take the vertical-style defaults; use
/// [`FlowLineConfig::curved`] for the curved-style defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowLineConfig {
    pub style: FlowLineStyle,
    pub mount: String,
    pub count: usize,
    pub base_height: f64,
    pub oscillation_range: f64,
    pub stroke: Color,
    pub line_width: f64,
}

impl Default for FlowLineConfig {
    fn default() -> Self {
        Self::vertical()
    }
}

impl FlowLineConfig {
    #[must_use]
    pub fn vertical() -> Self {
        Self {
            style: FlowLineStyle::Vertical,
            mount: "generative-lines".to_owned(),
            count: 12,
            base_height: 150.0,
            oscillation_range: 100.0,
            stroke: Color::rgba8(43, 95, 111, 0.4),
            line_width: 1.5,
        }
    }

    #[must_use]
    pub fn curved() -> Self {
        Self {
            style: FlowLineStyle::Curved,
            mount: "generative-art-lines".to_owned(),
            count: 15,
            base_height: 200.0,
            oscillation_range: 120.0,
            ..Self::vertical()
        }
    }

    #[must_use]
    pub fn for_style(style: FlowLineStyle) -> Self {
        match style {
            FlowLineStyle::Vertical => Self::vertical(),
            FlowLineStyle::Curved => Self::curved(),
        }
    }

    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    #[must_use]
    pub fn with_mount(mut self, mount: impl Into<String>) -> Self {
        self.mount = mount.into();
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Color) -> Self {
        self.stroke = stroke;
        self
    }

    #[must_use]
    pub fn with_oscillation(mut self, base_height: f64, oscillation_range: f64) -> Self {
        self.base_height = base_height;
        self.oscillation_range = oscillation_range;
        self
    }

    pub fn validate(&self) -> VizResult<()> {
        if !self.base_height.is_finite() || !self.oscillation_range.is_finite() {
            return Err(VizError::InvalidData(
                "flow line height and range must be finite".to_owned(),
            ));
        }
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(VizError::InvalidData(
                "flow line width must be finite and > 0".to_owned(),
            ));
        }
        self.stroke.validate()
    }
}
