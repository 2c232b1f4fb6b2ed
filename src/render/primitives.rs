use serde::{Deserialize, Serialize};

use crate::error::{VizError, VizResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 0..=255 channels and a 0..=1 alpha.
    #[must_use]
    pub fn rgba8(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self::rgba(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            alpha,
        )
    }

    /// Parses `rgba(r, g, b, a)`, `rgb(r, g, b)` and `#rrggbb` strings.
    pub fn parse_css(input: &str) -> VizResult<Self> {
        let trimmed = input.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| invalid_css(input));
        }

        let (body, expects_alpha) = if let Some(rest) = trimmed.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = trimmed.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(invalid_css(input));
        };
        let body = body.strip_suffix(')').ok_or_else(|| invalid_css(input))?;

        let parts: Vec<f64> = body
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| invalid_css(input))?;

        let expected = if expects_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(invalid_css(input));
        }
        let channel = |value: f64| (value / 255.0).clamp(0.0, 1.0);
        let alpha = if expects_alpha {
            parts[3].clamp(0.0, 1.0)
        } else {
            1.0
        };
        let color = Self::rgba(channel(parts[0]), channel(parts[1]), channel(parts[2]), alpha);
        color.validate()?;
        Ok(color)
    }

    /// Returns the same color with its alpha channel replaced.
    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Formats as a CSS `rgba(...)` string with 0..=255 channels.
    #[must_use]
    pub fn to_css(self) -> String {
        let to_byte = |value: f64| (value * 255.0).round() as u8;
        format!(
            "rgba({}, {}, {}, {})",
            to_byte(self.red),
            to_byte(self.green),
            to_byte(self.blue),
            self.alpha
        )
    }

    pub fn validate(self) -> VizResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(VizError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let byte = |index: usize| u8::from_str_radix(&hex[index..index + 2], 16).ok();
    Some(Color::rgba8(byte(0)?, byte(2)?, byte(4)?, 1.0))
}

fn invalid_css(input: &str) -> VizError {
    VizError::InvalidData(format!("unsupported css color `{input}`"))
}

fn ensure_finite(values: &[f64], what: &str) -> VizResult<()> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(VizError::InvalidData(format!("{what} must be finite")))
    }
}

fn ensure_stroke_width(stroke_width: f64, what: &str) -> VizResult<()> {
    if !stroke_width.is_finite() || stroke_width <= 0.0 {
        return Err(VizError::InvalidData(format!(
            "{what} stroke width must be finite and > 0"
        )));
    }
    Ok(())
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> VizResult<()> {
        ensure_finite(&[self.x1, self.y1, self.x2, self.y2], "line coordinates")?;
        ensure_stroke_width(self.stroke_width, "line")?;
        self.color.validate()
    }
}

/// Filled rectangle, such as one chart bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
        }
    }

    pub fn validate(self) -> VizResult<()> {
        ensure_finite(&[self.x, self.y, self.width, self.height], "rect geometry")?;
        if self.width < 0.0 || self.height < 0.0 {
            return Err(VizError::InvalidData(
                "rect size must be >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()
    }
}

/// Dot centered on a scene point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub filled: bool,
    pub color: Color,
}

impl CirclePrimitive {
    #[must_use]
    pub const fn new(cx: f64, cy: f64, radius: f64, filled: bool, color: Color) -> Self {
        Self {
            cx,
            cy,
            radius,
            filled,
            color,
        }
    }

    pub fn validate(self) -> VizResult<()> {
        ensure_finite(&[self.cx, self.cy], "circle center")?;
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(VizError::InvalidData(
                "circle radius must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Open stroked path through a sequence of vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylinePrimitive {
    pub points: Vec<(f64, f64)>,
    pub stroke_width: f64,
    pub color: Color,
}

impl PolylinePrimitive {
    #[must_use]
    pub fn new(points: Vec<(f64, f64)>, stroke_width: f64, color: Color) -> Self {
        Self {
            points,
            stroke_width,
            color,
        }
    }

    pub fn validate(&self) -> VizResult<()> {
        if self.points.len() < 2 {
            return Err(VizError::InvalidData(
                "polyline needs at least two points".to_owned(),
            ));
        }
        if !self
            .points
            .iter()
            .all(|(x, y)| x.is_finite() && y.is_finite())
        {
            return Err(VizError::InvalidData(
                "polyline coordinates must be finite".to_owned(),
            ));
        }
        ensure_stroke_width(self.stroke_width, "polyline")?;
        self.color.validate()
    }
}
