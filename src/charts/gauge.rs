use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::charts::{PathBuilder, ensure_dimension};
use crate::core::Point;
use crate::error::{VizError, VizResult};

/// Health band selected by gauge percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeBand {
    Healthy,
    Fair,
    AtRisk,
    Critical,
}

/// Ordered lookup: the first band whose threshold the percentage reaches wins.
const GAUGE_BANDS: [(f64, GaugeBand); 3] = [
    (80.0, GaugeBand::Healthy),
    (60.0, GaugeBand::Fair),
    (40.0, GaugeBand::AtRisk),
];

impl GaugeBand {
    #[must_use]
    pub fn for_percentage(percentage: f64) -> Self {
        GAUGE_BANDS
            .iter()
            .find(|(threshold, _)| percentage >= *threshold)
            .map_or(Self::Critical, |(_, band)| *band)
    }

    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Healthy => "#16b364",
            Self::Fair => "#F59E0B",
            Self::AtRisk => "#FF6B35",
            Self::Critical => "#DC2626",
        }
    }
}

/// Score strength used by the half-circle score cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStrength {
    None,
    Weak,
    Moderate,
    Strong,
}

impl ScoreStrength {
    /// `None` when there is no score (absent or zero), otherwise by ratio to `max`.
    #[must_use]
    pub fn classify(score: Option<f64>, max: f64) -> Self {
        let Some(score) = score.filter(|s| s.is_finite() && *s != 0.0) else {
            return Self::None;
        };
        if !max.is_finite() || max <= 0.0 {
            return Self::None;
        }
        let ratio = score / max;
        if ratio >= 0.8 {
            Self::Strong
        } else if ratio >= 0.4 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeConfig {
    pub max: f64,
    pub size: f64,
    pub stroke_width: f64,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            max: 100.0,
            size: 80.0,
            stroke_width: 8.0,
        }
    }
}

impl GaugeConfig {
    pub fn validate(self) -> VizResult<()> {
        ensure_dimension(self.size, "gauge size")?;
        ensure_dimension(self.stroke_width, "gauge stroke width")?;
        if self.stroke_width >= self.size {
            return Err(VizError::InvalidData(
                "gauge stroke width must be smaller than its size".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeGeometry {
    pub view_box: (f64, f64),
    pub radius: f64,
    /// Length of the half circle the arc is dashed along.
    pub circumference: f64,
    pub percentage: f64,
    pub sweep_degrees: f64,
    pub dash_offset: f64,
    /// Shared arc path for the track and the value stroke.
    pub arc_path: String,
    pub band: GaugeBand,
    pub color: String,
}

/// Maps `value` against `config.max` onto a 0..=180 degree arc sweep.
///
/// Values past `max` clamp to a full sweep; negative, non-finite values and a
/// non-positive `max` produce an empty sweep.
pub fn gauge_geometry(value: f64, config: GaugeConfig) -> VizResult<GaugeGeometry> {
    config.validate()?;

    let ratio = if value.is_finite() && config.max.is_finite() && config.max > 0.0 {
        (value / config.max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let percentage = ratio * 100.0;
    let radius = (config.size - config.stroke_width) / 2.0;
    let circumference = radius * PI;
    let half_stroke = config.stroke_width / 2.0;
    let baseline = config.size / 2.0;

    let mut arc = PathBuilder::new();
    arc.move_to(Point::new(half_stroke, baseline)).arc_to(
        radius,
        true,
        Point::new(config.size - half_stroke, baseline),
    );

    let band = GaugeBand::for_percentage(percentage);
    Ok(GaugeGeometry {
        view_box: (config.size, config.size / 2.0 + 12.0),
        radius,
        circumference,
        percentage,
        sweep_degrees: ratio * 180.0,
        dash_offset: circumference - ratio * circumference,
        arc_path: arc.finish(),
        band,
        color: band.color().to_owned(),
    })
}
