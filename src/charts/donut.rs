use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::charts::{ensure_dimension, format_currency_compact};
use crate::error::{VizError, VizResult};

/// One slice of a donut chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonutSegment {
    pub label: String,
    pub value: f64,
    pub color: String,
}

impl DonutSegment {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            color: color.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DonutConfig {
    pub size: f64,
    pub radius: f64,
    pub stroke_width: f64,
}

impl Default for DonutConfig {
    fn default() -> Self {
        Self {
            size: 140.0,
            radius: 55.0,
            stroke_width: 18.0,
        }
    }
}

impl DonutConfig {
    pub fn validate(self) -> VizResult<()> {
        ensure_dimension(self.size, "donut size")?;
        ensure_dimension(self.radius, "donut radius")?;
        ensure_dimension(self.stroke_width, "donut stroke width")?;
        if self.radius + self.stroke_width / 2.0 > self.size / 2.0 {
            return Err(VizError::InvalidData(
                "donut ring must fit inside its size".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn circumference(self) -> f64 {
        TAU * self.radius
    }
}

/// Stroke-dash parameters for one segment drawn on the shared circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonutArc {
    pub label: String,
    pub color: String,
    pub value: f64,
    pub percentage: f64,
    /// Visible dash length followed by the gap that completes the circle.
    pub dash_array: (f64, f64),
    pub dash_offset: f64,
}

impl DonutArc {
    #[must_use]
    pub fn dash_length(&self) -> f64 {
        self.dash_array.0
    }

    /// Legend line such as `$1.2M (45%)`.
    #[must_use]
    pub fn legend_label(&self) -> String {
        format!(
            "{} ({:.0}%)",
            format_currency_compact(self.value),
            self.percentage * 100.0
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonutGeometry {
    pub center: (f64, f64),
    pub radius: f64,
    pub stroke_width: f64,
    pub circumference: f64,
    /// Offset of the first arc, which places its start at 12 o'clock.
    pub start_offset: f64,
    pub total: f64,
    pub arcs: Vec<DonutArc>,
}

impl DonutGeometry {
    #[must_use]
    pub fn empty(config: DonutConfig) -> Self {
        let circumference = config.circumference();
        Self {
            center: (config.size / 2.0, config.size / 2.0),
            radius: config.radius,
            stroke_width: config.stroke_width,
            circumference,
            start_offset: circumference * 0.25,
            total: 0.0,
            arcs: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    #[must_use]
    pub fn total_label(&self) -> String {
        format_currency_compact(self.total)
    }
}

/// Lays segments clockwise around the circle starting at 12 o'clock.
///
/// Negative and non-finite values count as zero. A non-positive total yields
/// an empty geometry instead of dividing by zero.
pub fn donut_geometry(segments: &[DonutSegment], config: DonutConfig) -> VizResult<DonutGeometry> {
    config.validate()?;
    let mut geometry = DonutGeometry::empty(config);

    let sanitized = |value: f64| if value.is_finite() { value.max(0.0) } else { 0.0 };
    let total: f64 = segments.iter().map(|segment| sanitized(segment.value)).sum();
    if !total.is_finite() || total <= 0.0 {
        return Ok(geometry);
    }

    let circumference = geometry.circumference;
    let mut offset = geometry.start_offset;
    geometry.total = total;
    geometry.arcs = segments
        .iter()
        .map(|segment| {
            let value = sanitized(segment.value);
            let percentage = value / total;
            let dash_length = percentage * circumference;
            let arc = DonutArc {
                label: segment.label.clone(),
                color: segment.color.clone(),
                value,
                percentage,
                dash_array: (dash_length, circumference - dash_length),
                dash_offset: offset,
            };
            offset -= dash_length;
            arc
        })
        .collect();

    Ok(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_arc_starts_at_twelve_o_clock() {
        let segments = vec![
            DonutSegment::new("Enterprise", 300.0, "#2B5F6F"),
            DonutSegment::new("Commercial", 100.0, "#FFC300"),
        ];
        let geometry = donut_geometry(&segments, DonutConfig::default()).expect("donut");
        let c = geometry.circumference;
        assert!((geometry.arcs[0].dash_offset - c * 0.25).abs() < 1e-9);
        assert!((geometry.arcs[1].dash_offset - (c * 0.25 - c * 0.75)).abs() < 1e-9);
    }

    #[test]
    fn legend_label_uses_compact_currency() {
        let segments = vec![
            DonutSegment::new("Enterprise", 1_200_000.0, "#2B5F6F"),
            DonutSegment::new("Residential", 400_000.0, "#16b364"),
        ];
        let geometry = donut_geometry(&segments, DonutConfig::default()).expect("donut");
        assert_eq!(geometry.arcs[0].legend_label(), "$1.2M (75%)");
        assert_eq!(geometry.total_label(), "$1.6M");
    }
}
