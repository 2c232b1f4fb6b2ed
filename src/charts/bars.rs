use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::charts::ensure_dimension;
use crate::core::{LinearScale, SeriesRange, Viewport};
use crate::error::{VizError, VizResult};
use crate::render::{Color, LinePrimitive, RectPrimitive, RenderFrame};

/// Predicted vs actual incident count for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentPoint {
    pub month: String,
    pub predicted: f64,
    pub actual: f64,
}

impl IncidentPoint {
    #[must_use]
    pub fn new(month: impl Into<String>, predicted: f64, actual: f64) -> Self {
        Self {
            month: month.into(),
            predicted,
            actual,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncidentBarsConfig {
    pub width: f64,
    pub height: f64,
    pub bar_width: f64,
    /// Fraction of a bar width the predicted bar shifts over the actual bar.
    pub bar_overlap: f64,
    /// Value padding added below the minimum and above the maximum.
    pub value_margin: f64,
    pub split_count: usize,
}

impl Default for IncidentBarsConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 320.0,
            bar_width: 8.0,
            bar_overlap: 0.35,
            value_margin: 5.0,
            split_count: 5,
        }
    }
}

impl IncidentBarsConfig {
    pub fn validate(self) -> VizResult<()> {
        ensure_dimension(self.width, "bar chart width")?;
        ensure_dimension(self.height, "bar chart height")?;
        ensure_dimension(self.bar_width, "bar width")?;
        if self.bar_width > self.width {
            return Err(VizError::InvalidData(
                "bar width must not exceed the chart width".to_owned(),
            ));
        }
        if !(0.0..=1.0).contains(&self.bar_overlap) {
            return Err(VizError::InvalidData(
                "bar overlap must be within 0..=1".to_owned(),
            ));
        }
        if self.split_count == 0 {
            return Err(VizError::InvalidData(
                "bar chart needs at least one split line".to_owned(),
            ));
        }
        if !self.value_margin.is_finite() || self.value_margin < 0.0 {
            return Err(VizError::InvalidData(
                "value margin must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarSeries {
    Predicted,
    Actual,
}

impl BarSeries {
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Predicted => "#FFC300",
            Self::Actual => "#16b364",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarRect {
    pub series: BarSeries,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlot {
    pub month: String,
    pub center_x: f64,
    pub bars: SmallVec<[BarRect; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentBarsGeometry {
    pub view_box: (f64, f64),
    pub value_min: f64,
    pub value_max: f64,
    /// `(value, y)` pairs for the horizontal split lines, bottom first.
    pub split_lines: Vec<(f64, f64)>,
    pub slots: Vec<CategorySlot>,
    /// Dashed marker position for the current month, when present.
    pub marker_x: Option<f64>,
}

impl IncidentBarsGeometry {
    /// Draw commands for a raster backend: split lines, bars, then the marker.
    pub fn render_frame(&self) -> VizResult<RenderFrame> {
        let (width, height) = self.view_box;
        let viewport = Viewport::new(width.ceil() as u32, height.ceil() as u32);
        let grid = Color::parse_css("#e5e7eb")?;
        let marker = Color::parse_css("#6b7280")?;

        let mut frame = RenderFrame::new(viewport);
        for &(_, y) in &self.split_lines {
            frame = frame.with_line(LinePrimitive::new(0.0, y, width, y, 1.0, grid));
        }
        for slot in &self.slots {
            for bar in &slot.bars {
                let fill = Color::parse_css(bar.series.color())?;
                frame = frame.with_rect(RectPrimitive::new(
                    bar.x, bar.y, bar.width, bar.height, fill,
                ));
            }
        }
        if let Some(x) = self.marker_x {
            frame = frame.with_line(LinePrimitive::new(x, 0.0, x, height, 1.0, marker));
        }
        frame.validate()?;
        Ok(frame)
    }
}

/// Lays out grouped predicted/actual bars over evenly divided month slots.
///
/// The value axis runs from `max(0, min - margin)` to `max + margin`.
/// `current_month` defaults to the middle month.
pub fn incident_bars_geometry(
    series: &[IncidentPoint],
    current_month: Option<&str>,
    config: IncidentBarsConfig,
) -> VizResult<IncidentBarsGeometry> {
    config.validate()?;

    let values = series
        .iter()
        .flat_map(|point| [point.predicted, point.actual]);
    let (value_min, value_max) = match SeriesRange::from_values(values) {
        Some(range) => (
            (range.min - config.value_margin).max(0.0),
            range.max + config.value_margin,
        ),
        None => (0.0, config.value_margin.max(1.0)),
    };
    let value_max = if value_max > value_min {
        value_max
    } else {
        value_min + 1.0
    };
    let scale = LinearScale::new(value_min, value_max, config.height, 0.0)?;

    let split_lines = (0..=config.split_count)
        .map(|step| {
            let value =
                value_min + (value_max - value_min) * step as f64 / config.split_count as f64;
            (value, scale.to_pixel(value))
        })
        .collect();

    let slot_width = if series.is_empty() {
        config.width
    } else {
        config.width / series.len() as f64
    };
    let bar_y = |value: f64| {
        let clamped = if value.is_finite() {
            value.clamp(value_min, value_max)
        } else {
            value_min
        };
        scale.to_pixel(clamped)
    };
    let shift = config.bar_width * (1.0 - config.bar_overlap);

    let slots: Vec<CategorySlot> = series
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let center_x = slot_width * (index as f64 + 0.5);
            let mut bars = SmallVec::new();
            for (series_kind, value, left) in [
                (BarSeries::Predicted, point.predicted, center_x - shift / 2.0 - config.bar_width / 2.0),
                (BarSeries::Actual, point.actual, center_x + shift / 2.0 - config.bar_width / 2.0),
            ] {
                let top = bar_y(value);
                bars.push(BarRect {
                    series: series_kind,
                    x: left.clamp(0.0, (config.width - config.bar_width).max(0.0)),
                    y: top,
                    width: config.bar_width,
                    height: config.height - top,
                });
            }
            CategorySlot {
                month: point.month.clone(),
                center_x,
                bars,
            }
        })
        .collect();

    let marker_month = current_month
        .map(str::to_owned)
        .or_else(|| series.get(series.len() / 2).map(|p| p.month.clone()));
    let marker_x = marker_month.and_then(|month| {
        slots
            .iter()
            .find(|slot| slot.month == month)
            .map(|slot| slot.center_x)
    });

    Ok(IncidentBarsGeometry {
        view_box: (config.width, config.height),
        value_min,
        value_max,
        split_lines,
        slots,
        marker_x,
    })
}
