use serde::{Deserialize, Serialize};

use crate::charts::{PathBuilder, ensure_dimension};
use crate::core::{Point, SeriesRange};
use crate::error::{VizError, VizResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    #[serde(alias = "month")]
    pub label: String,
    pub value: f64,
}

impl TrendPoint {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPadding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    pub width: f64,
    pub height: f64,
    pub padding: TrendPadding,
    /// Cardinal spline tension; `0` degenerates to straight segments.
    pub tension: f64,
    /// Multipliers applied to the series min/max to leave vertical headroom.
    pub min_headroom: f64,
    pub max_headroom: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 50.0,
            padding: TrendPadding {
                top: 5.0,
                right: 5.0,
                bottom: 10.0,
                left: 8.0,
            },
            tension: 0.3,
            min_headroom: 0.9,
            max_headroom: 1.1,
        }
    }
}

impl TrendConfig {
    pub fn validate(self) -> VizResult<()> {
        ensure_dimension(self.width, "trend width")?;
        ensure_dimension(self.height, "trend height")?;
        let TrendPadding {
            top,
            right,
            bottom,
            left,
        } = self.padding;
        if [top, right, bottom, left]
            .iter()
            .any(|side| !side.is_finite() || *side < 0.0)
        {
            return Err(VizError::InvalidData(
                "trend padding must be finite and >= 0".to_owned(),
            ));
        }
        if self.effective_width() <= 0.0 || self.effective_height() <= 0.0 {
            return Err(VizError::InvalidData(
                "trend padding must leave a drawable area".to_owned(),
            ));
        }
        if !self.tension.is_finite() {
            return Err(VizError::InvalidData(
                "trend tension must be finite".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn effective_width(self) -> f64 {
        self.width - self.padding.left - self.padding.right
    }

    #[must_use]
    pub fn effective_height(self) -> f64 {
        self.height - self.padding.top - self.padding.bottom
    }

    #[must_use]
    pub fn baseline(self) -> f64 {
        self.height - self.padding.bottom
    }
}

/// Horizontal guide line across the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub ratio: f64,
    pub x1: f64,
    pub x2: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendGeometry {
    pub view_box: (f64, f64),
    pub points: Vec<Point>,
    pub line_path: String,
    pub area_path: String,
    pub grid_lines: Vec<GridLine>,
    pub labels: Vec<AxisLabel>,
}

const GRID_RATIOS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// Fits a cardinal spline through the normalized series.
///
/// Empty input yields no path; a single point yields a lone `M` command. A
/// flat series is drawn at the vertical center of the plot area.
pub fn trend_geometry(series: &[TrendPoint], config: TrendConfig) -> VizResult<TrendGeometry> {
    config.validate()?;

    let grid_lines = GRID_RATIOS
        .iter()
        .map(|ratio| GridLine {
            ratio: *ratio,
            x1: config.padding.left,
            x2: config.width - config.padding.right,
            y: config.padding.top + ratio * config.effective_height(),
        })
        .collect();

    let mut geometry = TrendGeometry {
        view_box: (config.width, config.height),
        points: Vec::new(),
        line_path: String::new(),
        area_path: String::new(),
        grid_lines,
        labels: Vec::new(),
    };

    let finite: Vec<&TrendPoint> = series.iter().filter(|p| p.value.is_finite()).collect();
    let Some(range) = SeriesRange::from_values(finite.iter().map(|p| p.value)) else {
        return Ok(geometry);
    };
    let range = range.scaled(config.min_headroom, config.max_headroom);

    geometry.points = project_points(&finite, range, config);
    geometry.labels = finite
        .iter()
        .zip(&geometry.points)
        .map(|(source, point)| AxisLabel {
            text: source.label.clone(),
            x: point.x,
            y: config.height - 2.0,
        })
        .collect();

    let line = cardinal_spline(&geometry.points, config.tension);
    let mut area = PathBuilder::from_path(line.as_str());
    if let Some(last) = geometry.points.last() {
        area.line_to(Point::new(last.x, config.baseline()))
            .line_to(Point::new(config.padding.left, config.baseline()))
            .close();
    }

    geometry.line_path = line.finish();
    geometry.area_path = area.finish();
    Ok(geometry)
}

fn project_points(series: &[&TrendPoint], range: SeriesRange, config: TrendConfig) -> Vec<Point> {
    let effective_width = config.effective_width();
    let effective_height = config.effective_height();
    let last_index = series.len().saturating_sub(1) as f64;

    series
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let x = if last_index > 0.0 {
                config.padding.left + (index as f64 / last_index) * effective_width
            } else {
                config.padding.left + effective_width / 2.0
            };
            let y = if range.is_flat() {
                config.padding.top + effective_height / 2.0
            } else {
                config.padding.top + effective_height - range.normalize(point.value) * effective_height
            };
            Point::new(x, y)
        })
        .collect()
}

/// Builds `M` + one `C` per segment, using neighbors for control points.
///
/// Endpoints reuse themselves as the missing neighbor, which keeps control
/// points between the segment ends and therefore inside the plot area.
#[must_use]
pub fn cardinal_spline(points: &[Point], tension: f64) -> PathBuilder {
    let mut path = PathBuilder::new();
    let Some(first) = points.first() else {
        return path;
    };
    path.move_to(*first);

    for i in 0..points.len().saturating_sub(1) {
        let p0 = if i == 0 { points[i] } else { points[i - 1] };
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points.get(i + 2).copied().unwrap_or(p2);

        let control1 = Point::new(
            p1.x + (p2.x - p0.x) / 6.0 * tension,
            p1.y + (p2.y - p0.y) / 6.0 * tension,
        );
        let control2 = Point::new(
            p2.x - (p3.x - p1.x) / 6.0 * tension,
            p2.y - (p3.y - p1.y) / 6.0 * tension,
        );
        path.cubic_to(control1, control2, p2);
    }
    path
}
