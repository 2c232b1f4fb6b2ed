use serde::{Deserialize, Serialize};

use crate::charts::{PathBuilder, ensure_dimension};
use crate::core::{Point, SeriesRange};
use crate::error::{VizError, VizResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparklineConfig {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for SparklineConfig {
    fn default() -> Self {
        Self {
            width: 90.0,
            height: 28.0,
            padding: 2.0,
        }
    }
}

impl SparklineConfig {
    pub fn validate(self) -> VizResult<()> {
        ensure_dimension(self.width, "sparkline width")?;
        ensure_dimension(self.height, "sparkline height")?;
        if !self.padding.is_finite()
            || self.padding < 0.0
            || self.padding * 2.0 >= self.width.min(self.height)
        {
            return Err(VizError::InvalidData(
                "sparkline padding must leave a drawable area".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparklineGeometry {
    pub view_box: (f64, f64),
    pub points: Vec<Point>,
    pub line_path: String,
    /// Line path closed against the bottom padding edge, for the tinted fill.
    pub area_path: String,
}

impl SparklineGeometry {
    #[must_use]
    pub fn empty(config: SparklineConfig) -> Self {
        Self {
            view_box: (config.width, config.height),
            points: Vec::new(),
            line_path: String::new(),
            area_path: String::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Normalizes a short series into the padded sparkline box.
///
/// Series with fewer than two finite values produce an empty geometry. A flat
/// series is drawn as a horizontal line through the vertical midpoint.
pub fn sparkline_geometry(values: &[f64], config: SparklineConfig) -> VizResult<SparklineGeometry> {
    config.validate()?;

    let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if values.len() < 2 {
        return Ok(SparklineGeometry::empty(config));
    }
    let Some(range) = SeriesRange::from_values(values.iter().copied()) else {
        return Ok(SparklineGeometry::empty(config));
    };

    let padding = config.padding;
    let effective_width = config.width - padding * 2.0;
    let effective_height = config.height - padding * 2.0;
    let last_index = (values.len() - 1) as f64;

    let points: Vec<Point> = values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let x = padding + (index as f64 / last_index) * effective_width;
            let y = if range.is_flat() {
                padding + effective_height / 2.0
            } else {
                padding + effective_height - range.normalize(*value) * effective_height
            };
            Point::new(x, y)
        })
        .collect();

    let mut line = PathBuilder::new();
    for (index, point) in points.iter().enumerate() {
        if index == 0 {
            line.move_to(*point);
        } else {
            line.line_to(*point);
        }
    }

    let bottom = config.height - padding;
    let mut area = PathBuilder::from_path(line.as_str());
    if let Some(last) = points.last() {
        area.line_to(Point::new(last.x, bottom))
            .line_to(Point::new(padding, bottom))
            .close();
    }

    Ok(SparklineGeometry {
        view_box: (config.width, config.height),
        points,
        line_path: line.finish(),
        area_path: area.finish(),
    })
}
