//! Pure chart geometry calculators.
//!
//! Every calculator maps `(series, config)` to serializable geometry and never
//! fails on degenerate numeric input: empty, single-point, flat or zero-total
//! series produce an empty or flat geometry whose coordinates stay finite and
//! inside the view box. Only invalid configuration is rejected.

pub mod bars;
pub mod donut;
pub mod format;
pub mod gauge;
pub mod path;
pub mod sparkline;
pub mod svg;
pub mod trend;

pub use bars::{
    BarRect, BarSeries, CategorySlot, IncidentBarsConfig, IncidentBarsGeometry, IncidentPoint,
    incident_bars_geometry,
};
pub use donut::{DonutArc, DonutConfig, DonutGeometry, DonutSegment, donut_geometry};
pub use format::{format_currency_compact, format_percent};
pub use gauge::{GaugeBand, GaugeConfig, GaugeGeometry, ScoreStrength, gauge_geometry};
pub use path::{PathBuilder, format_number, path_numbers};
pub use sparkline::{SparklineConfig, SparklineGeometry, sparkline_geometry};
pub use trend::{
    AxisLabel, GridLine, TrendConfig, TrendGeometry, TrendPadding, TrendPoint, cardinal_spline,
    trend_geometry,
};

use crate::error::{VizError, VizResult};

pub(crate) fn ensure_dimension(value: f64, what: &str) -> VizResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(VizError::InvalidData(format!(
            "{what} must be finite and > 0"
        )));
    }
    Ok(())
}
