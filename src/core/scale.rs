use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{VizError, VizResult};

/// Min/max summary of a numeric series used for normalization.
///
/// `range` is never zero: flat or non-finite spans fall back to `1.0` so
/// normalization cannot divide by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesRange {
    pub min: f64,
    pub max: f64,
    pub range: f64,
}

impl SeriesRange {
    /// Summarizes the finite values of a series. Returns `None` when there are none.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut min: Option<OrderedFloat<f64>> = None;
        let mut max: Option<OrderedFloat<f64>> = None;
        for value in values.into_iter().filter(|v| v.is_finite()) {
            let value = OrderedFloat(value);
            min = Some(min.map_or(value, |current| current.min(value)));
            max = Some(max.map_or(value, |current| current.max(value)));
        }
        let (min, max) = (min?.into_inner(), max?.into_inner());
        Some(Self::new(min, max))
    }

    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        let span = max - min;
        let range = if span.is_finite() && span != 0.0 {
            span
        } else {
            1.0
        };
        Self { min, max, range }
    }

    /// Scales both bounds, e.g. `(0.9, 1.1)` for trend headroom.
    #[must_use]
    pub fn scaled(self, min_factor: f64, max_factor: f64) -> Self {
        Self::new(self.min * min_factor, self.max * max_factor)
    }

    /// True when every value of the series was the same.
    #[must_use]
    pub fn is_flat(self) -> bool {
        self.max - self.min == 0.0
    }

    /// Maps `value` into `0..=1` relative to the range.
    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        if !value.is_finite() {
            return 0.0;
        }
        ((value - self.min) / self.range).clamp(0.0, 1.0)
    }
}

/// Linear map from a value domain onto a pixel span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    pixel_start: f64,
    pixel_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        pixel_start: f64,
        pixel_end: f64,
    ) -> VizResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(VizError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !pixel_start.is_finite() || !pixel_end.is_finite() {
            return Err(VizError::InvalidData(
                "scale pixel span must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            pixel_start,
            pixel_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn to_pixel(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.pixel_start + normalized * (self.pixel_end - self.pixel_start)
    }
}
