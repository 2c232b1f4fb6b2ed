use serde::{Deserialize, Serialize};

/// Drawing surface size in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }
}

/// 2D coordinate in surface-pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Drawing bounds derived from a surface size.
///
/// `xl/xr/yt/yb` are the hard surface edges used for clamping; the
/// `*_min/*_max/*_mid` fields describe the inset band scenes lay points out in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub x_mid: f64,
    pub y_mid: f64,
    pub xl: f64,
    pub xr: f64,
    pub yt: f64,
    pub yb: f64,
}

impl Boundary {
    #[must_use]
    pub fn from_size(width: f64, height: f64) -> Self {
        let edge_x = 0.05 * width;
        let edge_top = 0.2 * height;
        let edge_bottom = 0.2 * height;
        Self {
            x_min: edge_x,
            x_max: width - edge_x,
            y_min: edge_top,
            y_max: height - edge_bottom,
            x_mid: 0.5 * (width - edge_x + edge_x),
            y_mid: 0.5 * (height - edge_bottom + edge_top),
            xl: 0.0,
            xr: width,
            yt: 0.0,
            yb: height,
        }
    }

    #[must_use]
    pub fn from_viewport(viewport: Viewport) -> Self {
        Self::from_size(viewport.width_f64(), viewport.height_f64())
    }

    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        (self.xl..=self.xr).contains(&point.x) && (self.yt..=self.yb).contains(&point.y)
    }
}
