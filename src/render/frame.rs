use crate::core::Viewport;
use crate::error::{VizError, VizResult};
use crate::render::{CirclePrimitive, Color, LinePrimitive, PolylinePrimitive, RectPrimitive};

/// Backend-agnostic draw commands for one animation frame.
///
/// `clear` is `Some` when the surface must be wiped before drawing. Exposure
/// scenes leave it `None` so dots accumulate across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub clear: Option<Color>,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub polylines: Vec<PolylinePrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            clear: None,
            lines: Vec::new(),
            rects: Vec::new(),
            circles: Vec::new(),
            polylines: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_clear(mut self, color: Color) -> Self {
        self.clear = Some(color);
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    #[must_use]
    pub fn with_circle(mut self, circle: CirclePrimitive) -> Self {
        self.circles.push(circle);
        self
    }

    #[must_use]
    pub fn with_polyline(mut self, polyline: PolylinePrimitive) -> Self {
        self.polylines.push(polyline);
        self
    }

    pub fn validate(&self) -> VizResult<()> {
        if !self.viewport.is_valid() {
            return Err(VizError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        if let Some(clear) = self.clear {
            clear.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }
        for polyline in &self.polylines {
            polyline.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clear.is_none()
            && self.lines.is_empty()
            && self.rects.is_empty()
            && self.circles.is_empty()
            && self.polylines.is_empty()
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.lines.len() + self.rects.len() + self.circles.len() + self.polylines.len()
    }
}
