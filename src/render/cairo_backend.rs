use cairo::{Context, Format, ImageSurface, LineCap, LineJoin, Operator};
use std::f64::consts::TAU;

use crate::error::{VizError, VizResult};
use crate::render::{Color, RenderFrame, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub polylines_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(&mut self, context: &Context, frame: &RenderFrame)
    -> VizResult<()>;
}

/// Cairo renderer backend.
///
/// The offscreen surface is kept between frames, so frames without a `clear`
/// color accumulate on top of earlier ones the same way a browser canvas does.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> VizResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(VizError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Writes the current surface content as PNG.
    pub fn write_png<W: std::io::Write>(&self, writer: &mut W) -> VizResult<()> {
        self.surface
            .write_to_png(writer)
            .map_err(|err| VizError::InvalidData(format!("failed to encode png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> VizResult<()> {
        frame.validate()?;

        if let Some(clear) = frame.clear {
            // Source so a transparent clear actually wipes earlier frames.
            context.set_operator(Operator::Source);
            apply_color(context, clear);
            let painted = context.paint();
            context.set_operator(Operator::Over);
            painted.map_err(|err| map_backend_error("failed to clear surface", err))?;
        }

        let mut stats = CairoRenderStats::default();
        context.set_line_cap(LineCap::Round);
        context.set_line_join(LineJoin::Round);

        for rect in &frame.rects {
            apply_color(context, rect.fill_color);
            context.rectangle(rect.x, rect.y, rect.width, rect.height);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            stats.rects_drawn += 1;
        }

        for line in &frame.lines {
            apply_color(context, line.color);
            context.set_line_width(line.stroke_width);
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }

        for polyline in &frame.polylines {
            apply_color(context, polyline.color);
            context.set_line_width(polyline.stroke_width);
            let mut vertices = polyline.points.iter();
            if let Some(&(x, y)) = vertices.next() {
                context.move_to(x, y);
            }
            for &(x, y) in vertices {
                context.line_to(x, y);
            }
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke polyline", err))?;
            stats.polylines_drawn += 1;
        }

        for circle in &frame.circles {
            apply_color(context, circle.color);
            context.new_sub_path();
            context.arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
            let result = if circle.filled {
                context.fill()
            } else {
                context.stroke()
            };
            result.map_err(|err| map_backend_error("failed to draw circle", err))?;
            stats.circles_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> VizResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> VizResult<()> {
        self.render_with_context(context, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> VizError {
    VizError::InvalidData(format!("{prefix}: {err}"))
}
