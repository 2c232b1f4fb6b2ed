#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::Viewport;
use crate::render::{Color, LinePrimitive, PolylinePrimitive, RenderFrame};

use super::{FlowLineConfig, FlowLineStyle, LineDescriptor};

/// Samples per curve, excluding the starting point.
pub const CURVE_SEGMENTS: usize = 50;

fn base_x(width: f64, count: usize, index: usize) -> f64 {
    width / (count + 1) as f64 * (index + 1) as f64
}

/// Vertical stroke hanging from the top edge.
#[must_use]
pub fn vertical_line(
    line: &LineDescriptor,
    index: usize,
    width: f64,
    time: f64,
    config: &FlowLineConfig,
) -> LinePrimitive {
    let x = base_x(width, config.count, index);
    let phase = line.phase;
    let oscillation = (time + phase).sin() * 0.5
        + (time * 0.5 + phase * 0.8).sin() * 0.3
        + (time * 1.5 + phase * 1.2).sin() * 0.2;
    let length = config.base_height + oscillation * config.oscillation_range;
    let alpha = 0.2 + oscillation.abs() * 0.3;
    LinePrimitive::new(
        x,
        0.0,
        x,
        length,
        config.line_width,
        config.stroke.with_alpha(alpha),
    )
}

/// Curve running top to bottom, offset sideways by three stacked waves.
#[must_use]
pub fn curved_line(
    line: &LineDescriptor,
    index: usize,
    viewport: Viewport,
    time: f64,
    config: &FlowLineConfig,
) -> PolylinePrimitive {
    let x0 = base_x(viewport.width_f64(), config.count, index);
    let height = viewport.height_f64();
    let scale = config.oscillation_range * line.amplitude * 0.3;
    let points = (0..=CURVE_SEGMENTS)
        .map(|j| {
            let y = j as f64 / CURVE_SEGMENTS as f64 * height;
            let wave1 = (y * 0.01 * line.frequency + time * line.speed * 60.0 + line.phase).sin();
            let wave2 = (y * 0.02 * line.frequency + time * line.speed * 30.0 + line.phase * 0.5)
                .sin()
                * 0.5;
            let wave3 = (y * 0.005 + time * line.speed * 20.0).sin() * 0.3;
            (x0 + (wave1 + wave2 + wave3) * scale, y)
        })
        .collect();
    let alpha = 0.15 + ((time + line.phase).sin() * 0.5 + 0.5) * 0.25;
    PolylinePrimitive::new(points, config.line_width, config.stroke.with_alpha(alpha))
}

/// Full redraw of every line at `time`.
#[must_use]
pub fn project_lines(
    lines: &[LineDescriptor],
    viewport: Viewport,
    time: f64,
    config: &FlowLineConfig,
) -> RenderFrame {
    let mut frame = RenderFrame::new(viewport).with_clear(Color::rgba(0.0, 0.0, 0.0, 0.0));
    match config.style {
        FlowLineStyle::Vertical => {
            let width = viewport.width_f64();
            frame.lines = lines
                .iter()
                .enumerate()
                .map(|(i, line)| vertical_line(line, i, width, time, config))
                .collect();
        }
        FlowLineStyle::Curved => {
            #[cfg(feature = "parallel-projection")]
            {
                frame.polylines = lines
                    .par_iter()
                    .enumerate()
                    .map(|(i, line)| curved_line(line, i, viewport, time, config))
                    .collect();
            }

            #[cfg(not(feature = "parallel-projection"))]
            {
                frame.polylines = lines
                    .iter()
                    .enumerate()
                    .map(|(i, line)| curved_line(line, i, viewport, time, config))
                    .collect();
            }
        }
    }
    frame
}
