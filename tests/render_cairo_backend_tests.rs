#![cfg(feature = "cairo-backend")]

use suburban_viz::core::Viewport;
use suburban_viz::flow::project_lines;
use suburban_viz::render::{
    CairoContextRenderer, CairoRenderStats, CairoRenderer, CirclePrimitive, Color, LinePrimitive,
    RenderFrame, Renderer,
};
use suburban_viz::{FlowLineAnimation, FlowLineConfig};

fn dots_frame() -> RenderFrame {
    RenderFrame::new(Viewport::new(64, 48))
        .with_clear(Color::rgb(1.0, 1.0, 1.0))
        .with_circle(CirclePrimitive::new(10.0, 10.0, 4.0, true, Color::rgba8(43, 95, 111, 0.6)))
        .with_circle(CirclePrimitive::new(30.0, 10.0, 4.0, false, Color::rgba8(43, 95, 111, 0.6)))
        .with_line(LinePrimitive::new(5.0, 0.0, 5.0, 40.0, 1.5, Color::rgb(0.0, 0.0, 0.0)))
}

#[test]
fn cairo_renderer_counts_drawn_primitives() {
    let mut renderer = CairoRenderer::new(64, 48).expect("cairo renderer");
    renderer.render(&dots_frame()).expect("render");
    assert_eq!(
        renderer.last_stats(),
        CairoRenderStats {
            lines_drawn: 1,
            rects_drawn: 0,
            circles_drawn: 2,
            polylines_drawn: 0,
        }
    );
    assert_eq!(renderer.backend_name(), "cairo");
}

#[test]
fn cairo_renderer_draws_flow_line_curves() {
    let config = FlowLineConfig::curved();
    let animation = FlowLineAnimation::with_seed(config.clone(), 4).expect("animation");
    let frame = project_lines(animation.lines(), Viewport::new(200, 120), 0.5, &config);

    let mut renderer = CairoRenderer::new(200, 120).expect("cairo renderer");
    renderer.render(&frame).expect("render");
    assert_eq!(renderer.last_stats().polylines_drawn, 15);
}

#[test]
fn cairo_renderer_writes_png() {
    let mut renderer = CairoRenderer::new(64, 48).expect("cairo renderer");
    renderer.render(&dots_frame()).expect("render");
    let mut png = Vec::new();
    renderer.write_png(&mut png).expect("png");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn cairo_renderer_draws_on_external_context() {
    let surface =
        cairo::ImageSurface::create(cairo::Format::ARgb32, 64, 48).expect("external surface");
    let context = cairo::Context::new(&surface).expect("external context");
    let mut renderer = CairoRenderer::new(64, 48).expect("cairo renderer");
    renderer
        .render_on_cairo_context(&context, &dots_frame())
        .expect("render on context");
    assert_eq!(renderer.last_stats().circles_drawn, 2);
}

#[test]
fn cairo_renderer_rejects_invalid_frames_and_sizes() {
    assert!(CairoRenderer::new(0, 10).is_err());
    let mut renderer = CairoRenderer::new(8, 8).expect("cairo renderer");
    let frame = RenderFrame::new(Viewport::new(8, 8))
        .with_circle(CirclePrimitive::new(1.0, 1.0, -1.0, true, Color::rgb(0.0, 0.0, 0.0)));
    assert!(renderer.render(&frame).is_err());
}
