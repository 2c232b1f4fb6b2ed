//! Minimal standalone SVG markup for chart geometries.
//!
//! This is the thin presentation adapter: it only serializes geometry that the
//! calculators already produced and performs no layout of its own.

use std::fmt::Write as _;

use crate::charts::{
    DonutGeometry, GaugeGeometry, IncidentBarsGeometry, SparklineGeometry, TrendGeometry,
    format_number as n,
};

const TRACK_COLOR: &str = "#E5E7EB";

fn open_svg(out: &mut String, width: f64, height: f64) {
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = n(width),
        h = n(height)
    );
}

#[must_use]
pub fn render_donut_svg(geometry: &DonutGeometry) -> String {
    let size = geometry.center.0 * 2.0;
    let mut out = String::new();
    open_svg(&mut out, size, size);
    let (cx, cy) = (n(geometry.center.0), n(geometry.center.1));
    let _ = write!(
        out,
        r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="none" stroke="{TRACK_COLOR}" stroke-width="{sw}"/>"#,
        r = n(geometry.radius),
        sw = n(geometry.stroke_width)
    );
    for arc in &geometry.arcs {
        let _ = write!(
            out,
            r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="none" stroke="{color}" stroke-width="{sw}" stroke-dasharray="{d0} {d1}" stroke-dashoffset="{off}" stroke-linecap="butt"/>"#,
            r = n(geometry.radius),
            color = escape(&arc.color),
            sw = n(geometry.stroke_width),
            d0 = n(arc.dash_array.0),
            d1 = n(arc.dash_array.1),
            off = n(arc.dash_offset)
        );
    }
    out.push_str("</svg>");
    out
}

#[must_use]
pub fn render_gauge_svg(geometry: &GaugeGeometry, stroke_width: f64) -> String {
    let mut out = String::new();
    open_svg(&mut out, geometry.view_box.0, geometry.view_box.1);
    let _ = write!(
        out,
        r#"<path d="{d}" fill="none" stroke="{TRACK_COLOR}" stroke-width="{sw}" stroke-linecap="round"/>"#,
        d = geometry.arc_path,
        sw = n(stroke_width)
    );
    let _ = write!(
        out,
        r#"<path d="{d}" fill="none" stroke="{color}" stroke-width="{sw}" stroke-linecap="round" stroke-dasharray="{c}" stroke-dashoffset="{off}"/>"#,
        d = geometry.arc_path,
        color = geometry.color,
        sw = n(stroke_width),
        c = n(geometry.circumference),
        off = n(geometry.dash_offset)
    );
    out.push_str("</svg>");
    out
}

#[must_use]
pub fn render_sparkline_svg(geometry: &SparklineGeometry, color: &str, show_area: bool) -> String {
    let mut out = String::new();
    open_svg(&mut out, geometry.view_box.0, geometry.view_box.1);
    if !geometry.is_empty() {
        let color = escape(color);
        if show_area {
            let _ = write!(
                out,
                r#"<path d="{d}" fill="{color}" fill-opacity="0.1"/>"#,
                d = geometry.area_path
            );
        }
        let _ = write!(
            out,
            r#"<path d="{d}" fill="none" stroke="{color}" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/>"#,
            d = geometry.line_path
        );
    }
    out.push_str("</svg>");
    out
}

#[must_use]
pub fn render_trend_svg(geometry: &TrendGeometry, color: &str) -> String {
    let color = escape(color);
    let mut out = String::new();
    open_svg(&mut out, geometry.view_box.0, geometry.view_box.1);
    let _ = write!(
        out,
        r#"<defs><linearGradient id="trendGradient" x1="0" y1="0" x2="0" y2="1"><stop offset="0%" stop-color="{color}" stop-opacity="0.3"/><stop offset="100%" stop-color="{color}" stop-opacity="0.05"/></linearGradient></defs>"#
    );
    for grid in &geometry.grid_lines {
        let _ = write!(
            out,
            r#"<line x1="{x1}" y1="{y}" x2="{x2}" y2="{y}" stroke="{TRACK_COLOR}" stroke-width="0.2"/>"#,
            x1 = n(grid.x1),
            x2 = n(grid.x2),
            y = n(grid.y)
        );
    }
    if !geometry.line_path.is_empty() {
        let _ = write!(
            out,
            r#"<path d="{d}" fill="url(#trendGradient)"/><path d="{l}" fill="none" stroke="{color}" stroke-width="0.5"/>"#,
            d = geometry.area_path,
            l = geometry.line_path
        );
    }
    for point in &geometry.points {
        let _ = write!(
            out,
            r#"<circle cx="{x}" cy="{y}" r="0.8" fill="{color}"/>"#,
            x = n(point.x),
            y = n(point.y)
        );
    }
    for label in &geometry.labels {
        let _ = write!(
            out,
            r#"<text x="{x}" y="{y}" text-anchor="middle">{t}</text>"#,
            x = n(label.x),
            y = n(label.y),
            t = escape(&label.text)
        );
    }
    out.push_str("</svg>");
    out
}

#[must_use]
pub fn render_incident_bars_svg(geometry: &IncidentBarsGeometry) -> String {
    let mut out = String::new();
    open_svg(&mut out, geometry.view_box.0, geometry.view_box.1);
    for (_, y) in &geometry.split_lines {
        let _ = write!(
            out,
            r##"<line x1="0" y1="{y}" x2="{w}" y2="{y}" stroke="#E0E0E0"/>"##,
            y = n(*y),
            w = n(geometry.view_box.0)
        );
    }
    for slot in &geometry.slots {
        for bar in &slot.bars {
            let _ = write!(
                out,
                r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" rx="4" fill="{c}"/>"#,
                x = n(bar.x),
                y = n(bar.y),
                w = n(bar.width),
                h = n(bar.height),
                c = bar.series.color()
            );
        }
    }
    if let Some(x) = geometry.marker_x {
        let _ = write!(
            out,
            r##"<line x1="{x}" y1="0" x2="{x}" y2="{h}" stroke="#595959" stroke-dasharray="4 4"/>"##,
            x = n(x),
            h = n(geometry.view_box.1)
        );
    }
    out.push_str("</svg>");
    out
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
