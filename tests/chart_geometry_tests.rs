use approx::assert_relative_eq;
use suburban_viz::VizError;
use suburban_viz::charts::{
    DonutConfig, DonutSegment, GaugeBand, GaugeConfig, IncidentBarsConfig, IncidentPoint,
    SparklineConfig, TrendConfig, TrendPoint, donut_geometry, gauge_geometry,
    incident_bars_geometry, path_numbers, sparkline_geometry, svg, trend_geometry,
};
use suburban_viz::core::Viewport;
use suburban_viz::render::{Color, NullRenderer, Renderer};

fn revenue_mix() -> Vec<DonutSegment> {
    vec![
        DonutSegment::new("Enterprise", 1_250_000.0, "#2B5F6F"),
        DonutSegment::new("Commercial", 830_000.0, "#FFC300"),
        DonutSegment::new("Residential", 410_000.0, "#16b364"),
    ]
}

#[test]
fn donut_dash_lengths_cover_one_circumference() {
    let geometry = donut_geometry(&revenue_mix(), DonutConfig::default()).expect("donut");
    let covered: f64 = geometry.arcs.iter().map(|arc| arc.dash_length()).sum();
    assert_relative_eq!(covered, geometry.circumference, epsilon = 1e-9);

    let percentages: f64 = geometry.arcs.iter().map(|arc| arc.percentage).sum();
    assert_relative_eq!(percentages, 1.0, epsilon = 1e-12);
}

#[test]
fn donut_offsets_advance_clockwise_by_previous_dash() {
    let geometry = donut_geometry(&revenue_mix(), DonutConfig::default()).expect("donut");
    for pair in geometry.arcs.windows(2) {
        assert_relative_eq!(
            pair[0].dash_offset - pair[1].dash_offset,
            pair[0].dash_length(),
            epsilon = 1e-9
        );
    }
    let last = geometry.arcs.last().expect("arcs");
    assert_relative_eq!(
        geometry.start_offset - (last.dash_offset - last.dash_length()),
        geometry.circumference,
        epsilon = 1e-9
    );
}

#[test]
fn donut_zero_total_is_empty_and_finite() {
    let segments = vec![
        DonutSegment::new("Enterprise", 0.0, "#2B5F6F"),
        DonutSegment::new("Commercial", 0.0, "#FFC300"),
    ];
    let geometry = donut_geometry(&segments, DonutConfig::default()).expect("donut");
    assert!(geometry.is_empty());
    assert_eq!(geometry.total, 0.0);
    assert!(geometry.circumference.is_finite());
    assert!(geometry.start_offset.is_finite());

    let markup = svg::render_donut_svg(&geometry);
    assert!(!markup.contains("NaN"));
    assert!(!markup.contains("inf"));
}

#[test]
fn donut_rejects_invalid_config() {
    let config = DonutConfig {
        radius: 0.0,
        ..DonutConfig::default()
    };
    let err = donut_geometry(&revenue_mix(), config).expect_err("zero radius");
    assert!(matches!(err, VizError::InvalidData(_)));

    let oversized = DonutConfig {
        size: 140.0,
        radius: 100.0,
        stroke_width: 18.0,
    };
    let err = donut_geometry(&revenue_mix(), oversized).expect_err("ring outside box");
    assert!(matches!(err, VizError::InvalidData(_)));

    let snug = DonutConfig {
        size: 140.0,
        radius: 61.0,
        stroke_width: 18.0,
    };
    assert!(donut_geometry(&revenue_mix(), snug).is_ok());
}

#[test]
fn gauge_sweep_stays_in_half_circle() {
    let config = GaugeConfig::default();
    for value in [0.0, 12.5, 40.0, 59.9, 80.0, 100.0] {
        let geometry = gauge_geometry(value, config).expect("gauge");
        assert!((0.0..=180.0).contains(&geometry.sweep_degrees));
        assert_relative_eq!(geometry.sweep_degrees, value / config.max * 180.0);
    }

    let over = gauge_geometry(250.0, config).expect("gauge");
    assert_eq!(over.sweep_degrees, 180.0);
    assert_eq!(over.dash_offset, 0.0);
    assert_eq!(over.band, GaugeBand::Healthy);

    let under = gauge_geometry(-5.0, config).expect("gauge");
    assert_eq!(under.sweep_degrees, 0.0);
    assert_relative_eq!(under.dash_offset, under.circumference);
    assert_eq!(under.band, GaugeBand::Critical);
}

#[test]
fn sparkline_flat_series_sits_on_vertical_midpoint() {
    let config = SparklineConfig::default();
    let geometry = sparkline_geometry(&[42.0, 42.0, 42.0, 42.0], config).expect("sparkline");
    let mid = config.height / 2.0;
    assert_eq!(geometry.points.len(), 4);
    assert!(geometry.points.iter().all(|p| p.y == mid));
    assert!(geometry.line_path.starts_with("M 2 14"));
    assert!(!geometry.line_path.contains("NaN"));
}

#[test]
fn sparkline_needs_two_points() {
    let geometry = sparkline_geometry(&[7.0], SparklineConfig::default()).expect("sparkline");
    assert!(geometry.is_empty());
    assert!(geometry.line_path.is_empty());
    assert!(geometry.area_path.is_empty());
}

#[test]
fn sparkline_maps_min_to_bottom_and_max_to_top() {
    let config = SparklineConfig::default();
    let geometry = sparkline_geometry(&[3.0, 9.0, 6.0], config).expect("sparkline");
    assert_eq!(geometry.points[0].y, config.height - config.padding);
    assert_eq!(geometry.points[1].y, config.padding);
    assert!(geometry.area_path.ends_with('Z'));
}

#[test]
fn trend_flat_series_has_no_vertical_deviation() {
    let series = vec![
        TrendPoint::new("Jan", 10.0),
        TrendPoint::new("Feb", 10.0),
        TrendPoint::new("Mar", 10.0),
    ];
    let geometry = trend_geometry(&series, TrendConfig::default()).expect("trend");
    let ys: Vec<f64> = path_numbers(&geometry.line_path)
        .chunks(2)
        .map(|pair| pair[1])
        .collect();
    assert!(!ys.is_empty());
    let first = ys[0];
    assert!(ys.iter().all(|y| (y - first).abs() < 1e-9));
    assert_eq!(geometry.labels.len(), 3);
    assert_eq!(geometry.labels[1].text, "Feb");
}

#[test]
fn trend_accepts_month_field_alias() {
    let series: Vec<TrendPoint> =
        serde_json::from_str(r#"[{"month":"Jan","value":92},{"month":"Feb","value":95}]"#)
            .expect("parse");
    let geometry = trend_geometry(&series, TrendConfig::default()).expect("trend");
    assert_eq!(geometry.points.len(), 2);
    assert!(geometry.line_path.contains('C'));
}

#[test]
fn trend_single_point_is_centered() {
    let config = TrendConfig::default();
    let geometry = trend_geometry(&[TrendPoint::new("Jan", 5.0)], config).expect("trend");
    assert_eq!(geometry.points.len(), 1);
    let expected_x = config.padding.left + config.effective_width() / 2.0;
    assert_relative_eq!(geometry.points[0].x, expected_x);
    assert!(!geometry.line_path.contains('C'));
}

#[test]
fn incident_bars_marker_defaults_to_middle_month() {
    let series = vec![
        IncidentPoint::new("Jan", 12.0, 10.0),
        IncidentPoint::new("Feb", 14.0, 15.0),
        IncidentPoint::new("Mar", 11.0, 9.0),
    ];
    let config = IncidentBarsConfig::default();
    let geometry = incident_bars_geometry(&series, None, config).expect("bars");
    assert_eq!(geometry.value_min, 4.0);
    assert_eq!(geometry.value_max, 20.0);
    assert_eq!(geometry.marker_x, Some(geometry.slots[1].center_x));

    let explicit = incident_bars_geometry(&series, Some("Mar"), config).expect("bars");
    assert_eq!(explicit.marker_x, Some(explicit.slots[2].center_x));

    let markup = svg::render_incident_bars_svg(&geometry);
    assert_eq!(markup.matches("<rect").count(), 6);
}

#[test]
fn incident_bars_render_as_filled_rects() {
    let series = vec![
        IncidentPoint::new("Jan", 12.0, 10.0),
        IncidentPoint::new("Feb", 14.0, 15.0),
    ];
    let geometry =
        incident_bars_geometry(&series, None, IncidentBarsConfig::default()).expect("bars");
    let frame = geometry.render_frame().expect("frame");

    assert_eq!(frame.viewport, Viewport::new(640, 320));
    assert_eq!(frame.rects.len(), 4);
    assert_eq!(frame.lines.len(), geometry.split_lines.len() + 1);
    assert_eq!(frame.rects[0].fill_color, Color::rgba8(0xFF, 0xC3, 0x00, 1.0));
    assert_eq!(frame.rects[1].fill_color, Color::rgba8(0x16, 0xb3, 0x64, 1.0));

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("render");
    assert_eq!(renderer.last_rect_count, 4);
}

#[test]
fn incident_bars_reject_bars_wider_than_chart() {
    let series = [IncidentPoint::new("Jan", 4.0, 6.0)];
    let config = IncidentBarsConfig {
        width: 20.0,
        bar_width: 30.0,
        ..IncidentBarsConfig::default()
    };
    let err = incident_bars_geometry(&series, None, config).expect_err("bar wider than chart");
    assert!(matches!(err, VizError::InvalidData(_)));

    let config = IncidentBarsConfig {
        width: 20.0,
        bar_width: 20.0,
        ..IncidentBarsConfig::default()
    };
    let geometry = incident_bars_geometry(&series, None, config).expect("bars");
    for bar in &geometry.slots[0].bars {
        assert!(bar.x >= 0.0 && bar.x + bar.width <= 20.0);
    }
}
