use std::io::Write as _;

use suburban_viz::core::Viewport;
use suburban_viz::render::Color;
use suburban_viz::scene::SurfaceSizing;
use suburban_viz::{FlowLineStyle, SceneKind, VizConfig, VizError};

#[test]
fn empty_json_takes_every_default() {
    let config = VizConfig::from_json_str("{}").expect("config");
    assert_eq!(config, VizConfig::default());
    assert_eq!(config.scene_engine.scenes, SceneKind::ALL.to_vec());
    assert_eq!(config.flow_lines.style, FlowLineStyle::Vertical);
    assert_eq!(config.auth.latency_ms, 1000);
    assert!(config.scene_engine.show_dots);
}

#[test]
fn partial_sections_merge_with_defaults() {
    let config = VizConfig::from_json_str(
        r#"{
            "scene_engine": { "scenes": ["memory", "more-random"], "show_dots": false },
            "flow_lines": { "style": "curved", "count": 9 },
            "auth": { "latency_ms": 0 }
        }"#,
    )
    .expect("config");

    assert_eq!(
        config.scene_engine.scenes,
        vec![SceneKind::Memory, SceneKind::MoreRandom]
    );
    assert!(!config.scene_engine.show_dots);
    assert_eq!(config.scene_engine.surface, SurfaceSizing::default());
    assert_eq!(config.flow_lines.style, FlowLineStyle::Curved);
    assert_eq!(config.flow_lines.count, 9);
    assert_eq!(config.auth.latency_ms, 0);
}

#[test]
fn unknown_scene_name_fails_to_parse() {
    let err = VizConfig::from_json_str(r#"{"scene_engine":{"scenes":["fireworks"]}}"#)
        .expect_err("unknown scene");
    assert!(matches!(err, VizError::Serialization(_)));
    assert!(matches!(
        "fireworks".parse::<SceneKind>(),
        Err(VizError::UnknownScene(_))
    ));
    assert_eq!(
        "different-dimensions".parse::<SceneKind>().expect("scene"),
        SceneKind::DifferentDimensions
    );
}

#[test]
fn invalid_colors_fail_validation() {
    let mut config = VizConfig::default();
    config.scene_engine.foreground = Color::rgba(0.2, 0.4, 0.4, 2.0);
    assert!(matches!(config.validate(), Err(VizError::InvalidData(_))));

    let mut config = VizConfig::default();
    config.flow_lines.line_width = f64::NAN;
    assert!(config.validate().is_err());
}

#[test]
fn surface_sizing_follows_window() {
    let sizing = SurfaceSizing::default();
    assert_eq!(sizing.viewport_for(Some((1280.0, 800.0))), Viewport::new(1220, 480));
    assert_eq!(sizing.viewport_for(Some((300.0, 500.0))), Viewport::new(320, 400));
    assert_eq!(sizing.viewport_for(None), Viewport::new(800, 600));
}

#[test]
fn config_round_trips_through_file() {
    let config = VizConfig::default();
    let json = config.to_json_pretty().expect("json");

    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(json.as_bytes()).expect("write");
    let loaded = VizConfig::load(file.path()).expect("load");
    assert_eq!(loaded, config);

    assert!(matches!(
        VizConfig::load(file.path().with_extension("missing")),
        Err(VizError::Io(_))
    ));
}

#[test]
fn byte_derived_colors_survive_json_exactly() {
    let colors: Vec<Color> = (0..=255u8)
        .step_by(3)
        .map(|channel| Color::rgba8(channel, 255 - channel, channel / 2, 0.6))
        .collect();
    let json = serde_json::to_string(&colors).expect("serialize");
    let parsed: Vec<Color> = serde_json::from_str(&json).expect("parse");
    assert_eq!(parsed, colors);

    let teal = Color::rgba8(43, 95, 111, 1.0);
    let reparsed: Color =
        serde_json::from_str(&serde_json::to_string(&teal).expect("serialize")).expect("parse");
    assert_eq!(reparsed.blue.to_bits(), teal.blue.to_bits());
}
