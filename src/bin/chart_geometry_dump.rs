use std::fs;
use std::io::Read;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use suburban_viz::charts::{
    DonutConfig, DonutSegment, GaugeConfig, IncidentBarsConfig, IncidentPoint, SparklineConfig,
    TrendConfig, TrendPoint, donut_geometry, gauge_geometry, incident_bars_geometry,
    sparkline_geometry, svg, trend_geometry,
};

const USAGE: &str =
    "usage: chart_geometry_dump [--input <path>] [--output <path>] [--svg]  (reads stdin when --input is omitted)";

/// One chart request, tagged by `chart`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "chart", rename_all = "snake_case")]
enum ChartRequest {
    Donut {
        segments: Vec<DonutSegment>,
        #[serde(default)]
        config: DonutConfig,
    },
    Gauge {
        value: f64,
        #[serde(default)]
        config: GaugeConfig,
    },
    Sparkline {
        values: Vec<f64>,
        #[serde(default)]
        config: SparklineConfig,
        #[serde(default = "default_color")]
        color: String,
    },
    Trend {
        series: Vec<TrendPoint>,
        #[serde(default)]
        config: TrendConfig,
        #[serde(default = "default_color")]
        color: String,
    },
    IncidentBars {
        series: Vec<IncidentPoint>,
        #[serde(default)]
        current_month: Option<String>,
        #[serde(default)]
        config: IncidentBarsConfig,
    },
}

fn default_color() -> String {
    "#2B5F6F".to_owned()
}

#[derive(Debug, Serialize)]
struct ChartResponse {
    geometry: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    svg: Option<String>,
}

#[derive(Debug, Default)]
struct CliArgs {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    with_svg: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let raw = match &args.input {
        Some(path) => fs::read_to_string(path)
            .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| format!("failed to read stdin: {err}"))?;
            buffer
        }
    };
    let request: ChartRequest =
        serde_json::from_str(&raw).map_err(|err| format!("invalid json: {err}"))?;
    let response = compute(&request, args.with_svg).map_err(|err| err.to_string())?;
    let json = serde_json::to_string_pretty(&response)
        .map_err(|err| format!("failed to serialize response: {err}"))?;

    match &args.output {
        Some(path) => fs::write(path, json)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn compute(request: &ChartRequest, with_svg: bool) -> suburban_viz::VizResult<ChartResponse> {
    let (geometry, markup) = match request {
        ChartRequest::Donut { segments, config } => {
            let geometry = donut_geometry(segments, *config)?;
            let markup = svg::render_donut_svg(&geometry);
            (serde_json::to_value(geometry)?, markup)
        }
        ChartRequest::Gauge { value, config } => {
            let geometry = gauge_geometry(*value, *config)?;
            let markup = svg::render_gauge_svg(&geometry, config.stroke_width);
            (serde_json::to_value(geometry)?, markup)
        }
        ChartRequest::Sparkline {
            values,
            config,
            color,
        } => {
            let geometry = sparkline_geometry(values, *config)?;
            let markup = svg::render_sparkline_svg(&geometry, color, true);
            (serde_json::to_value(geometry)?, markup)
        }
        ChartRequest::Trend {
            series,
            config,
            color,
        } => {
            let geometry = trend_geometry(series, *config)?;
            let markup = svg::render_trend_svg(&geometry, color);
            (serde_json::to_value(geometry)?, markup)
        }
        ChartRequest::IncidentBars {
            series,
            current_month,
            config,
        } => {
            let geometry = incident_bars_geometry(series, current_month.as_deref(), *config)?;
            let markup = svg::render_incident_bars_svg(&geometry);
            (serde_json::to_value(geometry)?, markup)
        }
    };
    Ok(ChartResponse {
        geometry,
        svg: with_svg.then_some(markup),
    })
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut parsed = CliArgs::default();
    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                parsed.input = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                parsed.output = Some(PathBuf::from(value));
            }
            "--svg" => parsed.with_svg = true,
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown argument `{other}`\n{USAGE}")),
        }
    }
    Ok(parsed)
}
