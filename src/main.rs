//! Route Sketch CLI
//!
//! Usage:
//!   route-sketch [OPTIONS] [POLYLINE]
//!
//! Options:
//!   -a, --activity <FILE>    Activity JSON instead of a polyline ("-" for stdin)
//!   -f, --format <FORMAT>    json, svg, data-uri, or header
//!   -c, --config <FILE>      Configuration file (TOML format)
//!   -s, --stylesheet <FILE>  Stylesheet file for colors (TOML format)
//!   -h, --help               Print help

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use tracing::{debug, info};

use route_sketch::renderer::data_uri;
use route_sketch::{
    latest_activity, project_polyline, render_svg_with_stylesheet, AppConfig, CoordinatePolicy,
    ProjectionResult, RenderConfig, RenderError, Stylesheet, SummaryActivity,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Projection (or latest-activity payload) as JSON
    Json,
    /// Standalone SVG document
    Svg,
    /// SVG document as a base64 data URI
    DataUri,
    /// Cache-Control header for the configured cache policy
    Header,
}

#[derive(Parser)]
#[command(name = "route-sketch")]
#[command(about = "Draw GPS routes from encoded polylines as SVG")]
struct Cli {
    /// Encoded polyline (reads from stdin if neither this nor --activity is given)
    polyline: Option<String>,

    /// Activity JSON file; "-" reads from stdin
    #[arg(short, long, conflicts_with = "polyline")]
    activity: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stylesheet file for colors (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Padding on every side in pixels
    #[arg(long)]
    padding: Option<u32>,

    /// Drop invalid coordinates instead of failing
    #[arg(long)]
    filter_invalid: bool,

    /// Reverse-geocoded place name to include in the activity payload
    #[arg(long, requires = "activity")]
    location: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let app = match &cli.config {
        Some(path) => AppConfig::load_from_file(path).unwrap_or_else(|e| fail(&e.to_string())),
        None => AppConfig::default(),
    };
    if cli.format == OutputFormat::Header {
        println!("{}", app.cache_header());
        return;
    }

    let config = match load_config(&cli, &app) {
        Ok(config) => config,
        Err(message) => fail(&message),
    };

    let output = match &cli.activity {
        Some(path) => run_activity(&cli, path, &config),
        None => run_polyline(&cli, &config),
    };

    match output {
        Ok(Some(text)) => println!("{}", text),
        Ok(None) => info!("route has fewer than two points; nothing to draw"),
        Err(message) => fail(&message),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Merge the config file, stylesheet, and command-line overrides
fn load_config(cli: &Cli, app: &AppConfig) -> Result<RenderConfig, String> {
    let mut config = app.render_config().map_err(|e| e.to_string())?;

    if let Some(path) = &cli.stylesheet {
        let stylesheet = Stylesheet::from_file(path)
            .map_err(|e| format!("loading stylesheet '{}': {}", path.display(), e))?;
        config = config.with_stylesheet(stylesheet);
    }
    if let Some(width) = cli.width {
        config.projection.target_width = width;
    }
    if let Some(padding) = cli.padding {
        config.projection.padding = padding;
    }
    if cli.filter_invalid {
        config.projection.coordinate_policy = CoordinatePolicy::Filter;
    }

    debug!(?config.projection, "configuration loaded");
    Ok(config)
}

fn run_polyline(cli: &Cli, config: &RenderConfig) -> Result<Option<String>, String> {
    let (encoded, source_name) = match &cli.polyline {
        Some(p) => (p.clone(), "<argument>"),
        None => (read_stdin()?, "<stdin>"),
    };
    let encoded = encoded.trim();

    let projected = project_polyline(encoded, &config.projection)
        .map_err(|e| describe(&e, encoded, source_name))?;

    match projected {
        Some(result) => Ok(Some(emit(&result, cli.format, config)?)),
        None if cli.format == OutputFormat::Json => Ok(Some("null".to_string())),
        None => Ok(None),
    }
}

fn run_activity(cli: &Cli, path: &Path, config: &RenderConfig) -> Result<Option<String>, String> {
    let raw = if path == Path::new("-") {
        read_stdin()?
    } else {
        fs::read_to_string(path)
            .map_err(|e| format!("reading file '{}': {}", path.display(), e))?
    };
    let activity: SummaryActivity = serde_json::from_str(&raw)
        .map_err(|e| format!("parsing activity '{}': {}", path.display(), e))?;

    if cli.format == OutputFormat::Json {
        let payload = latest_activity(Some(activity), &config.projection, cli.location.clone());
        return serde_json::to_string_pretty(&payload)
            .map(Some)
            .map_err(|e| e.to_string());
    }

    let encoded = activity.summary_polyline().unwrap_or_default().to_string();
    let projected = activity
        .route_projection(&config.projection)
        .map_err(|e| describe(&e, &encoded, "summary_polyline"))?;

    match projected {
        Some(result) => Ok(Some(emit(&result, cli.format, config)?)),
        None => Ok(None),
    }
}

fn emit(
    result: &ProjectionResult,
    format: OutputFormat,
    config: &RenderConfig,
) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string(result).map_err(|e| e.to_string()),
        OutputFormat::Svg => Ok(render_svg_with_stylesheet(
            result,
            &config.svg,
            &config.stylesheet,
        )),
        OutputFormat::DataUri => {
            let svg = render_svg_with_stylesheet(result, &config.svg, &config.stylesheet);
            Ok(data_uri(&svg))
        }
        OutputFormat::Header => Err("header output takes no route".to_string()),
    }
}

/// Decode errors get a source excerpt; everything else its message
fn describe(err: &RenderError, source: &str, source_name: &str) -> String {
    match err {
        RenderError::Decode(decode) => decode.format(source, source_name),
        other => other.to_string(),
    }
}

fn read_stdin() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| format!("reading from stdin: {}", e))?;
    Ok(buffer)
}
