//! Route Sketch - GPS routes drawn as SVG for a profile site
//!
//! This library decodes encoded polylines, projects the route onto a
//! fixed-width canvas, and renders it as an SVG path or document. It also
//! carries the display helpers that sit next to the route map: activity
//! stats, relative times, race result labels, and geocoding labels.
//!
//! # Example
//!
//! ```rust
//! use route_sketch::render;
//!
//! let svg = render("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap().unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod activity;
pub mod cache;
pub mod config;
pub mod error;
pub mod format;
pub mod geocode;
pub mod polyline;
pub mod projection;
pub mod race;
pub mod renderer;
pub mod stylesheet;

pub use activity::{latest_activity, LatestActivity, SummaryActivity};
pub use cache::CachePolicy;
pub use config::{AppConfig, ConfigError};
pub use error::DecodeError;
pub use projection::{
    project, project_with, CoordinatePolicy, GeoPoint, ProjectionConfig, ProjectionError,
    ProjectionResult,
};
pub use renderer::{render_svg, render_svg_with_stylesheet, SvgConfig};

use thiserror::Error;

// Re-export Stylesheet for public API
pub use stylesheet::Stylesheet;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    /// Error decoding the polyline
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Error projecting the decoded route
    #[error("projection error: {0}")]
    Projection(#[from] ProjectionError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Projection configuration
    pub projection: ProjectionConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Stylesheet for color resolution
    pub stylesheet: Stylesheet,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the projection configuration
    pub fn with_projection(mut self, config: ProjectionConfig) -> Self {
        self.projection = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the stylesheet for color resolution
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }
}

/// Decode a polyline and project it
///
/// `Ok(None)` means the route has fewer than two points and there is
/// nothing to draw.
pub fn project_polyline(
    encoded: &str,
    config: &ProjectionConfig,
) -> Result<Option<ProjectionResult>, RenderError> {
    let points = polyline::decode(encoded)?;
    Ok(project_with(&points, config)?)
}

/// Render a polyline to an SVG document with default configuration
pub fn render(encoded: &str) -> Result<Option<String>, RenderError> {
    render_with_config(encoded, &RenderConfig::default())
}

/// Render a polyline to an SVG document with custom configuration
///
/// # Example
///
/// ```rust
/// use route_sketch::{render_with_config, ProjectionConfig, RenderConfig, SvgConfig};
///
/// let config = RenderConfig::new()
///     .with_projection(ProjectionConfig::default().with_target_width(400).with_padding(10))
///     .with_svg(SvgConfig::default().with_markers(false));
///
/// let svg = render_with_config("_p~iF~ps|U_ulLnnqC_mqNvxq`@", &config)
///     .unwrap()
///     .unwrap();
/// assert!(svg.contains(r#"viewBox="0 0 400 "#));
/// ```
pub fn render_with_config(
    encoded: &str,
    config: &RenderConfig,
) -> Result<Option<String>, RenderError> {
    let projected = project_polyline(encoded, &config.projection)?;
    Ok(projected
        .map(|result| render_svg_with_stylesheet(&result, &config.svg, &config.stylesheet)))
}
