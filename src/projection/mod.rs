//! Route projection from geographic coordinates onto an SVG canvas
//!
//! The projector fits a route's latitude/longitude bounding box onto a
//! fixed-width canvas, derives the canvas height from the bounding box's
//! aspect ratio, and emits one `M` followed by an `L` per remaining point.

pub mod config;
pub mod error;
pub mod path;
mod project;
pub mod types;

pub use config::{
    CoordinatePolicy, ProjectionConfig, DEFAULT_PADDING, DEFAULT_TARGET_WIDTH, EPSILON,
};
pub use error::ProjectionError;
pub use path::{PathSegment, RoutePath};
pub use project::{project, project_with};
pub use types::{GeoPoint, PixelPoint, ProjectionResult};
