//! Error types for route projection

use thiserror::Error;

/// Errors that can occur while projecting a route
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// Padding on both sides consumes the whole canvas
    #[error("invalid canvas: padding {padding} leaves no drawable area in width {target_width}")]
    InvalidCanvas { target_width: u32, padding: u32 },

    /// A point is NaN, infinite, or outside latitude/longitude bounds
    #[error("invalid coordinate at index {index}: ({latitude}, {longitude})")]
    InvalidCoordinate {
        index: usize,
        latitude: f64,
        longitude: f64,
    },
}
