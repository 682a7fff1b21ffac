//! Core types for route projection

use serde::{Deserialize, Serialize};

use super::path::PathSegment;

/// A WGS84 coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite and inside their valid ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self::new(latitude, longitude)
    }
}

/// A position on the output canvas, y growing downwards
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A projected route, ready to be drawn inside a `0 0 width height` viewBox
///
/// Serializes as `{ "d": ..., "width": ..., "height": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionResult {
    #[serde(rename = "d")]
    path: String,
    width: u32,
    height: u32,
    #[serde(skip)]
    segments: Vec<PathSegment>,
}

impl ProjectionResult {
    pub(crate) fn new(path: String, width: u32, height: u32, segments: Vec<PathSegment>) -> Self {
        Self {
            path,
            width,
            height,
            segments,
        }
    }

    /// SVG path `d` attribute
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Canvas position of the first route point
    pub fn start(&self) -> Option<PixelPoint> {
        self.segments.first().map(PathSegment::point)
    }

    /// Canvas position of the last route point
    pub fn end(&self) -> Option<PixelPoint> {
        self.segments.last().map(PathSegment::point)
    }
}
