//! Configuration for route projection

use serde::Deserialize;

use super::error::ProjectionError;

/// Smallest span an axis of the bounding box may have, in degrees
///
/// Straight north-south or east-west routes, and routes made of a single
/// repeated point, have zero extent on one axis.
pub const EPSILON: f64 = 1e-6;

/// Canvas width used when none is configured
pub const DEFAULT_TARGET_WIDTH: u32 = 1000;

/// Margin kept clear on every side of the canvas
pub const DEFAULT_PADDING: u32 = 40;

/// What to do with points that are NaN, infinite, or out of range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinatePolicy {
    /// Fail the whole projection on the first invalid point
    #[default]
    Reject,
    /// Drop invalid points and project the rest
    Filter,
}

/// Configuration options for route projection
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Output canvas width in pixels
    pub target_width: u32,

    /// Margin reserved on all sides, in pixels
    pub padding: u32,

    /// Handling of malformed coordinates
    pub coordinate_policy: CoordinatePolicy,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            target_width: DEFAULT_TARGET_WIDTH,
            padding: DEFAULT_PADDING,
            coordinate_policy: CoordinatePolicy::default(),
        }
    }
}

impl ProjectionConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas width
    pub fn with_target_width(mut self, width: u32) -> Self {
        self.target_width = width;
        self
    }

    /// Set the padding
    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Set the coordinate policy
    pub fn with_coordinate_policy(mut self, policy: CoordinatePolicy) -> Self {
        self.coordinate_policy = policy;
        self
    }

    /// Check that the padding leaves a drawable area
    pub fn validate(&self) -> Result<(), ProjectionError> {
        if self.target_width == 0 || u64::from(self.padding) * 2 >= u64::from(self.target_width) {
            return Err(ProjectionError::InvalidCanvas {
                target_width: self.target_width,
                padding: self.padding,
            });
        }
        Ok(())
    }
}
