//! The projection itself: bounding box, aspect ratio, affine map

use std::borrow::Cow;

use tracing::{debug, warn};

use super::config::{CoordinatePolicy, ProjectionConfig, EPSILON};
use super::error::ProjectionError;
use super::path::RoutePath;
use super::types::{GeoPoint, PixelPoint, ProjectionResult};

/// Project a route onto a canvas of `target_width` pixels with `padding` on every side
///
/// Returns `Ok(None)` when there are fewer than two points to draw.
///
/// # Example
///
/// ```rust
/// use route_sketch::projection::{project, GeoPoint};
///
/// let points = [
///     GeoPoint::new(0.0, 0.0),
///     GeoPoint::new(0.0, 1.0),
///     GeoPoint::new(1.0, 1.0),
/// ];
/// let result = project(&points, 1000, 40).unwrap().unwrap();
/// assert_eq!(result.height(), 1000);
/// assert!(result.path().starts_with("M40.00 960.00"));
/// ```
pub fn project(
    points: &[GeoPoint],
    target_width: u32,
    padding: u32,
) -> Result<Option<ProjectionResult>, ProjectionError> {
    let config = ProjectionConfig::default()
        .with_target_width(target_width)
        .with_padding(padding);
    project_with(points, &config)
}

/// Project a route using a full [`ProjectionConfig`]
pub fn project_with(
    points: &[GeoPoint],
    config: &ProjectionConfig,
) -> Result<Option<ProjectionResult>, ProjectionError> {
    config.validate()?;

    let points = screen_points(points, config.coordinate_policy)?;
    if points.len() < 2 {
        debug!(points = points.len(), "not enough points for a route");
        return Ok(None);
    }

    let lat = Extent::spanning(points.iter().map(|p| p.latitude));
    let lng = Extent::spanning(points.iter().map(|p| p.longitude));

    let width = f64::from(config.target_width);
    let padding = f64::from(config.padding);
    let aspect = lat.span / lng.span;
    // The path is laid out on the same clamped height the result reports.
    let height = (width * aspect).round().clamp(1.0, f64::from(u32::MAX));

    let draw_width = width - 2.0 * padding;
    let draw_height = height - 2.0 * padding;

    // North is up: latitude grows while screen y shrinks.
    let path = RoutePath::through(points.iter().map(|p| {
        PixelPoint::new(
            padding + lng.fraction(p.longitude) * draw_width,
            padding + (1.0 - lat.fraction(p.latitude)) * draw_height,
        )
    }));

    let height = height as u32;
    debug!(
        points = points.len(),
        width = config.target_width,
        height,
        "projected route"
    );

    Ok(Some(ProjectionResult::new(
        path.to_svg_d(),
        config.target_width,
        height,
        path.into_segments(),
    )))
}

/// Apply the coordinate policy, borrowing when nothing is dropped
fn screen_points(
    points: &[GeoPoint],
    policy: CoordinatePolicy,
) -> Result<Cow<'_, [GeoPoint]>, ProjectionError> {
    let Some(first_bad) = points.iter().position(|p| !p.is_valid()) else {
        return Ok(Cow::Borrowed(points));
    };

    match policy {
        CoordinatePolicy::Reject => {
            let p = points[first_bad];
            Err(ProjectionError::InvalidCoordinate {
                index: first_bad,
                latitude: p.latitude,
                longitude: p.longitude,
            })
        }
        CoordinatePolicy::Filter => {
            let kept: Vec<GeoPoint> = points.iter().copied().filter(GeoPoint::is_valid).collect();
            warn!(
                dropped = points.len() - kept.len(),
                kept = kept.len(),
                "dropped invalid coordinates from route"
            );
            Ok(Cow::Owned(kept))
        }
    }
}

/// One axis of the bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
struct Extent {
    min: f64,
    span: f64,
}

impl Extent {
    /// Smallest window containing every value, at least [`EPSILON`] wide
    ///
    /// A window narrower than `EPSILON` is widened around its midpoint, so
    /// a degenerate axis lands in the middle of the canvas.
    fn spanning(values: impl Iterator<Item = f64>) -> Self {
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

        let span = max - min;
        if span >= EPSILON {
            Self { min, span }
        } else {
            let mid = min + span / 2.0;
            Self {
                min: mid - EPSILON / 2.0,
                span: EPSILON,
            }
        }
    }

    /// Position of `value` within the window, 0.0 at `min` and 1.0 at the far edge
    fn fraction(&self, value: f64) -> f64 {
        (value - self.min) / self.span
    }
}
