//! Activity summaries and the latest-activity payload
//!
//! Activity JSON from the tracking API is loosely shaped: most fields may be
//! absent or `null`, and `start_latlng` is sometimes an empty array. These
//! types accept all of that and hand the projector a strict point list.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::DecodeError;
use crate::format;
use crate::polyline;
use crate::projection::{project_with, GeoPoint, ProjectionConfig, ProjectionResult};
use crate::RenderError;

/// Map block of an activity summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityMap {
    #[serde(default)]
    pub summary_polyline: Option<String>,
}

/// A summary activity as returned by the activity-tracking API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryActivity {
    pub id: u64,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Meters
    #[serde(default)]
    pub distance: Option<f64>,
    /// Seconds
    #[serde(default)]
    pub moving_time: Option<f64>,
    /// Seconds
    #[serde(default)]
    pub elapsed_time: Option<f64>,
    /// Meters
    #[serde(default)]
    pub total_elevation_gain: Option<f64>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub start_date_local: Option<String>,
    #[serde(default)]
    pub map: Option<ActivityMap>,
    #[serde(default)]
    pub start_latlng: Option<Vec<f64>>,
    /// Meters per second
    #[serde(default)]
    pub average_speed: Option<f64>,
}

impl SummaryActivity {
    /// The encoded route, if the activity has one
    pub fn summary_polyline(&self) -> Option<&str> {
        self.map
            .as_ref()
            .and_then(|m| m.summary_polyline.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Decoded route points; empty when there is no route
    pub fn route_points(&self) -> Result<Vec<GeoPoint>, DecodeError> {
        match self.summary_polyline() {
            Some(encoded) => polyline::decode(encoded),
            None => Ok(Vec::new()),
        }
    }

    /// Where the activity started
    ///
    /// Prefers the explicit start coordinate; falls back to the first route
    /// point. An empty or malformed `start_latlng` counts as absent.
    pub fn start_point(&self) -> Option<GeoPoint> {
        let explicit = match self.start_latlng.as_deref() {
            Some(&[lat, lng]) => Some(GeoPoint::new(lat, lng)).filter(GeoPoint::is_valid),
            _ => None,
        };
        explicit.or_else(|| {
            self.route_points()
                .ok()
                .and_then(|points| points.first().copied())
        })
    }

    /// Start time, from `start_date` or else `start_date_local`
    ///
    /// Timestamps without a UTC offset are read as UTC.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        let iso = self
            .start_date
            .as_deref()
            .or(self.start_date_local.as_deref())?;
        format::parse_timestamp(iso)
    }

    /// When the activity ended: start plus elapsed (or moving) time
    ///
    /// A negative, non-finite, or out-of-range duration leaves the end unknown.
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        let start = self.started_at()?;
        let secs = self.elapsed_time.or(self.moving_time).unwrap_or(0.0);
        if !secs.is_finite() || secs < 0.0 {
            return None;
        }
        let elapsed = Duration::try_milliseconds((secs * 1000.0).round() as i64)?;
        start.checked_add_signed(elapsed)
    }

    /// Relative end time such as `3 hours ago`; empty when there is no start date
    pub fn ended_ago(&self, now: DateTime<Utc>) -> String {
        self.ended_at()
            .map(|end| format::relative_time(end, now))
            .unwrap_or_default()
    }

    /// Display values for the stats grid
    pub fn stats(&self) -> ActivityStats {
        ActivityStats {
            distance_km: format::meters_to_km(self.distance),
            moving_time: format::seconds_to_hms(self.moving_time),
            elevation: format::elevation(self.total_elevation_gain),
            pace: format::pace_per_km(self.distance, self.moving_time),
            speed: format::speed_kmh(self.distance, self.moving_time),
        }
    }

    /// Project this activity's route
    pub fn route_projection(
        &self,
        config: &ProjectionConfig,
    ) -> Result<Option<ProjectionResult>, RenderError> {
        let points = self.route_points()?;
        Ok(project_with(&points, config)?)
    }
}

/// Formatted statistics for one activity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityStats {
    pub distance_km: String,
    pub moving_time: String,
    pub elevation: String,
    pub pace: String,
    pub speed: String,
}

/// Payload served for the latest-activity card
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestActivity {
    pub latest: Option<SummaryActivity>,
    pub svg_path: Option<ProjectionResult>,
    pub location: Option<String>,
}

/// Build the latest-activity payload
///
/// A route that cannot be decoded or projected is logged and left out;
/// the card then renders without a map.
pub fn latest_activity(
    activity: Option<SummaryActivity>,
    config: &ProjectionConfig,
    location: Option<String>,
) -> LatestActivity {
    let svg_path = activity.as_ref().and_then(|a| {
        a.route_projection(config).unwrap_or_else(|err| {
            warn!(activity = a.id, error = %err, "dropping unusable route");
            None
        })
    });

    LatestActivity {
        latest: activity,
        svg_path,
        location,
    }
}
