//! Race result rows and their display helpers

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::format::{minutes_seconds, ordinal, parse_timestamp, MISSING};

/// Standard mile, as listed in results tables
const MILE_METERS: f64 = 1609.0;

/// Shown for the pace and place of a race that was not finished
const NOT_APPLICABLE: &str = "N/A";

/// Bar color for a race that was not finished
const DNF_COLOR: &str = "#ef4444";

/// One row of the race results table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub uuid: String,
    pub event_name: String,
    #[serde(default)]
    pub participants: Option<u32>,
    #[serde(default)]
    pub distance_m: Option<f64>,
    #[serde(default)]
    pub time_s: Option<f64>,
    pub race_type: String,
    pub strava_start_timestamp: String,
    #[serde(default)]
    pub my_placement: Option<u32>,
    #[serde(default)]
    pub strava_link: Option<String>,
    #[serde(default)]
    pub results_link: Option<String>,
}

/// Columns the results table can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Type,
    Distance,
    Time,
    Pace,
    Place,
    Participants,
    Percent,
}

impl RaceResult {
    /// Did not finish: the row has no finish time
    pub fn is_dnf(&self) -> bool {
        self.time_s.is_none()
    }

    /// Race start, with the offset applied
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.strava_start_timestamp)
    }

    /// Distance as shown in the table
    ///
    /// Road and cross country races use kilometers, track races meters, and
    /// a 1609 m race is simply a mile.
    pub fn distance_label(&self) -> String {
        let Some(meters) = self.distance_m else {
            return MISSING.to_string();
        };
        if meters == MILE_METERS {
            return "Mile".to_string();
        }
        let kind = self.race_type.to_lowercase();
        if kind.contains("road") || kind.contains("cross country") {
            let km = ((meters / 1000.0) * 10.0).round().abs() / 10.0;
            format!("{} km", km)
        } else {
            format!("{} m", meters)
        }
    }

    /// Finish time as `m:ss`, or `DNF`
    pub fn time_label(&self) -> String {
        if self.is_dnf() {
            return "DNF".to_string();
        }
        minutes_seconds(self.time_s)
    }

    /// Placement as an ordinal; `N/A` for an unfinished race
    pub fn place_label(&self) -> String {
        if self.is_dnf() {
            return NOT_APPLICABLE.to_string();
        }
        ordinal(self.my_placement.map(i64::from))
    }

    /// Seconds per kilometer, when both time and a positive distance are known
    pub fn pace_secs_per_km(&self) -> Option<f64> {
        match (self.time_s, self.distance_m) {
            (Some(t), Some(d)) if d > 0.0 => Some(t / (d / 1000.0)),
            _ => None,
        }
    }

    /// Pace as `m:ss/km`; `N/A` for an unfinished race
    pub fn pace_label(&self) -> String {
        if self.is_dnf() {
            return NOT_APPLICABLE.to_string();
        }
        match self.pace_secs_per_km() {
            Some(pace) => format!("{}/km", minutes_seconds(Some(pace))),
            None => MISSING.to_string(),
        }
    }

    /// Finishing position as a percentage of the field, 0 for first and 100 for last
    ///
    /// An unfinished race ranks at 100.
    pub fn percent_rank(&self) -> f64 {
        if self.is_dnf() {
            return 100.0;
        }
        match (self.my_placement, self.participants) {
            (Some(place), Some(field)) if place > 0 && field > 1 => {
                let rank = f64::from(place - 1) / f64::from(field - 1) * 100.0;
                rank.clamp(0.0, 100.0)
            }
            _ => 0.0,
        }
    }

    /// Color for a percent rank, green at the front of the field to red at the back
    pub fn percent_color(&self) -> String {
        if self.is_dnf() {
            return DNF_COLOR.to_string();
        }
        let hue = 120 - (self.percent_rank() / 100.0 * 120.0).round() as i64;
        format!("hsl({} 70% 60% / 0.9)", hue)
    }

    fn has_value(&self, key: SortKey) -> bool {
        match key {
            SortKey::Distance => self.distance_m.is_some(),
            SortKey::Time => self.time_s.is_some(),
            SortKey::Pace => self.pace_secs_per_km().is_some(),
            SortKey::Place => self.my_placement.is_some(),
            SortKey::Participants => self.participants.is_some(),
            SortKey::Date => self.started_at().is_some(),
            SortKey::Type | SortKey::Percent => true,
        }
    }

    fn compare(&self, other: &Self, key: SortKey) -> Ordering {
        fn opt<T: PartialOrd>(a: Option<T>, b: Option<T>) -> Ordering {
            match (a, b) {
                (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }

        match key {
            SortKey::Date => opt(self.started_at(), other.started_at()),
            SortKey::Type => self.race_type.cmp(&other.race_type),
            SortKey::Distance => opt(self.distance_m, other.distance_m),
            SortKey::Time => opt(self.time_s, other.time_s),
            SortKey::Pace => opt(self.pace_secs_per_km(), other.pace_secs_per_km()),
            SortKey::Place => opt(self.my_placement, other.my_placement),
            SortKey::Participants => opt(self.participants, other.participants),
            SortKey::Percent => self
                .percent_rank()
                .partial_cmp(&other.percent_rank())
                .unwrap_or(Ordering::Equal),
        }
    }
}

/// Sort rows in place by `key`
///
/// Rows missing the sort value go last in both directions.
pub fn sort_results(rows: &mut [RaceResult], key: SortKey, descending: bool) {
    rows.sort_by(|a, b| {
        let ord = a.compare(b, key);
        let missing_last = matches!(
            (a.has_value(key), b.has_value(key)),
            (true, false) | (false, true)
        );
        if descending && !missing_last {
            ord.reverse()
        } else {
            ord
        }
    });
}
