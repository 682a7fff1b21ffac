//! Reverse geocoding response shaping
//!
//! Turns a Nominatim-style `jsonv2` reverse lookup into a short
//! `"City, Region, CC"` label for an activity's start point.

use serde::Deserialize;

/// The subset of a reverse geocoding response used for labels
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReverseGeocodeResponse {
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Address components, most specific first
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Address {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub hamlet: Option<String>,
    pub suburb: Option<String>,
    pub neighbourhood: Option<String>,
    pub state: Option<String>,
    pub region: Option<String>,
    pub country_code: Option<String>,
}

impl Address {
    /// The most specific populated settlement name
    pub fn locality(&self) -> Option<&str> {
        [
            &self.city,
            &self.town,
            &self.village,
            &self.hamlet,
            &self.suburb,
            &self.neighbourhood,
        ]
        .into_iter()
        .find_map(|v| non_empty(v))
    }

    pub fn region(&self) -> Option<&str> {
        non_empty(&self.state).or_else(|| non_empty(&self.region))
    }
}

/// Build a `"City, Region, CC"` label
///
/// Returns `None` when the response has no address at all. When the address
/// has none of the parts, the full display name is used instead.
pub fn city_region_label(response: &ReverseGeocodeResponse) -> Option<String> {
    let address = response.address.as_ref()?;

    let country = non_empty(&address.country_code).map(str::to_uppercase);
    let parts: Vec<&str> = [address.locality(), address.region(), country.as_deref()]
        .into_iter()
        .flatten()
        .collect();

    if parts.is_empty() {
        response.display_name.clone().filter(|s| !s.is_empty())
    } else {
        Some(parts.join(", "))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
