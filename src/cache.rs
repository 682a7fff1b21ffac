//! `Cache-Control` policy shared by every proxied endpoint
//!
//! Responses may be served from a shared cache for a minute and then served
//! stale for another minute while the cache refreshes in the background.

use serde::Deserialize;

/// Seconds used for every directive unless configured otherwise
pub const DEFAULT_TTL_SECS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CachePolicy {
    /// Browser cache lifetime
    pub max_age: u32,
    /// Shared (CDN) cache lifetime
    pub s_maxage: u32,
    /// How long a stale entry may be served while revalidating
    pub stale_while_revalidate: u32,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_TTL_SECS,
            s_maxage: DEFAULT_TTL_SECS,
            stale_while_revalidate: DEFAULT_TTL_SECS,
        }
    }
}

impl CachePolicy {
    /// Value for the `Cache-Control` response header
    pub fn header_value(&self) -> String {
        format!(
            "public, max-age={}, s-maxage={}, stale-while-revalidate={}",
            self.max_age, self.s_maxage, self.stale_while_revalidate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_header() {
        assert_eq!(
            CachePolicy::default().header_value(),
            "public, max-age=60, s-maxage=60, stale-while-revalidate=60"
        );
    }

    #[test]
    fn test_custom_header() {
        let policy = CachePolicy {
            max_age: 0,
            s_maxage: 300,
            stale_while_revalidate: 600,
        };
        assert_eq!(
            policy.header_value(),
            "public, max-age=0, s-maxage=300, stale-while-revalidate=600"
        );
    }
}
