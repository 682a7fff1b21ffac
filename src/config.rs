//! Application configuration loaded from TOML
//!
//! ```toml
//! stylesheet = "themes/light.toml"
//!
//! [projection]
//! target_width = 1000
//! padding = 40
//! coordinate_policy = "reject"
//!
//! [svg]
//! stroke_width = 6.0
//! show_markers = true
//!
//! [cache]
//! max_age = 60
//! ```
//!
//! Every section and key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::cache::CachePolicy;
use crate::projection::ProjectionConfig;
use crate::renderer::SvgConfig;
use crate::stylesheet::{Stylesheet, StylesheetError};
use crate::RenderConfig;

/// Errors that can occur when loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to load stylesheet {path:?}: {source}")]
    Stylesheet {
        path: PathBuf,
        source: StylesheetError,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub projection: ProjectionConfig,
    pub svg: SvgConfig,
    pub cache: CachePolicy,
    /// Palette file, relative paths resolved against the working directory
    pub stylesheet: Option<PathBuf>,
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Full `Cache-Control` header line for the configured policy
    pub fn cache_header(&self) -> String {
        format!("Cache-Control: {}", self.cache.header_value())
    }

    /// Pipeline configuration, loading the stylesheet if one is named
    pub fn render_config(&self) -> Result<RenderConfig, ConfigError> {
        let stylesheet = match &self.stylesheet {
            Some(path) => Stylesheet::from_file(path).map_err(|source| ConfigError::Stylesheet {
                path: path.clone(),
                source,
            })?,
            None => Stylesheet::default(),
        };

        Ok(RenderConfig::new()
            .with_projection(self.projection.clone())
            .with_svg(self.svg.clone())
            .with_stylesheet(stylesheet))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::CoordinatePolicy;

    #[test]
    fn test_empty_config_is_default() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_sections() {
        let config = AppConfig::from_toml(
            r#"
[projection]
target_width = 600
coordinate_policy = "filter"

[svg]
pretty_print = false
class_prefix = "map-"

[cache]
stale_while_revalidate = 300
"#,
        )
        .unwrap();

        assert_eq!(config.projection.target_width, 600);
        assert_eq!(config.projection.padding, 40);
        assert_eq!(config.projection.coordinate_policy, CoordinatePolicy::Filter);
        assert!(!config.svg.pretty_print);
        assert_eq!(config.svg.class_prefix.as_deref(), Some("map-"));
        assert_eq!(config.cache.max_age, 60);
        assert_eq!(config.cache.stale_while_revalidate, 300);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            AppConfig::from_toml("[projection\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::load_from_file(Path::new("/nonexistent/route-sketch.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_missing_stylesheet() {
        let config = AppConfig {
            stylesheet: Some(PathBuf::from("/nonexistent/palette.toml")),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.render_config(),
            Err(ConfigError::Stylesheet { .. })
        ));
    }

    #[test]
    fn test_render_config_carries_sections() {
        let config = AppConfig::from_toml("[projection]\npadding = 12\n").unwrap();
        let render = config.render_config().unwrap();
        assert_eq!(render.projection.padding, 12);
        assert_eq!(render.stylesheet, Stylesheet::default());
    }

    #[test]
    fn test_cache_section_drives_header() {
        assert_eq!(
            AppConfig::default().cache_header(),
            "Cache-Control: public, max-age=60, s-maxage=60, stale-while-revalidate=60"
        );

        let config = AppConfig::from_toml("[cache]\nmax_age = 300\ns_maxage = 600\n").unwrap();
        assert_eq!(
            config.cache_header(),
            "Cache-Control: public, max-age=300, s-maxage=600, stale-while-revalidate=60"
        );
    }
}
