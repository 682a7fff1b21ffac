//! Stylesheet system for route map colors
//!
//! Maps symbolic color tokens (`route`, `background`, `start-marker`, ...)
//! to concrete values. Palettes are TOML files, so the same route can be
//! drawn to match light or dark page themes.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A stylesheet mapping symbolic colors to concrete values
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    /// Optional name for the stylesheet
    pub name: Option<String>,
    /// Color mappings: token name -> color, kept sorted so output is stable
    pub colors: BTreeMap<String, String>,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

/// Default palette: orange route on a dark surface
const DEFAULT_PALETTE: &str = r##"
[metadata]
name = "dark"

[colors]
background = "#111111"
route = "#fc4c02"
start-marker = "#ffffff"
end-marker = "#fc4c02"
"##;

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load stylesheet from TOML string
    pub fn from_toml(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        Ok(Stylesheet {
            name: parsed.metadata.and_then(|m| m.name),
            colors: parsed.colors,
        })
    }

    /// Resolve a symbolic color token to a concrete value
    ///
    /// Returns None if the token is not defined in this stylesheet.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a color token, falling back to the default palette
    ///
    /// Fallback order:
    /// 1. This stylesheet's exact token
    /// 2. The default palette's exact token
    /// 3. `currentColor`, so unknown tokens follow the surrounding text color
    pub fn resolve_or_default(&self, token: &str) -> String {
        if let Some(color) = self.resolve(token) {
            return color.to_string();
        }

        let default = Self::default();
        if let Some(color) = default.resolve(token) {
            return color.to_string();
        }

        "currentColor".to_string()
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::from_toml(DEFAULT_PALETTE).expect("Default palette should be valid TOML")
    }
}
