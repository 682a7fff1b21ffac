//! SVG renderer for projected routes
//!
//! This module takes a ProjectionResult and produces a standalone SVG
//! document, or a `data:` URI embedding one.

pub mod config;
pub mod svg;

pub use config::SvgConfig;
pub use svg::{data_uri, render_svg, render_svg_with_stylesheet};
