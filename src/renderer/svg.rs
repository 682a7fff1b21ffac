//! SVG generation from projected routes

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::projection::{PixelPoint, ProjectionResult};
use crate::stylesheet::Stylesheet;

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    /// Add CSS custom properties from a stylesheet
    pub fn add_stylesheet(&mut self, stylesheet: &Stylesheet) {
        if stylesheet.colors.is_empty() {
            return;
        }
        let nl = self.newline();
        let inner = if self.config.pretty_print { "      " } else { "" };
        let outer = if self.config.pretty_print { "    " } else { "" };

        let mut css = String::from(":root {");
        css.push_str(nl);
        for (token, value) in &stylesheet.colors {
            css.push_str(&format!(
                "{}--{}: {};{}",
                inner,
                escape_xml(token),
                escape_xml(value),
                nl
            ));
        }
        css.push_str(outer);
        css.push('}');
        self.styles.push(css);
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &'static str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add a rectangle covering the whole canvas
    pub fn add_background(&mut self, width: u32, height: u32, fill: &str) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<rect class="{}background" x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            self.indent_str(),
            prefix,
            width,
            height,
            escape_xml(fill)
        ));
    }

    /// Add the route line
    pub fn add_route(&mut self, d: &str, stroke: &str) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<path class="{}route" d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
            self.indent_str(),
            prefix,
            d,
            escape_xml(stroke),
            self.config.stroke_width
        ));
    }

    /// Add a start or end marker
    pub fn add_marker(&mut self, kind: &str, at: PixelPoint, fill: &str) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<circle class="{}marker {}{}" cx="{:.2}" cy="{:.2}" r="{}" fill="{}"/>"#,
            self.indent_str(),
            prefix,
            prefix,
            kind,
            at.x,
            at.y,
            self.config.marker_radius,
            escape_xml(fill)
        ));
    }

    /// Build the final SVG string for a `width` x `height` canvas
    pub fn build(self, width: u32, height: u32) -> String {
        let nl = self.newline();
        let pad = if self.config.pretty_print { "  " } else { "" };

        let mut svg = String::new();

        // XML declaration for standalone
        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">"#,
            width, height, width, height
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str(pad);
            svg.push_str("<style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str(pad);
                svg.push_str(pad);
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str(pad);
            svg.push_str("</style>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a projected route as an SVG document with the default palette
pub fn render_svg(result: &ProjectionResult, config: &SvgConfig) -> String {
    render_svg_with_stylesheet(result, config, &Stylesheet::default())
}

/// Render a projected route as an SVG document
pub fn render_svg_with_stylesheet(
    result: &ProjectionResult,
    config: &SvgConfig,
    stylesheet: &Stylesheet,
) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_stylesheet(stylesheet);

    if config.show_background {
        builder.add_background(
            result.width(),
            result.height(),
            &stylesheet.resolve_or_default("background"),
        );
    }

    builder.add_route(result.path(), &stylesheet.resolve_or_default("route"));

    if config.show_markers {
        if let Some(start) = result.start() {
            builder.add_marker("start", start, &stylesheet.resolve_or_default("start-marker"));
        }
        if let Some(end) = result.end() {
            builder.add_marker("end", end, &stylesheet.resolve_or_default("end-marker"));
        }
    }

    builder.build(result.width(), result.height())
}

/// Wrap an SVG document in a base64 `data:` URI
pub fn data_uri(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{project, GeoPoint};

    fn unit_square() -> ProjectionResult {
        let points = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 1.0),
        ];
        project(&points, 1000, 40).unwrap().unwrap()
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }

    #[test]
    fn test_render_route_document() {
        let config = SvgConfig::default().with_standalone(false);
        let svg = render_svg(&unit_square(), &config);

        insta::assert_snapshot!(svg, @r##"
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1000 1000" width="1000" height="1000">
  <style>
    :root {
      --background: #111111;
      --end-marker: #fc4c02;
      --route: #fc4c02;
      --start-marker: #ffffff;
    }
  </style>
  <rect class="rs-background" x="0" y="0" width="1000" height="1000" fill="#111111"/>
  <path class="rs-route" d="M40.00 960.00 L960.00 960.00 L960.00 40.00" fill="none" stroke="#fc4c02" stroke-width="6" stroke-linecap="round" stroke-linejoin="round"/>
  <circle class="rs-marker rs-start" cx="40.00" cy="960.00" r="8" fill="#ffffff"/>
  <circle class="rs-marker rs-end" cx="960.00" cy="40.00" r="8" fill="#fc4c02"/>
</svg>
"##);
    }

    #[test]
    fn test_standalone_declaration() {
        let svg = render_svg(&unit_square(), &SvgConfig::default());
        assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_compact_output_has_no_newlines() {
        let config = SvgConfig::default().with_pretty_print(false);
        let svg = render_svg(&unit_square(), &config);
        assert!(!svg.contains('\n'));
        assert!(svg.contains(r#"d="M40.00 960.00 L960.00 960.00 L960.00 40.00""#));
    }

    #[test]
    fn test_markers_and_background_optional() {
        let config = SvgConfig::default().with_markers(false).with_background(false);
        let svg = render_svg(&unit_square(), &config);
        assert!(!svg.contains("<circle"));
        assert!(!svg.contains("rs-background"));
        assert!(svg.contains("rs-route"));
    }

    #[test]
    fn test_custom_stylesheet_and_prefix() {
        let stylesheet = Stylesheet::from_toml(
            r##"
[colors]
route = "#0000ff"
"##,
        )
        .unwrap();
        let config = SvgConfig::default().with_class_prefix("map-");
        let svg = render_svg_with_stylesheet(&unit_square(), &config, &stylesheet);
        assert!(svg.contains(r##"class="map-route""##));
        assert!(svg.contains(r##"stroke="#0000ff""##));
        // Missing tokens fall back to the default palette.
        assert!(svg.contains(r##"fill="#111111""##));
    }

    #[test]
    fn test_stylesheet_values_cannot_close_style_block() {
        let stylesheet = Stylesheet::from_toml(
            r##"
[colors]
route = "red}</style><script>alert(1)</script>"
"##,
        )
        .unwrap();
        let svg = render_svg_with_stylesheet(&unit_square(), &SvgConfig::default(), &stylesheet);

        assert_eq!(svg.matches("</style>").count(), 1);
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("--route: red}&lt;/style&gt;&lt;script&gt;alert(1)&lt;/script&gt;;"));
    }

    #[test]
    fn test_data_uri() {
        assert_eq!(data_uri("<svg/>"), "data:image/svg+xml;base64,PHN2Zy8+");
    }
}
