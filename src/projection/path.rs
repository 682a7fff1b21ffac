//! Path segments and their SVG `d` attribute form

use super::types::PixelPoint;

/// A segment in a projected route
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Move to starting point
    MoveTo(PixelPoint),
    /// Straight line to point
    LineTo(PixelPoint),
}

impl PathSegment {
    /// Point the segment ends at
    pub fn point(&self) -> PixelPoint {
        match self {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => *p,
        }
    }
}

/// An ordered polyline on the canvas
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutePath {
    pub segments: Vec<PathSegment>,
}

impl RoutePath {
    /// Build a path that moves to the first point and draws a line through the rest
    pub fn through(points: impl IntoIterator<Item = PixelPoint>) -> Self {
        let segments = points
            .into_iter()
            .enumerate()
            .map(|(i, p)| {
                if i == 0 {
                    PathSegment::MoveTo(p)
                } else {
                    PathSegment::LineTo(p)
                }
            })
            .collect();
        Self { segments }
    }

    /// Convert to SVG path `d` attribute string
    pub fn to_svg_d(&self) -> String {
        let mut d = String::new();

        for seg in &self.segments {
            match seg {
                PathSegment::MoveTo(p) => {
                    d.push_str(&format!("M{:.2} {:.2}", p.x, p.y));
                }
                PathSegment::LineTo(p) => {
                    d.push_str(&format!(" L{:.2} {:.2}", p.x, p.y));
                }
            }
        }

        d
    }

    pub fn into_segments(self) -> Vec<PathSegment> {
        self.segments
    }
}
