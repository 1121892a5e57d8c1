//! Minimal SVG output for eyeballing distributions.
use std::fmt::Write as _;
use std::path::Path;

use glam::DVec2;
use glyph_scatter::prelude::Rect;

/// Styling for the emitted SVG.
#[derive(Debug, Clone)]
pub struct SvgStyle {
    pub background: &'static str,
    pub fill: &'static str,
    pub radius: f64,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            background: "#1a1a1a",
            fill: "#ebebeb",
            radius: 1.5,
        }
    }
}

/// Writes `points` as circles into an SVG sized to `rect`.
pub fn render_points_to_svg(
    points: &[DVec2],
    rect: Rect,
    style: &SvgStyle,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}">"#,
        rect.width, rect.height
    )?;
    writeln!(
        svg,
        r#"  <rect width="{}" height="{}" fill="{}"/>"#,
        rect.width, rect.height, style.background
    )?;
    for p in points {
        writeln!(
            svg,
            r#"  <circle cx="{:.3}" cy="{:.3}" r="{}" fill="{}"/>"#,
            p.x, p.y, style.radius, style.fill
        )?;
    }
    writeln!(svg, "</svg>")?;
    std::fs::write(path, svg)?;
    Ok(())
}
