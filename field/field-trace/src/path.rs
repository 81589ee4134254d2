//! Conversion of boundary loops into renderable path descriptions.

#![allow(clippy::cast_precision_loss)]

use std::fmt::Write;

use nalgebra::Point2;

use crate::loops::BoundaryLoop;
use crate::result::BoundarySet;

/// One command of a vector path.
///
/// The sequence for a loop is always a single `MoveTo`, a body of `LineTo`
/// or `QuadTo` segments, and an explicit `Close` back to the first point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Start the path at a point.
    MoveTo(Point2<f64>),
    /// Straight segment to a point.
    LineTo(Point2<f64>),
    /// Quadratic segment through a control point.
    QuadTo {
        /// Curve control point.
        control: Point2<f64>,
        /// Segment end point.
        to: Point2<f64>,
    },
    /// Close the path back to its start.
    Close,
}

/// Convert a loop's point sequence into path commands.
///
/// With `smooth` unset this is a move, a line per point, and a close. With
/// `smooth` set, segments become quadratics through the original points
/// with segment midpoints as knots, which rounds off integration jitter
/// without leaving the traced boundary.
#[must_use]
pub fn build_path(lp: &BoundaryLoop, smooth: bool) -> Vec<PathCommand> {
    let points = &lp.points;
    if points.is_empty() {
        return Vec::new();
    }
    if !smooth || points.len() < 3 {
        let mut commands = Vec::with_capacity(points.len() + 1);
        commands.push(PathCommand::MoveTo(points[0]));
        for p in &points[1..] {
            commands.push(PathCommand::LineTo(*p));
        }
        commands.push(PathCommand::Close);
        return commands;
    }

    let n = points.len();
    let mid = |a: Point2<f64>, b: Point2<f64>| Point2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);

    let mut commands = Vec::with_capacity(n + 2);
    commands.push(PathCommand::MoveTo(mid(points[0], points[1])));
    for i in 0..n {
        let control = points[(i + 1) % n];
        let to = mid(points[(i + 1) % n], points[(i + 2) % n]);
        commands.push(PathCommand::QuadTo { control, to });
    }
    commands.push(PathCommand::Close);
    commands
}

/// Render path commands as SVG path data (`M`/`L`/`Q`/`Z`).
#[must_use]
pub fn to_svg_path_data(commands: &[PathCommand]) -> String {
    let mut data = String::new();
    for (i, command) in commands.iter().enumerate() {
        if i > 0 {
            data.push(' ');
        }
        match command {
            PathCommand::MoveTo(p) => {
                let _ = write!(data, "M {:.3} {:.3}", p.x, p.y);
            }
            PathCommand::LineTo(p) => {
                let _ = write!(data, "L {:.3} {:.3}", p.x, p.y);
            }
            PathCommand::QuadTo { control, to } => {
                let _ = write!(
                    data,
                    "Q {:.3} {:.3} {:.3} {:.3}",
                    control.x, control.y, to.x, to.y
                );
            }
            PathCommand::Close => data.push('Z'),
        }
    }
    data
}

/// Parameters for SVG export of a boundary set.
#[derive(Debug, Clone)]
pub struct SvgExportParams {
    /// Width of the SVG in pixels.
    pub width: u32,
    /// Height of the SVG in pixels.
    pub height: u32,
    /// Padding around the content in pixels.
    pub padding: u32,
    /// Background color.
    pub background_color: String,
}

impl Default for SvgExportParams {
    fn default() -> Self {
        Self {
            width: 640,
            height: 640,
            padding: 16,
            background_color: "#111111".to_string(),
        }
    }
}

impl SvgExportParams {
    /// Create params with a custom size.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Export every loop of a boundary set as a styled SVG overlay.
///
/// Lattice coordinates scale uniformly into the viewport. Stroke
/// attributes come straight from the set's configured [`StrokeStyle`]
/// (color, width, opacity, glow) without interpretation.
///
/// [`StrokeStyle`]: crate::StrokeStyle
#[must_use]
pub fn export_svg(set: &BoundarySet, params: &SvgExportParams) -> String {
    let padding = f64::from(params.padding);
    let extent = (set.lattice_size.max(2) - 1) as f64;
    let available = f64::from(params.width.min(params.height)) - 2.0 * padding;
    let scale = (available / extent).max(0.0);

    let stroke = &set.params.stroke;
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
  <rect width="100%" height="100%" fill="{}"/>
"#,
        params.width, params.height, params.width, params.height, params.background_color
    );

    if stroke.glow > 0.0 {
        let _ = writeln!(
            svg,
            "  <defs><filter id=\"glow\"><feGaussianBlur stdDeviation=\"{:.2}\"/></filter></defs>",
            stroke.glow
        );
    }

    let _ = writeln!(svg, "  <g transform=\"translate({padding:.2},{padding:.2}) scale({scale:.6})\">");
    for lp in &set.loops {
        let data = to_svg_path_data(&build_path(lp, stroke.smooth));
        let filter = if stroke.glow > 0.0 {
            " filter=\"url(#glow)\""
        } else {
            ""
        };
        let _ = writeln!(
            svg,
            r#"    <path d="{}" fill="none" stroke="{}" stroke-width="{:.3}" stroke-opacity="{:.3}"{}/>"#,
            data,
            stroke.color,
            stroke.width / scale.max(f64::MIN_POSITIVE),
            stroke.opacity,
            filter
        );
    }
    svg.push_str("  </g>\n</svg>");
    svg
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::loops::LoopValidator;
    use crate::params::TraceParams;
    use crate::result::PassStats;
    use std::f64::consts::TAU;

    fn square_loop() -> BoundaryLoop {
        let points = vec![
            Point2::new(2.0, 2.0),
            Point2::new(10.0, 2.0),
            Point2::new(10.0, 10.0),
            Point2::new(2.0, 10.0),
        ];
        LoopValidator::new(4).validate(points, 0.0).unwrap()
    }

    #[test]
    fn test_line_path_structure() {
        let commands = build_path(&square_loop(), false);
        assert_eq!(commands.len(), 5);
        assert!(matches!(commands[0], PathCommand::MoveTo(_)));
        assert!(matches!(commands[1], PathCommand::LineTo(_)));
        assert!(matches!(commands[4], PathCommand::Close));
    }

    #[test]
    fn test_smooth_path_uses_quadratics() {
        let commands = build_path(&square_loop(), true);
        assert!(matches!(commands[0], PathCommand::MoveTo(_)));
        assert!(commands[1..]
            .iter()
            .take(4)
            .all(|c| matches!(c, PathCommand::QuadTo { .. })));
        assert!(matches!(commands.last(), Some(PathCommand::Close)));
    }

    #[test]
    fn test_smooth_path_stays_near_loop() {
        let points: Vec<_> = (0..64)
            .map(|i| {
                let theta = TAU * f64::from(i) / 64.0;
                Point2::new(
                    8.0f64.mul_add(theta.cos(), 16.0),
                    8.0f64.mul_add(theta.sin(), 16.0),
                )
            })
            .collect();
        let lp = LoopValidator::new(4).validate(points, 0.0).unwrap();

        for command in build_path(&lp, true) {
            if let PathCommand::QuadTo { to, .. } = command {
                let r = (to - Point2::new(16.0, 16.0)).norm();
                assert!((r - 8.0).abs() < 0.1);
            }
        }
    }

    #[test]
    fn test_svg_path_data() {
        let data = to_svg_path_data(&build_path(&square_loop(), false));
        assert!(data.starts_with("M 2.000 2.000"));
        assert!(data.contains("L 10.000 2.000"));
        assert!(data.ends_with('Z'));
    }

    #[test]
    fn test_export_svg_passes_stroke_through() {
        let mut params = TraceParams::default();
        params.stroke.color = "#ff8800".to_string();
        params.stroke.glow = 2.0;

        let set = BoundarySet {
            lattice_size: 16,
            loops: vec![square_loop()],
            stats: PassStats::default(),
            params,
        };

        let svg = export_svg(&set, &SvgExportParams::default());
        assert!(svg.contains("<svg"));
        assert!(svg.contains("stroke=\"#ff8800\""));
        assert!(svg.contains("feGaussianBlur"));
        assert!(svg.contains("filter=\"url(#glow)\""));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_export_svg_empty_set() {
        let set = BoundarySet {
            lattice_size: 16,
            loops: Vec::new(),
            stats: PassStats::default(),
            params: TraceParams::default(),
        };
        let svg = export_svg(&set, &SvgExportParams::default().with_size(320, 320));
        assert!(svg.contains("width=\"320\""));
        assert!(!svg.contains("<path"));
    }
}
