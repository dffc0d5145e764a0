use std::fmt::Write as _;

use kurbo::{Circle, Shape as _, Vec2};

use crate::{
    foundation::core::{Affine, BezPath, DVec3, Point, Rect, Rgb8},
    geometry::{round::RoundGeometry, yarn::YarnPath},
};

const CROSS_COLOR: Rgb8 = Rgb8::from_hex(0xf59e0b);
const ROUND_COLOR: Rgb8 = Rgb8::from_hex(0xfbbf24);
const YARN_SAMPLES: usize = 12;

/// Which plane the 3D rounds are flattened onto.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Projection {
    /// Looking down the stacking axis: rings appear as concentric circles.
    #[default]
    TopDown,
    /// Looking from the side: rounds stack upwards and yarn sag is visible.
    Side,
}

impl Projection {
    fn project(self, p: DVec3) -> Point {
        match self {
            Self::TopDown => Point::new(p.x, p.z),
            // SVG y grows downwards
            Self::Side => Point::new(p.x, -p.y),
        }
    }
}

/// SVG output settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SvgOpts {
    /// Plane to draw on.
    pub projection: Projection,
    /// Length of the longer side of the image, in pixels.
    pub size: f64,
    /// Empty border, in pixels.
    pub margin: f64,
    /// Radius of a stitch dot, in pixels.
    pub stitch_radius: f64,
    /// Optional background fill.
    pub background: Option<Rgb8>,
}

impl Default for SvgOpts {
    fn default() -> Self {
        Self {
            projection: Projection::TopDown,
            size: 512.0,
            margin: 16.0,
            stitch_radius: 3.0,
            background: Some(Rgb8::from_hex(0xeeeeee)),
        }
    }
}

/// Draw built rounds as a flat SVG document.
///
/// Links between rounds go underneath, then each ring, then one dot per stitch.
pub fn render_svg(rounds: &[RoundGeometry], opts: &SvgOpts) -> String {
    let project = |p: DVec3| opts.projection.project(p);

    let bounds = rounds
        .iter()
        .flat_map(|r| {
            r.positions()
                .chain(r.within_round().iter().flat_map(|y| y.sample(YARN_SAMPLES)))
                .chain(r.cross_round().iter().flat_map(|y| y.sample(YARN_SAMPLES)))
        })
        .map(project)
        .fold(None::<Rect>, |acc, p| {
            Some(match acc {
                Some(r) => r.union_pt(p),
                None => Rect::from_points(p, p),
            })
        });

    let inner = (opts.size - 2.0 * opts.margin).max(1.0);
    let (to_view, width, height) = match bounds {
        Some(b) => {
            let extent = b.width().max(b.height());
            let scale = if extent > 0.0 { inner / extent } else { 1.0 };
            let w = b.width() * scale + 2.0 * opts.margin;
            let h = b.height() * scale + 2.0 * opts.margin;
            let xf = Affine::translate(Vec2::new(opts.margin, opts.margin))
                * Affine::scale(scale)
                * Affine::translate(-b.origin().to_vec2());
            (xf, w, h)
        }
        None => (Affine::IDENTITY, opts.size, opts.size),
    };
    let px_per_unit = to_view.as_coeffs()[0];

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = fmt_num(width),
        h = fmt_num(height),
    );
    if let Some(bg) = opts.background {
        let _ = writeln!(
            out,
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            bg.to_css()
        );
    }

    for round in rounds {
        if let Some((d, thickness)) = yarn_path(round.cross_round(), project, to_view) {
            stroke(&mut out, &d, CROSS_COLOR, thickness * px_per_unit, 0.6);
        }
    }
    for round in rounds {
        if let Some((d, thickness)) = yarn_path(round.within_round(), project, to_view) {
            stroke(&mut out, &d, ROUND_COLOR, thickness * px_per_unit, 0.9);
        }
        for anchor in round.anchors() {
            let center = to_view * project(anchor.position);
            let color = anchor
                .stitch
                .parts()
                .first()
                .map_or(ROUND_COLOR, |p| p.color);
            let dot = Circle::new(center, opts.stitch_radius).to_path(0.1);
            let _ = writeln!(
                out,
                r#"<path d="{}" fill="{}"/>"#,
                dot.to_svg(),
                color.to_css()
            );
        }
    }

    out.push_str("</svg>\n");
    out
}

// All connectors of a group become one path; returns it with their tube radius.
fn yarn_path(
    yarns: &[YarnPath],
    project: impl Fn(DVec3) -> Point,
    to_view: Affine,
) -> Option<(String, f64)> {
    let first = yarns.first()?;
    let mut path = BezPath::new();
    for yarn in yarns {
        let mut pts = yarn.sample(YARN_SAMPLES).into_iter().map(&project);
        if let Some(p0) = pts.next() {
            path.move_to(p0);
            for p in pts {
                path.line_to(p);
            }
        }
    }
    path.apply_affine(to_view);
    Some((path.to_svg(), first.thickness()))
}

fn stroke(out: &mut String, d: &str, color: Rgb8, radius_px: f64, opacity: f64) {
    let _ = writeln!(
        out,
        r#"<path d="{d}" fill="none" stroke="{}" stroke-width="{}" stroke-opacity="{opacity}" stroke-linecap="round"/>"#,
        color.to_css(),
        fmt_num((2.0 * radius_px).max(0.5)),
    );
}

fn fmt_num(v: f64) -> String {
    let s = format!("{v:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_owned()
}

#[cfg(test)]
#[path = "../../tests/unit/export/svg.rs"]
mod tests;
