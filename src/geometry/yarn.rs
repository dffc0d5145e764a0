use crate::foundation::core::DVec3;

/// Droop used between neighbouring stitches of one round.
pub const DEFAULT_SAG: f64 = 0.1;
/// Yarn tube radius.
pub const DEFAULT_THICKNESS: f64 = 0.03;
/// Samples along a path when it is turned into a tube.
pub const TUBE_SEGMENTS: usize = 20;

const TENSION: f64 = 0.5;

/// Smooth yarn connector through start, sagging midpoint and end.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct YarnPath {
    control: [DVec3; 3],
    thickness: f64,
}

/// Connect two anchor points with a yarn that droops by `sag` halfway along.
pub fn connect(start: DVec3, end: DVec3, sag: f64) -> YarnPath {
    let mid = (start + end) * 0.5 - DVec3::Y * sag;
    YarnPath {
        control: [start, mid, end],
        thickness: DEFAULT_THICKNESS,
    }
}

impl YarnPath {
    /// Same path with another tube thickness.
    pub fn with_thickness(self, thickness: f64) -> Self {
        Self { thickness, ..self }
    }

    /// Start point.
    pub fn start(&self) -> DVec3 {
        self.control[0]
    }

    /// Sagging midpoint.
    pub fn midpoint(&self) -> DVec3 {
        self.control[1]
    }

    /// End point.
    pub fn end(&self) -> DVec3 {
        self.control[2]
    }

    /// The three control points in order.
    pub fn control_points(&self) -> [DVec3; 3] {
        self.control
    }

    /// Tube radius.
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Point at `t` in `[0, 1]` on the open Catmull-Rom curve.
    ///
    /// The curve passes through all three control points, reaching the midpoint at `t = 0.5`.
    /// Missing outer neighbours are mirrored through the endpoints.
    pub fn point_at(&self, t: f64) -> DVec3 {
        let [a, b, c] = self.control;
        let p = 2.0 * t.clamp(0.0, 1.0);
        let (seg, w) = if p >= 2.0 {
            (1, 1.0)
        } else {
            (p.floor() as usize, p.fract())
        };

        let (p0, p1, p2, p3) = if seg == 0 {
            (2.0 * a - b, a, b, c)
        } else {
            (a, b, c, 2.0 * c - b)
        };
        hermite(p1, p2, TENSION * (p2 - p0), TENSION * (p3 - p1), w)
    }

    /// `segments + 1` evenly spaced samples, both endpoints included.
    pub fn sample(&self, segments: usize) -> Vec<DVec3> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.point_at(i as f64 / segments as f64))
            .collect()
    }

    /// Polyline length over `segments` samples.
    pub fn approx_length(&self, segments: usize) -> f64 {
        self.sample(segments)
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .sum()
    }
}

fn hermite(x0: DVec3, x1: DVec3, t0: DVec3, t1: DVec3, t: f64) -> DVec3 {
    let c2 = -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1;
    let c3 = 2.0 * x0 - 2.0 * x1 + t0 + t1;
    x0 + t0 * t + c2 * (t * t) + c3 * (t * t * t)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/yarn.rs"]
mod tests;
