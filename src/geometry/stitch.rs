use crate::foundation::core::{DVec3, Rgb8};

/// Stitch types the factory can build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StitchKind {
    /// US single crochet.
    #[default]
    SingleCrochet,
    /// US double crochet.
    DoubleCrochet,
}

/// Primitive solid used by one part of a stitch.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum Shape {
    /// Sphere of `radius`, stretched per axis by `scale`.
    Ellipsoid {
        /// Sphere radius before scaling.
        radius: f64,
        /// Per-axis scale.
        scale: DVec3,
    },
    /// Cylinder along its local Y axis, optionally tapered and tipped over around X.
    Cylinder {
        /// Radius at the top cap.
        radius_top: f64,
        /// Radius at the bottom cap.
        radius_bottom: f64,
        /// Cap to cap length.
        length: f64,
        /// Rotation around X in radians.
        tilt_x: f64,
    },
}

/// One solid of a stitch, placed relative to the stitch origin.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StitchPart {
    /// Geometry.
    pub shape: Shape,
    /// Offset from the stitch origin.
    pub offset: DVec3,
    /// Yarn color.
    pub color: Rgb8,
}

/// Position-free visual unit for one stitch.
///
/// Callers place it by pairing it with an anchor position.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StitchPrimitive {
    kind: StitchKind,
    parts: Vec<StitchPart>,
}

const GOLDEN: Rgb8 = Rgb8::from_hex(0xfbbf24);
const AMBER: Rgb8 = Rgb8::from_hex(0xf59e0b);
const YARN_TIP: Rgb8 = Rgb8::from_hex(0xfee0a2);

impl StitchPrimitive {
    /// Which stitch this is.
    pub fn kind(&self) -> StitchKind {
        self.kind
    }

    /// Parts, body first.
    pub fn parts(&self) -> &[StitchPart] {
        &self.parts
    }

    /// Vertical extent `(min_y, max_y)` relative to the stitch origin.
    pub fn vertical_extent(&self) -> (f64, f64) {
        self.parts
            .iter()
            .map(|p| {
                let half = match p.shape {
                    Shape::Ellipsoid { radius, scale } => radius * scale.y,
                    Shape::Cylinder {
                        length,
                        tilt_x,
                        radius_top,
                        radius_bottom,
                    } => {
                        let r = radius_top.max(radius_bottom);
                        (length * 0.5 * tilt_x.cos()).abs() + (r * tilt_x.sin()).abs()
                    }
                };
                (p.offset.y - half, p.offset.y + half)
            })
            .fold((0.0f64, 0.0f64), |(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }
}

/// Build the visual for one stitch of `kind`.
pub fn create_stitch(kind: StitchKind) -> StitchPrimitive {
    let parts = match kind {
        StitchKind::SingleCrochet => vec![
            StitchPart {
                shape: Shape::Ellipsoid {
                    radius: 0.15,
                    scale: DVec3::ONE,
                },
                offset: DVec3::ZERO,
                color: GOLDEN,
            },
            // yarn tail, lying flat under the body
            StitchPart {
                shape: Shape::Cylinder {
                    radius_top: 0.02,
                    radius_bottom: 0.02,
                    length: 0.08,
                    tilt_x: std::f64::consts::FRAC_PI_2,
                },
                offset: DVec3::new(0.0, -0.12, 0.0),
                color: AMBER,
            },
        ],
        StitchKind::DoubleCrochet => vec![
            StitchPart {
                shape: Shape::Ellipsoid {
                    radius: 0.12,
                    scale: DVec3::new(1.0, 2.2, 1.0),
                },
                offset: DVec3::ZERO,
                color: AMBER,
            },
            StitchPart {
                shape: Shape::Cylinder {
                    radius_top: 0.03,
                    radius_bottom: 0.01,
                    length: 0.04,
                    tilt_x: 0.0,
                },
                offset: DVec3::new(0.0, 0.25, 0.0),
                color: YARN_TIP,
            },
        ],
    };
    StitchPrimitive { kind, parts }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/stitch.rs"]
mod tests;
