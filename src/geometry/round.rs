use std::f64::consts::TAU;

use crate::{
    foundation::core::DVec3,
    geometry::{
        stitch::{StitchKind, StitchPrimitive, create_stitch},
        yarn::{DEFAULT_SAG, DEFAULT_THICKNESS, YarnPath, connect},
    },
};

/// Options for laying out a single round.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutOpts {
    /// Stitch visual placed at every anchor.
    pub stitch_kind: StitchKind,
    /// Droop of the yarn between neighbouring stitches.
    pub round_sag: f64,
    /// Yarn tube radius.
    pub yarn_thickness: f64,
    /// Optional cap: rounds wider than this are laid out with this many stitches.
    pub max_stitches: Option<u32>,
}

impl Default for LayoutOpts {
    fn default() -> Self {
        Self {
            stitch_kind: StitchKind::SingleCrochet,
            round_sag: DEFAULT_SAG,
            yarn_thickness: DEFAULT_THICKNESS,
            max_stitches: None,
        }
    }
}

/// Placement of one stitch plus its visual.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StitchAnchor {
    /// World position.
    pub position: DVec3,
    /// Visual handle, owned by the round.
    pub stitch: StitchPrimitive,
}

/// Anchors and yarn of one built round.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct RoundGeometry {
    anchors: Vec<StitchAnchor>,
    within_round: Vec<YarnPath>,
    cross_round: Vec<YarnPath>,
}

impl RoundGeometry {
    /// Anchors in angular order.
    pub fn anchors(&self) -> &[StitchAnchor] {
        &self.anchors
    }

    /// Anchor positions in angular order.
    pub fn positions(&self) -> impl ExactSizeIterator<Item = DVec3> + '_ {
        self.anchors.iter().map(|a| a.position)
    }

    /// Connectors closing the ring.
    pub fn within_round(&self) -> &[YarnPath] {
        &self.within_round
    }

    /// Connectors down to the previous round.
    pub fn cross_round(&self) -> &[YarnPath] {
        &self.cross_round
    }

    /// Number of stitches in the round.
    pub fn stitch_count(&self) -> usize {
        self.anchors.len()
    }

    pub(crate) fn attach_cross_round(&mut self, links: Vec<YarnPath>) {
        self.cross_round.extend(links);
    }
}

/// Lay out `stitch_count` stitches on a ring with the default options.
pub fn build_round(stitch_count: u32, radius: f64, height: f64) -> RoundGeometry {
    build_round_with(stitch_count, radius, height, &LayoutOpts::default())
}

/// Lay out `stitch_count` stitches evenly on a ring of `radius` at `height` and close the ring
/// with yarn.
///
/// Zero stitches give an empty round; a single stitch has no neighbour to connect to.
pub fn build_round_with(
    stitch_count: u32,
    radius: f64,
    height: f64,
    opts: &LayoutOpts,
) -> RoundGeometry {
    let n = match opts.max_stitches {
        Some(max) if stitch_count > max => {
            tracing::warn!(stitch_count, max, "round too wide, clamping layout");
            max as usize
        }
        _ => stitch_count as usize,
    };

    let anchors: Vec<StitchAnchor> = (0..n)
        .map(|i| {
            let angle = TAU * i as f64 / n as f64;
            StitchAnchor {
                position: DVec3::new(angle.cos() * radius, height, angle.sin() * radius),
                stitch: create_stitch(opts.stitch_kind),
            }
        })
        .collect();

    let within_round = if n < 2 {
        Vec::new()
    } else {
        (0..n)
            .map(|i| {
                connect(
                    anchors[i].position,
                    anchors[(i + 1) % n].position,
                    opts.round_sag,
                )
                .with_thickness(opts.yarn_thickness)
            })
            .collect()
    };

    RoundGeometry {
        anchors,
        within_round,
        cross_round: Vec::new(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/round.rs"]
mod tests;
