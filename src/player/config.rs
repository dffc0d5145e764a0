use crate::{
    foundation::error::{StitchError, StitchResult},
    geometry::round::LayoutOpts,
};

/// Tunables for round playback. Every field has a default, so partial JSON is accepted.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Vertical distance between consecutive rounds.
    pub layer_height: f64,
    /// Ring radius per square root of the stitch count.
    pub radius_scale: f64,
    /// Droop of the yarn linking a round to the one below.
    pub cross_sag: f64,
    /// Per-round layout.
    #[serde(flatten)]
    pub layout: LayoutOpts,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            layer_height: 0.6,
            radius_scale: 0.25,
            cross_sag: 0.05,
            layout: LayoutOpts::default(),
        }
    }
}

impl PlayerConfig {
    /// Parse a config from JSON and validate it.
    pub fn from_json_str(s: &str) -> StitchResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject settings that would produce non-finite or inverted geometry.
    pub fn validate(&self) -> StitchResult<()> {
        let positive = [
            ("layer_height", self.layer_height),
            ("radius_scale", self.radius_scale),
            ("yarn_thickness", self.layout.yarn_thickness),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(StitchError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        for (name, v) in [
            ("cross_sag", self.cross_sag),
            ("round_sag", self.layout.round_sag),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(StitchError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if self.layout.max_stitches == Some(0) {
            return Err(StitchError::validation("max_stitches must be > 0"));
        }
        Ok(())
    }

    /// Ring radius for a round of `stitch_count` stitches.
    ///
    /// Grows with the square root so stitch spacing stays roughly constant.
    pub fn radius_for(&self, stitch_count: u32) -> f64 {
        f64::from(stitch_count).sqrt() * self.radius_scale
    }

    /// Height of the round at 0-based `position`.
    pub fn height_for(&self, position: usize) -> f64 {
        position as f64 * self.layer_height
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/config.rs"]
mod tests;
