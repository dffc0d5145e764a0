use crate::{
    foundation::error::{StitchError, StitchResult},
    notation::parser::{Pattern, PatternSummary},
};

#[derive(serde::Serialize)]
struct PatternDocument<'a> {
    summary: PatternSummary,
    #[serde(flatten)]
    pattern: &'a Pattern,
}

/// Pretty JSON of the full descriptor sequence plus a summary block.
pub fn pattern_to_json(pattern: &Pattern) -> StitchResult<String> {
    let doc = PatternDocument {
        summary: pattern.summary(),
        pattern,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Read a pattern written by [`pattern_to_json`].
///
/// Round indices must run 1, 2, 3, ... with no gaps.
pub fn pattern_from_json(s: &str) -> StitchResult<Pattern> {
    let pattern: Pattern = serde_json::from_str(s)?;
    for (pos, round) in pattern.iter().enumerate() {
        if round.index != pos + 1 {
            return Err(StitchError::validation(format!(
                "round at position {pos} has index {} (expected {})",
                round.index,
                pos + 1
            )));
        }
    }
    Ok(pattern)
}

#[cfg(test)]
#[path = "../../tests/unit/export/json.rs"]
mod tests;
