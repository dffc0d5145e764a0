//! stitchform turns shorthand crochet patterns into connected 3D rounds.
//!
//! # Pipeline overview
//!
//! 1. **Normalize**: UK stitch names are rewritten to US ones ([`normalize`]).
//! 2. **Parse**: each non-blank line becomes a [`RoundDescriptor`] with a stitch count ([`parse`]).
//! 3. **Lay out**: a round is a ring of [`StitchAnchor`]s closed with [`YarnPath`]s
//!    ([`build_round`]).
//! 4. **Play**: a [`RoundPlayer`] builds one round per [`RoundPlayer::advance`], links it to the
//!    round below and auto-saves a [`Snapshot`] through a [`SnapshotStore`].
//!
//! Parsing and layout never fail: unknown text falls back to heuristics and degenerate rounds
//! (zero or one stitch) are valid geometry. Only persistence and configuration return
//! [`StitchError`].
//!
//! Everything here is plain data. A view layer renders [`RoundGeometry`] however it likes, for
//! instance through the [`render_svg`] export.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod export;
mod foundation;
mod geometry;
mod notation;
mod player;

pub use export::json::{pattern_from_json, pattern_to_json};
pub use export::svg::{Projection, SvgOpts, render_svg};
pub use foundation::core::{DVec3, Rgb8};
pub use foundation::error::{StitchError, StitchResult};
pub use geometry::round::{LayoutOpts, RoundGeometry, StitchAnchor, build_round, build_round_with};
pub use geometry::stitch::{Shape, StitchKind, StitchPart, StitchPrimitive, create_stitch};
pub use geometry::yarn::{DEFAULT_SAG, DEFAULT_THICKNESS, TUBE_SEGMENTS, YarnPath, connect};
pub use notation::hints::hint_for_line;
pub use notation::normalize::{Terminology, normalize};
pub use notation::parser::{
    CountRule, DEFAULT_FIRST_ROUND, Pattern, PatternSummary, RoundDescriptor, parse,
    resolve_count,
};
pub use player::config::PlayerConfig;
pub use player::round_player::{PlayerState, RoundPlayer, RoundTarget, link_to_previous};
pub use player::snapshot::{
    AUTOSAVE_KEY, FileStore, MANUAL_KEY, MemoryStore, Snapshot, SnapshotRound, SnapshotStore,
    load_snapshot, save_snapshot,
};
