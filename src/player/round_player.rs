use std::sync::Arc;

use chrono::Utc;

use crate::{
    foundation::error::StitchResult,
    geometry::{
        round::{RoundGeometry, build_round_with},
        yarn::{YarnPath, connect},
    },
    notation::{
        normalize::{Terminology, normalize},
        parser::{Pattern, parse},
    },
    player::{
        config::PlayerConfig,
        snapshot::{
            AUTOSAVE_KEY, MANUAL_KEY, Snapshot, SnapshotStore, load_snapshot, save_snapshot,
        },
    },
};

/// Receives each round as soon as it is built.
///
/// This is where a view layer inserts the round into its scene.
pub trait RoundTarget {
    /// Called once per built round with its 0-based position.
    fn add_round(&mut self, position: usize, round: &RoundGeometry);
}

impl RoundTarget for () {
    fn add_round(&mut self, _position: usize, _round: &RoundGeometry) {}
}

impl RoundTarget for Vec<RoundGeometry> {
    fn add_round(&mut self, _position: usize, round: &RoundGeometry) {
        self.push(round.clone());
    }
}

/// Where playback stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    /// No pattern, or every round built.
    Idle,
    /// `next` is the 0-based position of the round `advance` builds.
    Ready {
        /// Next round to build.
        next: usize,
    },
}

/// Round-by-round playback of a pattern.
///
/// Calls take `&mut self` and run to completion, so two advances can never interleave.
pub struct RoundPlayer<S> {
    pattern: Arc<Pattern>,
    rounds: Vec<RoundGeometry>,
    config: PlayerConfig,
    store: S,
}

impl<S: SnapshotStore> RoundPlayer<S> {
    /// Player with an empty pattern.
    pub fn new(store: S, config: PlayerConfig) -> Self {
        Self {
            pattern: Arc::new(Pattern::default()),
            rounds: Vec::new(),
            config,
            store,
        }
    }

    /// Current pattern. Holders keep a valid copy across later loads.
    pub fn pattern(&self) -> &Arc<Pattern> {
        &self.pattern
    }

    /// Number of rounds built so far.
    pub fn cursor(&self) -> usize {
        self.rounds.len()
    }

    /// Rounds built so far, in order.
    pub fn rounds(&self) -> &[RoundGeometry] {
        &self.rounds
    }

    /// Playback settings.
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Backing snapshot store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give the store back.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Current state.
    pub fn state(&self) -> PlayerState {
        let next = self.cursor();
        if next < self.pattern.len() {
            PlayerState::Ready { next }
        } else {
            PlayerState::Idle
        }
    }

    /// Parse `text` into a fresh pattern and drop all built rounds.
    #[tracing::instrument(skip(self, text), fields(bytes = text.len()))]
    pub fn load_pattern(&mut self, text: &str, terms: Terminology) {
        let pattern = parse(&normalize(text, terms));
        tracing::info!(rounds = pattern.len(), "pattern loaded");
        self.replace_pattern(pattern);
        self.autosave();
    }

    /// Build the next round, link it to the previous one and hand it to `target`.
    ///
    /// Returns `None` without touching any state once every round is built.
    #[tracing::instrument(skip(self, target), fields(cursor = self.rounds.len()))]
    pub fn advance(&mut self, target: &mut dyn RoundTarget) -> Option<&RoundGeometry> {
        let position = self.step()?;
        self.autosave();
        let round = &self.rounds[position];
        target.add_round(position, round);
        Some(round)
    }

    /// Advance until the pattern is exhausted. Returns the number of rounds built.
    pub fn advance_all(&mut self, target: &mut dyn RoundTarget) -> usize {
        let mut built = 0;
        while self.advance(target).is_some() {
            built += 1;
        }
        built
    }

    /// Drop all built rounds, keeping the pattern.
    pub fn reset(&mut self) {
        self.rounds.clear();
        self.autosave();
    }

    /// Store the pattern, without progress, under the manual key.
    pub fn save(&mut self) -> StitchResult<()> {
        let snapshot = Snapshot::capture(&self.pattern, Utc::now());
        save_snapshot(&mut self.store, MANUAL_KEY, &snapshot)
    }

    /// Replace the pattern with the manually saved one.
    ///
    /// Falls back to the built-in ball when nothing usable is stored. Returns whether a snapshot
    /// was found.
    pub fn restore(&mut self) -> bool {
        let found = match load_snapshot(&self.store, MANUAL_KEY) {
            Some(snapshot) => {
                self.replace_pattern(snapshot.to_pattern());
                true
            }
            None => {
                tracing::info!("no saved pattern, using default");
                self.replace_pattern(Pattern::default_ball());
                false
            }
        };
        self.autosave();
        found
    }

    /// Resume the last auto-saved session, rebuilding the rounds it had reached.
    ///
    /// Rebuilt rounds are handed to `target` in order. Leaves the player untouched and returns
    /// `false` when there is no usable auto-save.
    pub fn recover(&mut self, target: &mut dyn RoundTarget) -> bool {
        let Some(snapshot) = load_snapshot(&self.store, AUTOSAVE_KEY) else {
            return false;
        };
        self.replace_pattern(snapshot.to_pattern());
        let wanted = snapshot.cursor.unwrap_or(0).min(self.pattern.len());
        while self.cursor() < wanted {
            let Some(position) = self.step() else {
                break;
            };
            target.add_round(position, &self.rounds[position]);
        }
        tracing::info!(rounds = self.cursor(), "session recovered");
        true
    }

    fn replace_pattern(&mut self, pattern: Pattern) {
        self.pattern = Arc::new(pattern);
        self.rounds.clear();
    }

    // Build and append the round at the cursor; returns its position.
    fn step(&mut self) -> Option<usize> {
        let position = self.cursor();
        let descriptor = self.pattern.get(position)?;

        let mut round = build_round_with(
            descriptor.stitch_count,
            self.config.radius_for(descriptor.stitch_count),
            self.config.height_for(position),
            &self.config.layout,
        );
        if let Some(previous) = self.rounds.last() {
            let links = link_to_previous(
                previous,
                &round,
                self.config.cross_sag,
                self.config.layout.yarn_thickness,
            );
            round.attach_cross_round(links);
        }

        tracing::debug!(
            round = descriptor.index,
            stitches = round.stitch_count(),
            links = round.cross_round().len(),
            "round built"
        );
        self.rounds.push(round);
        Some(position)
    }

    fn autosave(&mut self) {
        let snapshot = Snapshot::capture(&self.pattern, Utc::now()).with_cursor(self.cursor());
        if let Err(err) = save_snapshot(&mut self.store, AUTOSAVE_KEY, &snapshot) {
            tracing::warn!(%err, "auto-save failed");
        }
    }
}

/// Link every stitch of `next` to stitch `i mod prev_count` of `previous`.
///
/// A wider round fans several stitches into one below; equal rounds link one to one. Nothing is
/// linked when `previous` is empty.
pub fn link_to_previous(
    previous: &RoundGeometry,
    next: &RoundGeometry,
    sag: f64,
    thickness: f64,
) -> Vec<YarnPath> {
    let below = previous.anchors();
    if below.is_empty() {
        return Vec::new();
    }
    next.positions()
        .enumerate()
        .map(|(i, p)| connect(below[i % below.len()].position, p, sag).with_thickness(thickness))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/player/round_player.rs"]
mod tests;
