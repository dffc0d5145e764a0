use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};

use crate::{
    foundation::error::{StitchError, StitchResult},
    notation::parser::Pattern,
};

/// Key used by explicit saves.
pub const MANUAL_KEY: &str = "crochet-pattern";
/// Key written after every load and advance.
pub const AUTOSAVE_KEY: &str = "crochet-autosave";

/// Persisted form of a pattern.
///
/// Only counts and instruction text are kept; indices and flags are derived again on restore.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Snapshot {
    /// Rounds in order.
    pub pattern: Vec<SnapshotRound>,
    /// When the snapshot was taken (RFC 3339).
    pub timestamp: DateTime<Utc>,
    /// Rounds already built. Only auto-saves carry progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<usize>,
}

/// One persisted round.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SnapshotRound {
    /// Stitch count.
    pub stitches: u32,
    /// Instruction text.
    pub instruction: String,
}

impl Snapshot {
    /// Capture a pattern without progress.
    pub fn capture(pattern: &Pattern, timestamp: DateTime<Utc>) -> Self {
        Self {
            pattern: pattern
                .iter()
                .map(|r| SnapshotRound {
                    stitches: r.stitch_count,
                    instruction: r.source_text.clone(),
                })
                .collect(),
            timestamp,
            cursor: None,
        }
    }

    /// Attach build progress.
    pub fn with_cursor(mut self, cursor: usize) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Rebuild the pattern. Indices come from array position; the text is not parsed.
    pub fn to_pattern(&self) -> Pattern {
        Pattern::from_counts(
            self.pattern
                .iter()
                .map(|r| (r.stitches, r.instruction.as_str())),
        )
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> StitchResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse from JSON.
    pub fn from_json(s: &str) -> StitchResult<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Key/value storage for snapshots. Values are opaque JSON strings.
pub trait SnapshotStore {
    /// Store `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> StitchResult<()>;
    /// Read the value under `key`, `None` when nothing was stored.
    fn read(&self, key: &str) -> StitchResult<Option<String>>;
}

impl<T: SnapshotStore + ?Sized> SnapshotStore for Box<T> {
    fn write(&mut self, key: &str, value: &str) -> StitchResult<()> {
        (**self).write(key, value)
    }

    fn read(&self, key: &str) -> StitchResult<Option<String>> {
        (**self).read(key)
    }
}

/// Serialize and store a snapshot.
pub fn save_snapshot(
    store: &mut dyn SnapshotStore,
    key: &str,
    snapshot: &Snapshot,
) -> StitchResult<()> {
    store.write(key, &snapshot.to_json()?)
}

/// Load a snapshot, treating unreadable or corrupt data as absent.
pub fn load_snapshot(store: &dyn SnapshotStore, key: &str) -> Option<Snapshot> {
    let raw = match store.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key, "no snapshot stored");
            return None;
        }
        Err(err) => {
            tracing::warn!(key, %err, "snapshot unreadable, ignoring");
            return None;
        }
    };
    match Snapshot::from_json(&raw) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            tracing::warn!(key, %err, "snapshot corrupt, ignoring");
            None
        }
    }
}

/// In-memory store for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    fn write(&mut self, key: &str, value: &str) -> StitchResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn read(&self, key: &str) -> StitchResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }
}

/// Directory-backed store writing one `<key>.json` file per key.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Storage directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> StitchResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StitchError::persistence(format!(
                "invalid snapshot key '{key}'"
            )));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl SnapshotStore for FileStore {
    fn write(&mut self, key: &str, value: &str) -> StitchResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.root).map_err(|e| {
            StitchError::persistence(format!("create '{}': {e}", self.root.display()))
        })?;
        std::fs::write(&path, value)
            .map_err(|e| StitchError::persistence(format!("write '{}': {e}", path.display())))
    }

    fn read(&self, key: &str) -> StitchResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StitchError::persistence(format!(
                "read '{}': {e}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/snapshot.rs"]
mod tests;
