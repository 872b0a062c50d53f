//! Best-score leaderboard
//!
//! Persisted as a JSON object mapping player name to best score. Keeps the
//! top `TOP_N` players, one entry per name, best first.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::TOP_N;
use crate::persistence::{self, PersistError};

/// A single leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    pub score: u64,
}

/// Persisted key-value form of the leaderboard: name to score, best first.
///
/// Object order survives a save and reload, so tied scores keep their order.
pub type RankingDocument = serde_json::Map<String, serde_json::Value>;

/// Leaderboard, sorted descending by score
#[derive(Debug, Clone, Default)]
pub struct RankingStore {
    entries: Vec<RankingEntry>,
    /// Backing document; `None` keeps the store in memory only
    path: Option<PathBuf>,
}

impl RankingStore {
    /// Empty, in-memory leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the leaderboard backed by `path`, starting empty if it can't be read
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let mut store = Self {
            entries: Vec::new(),
            path: Some(path.into()),
        };
        store.reload();
        store
    }

    /// Re-read the backing document, replacing the in-memory entries.
    ///
    /// The entries are only replaced once a document has been read in full;
    /// otherwise the board in memory stays as it is. Nothing saved yet is
    /// expected, a corrupt document is worth a warning.
    pub fn reload(&mut self) {
        let Some(path) = self.path.clone() else {
            return;
        };
        match read_document(&path) {
            Ok(entries) => {
                self.entries = entries;
                self.sort_and_trim();
                log::info!("Loaded {} ranking entries", self.entries.len());
            }
            Err(PersistError::NotFound(_)) => {
                log::info!("No ranking at {}, keeping {} entries", path.display(), self.entries.len());
            }
            Err(e) => {
                log::warn!("Ignoring unreadable ranking: {e} ({})", source_of(&e));
            }
        }
    }

    /// Build a leaderboard from arbitrary rows (best score per name kept)
    pub fn from_entries(entries: impl IntoIterator<Item = (String, u64)>) -> Self {
        let mut store = Self::new();
        for (name, score) in entries {
            store.record(&name, score);
        }
        store
    }

    /// Record a finished run.
    ///
    /// Keeps the best score per name, then trims to the top `TOP_N`.
    /// Returns the player's rank (1-indexed) or `None` if they fell off the board.
    pub fn record(&mut self, name: &str, score: u64) -> Option<usize> {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.score = entry.score.max(score),
            None => self.entries.push(RankingEntry {
                name: name.to_string(),
                score,
            }),
        }
        self.sort_and_trim();
        self.rank_of(name)
    }

    /// Stable sort keeps earlier holders of a tied score ahead
    fn sort_and_trim(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(TOP_N);
    }

    /// Whether recording `score` for `name` would leave them on the board
    pub fn qualifies(&self, name: &str, score: u64) -> bool {
        if self.entries.iter().any(|e| e.name == name) || self.entries.len() < TOP_N {
            return true;
        }
        // A newcomer must beat the last place; ties keep the incumbent
        self.entries.last().is_some_and(|last| score > last.score)
    }

    /// Rank (1-indexed) of a player on the board
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name).map(|i| i + 1)
    }

    /// Best recorded score for a player on the board
    pub fn score_of(&self, name: &str) -> Option<u64> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.score)
    }

    /// Entries, best first
    pub fn entries(&self) -> &[RankingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Key-value form written to disk
    pub fn to_document(&self) -> RankingDocument {
        self.entries
            .iter()
            .map(|e| (e.name.clone(), serde_json::Value::from(e.score)))
            .collect()
    }

    /// Overwrite the backing document with the current entries
    pub fn save(&self) -> Result<(), PersistError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        persistence::write_json(path, &self.to_document())?;
        log::info!("Ranking saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Read the document at `path` in stored order; any non-score value makes it malformed
fn read_document(path: &Path) -> Result<Vec<RankingEntry>, PersistError> {
    let doc: RankingDocument = persistence::read_json(path)?;
    doc.into_iter()
        .map(|(name, value)| {
            let score = serde_json::from_value(value).map_err(|source| PersistError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(RankingEntry { name, score })
        })
        .collect()
}

fn source_of(err: &PersistError) -> String {
    std::error::Error::source(err)
        .map(|s| s.to_string())
        .unwrap_or_default()
}
