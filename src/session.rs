//! Loaded-file session
//!
//! Owns the current line set and its search index as one immutable
//! [`Snapshot`]. Loading a new file builds a fresh snapshot and swaps it in
//! wholesale; readers holding an older snapshot are unaffected.

use std::sync::Arc;

use crate::classify::Classifier;
use crate::cli::DedupOrder;
use crate::dedup::{dedupe_text, DedupStats};
use crate::line::{Line, LineSet};
use crate::search::{FuzzyConfig, SearchIndex};
use crate::view::{view, QueryState};

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub classifier: Classifier,
    pub fuzzy: FuzzyConfig,
    pub order: DedupOrder,
}

/// Immutable line set paired with the index built from it
#[derive(Debug, Clone)]
pub struct Snapshot {
    lines: LineSet,
    index: Arc<SearchIndex>,
}

impl Snapshot {
    /// Build a snapshot, indexing `lines` in their given order
    pub fn new(lines: LineSet, fuzzy: FuzzyConfig) -> Self {
        let index = Arc::new(SearchIndex::build(lines.as_slice(), fuzzy));
        Self { lines, index }
    }

    pub fn lines(&self) -> &LineSet {
        &self.lines
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    /// Compute the view list for `state`
    pub fn view(&self, state: &QueryState) -> Vec<&Line> {
        view(&self.index, &self.lines, state)
    }
}

/// Session holding the current snapshot
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    snapshot: Snapshot,
    last_stats: DedupStats,
}

impl Session {
    /// Create an empty session
    pub fn new(config: SessionConfig) -> Self {
        let snapshot = Snapshot::new(LineSet::default(), config.fuzzy.clone());
        Self {
            config,
            snapshot,
            last_stats: DedupStats::default(),
        }
    }

    /// Replace the current content with the lines of `text`
    pub fn load(&mut self, text: &str) -> DedupStats {
        let (lines, stats) = dedupe_text(text, &self.config.classifier, self.config.order);
        self.snapshot = Snapshot::new(LineSet::new(lines), self.config.fuzzy.clone());
        self.last_stats = stats;

        log::info!(
            "Loaded {} unique lines ({} basic, {} special)",
            self.snapshot.lines.len(),
            self.snapshot.lines.count_basic(),
            self.snapshot.lines.count_special()
        );

        stats
    }

    /// Current snapshot, cheap to clone and keep
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.clone()
    }

    pub fn lines(&self) -> &LineSet {
        &self.snapshot.lines
    }

    /// Statistics of the most recent load
    pub fn last_stats(&self) -> DedupStats {
        self.last_stats
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Compute the view list of the current snapshot
    pub fn view(&self, state: &QueryState) -> Vec<&Line> {
        self.snapshot.view(state)
    }
}
