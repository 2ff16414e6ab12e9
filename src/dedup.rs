//! Deduplication of raw file lines
//!
//! Turns the raw text of a file into unique, trimmed, classified [`Line`]s.
//! Two orderings are supported:
//! - FirstSeen: first occurrence wins and lines keep their first-seen order
//! - LatestFirst: reverse scan, the last occurrence wins and the most recent
//!   lines come first

use ahash::RandomState;
use hashbrown::HashSet;

use crate::classify::Classifier;
use crate::cli::DedupOrder;
use crate::line::Line;

/// Statistics for one deduplication pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DedupStats {
    /// Raw lines seen, including blank ones
    pub total_lines: u64,
    /// Blank or whitespace-only lines skipped
    pub blank_lines: u64,
    /// Unique lines kept
    pub unique_count: u64,
    /// Repeated lines dropped
    pub duplicate_count: u64,
}

impl DedupStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_blank(&mut self) {
        self.total_lines += 1;
        self.blank_lines += 1;
    }

    pub fn record_unique(&mut self) {
        self.total_lines += 1;
        self.unique_count += 1;
    }

    pub fn record_duplicate(&mut self) {
        self.total_lines += 1;
        self.duplicate_count += 1;
    }
}

/// Split text on `\n` only; carriage returns are left for trimming
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut start = 0;
    for pos in memchr::memchr_iter(b'\n', text.as_bytes()) {
        lines.push(&text[start..pos]);
        start = pos + 1;
    }
    lines.push(&text[start..]);
    lines
}

/// Deduplicate and classify a sequence of raw lines
pub fn dedupe<'a, I>(
    lines: I,
    classifier: &Classifier,
    order: DedupOrder,
) -> (Vec<Line>, DedupStats)
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: DoubleEndedIterator,
{
    let iter = lines.into_iter();
    match order {
        DedupOrder::FirstSeen => collect_unique(iter, classifier),
        DedupOrder::LatestFirst => collect_unique(iter.rev(), classifier),
    }
}

/// Deduplicate the lines of a whole text
pub fn dedupe_text(
    text: &str,
    classifier: &Classifier,
    order: DedupOrder,
) -> (Vec<Line>, DedupStats) {
    dedupe(split_lines(text), classifier, order)
}

fn collect_unique<'a, I>(lines: I, classifier: &Classifier) -> (Vec<Line>, DedupStats)
where
    I: Iterator<Item = &'a str>,
{
    let (lower, _) = lines.size_hint();
    let mut seen: HashSet<&str, RandomState> =
        HashSet::with_capacity_and_hasher(lower, RandomState::new());
    let mut unique = Vec::with_capacity(lower);
    let mut stats = DedupStats::new();

    for raw in lines {
        let text = raw.trim();
        if text.is_empty() {
            stats.record_blank();
            continue;
        }

        if seen.insert(text) {
            unique.push(Line::new(text, classifier.classify(text)));
            stats.record_unique();
        } else {
            stats.record_duplicate();
        }
    }

    log::debug!(
        "Deduplicated {} lines: {} unique, {} duplicates, {} blank",
        stats.total_lines,
        stats.unique_count,
        stats.duplicate_count,
        stats.blank_lines
    );

    (unique, stats)
}
