//! Fuzzy search index
//!
//! Approximate substring matching over line texts. For every indexed line the
//! query is aligned against the best-matching substring using edit distance
//! (insertions, deletions and substitutions). The score is
//!
//! ```text
//! errors / query_len + |match_start - location| / distance
//! ```
//!
//! Lower is better; a line matches when its score is at most the threshold.

use std::sync::Arc;

use crate::line::Line;

/// Default match threshold (0.0 = exact only, 1.0 = anything)
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Default distance over which a match drifting from `location` costs 1.0
pub const DEFAULT_DISTANCE: usize = 100;

/// Fuzzy matching configuration
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyConfig {
    /// Maximum accepted score
    pub threshold: f64,
    /// Character position where matches are expected to start
    pub location: usize,
    /// How far from `location` a match may drift before it costs a full point
    pub distance: usize,
    /// Ignore the location penalty entirely
    pub ignore_location: bool,
    /// Compare characters exactly instead of case-folded
    pub case_sensitive: bool,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            location: 0,
            distance: DEFAULT_DISTANCE,
            ignore_location: false,
            case_sensitive: false,
        }
    }
}

impl FuzzyConfig {
    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            anyhow::bail!("Threshold must be between 0.0 and 1.0, got {}", self.threshold);
        }
        Ok(())
    }

    /// Penalty for a match starting at `start`
    fn location_penalty(&self, start: usize) -> f64 {
        if self.ignore_location {
            return 0.0;
        }

        let proximity = start.abs_diff(self.location);
        if self.distance == 0 {
            return if proximity == 0 { 0.0 } else { 1.0 };
        }
        proximity as f64 / self.distance as f64
    }
}

/// One ranked search result
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// Text of the matched line
    pub text: Arc<str>,
    /// Position of the line in index order
    pub position: usize,
    /// Match score (0.0 is a perfect match)
    pub score: f64,
}

#[derive(Debug)]
struct IndexEntry {
    text: Arc<str>,
    chars: Vec<char>,
}

/// Search index over the texts of a line set
#[derive(Debug)]
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
    config: FuzzyConfig,
}

impl SearchIndex {
    /// Build an index over `lines`, keeping their order
    pub fn build(lines: &[Line], config: FuzzyConfig) -> Self {
        let entries = lines
            .iter()
            .map(|line| IndexEntry {
                text: line.shared_text(),
                chars: fold(line.text(), config.case_sensitive),
            })
            .collect();

        Self { entries, config }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn config(&self) -> &FuzzyConfig {
        &self.config
    }

    /// Search the index
    ///
    /// An empty query returns every entry in index order. Otherwise hits are
    /// ranked by ascending score; equal scores keep index order.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        if query.is_empty() {
            return self
                .entries
                .iter()
                .enumerate()
                .map(|(position, entry)| SearchHit {
                    text: Arc::clone(&entry.text),
                    position,
                    score: 0.0,
                })
                .collect();
        }

        let pattern = fold(query, self.config.case_sensitive);
        let mut scratch = Scratch::default();
        let mut hits = Vec::new();

        for (position, entry) in self.entries.iter().enumerate() {
            let Some(score) = match_score(&pattern, &entry.chars, &self.config, &mut scratch)
            else {
                continue;
            };
            hits.push(SearchHit {
                text: Arc::clone(&entry.text),
                position,
                score,
            });
        }

        hits.sort_by(|a, b| a.score.total_cmp(&b.score));
        hits
    }
}

fn fold(text: &str, case_sensitive: bool) -> Vec<char> {
    if case_sensitive {
        text.chars().collect()
    } else {
        text.chars().flat_map(char::to_lowercase).collect()
    }
}

/// Edit-distance rows reused across the entries of one search
#[derive(Debug, Default)]
struct Scratch {
    prev: Vec<usize>,
    prev_start: Vec<usize>,
    cur: Vec<usize>,
    cur_start: Vec<usize>,
}

impl Scratch {
    fn reset(&mut self, n: usize) {
        self.prev.clear();
        self.prev.resize(n + 1, 0);
        self.prev_start.clear();
        self.prev_start.extend(0..=n);
        self.cur.clear();
        self.cur.resize(n + 1, 0);
        self.cur_start.clear();
        self.cur_start.resize(n + 1, 0);
    }
}

/// Most edits a match of `m` pattern chars may contain
fn max_errors(m: usize, config: &FuzzyConfig) -> usize {
    (config.threshold * m as f64).floor() as usize
}

/// Number of leading text chars that can hold an accepted match
///
/// A match starting more than `threshold * distance` chars past `location`
/// scores above the threshold on its location penalty alone, and a match is
/// at most `m + max_errors` chars long.
fn scan_limit(m: usize, n: usize, config: &FuzzyConfig) -> usize {
    if config.ignore_location {
        return n;
    }

    let max_drift = if config.distance == 0 {
        // Any drift costs a full point, which only a threshold of 1.0 accepts
        if config.threshold >= 1.0 {
            return n;
        }
        0
    } else {
        (config.threshold * config.distance as f64).floor() as usize + 1
    };

    n.min(config.location + max_drift + m + max_errors(m, config))
}

/// Best score of `pattern` against any substring of `text`, if within threshold
fn match_score(
    pattern: &[char],
    text: &[char],
    config: &FuzzyConfig,
    scratch: &mut Scratch,
) -> Option<f64> {
    let limit = scan_limit(pattern.len(), text.len(), config);
    score_window(pattern, &text[..limit], config, scratch)
}

fn score_window(
    pattern: &[char],
    text: &[char],
    config: &FuzzyConfig,
    scratch: &mut Scratch,
) -> Option<f64> {
    let m = pattern.len();
    if m == 0 {
        return Some(0.0);
    }

    let max_errors = max_errors(m, config);
    let n = text.len();

    // Row i holds, for every end position j, the fewest edits aligning the
    // first i pattern chars to a substring ending at j, and where it starts.
    scratch.reset(n);
    let Scratch {
        prev,
        prev_start,
        cur,
        cur_start,
    } = scratch;

    for i in 1..=m {
        cur[0] = i;
        cur_start[0] = 0;
        let mut row_min = cur[0];

        for j in 1..=n {
            let cost = usize::from(pattern[i - 1] != text[j - 1]);
            let mut best = prev[j - 1] + cost;
            let mut start = prev_start[j - 1];

            if prev[j] + 1 < best {
                best = prev[j] + 1;
                start = prev_start[j];
            }
            if cur[j - 1] + 1 < best {
                best = cur[j - 1] + 1;
                start = cur_start[j - 1];
            }

            cur[j] = best;
            cur_start[j] = start;
            row_min = row_min.min(best);
        }

        if row_min > max_errors {
            return None;
        }

        std::mem::swap(prev, cur);
        std::mem::swap(prev_start, cur_start);
    }

    (0..=n)
        .filter(|&j| prev[j] <= max_errors)
        .map(|j| prev[j] as f64 / m as f64 + config.location_penalty(prev_start[j]))
        .filter(|&score| score <= config.threshold)
        .min_by(f64::total_cmp)
}
