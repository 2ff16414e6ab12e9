//! Line and line-set types
//!
//! A [`Line`] is one unique, classified line of the loaded file. A [`LineSet`]
//! is the immutable, cheaply clonable collection of them for one load.

use ahash::RandomState;
use hashbrown::HashMap;
use std::borrow::Cow;
use std::sync::Arc;

use crate::classify::Classification;

/// Character used to mask sensitive lines
pub const MASK_CHAR: char = '\u{2022}';

/// One unique line with its precomputed flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    text: Arc<str>,
    basic: bool,
    special: bool,
}

impl Line {
    pub fn new(text: impl Into<Arc<str>>, class: Classification) -> Self {
        Self {
            text: text.into(),
            basic: class.basic,
            special: class.special,
        }
    }

    /// Raw, unmasked text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Shared handle to the text
    pub fn shared_text(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    pub fn is_basic(&self) -> bool {
        self.basic
    }

    pub fn is_special(&self) -> bool {
        self.special
    }

    /// Masked representation: one mask character per character of text
    pub fn masked(&self) -> String {
        std::iter::repeat(MASK_CHAR)
            .take(self.text.chars().count())
            .collect()
    }

    /// Text suitable for display; special lines are masked unless revealed
    pub fn display(&self, reveal: bool) -> Cow<'_, str> {
        if self.special && !reveal {
            Cow::Owned(self.masked())
        } else {
            Cow::Borrowed(&self.text)
        }
    }
}

/// Ordered, deduplicated lines of one loaded file
///
/// Cloning shares the underlying storage, so every viewer can hold its own
/// snapshot.
#[derive(Debug, Clone)]
pub struct LineSet {
    lines: Arc<[Line]>,
    positions: Arc<HashMap<Arc<str>, usize, RandomState>>,
}

impl LineSet {
    /// Build a line set; later entries with an already present text are ignored
    pub fn new(lines: Vec<Line>) -> Self {
        let mut positions: HashMap<Arc<str>, usize, RandomState> =
            HashMap::with_capacity_and_hasher(lines.len(), RandomState::new());
        let mut unique = Vec::with_capacity(lines.len());

        for line in lines {
            if positions.contains_key(line.text()) {
                log::debug!("Ignoring duplicate line in line set");
                continue;
            }
            positions.insert(line.shared_text(), unique.len());
            unique.push(line);
        }

        Self {
            lines: unique.into(),
            positions: Arc::new(positions),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn as_slice(&self) -> &[Line] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    /// Look up a line by its exact text
    pub fn get(&self, text: &str) -> Option<&Line> {
        self.positions.get(text).map(|&idx| &self.lines[idx])
    }

    /// Position of a line in set order
    pub fn position(&self, text: &str) -> Option<usize> {
        self.positions.get(text).copied()
    }

    pub fn count_basic(&self) -> usize {
        self.lines.iter().filter(|l| l.is_basic()).count()
    }

    pub fn count_special(&self) -> usize {
        self.lines.iter().filter(|l| l.is_special()).count()
    }
}

impl Default for LineSet {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<'a> IntoIterator for &'a LineSet {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
