//! Filter-sort pipeline
//!
//! Produces the view list from a search index, its line set and the current
//! query state. Pure and cheap enough to run on every keystroke.

use std::cmp::Ordering;

use crate::line::{Line, LineSet};
use crate::search::SearchIndex;

/// User-controlled query and toggles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    /// Free-text fuzzy query; empty shows everything
    pub query: String,
    /// Drop lines flagged basic
    pub hide_basic: bool,
    /// Drop lines flagged special
    pub hide_special: bool,
    /// Sort alphabetically instead of by relevance / file order
    pub alphabetical_sort: bool,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            query: String::new(),
            hide_basic: false,
            hide_special: true,
            alphabetical_sort: false,
        }
    }
}

impl QueryState {
    /// Check whether a line survives the visibility toggles
    #[inline]
    pub fn is_visible(&self, line: &Line) -> bool {
        !(self.hide_basic && line.is_basic()) && !(self.hide_special && line.is_special())
    }
}

/// Compute the view list
///
/// Steps: search, drop hidden lines, then optionally sort. Search hits whose
/// text is no longer in `lines` are skipped.
pub fn view<'a>(index: &SearchIndex, lines: &'a LineSet, state: &QueryState) -> Vec<&'a Line> {
    let mut visible: Vec<&Line> = index
        .search(&state.query)
        .iter()
        .filter_map(|hit| lines.get(&hit.text))
        .filter(|line| state.is_visible(line))
        .collect();

    if state.alphabetical_sort {
        visible.sort_by(|a, b| collate(a.text(), b.text()));
    }

    visible
}

/// Locale-style comparison: case-insensitive first, lowercase before
/// uppercase on ties, raw text last
pub fn collate(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Classification, Classifier};
    use crate::cli::DedupOrder;
    use crate::dedup::dedupe_text;
    use crate::search::FuzzyConfig;
    use proptest::prelude::*;

    fn line(text: &str, basic: bool, special: bool) -> Line {
        Line::new(text, Classification { basic, special })
    }

    fn texts(view: &[&Line]) -> Vec<String> {
        view.iter().map(|l| l.text().to_string()).collect()
    }

    fn fixture() -> (LineSet, SearchIndex) {
        let set = LineSet::new(vec![
            line("zeta basic", true, false),
            line("Alpha secret", false, true),
            line("beta both", true, true),
            line("gamma plain", false, false),
        ]);
        let index = SearchIndex::build(set.as_slice(), FuzzyConfig::default());
        (set, index)
    }

    fn state(hide_basic: bool, hide_special: bool, sort: bool) -> QueryState {
        QueryState {
            query: String::new(),
            hide_basic,
            hide_special,
            alphabetical_sort: sort,
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let classifier = Classifier::builtin().unwrap();
        let (lines, _) = dedupe_text(
            "password=123\npassword=123\nhello\ntest",
            &classifier,
            DedupOrder::FirstSeen,
        );
        let set = LineSet::new(lines);
        let index = SearchIndex::build(set.as_slice(), FuzzyConfig::default());

        assert_eq!(set.len(), 3);
        assert!(set.get("password=123").unwrap().is_special());
        assert!(!set.get("hello").unwrap().is_special());
        assert!(set.get("test").unwrap().is_basic());

        let result = view(&index, &set, &state(false, true, false));
        assert_eq!(texts(&result), vec!["hello", "test"]);
    }

    #[test]
    fn test_hide_toggles() {
        let (set, index) = fixture();

        assert_eq!(view(&index, &set, &state(false, false, false)).len(), 4);
        assert_eq!(
            texts(&view(&index, &set, &state(true, false, false))),
            vec!["Alpha secret", "gamma plain"]
        );
        assert_eq!(
            texts(&view(&index, &set, &state(false, true, false))),
            vec!["zeta basic", "gamma plain"]
        );
        assert_eq!(texts(&view(&index, &set, &state(true, true, false))), vec!["gamma plain"]);
    }

    #[test]
    fn test_alphabetical_sort() {
        let (set, index) = fixture();

        let sorted = view(&index, &set, &state(false, false, true));
        assert_eq!(
            texts(&sorted),
            vec!["Alpha secret", "beta both", "gamma plain", "zeta basic"]
        );
    }

    #[test]
    fn test_default_state_hides_special() {
        let (set, index) = fixture();

        let result = view(&index, &set, &QueryState::default());
        assert_eq!(texts(&result), vec!["zeta basic", "gamma plain"]);
    }

    #[test]
    fn test_query_keeps_relevance_order() {
        let (set, index) = fixture();
        let query = QueryState {
            query: "gama".to_string(),
            ..state(false, false, false)
        };

        assert_eq!(texts(&view(&index, &set, &query)), vec!["gamma plain"]);
    }

    #[test]
    fn test_stale_index_entries_are_dropped() {
        let (_, stale_index) = fixture();
        let fresh = LineSet::new(vec![line("gamma plain", false, false)]);

        let result = view(&stale_index, &fresh, &state(false, false, false));
        assert_eq!(texts(&result), vec!["gamma plain"]);
    }

    #[test]
    fn test_collate() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("a", "A"), Ordering::Less);
        assert_eq!(collate("abc", "abc"), Ordering::Equal);
        assert_eq!(collate("ab", "abc"), Ordering::Less);
    }

    fn arb_lines() -> impl Strategy<Value = Vec<(String, bool, bool)>> {
        proptest::collection::vec(("[a-dA-D ]{1,6}", any::<bool>(), any::<bool>()), 0..30)
    }

    proptest! {
        #[test]
        fn filter_order_is_irrelevant(raw in arb_lines()) {
            let set = LineSet::new(raw.iter().map(|(t, b, s)| line(t, *b, *s)).collect());

            let basic_then_special: Vec<&Line> = set
                .iter()
                .filter(|l| !l.is_basic())
                .filter(|l| !l.is_special())
                .collect();
            let special_then_basic: Vec<&Line> = set
                .iter()
                .filter(|l| !l.is_special())
                .filter(|l| !l.is_basic())
                .collect();
            prop_assert_eq!(&basic_then_special, &special_then_basic);

            let index = SearchIndex::build(set.as_slice(), FuzzyConfig::default());
            let piped = view(&index, &set, &state(true, true, false));
            prop_assert_eq!(piped, basic_then_special);
        }

        #[test]
        fn sorting_is_idempotent(raw in arb_lines()) {
            let set = LineSet::new(raw.iter().map(|(t, b, s)| line(t, *b, *s)).collect());
            let index = SearchIndex::build(set.as_slice(), FuzzyConfig::default());

            let sorted = view(&index, &set, &state(false, false, true));
            let mut again = sorted.clone();
            again.sort_by(|a, b| collate(a.text(), b.text()));
            prop_assert_eq!(sorted, again);
        }

        #[test]
        fn empty_query_is_identity(raw in arb_lines()) {
            let set = LineSet::new(raw.iter().map(|(t, b, s)| line(t, *b, *s)).collect());
            let index = SearchIndex::build(set.as_slice(), FuzzyConfig::default());

            let all: Vec<&Line> = set.iter().collect();
            prop_assert_eq!(view(&index, &set, &state(false, false, false)), all);
        }
    }
}
