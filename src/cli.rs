//! Command-line interface definition for linesift
//!
//! Provides argument parsing and conversion into the typed configurations
//! used by the line pipeline.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::classify::{ClassifierConfig, PatternKind};
use crate::search::FuzzyConfig;
use crate::view::QueryState;

/// Deduplicate, classify and fuzzy-search the lines of a text file
///
/// Sensitive-looking lines are hidden by default and masked when shown.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "linesift",
    author = "m0h1nd4",
    version,
    about = "Deduplicate, classify and fuzzy-search the lines of a text file",
    long_about = r#"
Load a text file, drop blank and duplicate lines, flag "basic" lines
(example-like or very short) and "special" lines (likely secrets), then
search, filter and sort what is left. Special lines are masked unless
--reveal is given.

EXAMPLES:
    # Show every non-special line in file order
    linesift -i notes.txt

    # Fuzzy search, tolerant of typos
    linesift -i .env.example -q pasword --show-special

    # Hide trivial lines and sort A-Z
    linesift -i app.log --hide-basic --sort

    # Print the raw text of the third entry (for piping into a clipboard tool)
    linesift -i creds.txt --show-special --copy 3

    # Interactive mode
    linesift -i notes.txt --interactive

RULES FILE FORMAT (one rule per line, '#' starts a comment):
    prefix: TODO              - lines starting with TODO are basic
    tokens: 3                 - lines with <= 3 tokens are basic
    regex: ^export \w+=       - case-sensitive regex marks special
    iregex: bearer\s+\S+      - case-insensitive regex marks special
    literal: BEGIN PRIVATE    - substring marks special
"#
)]
pub struct Args {
    /// Input text file
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Fuzzy search query (empty shows every line)
    #[arg(short, long, value_name = "TEXT", default_value = "")]
    pub query: String,

    /// Hide basic lines
    #[arg(long, default_value_t = false)]
    pub hide_basic: bool,

    /// Show special lines (hidden by default)
    #[arg(long, default_value_t = false)]
    pub show_special: bool,

    /// Sort output alphabetically
    #[arg(long, default_value_t = false)]
    pub sort: bool,

    /// Print special lines unmasked
    #[arg(long, default_value_t = false)]
    pub reveal: bool,

    /// Fuzzy match threshold (0.0 = exact, 1.0 = match anything)
    #[arg(long, value_name = "F", default_value_t = crate::search::DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// Do not penalise matches far from the start of a line
    #[arg(long, default_value_t = false)]
    pub ignore_location: bool,

    /// Case-sensitive fuzzy matching
    #[arg(long, default_value_t = false)]
    pub case_sensitive: bool,

    /// Order of deduplicated lines
    #[arg(long, value_enum, default_value_t = DedupOrder::FirstSeen)]
    pub order: DedupOrder,

    /// Additional classification rules file
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Start from an empty rule set instead of the built-in rules
    #[arg(long, default_value_t = false)]
    pub no_default_rules: bool,

    /// Extra basic prefixes (comma separated, repeatable)
    #[arg(long, value_name = "PREFIX", value_delimiter = ',')]
    pub basic_prefix: Vec<String>,

    /// Extra special regex patterns (repeatable)
    #[arg(long, value_name = "REGEX")]
    pub special_regex: Vec<String>,

    /// Extra special literal substrings (repeatable)
    #[arg(long, value_name = "TEXT")]
    pub special_literal: Vec<String>,

    /// Lines with at most this many tokens are basic
    #[arg(long, value_name = "NUM")]
    pub max_basic_tokens: Option<usize>,

    /// Print only the raw text of the N-th (1-based) entry
    #[arg(long, value_name = "N")]
    pub copy: Option<usize>,

    /// Write the view to a file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Interactive mode
    #[arg(long, default_value_t = false)]
    pub interactive: bool,

    /// Show load statistics
    #[arg(long, default_value_t = false)]
    pub stats: bool,

    /// Quiet mode - only the lines themselves
    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Order of the deduplicated lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DedupOrder {
    /// First occurrence wins, file order
    #[default]
    FirstSeen,
    /// Last occurrence wins, most recent first
    LatestFirst,
}

impl Args {
    /// Initial query state from the toggles
    pub fn query_state(&self) -> QueryState {
        QueryState {
            query: self.query.clone(),
            hide_basic: self.hide_basic,
            hide_special: !self.show_special,
            alphabetical_sort: self.sort,
        }
    }

    /// Build the classifier configuration from defaults, flags and rules file
    pub fn classifier_config(&self) -> anyhow::Result<ClassifierConfig> {
        let mut config = if self.no_default_rules {
            ClassifierConfig::empty()
        } else {
            ClassifierConfig::builtin()?
        };

        if let Some(ref path) = self.rules {
            config.load_rules(path)?;
        }

        config.basic_prefixes.extend(
            self.basic_prefix
                .iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
        );

        for pattern in &self.special_regex {
            config.special_patterns.push(PatternKind::regex(pattern)?);
        }

        config.special_patterns.extend(
            self.special_literal
                .iter()
                .filter(|s| !s.is_empty())
                .map(|s| PatternKind::literal(s.as_str())),
        );

        if let Some(tokens) = self.max_basic_tokens {
            config.max_basic_tokens = tokens;
        }

        Ok(config)
    }

    /// Build and validate the fuzzy search configuration
    pub fn fuzzy_config(&self) -> anyhow::Result<FuzzyConfig> {
        let config = FuzzyConfig {
            threshold: self.threshold,
            ignore_location: self.ignore_location,
            case_sensitive: self.case_sensitive,
            ..FuzzyConfig::default()
        };
        config.validate()?;
        Ok(config)
    }
}
