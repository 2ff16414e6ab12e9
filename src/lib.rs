//! # linesift
//!
//! Reduce a text file to a deduplicated, classified, searchable list of lines.
//!
//! ## Features
//!
//! - **Deduplication**: blank lines dropped, every distinct trimmed line kept once
//! - **Classification**: "basic" (example-like or very short) and "special"
//!   (likely secrets) flags from configurable prefixes and patterns
//! - **Fuzzy search**: typo-tolerant, ranked approximate matching
//! - **Filtering and sorting**: hide basic/special lines, sort A-Z
//! - **Masking**: special lines render masked unless revealed
//!
//! ## Usage
//!
//! ```bash
//! # Show every non-special line
//! linesift -i notes.txt
//!
//! # Search with a typo, include special lines (masked)
//! linesift -i .env -q pasword --show-special
//! ```
//!
//! ## Example
//!
//! ```rust
//! use linesift::classify::Classifier;
//! use linesift::cli::DedupOrder;
//! use linesift::search::FuzzyConfig;
//! use linesift::session::{Session, SessionConfig};
//! use linesift::view::QueryState;
//!
//! let mut session = Session::new(SessionConfig {
//!     classifier: Classifier::builtin().unwrap(),
//!     fuzzy: FuzzyConfig::default(),
//!     order: DedupOrder::FirstSeen,
//! });
//! session.load("password=123\npassword=123\nhello\ntest\n");
//!
//! let view = session.view(&QueryState::default());
//! let texts: Vec<&str> = view.iter().map(|line| line.text()).collect();
//! assert_eq!(texts, vec!["hello", "test"]);
//! ```

pub mod classify;
pub mod cli;
pub mod dedup;
pub mod encoding;
pub mod interactive;
pub mod line;
pub mod output;
pub mod progress;
pub mod search;
pub mod session;
pub mod view;

pub use classify::{Classification, Classifier, ClassifierConfig, PatternKind};
pub use cli::Args;
pub use line::{Line, LineSet};
pub use search::{FuzzyConfig, SearchIndex};
pub use session::{Session, SessionConfig, Snapshot};
pub use view::{view, QueryState};
