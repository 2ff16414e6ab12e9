//! Interactive mode
//!
//! A line-oriented loop over a [`Session`]. Plain input replaces the query
//! and re-renders the view; commands start with `:`. A leading `::` searches
//! for text that itself starts with `:`.

use colored::*;
use std::io::{BufRead, Write};
use std::path::Path;
use std::time::Instant;

use crate::encoding::read_text;
use crate::output::{pick, render_view};
use crate::progress::LoadReport;
use crate::session::Session;
use crate::view::QueryState;

const HELP: &str = "\
Type to search (an empty line clears the query, ::text searches for :text). Commands:
  :sort       toggle A-Z sort
  :basic      toggle hiding basic lines
  :special    toggle hiding special lines
  :reveal     toggle unmasking special lines
  :copy N     print the raw text of entry N
  :load PATH  load another file (query and toggles are kept)
  :stats      show load statistics
  :clear      clear the query
  :help       show this help
  :quit       exit";

/// Whether the loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive state: the session plus the user's query and toggles
pub struct Interactive {
    session: Session,
    state: QueryState,
    reveal: bool,
    last_report: Option<LoadReport>,
}

impl Interactive {
    pub fn new(session: Session, state: QueryState, reveal: bool) -> Self {
        Self {
            session,
            state,
            reveal,
            last_report: None,
        }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn set_report(&mut self, report: LoadReport) {
        self.last_report = Some(report);
    }

    /// Run until `:quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> anyhow::Result<()> {
        writeln!(out, "{}", HELP.bright_black())?;
        self.render(out)?;
        self.prompt(out)?;

        for line in input.lines() {
            let line = line?;
            if self.handle(&line, out)? == Flow::Quit {
                break;
            }
            self.prompt(out)?;
        }

        Ok(())
    }

    /// Handle one input line
    pub fn handle<W: Write>(&mut self, input: &str, out: &mut W) -> anyhow::Result<Flow> {
        let input = input.trim_end_matches(['\r', '\n']);

        let command = match input.strip_prefix(':') {
            Some(command) if !command.starts_with(':') => command,
            // "::" escapes a query that starts with ':'
            Some(escaped) => return self.set_query(escaped, out),
            None => return self.set_query(input, out),
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        match name {
            "q" | "quit" | "exit" => return Ok(Flow::Quit),
            "sort" => {
                self.state.alphabetical_sort = !self.state.alphabetical_sort;
                self.render(out)?;
            }
            "basic" => {
                self.state.hide_basic = !self.state.hide_basic;
                self.render(out)?;
            }
            "special" => {
                self.state.hide_special = !self.state.hide_special;
                self.render(out)?;
            }
            "reveal" => {
                self.reveal = !self.reveal;
                self.render(out)?;
            }
            "clear" => {
                self.state.query.clear();
                self.render(out)?;
            }
            "copy" => self.copy(arg, out)?,
            "load" => self.load(Path::new(arg), out)?,
            "stats" => match self.last_report {
                Some(ref report) => report.write_summary(out)?,
                None => writeln!(out, "{}", "No statistics yet".yellow())?,
            },
            "help" | "h" | "?" => writeln!(out, "{}", HELP)?,
            other => writeln!(out, "{} :{} (try :help)", "Unknown command".red(), other)?,
        }

        Ok(Flow::Continue)
    }

    fn set_query<W: Write>(&mut self, query: &str, out: &mut W) -> anyhow::Result<Flow> {
        self.state.query = query.to_string();
        self.render(out)?;
        Ok(Flow::Continue)
    }

    fn copy<W: Write>(&self, arg: &str, out: &mut W) -> anyhow::Result<()> {
        let view = self.session.view(&self.state);
        let picked = arg
            .parse::<usize>()
            .map_err(|_| anyhow::anyhow!("Expected an entry number, got '{}'", arg))
            .and_then(|number| pick(&view, number));

        // Copy failures are only reported; nothing else changes
        match picked {
            Ok(text) => {
                writeln!(out, "{}", text)?;
                match self.session.lines().position(&text) {
                    Some(idx) => writeln!(
                        out,
                        "{} {}",
                        "Copied!".green(),
                        format!("(#{} in load order)", idx + 1).bright_black()
                    )?,
                    None => writeln!(out, "{}", "Copied!".green())?,
                }
            }
            Err(e) => writeln!(out, "{} {}", "Copy failed:".red(), e)?,
        }
        Ok(())
    }

    fn load<W: Write>(&mut self, path: &Path, out: &mut W) -> anyhow::Result<()> {
        if path.as_os_str().is_empty() {
            writeln!(out, "{}", "Usage: :load PATH".yellow())?;
            return Ok(());
        }

        let started = Instant::now();
        match read_text(path) {
            Ok(decoded) => {
                let stats = self.session.load(&decoded.text);
                self.last_report = Some(LoadReport::new(
                    decoded.byte_len,
                    decoded.encoding.name,
                    stats,
                    self.session.lines(),
                    started,
                ));
                self.render(out)?;
            }
            Err(e) => writeln!(out, "{} {:#}", "Load failed:".red(), e)?,
        }
        Ok(())
    }

    fn render<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        let view = self.session.view(&self.state);
        render_view(out, &view, self.reveal)?;

        let flags = [
            (self.state.alphabetical_sort, "sort"),
            (self.state.hide_basic, "hide-basic"),
            (self.state.hide_special, "hide-special"),
            (self.reveal, "reveal"),
        ]
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join(" ");

        let summary = format!(
            "{} of {} lines [{}]",
            view.len(),
            self.session.lines().len(),
            flags
        );
        writeln!(out, "{}", summary.bright_black())?;
        Ok(())
    }

    fn prompt<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        write!(out, "{} ", "search>".green().bold())?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use crate::cli::DedupOrder;
    use crate::search::FuzzyConfig;
    use crate::session::SessionConfig;
    use std::io::Cursor;

    fn interactive(text: &str) -> Interactive {
        let mut session = Session::new(SessionConfig {
            classifier: Classifier::builtin().unwrap(),
            fuzzy: FuzzyConfig::default(),
            order: DedupOrder::FirstSeen,
        });
        session.load(text);
        Interactive::new(session, QueryState::default(), false)
    }

    fn run(inter: &mut Interactive, commands: &str) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        inter.run(Cursor::new(commands.to_string()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_toggles_and_query() {
        let mut inter = interactive("alpha beta gamma\ntoken=abc\nshort");
        let mut out = Vec::new();

        inter.handle(":sort", &mut out).unwrap();
        inter.handle(":basic", &mut out).unwrap();
        inter.handle(":special", &mut out).unwrap();
        inter.handle("alpha", &mut out).unwrap();

        let state = inter.state();
        assert!(state.alphabetical_sort);
        assert!(state.hide_basic);
        assert!(!state.hide_special);
        assert_eq!(state.query, "alpha");

        inter.handle(":clear", &mut out).unwrap();
        assert!(inter.state().query.is_empty());
    }

    #[test]
    fn test_copy_prints_raw_text() {
        let mut inter = interactive("one two three\nsecret=hunter2");
        let output = run(&mut inter, ":special\n:copy 2\n:copy 9\n:quit\n:copy 1\n");

        assert!(output.contains("secret=hunter2\nCopied! (#2 in load order)"));
        assert!(output.contains("Copy failed: No entry 9"));
        assert!(!output.contains("one two three\nCopied!")); // stopped at :quit
    }

    #[test]
    fn test_special_lines_masked_until_revealed() {
        let mut inter = interactive("api_key=abcdef");
        let output = run(&mut inter, ":special\n");
        assert!(!output.contains("api_key=abcdef"));

        let output = run(&mut inter, ":reveal\n");
        assert!(output.contains("api_key=abcdef"));
    }

    #[test]
    fn test_load_keeps_query_state() {
        use std::io::Write as _;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fresh content line").unwrap();

        let mut inter = interactive("old content line");
        let mut out = Vec::new();
        inter.handle(":sort", &mut out).unwrap();
        inter
            .handle(&format!(":load {}", file.path().display()), &mut out)
            .unwrap();

        assert!(inter.state().alphabetical_sort);
        assert!(inter.session().lines().get("fresh content line").is_some());
        assert!(inter.session().lines().get("old content line").is_none());

        let output = {
            inter.handle(":load /definitely/not/here.txt", &mut out).unwrap();
            String::from_utf8(out).unwrap()
        };
        assert!(output.contains("Load failed:"));
        assert!(inter.session().lines().get("fresh content line").is_some());
    }

    #[test]
    fn test_unknown_command() {
        let mut inter = interactive("x y z w");
        let mut out = Vec::new();

        assert_eq!(inter.handle(":frobnicate", &mut out).unwrap(), Flow::Continue);
        assert_eq!(inter.handle(":q", &mut out).unwrap(), Flow::Quit);
    }

    #[test]
    fn test_copy_reports_load_position() {
        let mut inter = interactive("zulu yankee xray
alpha bravo charlie");
        let output = run(&mut inter, ":sort
:copy 1
");

        // First in sorted view, second in the file
        assert!(output.contains("alpha bravo charlie\nCopied! (#2 in load order)"));
    }

    #[test]
    fn test_double_colon_searches_literal_colon() {
        let mut inter = interactive("listen on :8080 now
port 8080 is closed");
        let mut out = Vec::new();

        assert_eq!(inter.handle("::8080", &mut out).unwrap(), Flow::Continue);
        assert_eq!(inter.state().query, ":8080");

        inter.handle("::quit", &mut out).unwrap();
        assert_eq!(inter.state().query, ":quit");
        assert_eq!(inter.handle(":quit", &mut out).unwrap(), Flow::Quit);
    }

    #[test]
    fn test_stats_written_to_output() {
        let mut inter = interactive("one two three
four five six");
        let output = run(&mut inter, ":stats
");
        assert!(output.contains("No statistics yet"));

        let report = LoadReport::new(
            27,
            "UTF-8",
            inter.session().last_stats(),
            inter.session().lines(),
            Instant::now(),
        );
        inter.set_report(report);

        let output = run(&mut inter, ":stats
");
        assert!(output.contains("LOAD COMPLETE"));
        assert!(output.contains("(UTF-8)"));
    }
}
