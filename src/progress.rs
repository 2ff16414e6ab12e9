//! Console display module
//!
//! Provides styled messages, a loading spinner and the load statistics
//! summary.

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::dedup::DedupStats;
use crate::line::LineSet;

/// Print the application banner
pub fn print_banner() {
    let banner = r#"
╔══════════════════════════════════════════════════════════════╗
║   ██╗     ██╗███╗   ██╗███████╗███████╗██╗███████╗████████╗  ║
║   ██║     ██║████╗  ██║██╔════╝██╔════╝██║██╔════╝╚══██╔══╝  ║
║   ██║     ██║██╔██╗ ██║█████╗  ███████╗██║█████╗     ██║     ║
║   ██║     ██║██║╚██╗██║██╔══╝  ╚════██║██║██╔══╝     ██║     ║
║   ███████╗██║██║ ╚████║███████╗███████║██║██║        ██║     ║
║   ╚══════╝╚═╝╚═╝  ╚═══╝╚══════╝╚══════╝╚═╝╚═╝        ╚═╝     ║
║          Dedupe · Classify · Search · Mask       v1.0.0      ║
╚══════════════════════════════════════════════════════════════╝
"#;

    println!("{}", banner.green());
}

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    println!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Create a styled spinner for indeterminate progress
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();

    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
    {
        pb.set_style(style.tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "));
    }

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Summary of one file load
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub file_bytes: u64,
    pub encoding: &'static str,
    pub dedup: DedupStats,
    pub basic_lines: usize,
    pub special_lines: usize,
    pub elapsed: Duration,
}

impl LoadReport {
    /// Collect a report after loading `lines`
    pub fn new(
        file_bytes: u64,
        encoding: &'static str,
        dedup: DedupStats,
        lines: &LineSet,
        started: Instant,
    ) -> Self {
        Self {
            file_bytes,
            encoding,
            dedup,
            basic_lines: lines.count_basic(),
            special_lines: lines.count_special(),
            elapsed: started.elapsed(),
        }
    }

    /// Write final statistics to `out`
    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let rule = "═".repeat(60);

        writeln!(out)?;
        writeln!(out, "{}", rule.as_str().green())?;
        writeln!(out, "{}", "                        LOAD COMPLETE".green().bold())?;
        writeln!(out, "{}", rule.as_str().green())?;
        writeln!(out)?;

        writeln!(
            out,
            "  {} {} ({})",
            "File size:      ".green(),
            ByteSize(self.file_bytes),
            self.encoding
        )?;
        writeln!(
            out,
            "  {} {}",
            "Total lines:    ".green(),
            format_number(self.dedup.total_lines)
        )?;
        writeln!(
            out,
            "  {} {}",
            "Blank lines:    ".green(),
            format_number(self.dedup.blank_lines)
        )?;
        writeln!(
            out,
            "  {} {}",
            "Duplicates:     ".yellow(),
            format_number(self.dedup.duplicate_count)
        )?;
        writeln!(
            out,
            "  {} {}",
            "Unique lines:   ".green().bold(),
            format_number(self.dedup.unique_count).green().bold()
        )?;
        writeln!(
            out,
            "  {} {}",
            "Basic:          ".green(),
            format_number(self.basic_lines as u64)
        )?;
        writeln!(
            out,
            "  {} {}",
            "Special:        ".red(),
            format_number(self.special_lines as u64)
        )?;
        writeln!(out)?;
        writeln!(out, "  {} {}", "Duration:       ".green(), format_duration(self.elapsed))?;
        writeln!(out)?;
        writeln!(out, "{}", rule.as_str().green())
    }
}

/// Format a number with thousand separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();

    if millis < 1000 {
        format!("{}ms", millis)
    } else if duration.as_secs() < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
