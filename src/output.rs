//! Output management module
//!
//! Renders view lists to the terminal with masking and writes exported views
//! to files with buffering.

use colored::*;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::line::Line;

/// Default buffer size for file writing (1MB)
const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// Output file writer with buffering
pub struct OutputWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    lines_written: u64,
    bytes_written: u64,
}

impl OutputWriter {
    /// Create a new output writer, truncating any existing file
    pub fn new(path: PathBuf) -> anyhow::Result<Self> {
        Self::with_capacity(path, DEFAULT_BUFFER_SIZE)
    }

    pub fn with_capacity(path: PathBuf, buffer_size: usize) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            ensure_output_dir(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;

        Ok(Self {
            writer: BufWriter::with_capacity(buffer_size, file),
            path,
            lines_written: 0,
            bytes_written: 0,
        })
    }

    /// Write a line to the output
    pub fn write_line(&mut self, line: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", line)?;
        self.lines_written += 1;
        self.bytes_written += line.len() as u64 + 1; // +1 for newline
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

impl Drop for OutputWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Export a view list to `path`, masking special lines unless `reveal`
pub fn export_view(path: &Path, lines: &[&Line], reveal: bool) -> anyhow::Result<u64> {
    let mut writer = OutputWriter::new(path.to_path_buf())?;
    for line in lines {
        writer.write_line(&line.display(reveal))?;
    }
    writer.flush()?;

    log::debug!(
        "Exported {} lines ({} bytes) to {:?}",
        writer.lines_written(),
        writer.bytes_written(),
        writer.path()
    );
    Ok(writer.lines_written())
}

/// Render a view list as numbered rows
///
/// Special lines are masked unless `reveal` is set and are tagged so the
/// masking is visible even when revealed.
pub fn render_view<W: Write>(out: &mut W, lines: &[&Line], reveal: bool) -> std::io::Result<()> {
    let width = lines.len().to_string().len();

    for (idx, line) in lines.iter().enumerate() {
        let number = format!("{:>width$}", idx + 1, width = width);
        let display = line.display(reveal);
        let text: &str = &display;

        let tag = match (line.is_special(), line.is_basic()) {
            (true, _) => "S".red().bold(),
            (false, true) => "B".bright_black(),
            (false, false) => " ".normal(),
        };

        let text = if line.is_special() {
            text.yellow()
        } else if line.is_basic() {
            text.bright_black()
        } else {
            text.normal()
        };

        writeln!(out, "  {} {} {}", number.as_str().green(), tag, text)?;
    }

    Ok(())
}

/// Raw text of the 1-based `number`-th entry of a view list
pub fn pick(lines: &[&Line], number: usize) -> anyhow::Result<String> {
    number
        .checked_sub(1)
        .and_then(|idx| lines.get(idx))
        .map(|line| line.text().to_string())
        .ok_or_else(|| anyhow::anyhow!("No entry {} (view has {} lines)", number, lines.len()))
}

/// Ensure output directory exists
pub fn ensure_output_dir(path: &Path) -> anyhow::Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
