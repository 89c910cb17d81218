//! Command line extraction from the voice-command notes document.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::printer::Printer;
use crate::utils::{self, DocumentSource};

pub const DEFAULT_DOCUMENT: &str = "docs/语音常用命令.docx";
pub const DEFAULT_FALLBACK_DIR: &str = "docs";
pub const DEFAULT_OUTPUT: &str = "adb-commands-extracted.txt";

/// Substring that marks a line as an adb command.
pub const COMMAND_MARKER: &str = "adb";
/// Line prefixes kept as comments alongside the commands.
pub const COMMENT_PREFIXES: [&str; 2] = ["#", "//"];

/// One trimmed paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    text: String,
}

impl CommandLine {
    pub fn new(raw: &str) -> Self {
        Self { text: raw.trim().to_string() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Non-empty and either mentions the marker or starts with a comment prefix.
    pub fn is_candidate(&self) -> bool {
        !self.text.is_empty()
            && (self.text.contains(COMMAND_MARKER)
                || COMMENT_PREFIXES.iter().any(|p| self.text.starts_with(p)))
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Keep candidate lines in their original order.
pub fn filter_commands<I, S>(paragraphs: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    paragraphs
        .into_iter()
        .map(|p| CommandLine::new(p.as_ref()))
        .filter(CommandLine::is_candidate)
        .map(CommandLine::into_text)
        .collect()
}

/// Write one line per command, overwriting `path`.
pub fn write_commands(path: &Path, commands: &[String]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for cmd in commands {
        writeln!(out, "{}", cmd).with_context(|| format!("writing {}", path.display()))?;
    }
    out.flush().with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Working directory the other paths are relative to.
    pub root: PathBuf,
    pub document: PathBuf,
    pub fallback_dir: PathBuf,
    pub output: PathBuf,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            document: PathBuf::from(DEFAULT_DOCUMENT),
            fallback_dir: PathBuf::from(DEFAULT_FALLBACK_DIR),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExtractSummary {
    pub document: DocumentSource,
    pub commands: Vec<String>,
    pub output: PathBuf,
}

impl ExtractSummary {
    pub fn count(&self) -> usize {
        self.commands.len()
    }
}

/// Locate the document, filter its paragraphs and write the matches.
///
/// Fails before opening anything (and without creating the output) when no document is found.
pub fn run(opts: &ExtractOptions, printer: &Printer) -> Result<ExtractSummary> {
    let located = utils::locate_document(&opts.root, &opts.document, &opts.fallback_dir);
    if !matches!(located, Ok(DocumentSource::Primary(_))) {
        let primary = opts.root.join(&opts.document);
        printer.line(&format!("Document not found: {}", primary.display()));
        printer.line("Files in working directory:");
        for name in utils::list_entries(&opts.root) {
            printer.line(&format!("  {}", name));
        }
    }

    let document = located?;
    if let DocumentSource::Fallback(p) = &document {
        printer.line(&format!("Found document: {}", p.display()));
    }
    info!(path = %document.path().display(), "reading document");

    printer.line(&format!("Reading: {}", document.path().display()));
    printer.rule();

    let paragraphs = utils::read_paragraphs(document.path())?;
    let commands = filter_commands(&paragraphs);
    for cmd in &commands {
        printer.line(cmd);
    }
    debug!(paragraphs = paragraphs.len(), matched = commands.len(), "filtered paragraphs");

    let output = opts.root.join(&opts.output);
    write_commands(&output, &commands)?;

    printer.line("");
    printer.rule();
    printer.line(&format!("Extracted {} commands", commands.len()));
    printer.line(&format!("Saved to: {}", output.display()));

    Ok(ExtractSummary { document, commands, output })
}
