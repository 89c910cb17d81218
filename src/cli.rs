use std::path::PathBuf;

use clap::Parser;

use crate::{extract, icons};

/// Pull adb command lines out of the voice-command notes document.
#[derive(Parser, Debug, Clone)]
#[command(name = "extract-commands", version)]
pub struct ExtractCli {
    /// Working directory; the document path, fallback directory and output are resolved against it.
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Primary document location.
    #[arg(long, default_value = extract::DEFAULT_DOCUMENT)]
    pub document: PathBuf,

    /// Directory scanned for a single .docx file when the primary document is missing.
    #[arg(long = "fallback-dir", default_value = extract::DEFAULT_FALLBACK_DIR)]
    pub fallback_dir: PathBuf,

    /// Output text file, one command per line.
    #[arg(long, default_value = extract::DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Increase diagnostic logging on stderr (-v, -vv, -vvv).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ExtractCli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn options(&self) -> extract::ExtractOptions {
        extract::ExtractOptions {
            root: self.dir.clone(),
            document: self.document.clone(),
            fallback_dir: self.fallback_dir.clone(),
            output: self.output.clone(),
        }
    }
}

/// Resize the app icon into every platform size and pack the Windows .ico.
#[derive(Parser, Debug, Clone)]
#[command(name = "gen-icons", version)]
pub struct IconsCli {
    /// Working directory holding the source image; outputs are written here.
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Square source image (ideally 1024x1024).
    #[arg(long, default_value = icons::SOURCE_FILE)]
    pub source: PathBuf,

    /// Multi-resolution icon container to write.
    #[arg(long, default_value = icons::CONTAINER_FILE)]
    pub container: PathBuf,

    /// Increase diagnostic logging on stderr (-v, -vv, -vvv).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl IconsCli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn options(&self) -> icons::IconOptions {
        icons::IconOptions {
            dir: self.dir.clone(),
            source: self.source.clone(),
            container: self.container.clone(),
        }
    }
}
