//! Typed failures surfaced to the operator.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("document not found: {} (no .docx file in {})", .primary.display(), .fallback_dir.display())]
    DocumentNotFound { primary: PathBuf, fallback_dir: PathBuf },

    #[error("multiple .docx files in {}: {}", .dir.display(), join_names(.candidates))]
    AmbiguousDocument { dir: PathBuf, candidates: Vec<PathBuf> },

    #[error("'{}' is not a readable word document: {}", .path.display(), .reason)]
    InvalidDocument { path: PathBuf, reason: String },

    #[error("input file not found: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error("invalid icon size {side} for {file_name}")]
    InvalidSize { file_name: String, side: u32 },

    #[error("no frames available for icon container")]
    EmptyContainer,
}

fn join_names(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string())
        })
        .collect::<Vec<_>>()
        .join(", ")
}
