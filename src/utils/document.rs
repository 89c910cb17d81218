//! Locating the notes document on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ToolError;

/// Where the document was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Primary(PathBuf),
    /// Sole `.docx` file of the fallback directory.
    Fallback(PathBuf),
}

impl DocumentSource {
    pub fn path(&self) -> &Path {
        match self {
            DocumentSource::Primary(p) | DocumentSource::Fallback(p) => p,
        }
    }
}

/// Resolve the document to read. Only checks metadata and lists directories; nothing is opened.
///
/// `primary` and `fallback_dir` are taken relative to `root`. When the primary file is absent the
/// fallback directory must contain exactly one `.docx` candidate.
pub fn locate_document(
    root: &Path,
    primary: &Path,
    fallback_dir: &Path,
) -> Result<DocumentSource, ToolError> {
    let primary_path = root.join(primary);
    if primary_path.is_file() {
        return Ok(DocumentSource::Primary(primary_path));
    }
    debug!(path = %primary_path.display(), "primary document missing");

    let dir = root.join(fallback_dir);
    let mut candidates = docx_candidates(&dir);
    match candidates.len() {
        0 => Err(ToolError::DocumentNotFound { primary: primary_path, fallback_dir: dir }),
        1 => Ok(DocumentSource::Fallback(candidates.remove(0))),
        _ => Err(ToolError::AmbiguousDocument { dir, candidates }),
    }
}

/// `.docx` files directly inside `dir`, sorted. Word lock files (`~$name.docx`) are skipped.
fn docx_candidates(dir: &Path) -> Vec<PathBuf> {
    let Ok(rd) = fs::read_dir(dir) else {
        debug!(dir = %dir.display(), "fallback directory unreadable");
        return Vec::new();
    };
    let mut out: Vec<PathBuf> = rd
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            let is_docx = p
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("docx"))
                .unwrap_or(false);
            let is_lock = p
                .file_name()
                .map(|n| n.to_string_lossy().starts_with("~$"))
                .unwrap_or(false);
            is_docx && !is_lock
        })
        .collect();
    out.sort();
    out
}

/// Names of the entries in `dir`, sorted. Unreadable directories yield an empty list.
pub fn list_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map(|rd| {
            rd.filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
