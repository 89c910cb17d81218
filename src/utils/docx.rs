//! DOCX paragraph extraction.
//!
//! A `.docx` file is a zip archive; the body lives in `word/document.xml`. Paragraph text is the
//! concatenation of its runs' `w:t` elements, with `w:tab` as `\t` and `w:br`/`w:cr` as `\n`.
//! Only direct children of `w:body` are returned: table cells, content controls and text boxes
//! are skipped.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Result;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;
use zip::ZipArchive;

use crate::error::ToolError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Open `path` as a word document and return its body paragraphs in order.
pub fn read_paragraphs(path: &Path) -> Result<Vec<String>> {
    let invalid = |reason: String| ToolError::InvalidDocument { path: path.to_path_buf(), reason };

    let file = File::open(path).map_err(|e| invalid(e.to_string()))?;
    let mut archive = ZipArchive::new(file).map_err(|e| invalid(e.to_string()))?;
    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| invalid(format!("{DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| invalid(format!("{DOCUMENT_PART}: {e}")))?;

    let paragraphs = parse_paragraphs(&xml).map_err(|e| invalid(e.to_string()))?;
    debug!(path = %path.display(), count = paragraphs.len(), "read paragraphs");
    Ok(paragraphs)
}

/// Paragraph texts of a `word/document.xml` body.
pub fn parse_paragraphs(xml: &str) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    // Local names of the open elements.
    let mut open: Vec<Vec<u8>> = Vec::new();
    // Some while inside a direct child paragraph of `w:body`.
    let mut current: Option<String> = None;
    // Paragraphs nested in the current one (text boxes).
    let mut nested = 0usize;
    let mut runs = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                match name.as_slice() {
                    b"p" if current.is_some() => nested += 1,
                    b"p" if parent_is_body(&open) => current = Some(String::new()),
                    b"r" => runs += 1,
                    b"t" if runs > 0 => in_text = true,
                    _ => {}
                }
                open.push(name);
            }
            Event::Empty(e) => {
                let collecting = nested == 0 && runs > 0;
                match (e.local_name().as_ref(), current.as_mut()) {
                    (b"p", None) if parent_is_body(&open) => paragraphs.push(String::new()),
                    (b"tab", Some(text)) if collecting => text.push('\t'),
                    (b"br" | b"cr", Some(text)) if collecting => text.push('\n'),
                    _ => {}
                }
            }
            Event::End(e) => {
                open.pop();
                match e.local_name().as_ref() {
                    b"p" if nested > 0 => nested -= 1,
                    b"p" => paragraphs.extend(current.take()),
                    b"r" => runs = runs.saturating_sub(1),
                    b"t" => in_text = false,
                    _ => {}
                }
            }
            Event::Text(t) if in_text && nested == 0 => {
                if let Some(text) = current.as_mut() {
                    text.push_str(&t.unescape()?);
                }
            }
            Event::CData(c) if in_text && nested == 0 => {
                if let Some(text) = current.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(paragraphs)
}

fn parent_is_body(open: &[Vec<u8>]) -> bool {
    open.last().map(|name| name.as_slice() == b"body").unwrap_or(false)
}
