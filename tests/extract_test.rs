use anyhow::Result;
use asset_scripts::extract::{self, ExtractOptions};
use asset_scripts::printer::Printer;
use asset_scripts::utils::{read_paragraphs, DocumentSource};
use asset_scripts::ToolError;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

fn paragraph(text: &str) -> String {
    format!(r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#, text)
}

/// Minimal word document: the body part is all the reader needs.
fn write_docx(path: &Path, paragraphs: &[&str]) -> Result<()> {
    fs::create_dir_all(path.parent().unwrap())?;
    let body: String = paragraphs.iter().map(|p| paragraph(p)).collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
        body
    );
    let mut zip = zip::ZipWriter::new(File::create(path)?);
    zip.start_file("[Content_Types].xml", SimpleFileOptions::default())?;
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#)?;
    zip.start_file("word/document.xml", SimpleFileOptions::default())?;
    zip.write_all(xml.as_bytes())?;
    zip.finish()?;
    Ok(())
}

fn options(tmp: &TempDir) -> ExtractOptions {
    ExtractOptions { root: tmp.path().to_path_buf(), ..ExtractOptions::default() }
}

const SAMPLE: [&str; 5] = ["adb devices", "hello", "# note", "// comment", "  "];

#[test]
fn test_extracts_candidates_in_order() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let opts = options(&tmp);
    write_docx(&tmp.path().join(&opts.document), &SAMPLE)?;

    let summary = extract::run(&opts, &Printer::plain())?;

    assert_eq!(summary.count(), 3);
    assert!(matches!(summary.document, DocumentSource::Primary(_)));
    let written = fs::read_to_string(tmp.path().join("adb-commands-extracted.txt"))?;
    assert_eq!(written.lines().collect::<Vec<_>>(), vec!["adb devices", "# note", "// comment"]);
    Ok(())
}

#[test]
fn test_reads_paragraphs_verbatim() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("notes.docx");
    write_docx(&path, &["adb shell pm list packages", "  indented  ", "a &amp; b"])?;
    assert_eq!(
        read_paragraphs(&path)?,
        vec!["adb shell pm list packages", "  indented  ", "a & b"]
    );
    Ok(())
}

#[test]
fn test_single_fallback_document_used() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let opts = options(&tmp);
    let other = tmp.path().join("docs").join("commands.docx");
    write_docx(&other, &["adb reboot", "plain text"])?;

    let summary = extract::run(&opts, &Printer::plain())?;

    assert_eq!(summary.document, DocumentSource::Fallback(other));
    assert_eq!(summary.commands, vec!["adb reboot"]);
    // output stays in the working directory, not the fallback directory
    assert!(tmp.path().join("adb-commands-extracted.txt").is_file());
    assert!(!tmp.path().join("docs").join("adb-commands-extracted.txt").exists());
    Ok(())
}

#[test]
fn test_no_document_creates_no_output() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    fs::create_dir_all(tmp.path().join("docs"))?;
    fs::write(tmp.path().join("docs").join("readme.txt"), "adb devices")?;

    let err = extract::run(&options(&tmp), &Printer::plain()).unwrap_err();

    assert!(matches!(err.downcast_ref::<ToolError>(), Some(ToolError::DocumentNotFound { .. })));
    assert!(!tmp.path().join("adb-commands-extracted.txt").exists());
    Ok(())
}

#[test]
fn test_ambiguous_fallback_is_an_error() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    write_docx(&tmp.path().join("docs").join("a.docx"), &["adb a"])?;
    write_docx(&tmp.path().join("docs").join("b.docx"), &["adb b"])?;

    let err = extract::run(&options(&tmp), &Printer::plain()).unwrap_err();

    assert!(matches!(err.downcast_ref::<ToolError>(), Some(ToolError::AmbiguousDocument { .. })));
    assert!(!tmp.path().join("adb-commands-extracted.txt").exists());
    Ok(())
}

#[test]
fn test_corrupt_document_reports_invalid() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let opts = options(&tmp);
    let path = tmp.path().join(&opts.document);
    fs::create_dir_all(path.parent().unwrap())?;
    fs::write(&path, b"PK\x03\x04 definitely not a zip")?;

    let err = extract::run(&opts, &Printer::plain()).unwrap_err();

    assert!(matches!(err.downcast_ref::<ToolError>(), Some(ToolError::InvalidDocument { .. })));
    Ok(())
}

#[test]
fn test_rerun_overwrites_output() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let opts = options(&tmp);
    let doc = tmp.path().join(&opts.document);
    write_docx(&doc, &["adb one", "adb two"])?;
    extract::run(&opts, &Printer::plain())?;

    write_docx(&doc, &["# only"])?;
    let summary = extract::run(&opts, &Printer::plain())?;

    assert_eq!(summary.count(), 1);
    assert_eq!(fs::read_to_string(&summary.output)?, "# only\n");
    Ok(())
}

#[test]
fn test_primary_document_skips_fallback_scan() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let opts = options(&tmp);
    let primary = tmp.path().join(&opts.document);
    write_docx(&primary, &["adb primary"])?;
    // would be ambiguous if the fallback directory were consulted
    write_docx(&tmp.path().join("docs").join("a.docx"), &["adb a"])?;
    write_docx(&tmp.path().join("docs").join("b.docx"), &["adb b"])?;

    let summary = extract::run(&opts, &Printer::plain())?;

    assert_eq!(summary.document, DocumentSource::Primary(primary));
    assert_eq!(summary.commands, vec!["adb primary"]);
    Ok(())
}
