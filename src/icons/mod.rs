//! Icon set generation: one square source image resized into every platform size,
//! plus a Windows `.ico` built from the small sizes.

pub mod container;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageReader, RgbaImage};
use tracing::{debug, info, warn};

use crate::error::ToolError;
use crate::printer::Printer;
use crate::utils::pad_display;

pub const SOURCE_FILE: &str = "wutong.png";
pub const CONTAINER_FILE: &str = "icon.ico";

/// Largest side accepted for a size entry.
pub const MAX_SIDE: u32 = 4096;

/// Output file name paired with its square side in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeEntry {
    pub file_name: &'static str,
    pub side: u32,
}

impl SizeEntry {
    pub const fn new(file_name: &'static str, side: u32) -> Self {
        Self { file_name, side }
    }

    pub fn validate(&self) -> Result<(), ToolError> {
        if self.side == 0 || self.side > MAX_SIDE {
            return Err(ToolError::InvalidSize {
                file_name: self.file_name.to_string(),
                side: self.side,
            });
        }
        Ok(())
    }
}

/// Tauri bundle icons: desktop sizes, Retina, and the Windows Store logos.
pub const ICON_SIZES: &[SizeEntry] = &[
    SizeEntry::new("32x32.png", 32),
    SizeEntry::new("128x128.png", 128),
    SizeEntry::new("128x128@2x.png", 256),
    SizeEntry::new("icon.png", 512),
    SizeEntry::new("StoreLogo.png", 50),
    SizeEntry::new("Square30x30Logo.png", 30),
    SizeEntry::new("Square44x44Logo.png", 44),
    SizeEntry::new("Square71x71Logo.png", 71),
    SizeEntry::new("Square89x89Logo.png", 89),
    SizeEntry::new("Square107x107Logo.png", 107),
    SizeEntry::new("Square142x142Logo.png", 142),
    SizeEntry::new("Square150x150Logo.png", 150),
    SizeEntry::new("Square284x284Logo.png", 284),
    SizeEntry::new("Square310x310Logo.png", 310),
];

/// Frames of the `.ico`, in container order. The first one is the base frame.
pub const CONTAINER_SIZES: [u32; 5] = [16, 32, 48, 64, 128];

/// Name of the PNG a container frame is reused from.
pub fn frame_file_name(side: u32) -> String {
    format!("{side}x{side}.png")
}

#[derive(Debug, Clone)]
pub struct IconOptions {
    /// Working directory: holds the source, receives every output.
    pub dir: PathBuf,
    pub source: PathBuf,
    pub container: PathBuf,
}

impl Default for IconOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            source: PathBuf::from(SOURCE_FILE),
            container: PathBuf::from(CONTAINER_FILE),
        }
    }
}

impl IconOptions {
    pub fn source_path(&self) -> PathBuf {
        self.dir.join(&self.source)
    }

    pub fn container_path(&self) -> PathBuf {
        self.dir.join(&self.container)
    }
}

/// Decode `path`, picking the decoder from the file content rather than its extension.
pub fn open_image(path: &Path) -> Result<DynamicImage> {
    let img = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .with_context(|| format!("opening image {}", path.display()))?
        .decode()
        .with_context(|| format!("decoding image {}", path.display()))?;
    Ok(img)
}

/// Decode `path` and normalise it to RGBA8.
pub fn load_source(path: &Path, printer: &Printer) -> Result<RgbaImage> {
    let img = open_image(path)?;
    printer.ok(&format!("Opened image: {}", path.display()));
    printer.line(&format!("   Original size: ({}, {})", img.width(), img.height()));
    printer.line(&format!("   Color type: {:?}", img.color()));
    if img.width() != img.height() {
        warn!(width = img.width(), height = img.height(), "source image is not square");
    }
    if !img.color().has_alpha() {
        printer.line("   Converted to RGBA");
    }
    Ok(img.into_rgba8())
}

/// Lanczos3 resize to an exact `side`×`side` square.
pub fn resize_square(img: &RgbaImage, side: u32) -> RgbaImage {
    if img.width() == side && img.height() == side {
        return img.clone();
    }
    imageops::resize(img, side, side, FilterType::Lanczos3)
}

/// Encode as PNG with best compression and adaptive filtering.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    PngEncoder::new_with_quality(&mut out, CompressionType::Best, PngFilter::Adaptive)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
        .with_context(|| format!("encoding {}", path.display()))?;
    out.flush().with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn generate_one(source: &RgbaImage, entry: &SizeEntry, dir: &Path) -> Result<()> {
    entry.validate()?;
    let resized = resize_square(source, entry.side);
    save_png(&resized, &dir.join(entry.file_name))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedIcon {
    pub entry: SizeEntry,
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub generated: Vec<SizeEntry>,
    pub failed: Vec<FailedIcon>,
}

/// Resize and write every entry. A failing entry is reported and skipped; the rest still run.
pub fn generate_sizes(
    source: &RgbaImage,
    entries: &[SizeEntry],
    dir: &Path,
    printer: &Printer,
) -> GenerationReport {
    let mut report = GenerationReport::default();
    for entry in entries {
        match generate_one(source, entry, dir) {
            Ok(()) => {
                printer.ok(&format!(
                    "Generated: {} ({}x{})",
                    entry.file_name, entry.side, entry.side
                ));
                report.generated.push(*entry);
            }
            Err(e) => {
                let error = format!("{e:#}");
                warn!(file = entry.file_name, side = entry.side, %error, "resize failed");
                printer.fail(&format!("Failed to generate {}: {}", entry.file_name, error));
                report.failed.push(FailedIcon { entry: *entry, error });
            }
        }
    }
    report
}

/// Reuse `{side}x{side}.png` from `dir` when it decodes at exactly that size.
fn reuse_frame(dir: &Path, side: u32) -> Option<RgbaImage> {
    let path = dir.join(frame_file_name(side));
    if !path.is_file() {
        return None;
    }
    match open_image(&path) {
        Ok(img) if img.width() == side && img.height() == side => Some(img.into_rgba8()),
        Ok(img) => {
            warn!(path = %path.display(), width = img.width(), height = img.height(), "stale frame size, regenerating");
            None
        }
        Err(e) => {
            let error = format!("{e:#}");
            warn!(path = %path.display(), %error, "unreadable frame, regenerating");
            None
        }
    }
}

/// Collect the container frames and write the `.ico`. Returns the directory sizes read back from
/// the written file.
///
/// Missing frames are resized from the source, which is only opened when needed.
pub fn assemble_container(opts: &IconOptions, printer: &Printer) -> Result<Vec<(u32, u32)>> {
    let mut source: Option<RgbaImage> = None;
    let mut frames = Vec::with_capacity(CONTAINER_SIZES.len());

    for side in CONTAINER_SIZES {
        if let Some(frame) = reuse_frame(&opts.dir, side) {
            debug!(side, "reusing frame");
            frames.push(frame);
            continue;
        }
        printer.warn(&format!(
            "Warning: {} not found, resizing the source image",
            frame_file_name(side)
        ));
        if source.is_none() {
            let path = opts.source_path();
            source = Some(open_image(&path)?.into_rgba8());
        }
        if let Some(src) = &source {
            frames.push(resize_square(src, side));
        }
    }
    drop(source);

    let path = opts.container_path();
    container::write_container(&path, &frames)?;
    let sizes = container::read_sizes(&path)?;
    info!(path = %path.display(), frames = sizes.len(), "wrote icon container");
    Ok(sizes)
}

/// A `.png` or `.ico` file found in the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub name: String,
    pub bytes: u64,
}

impl OutputFile {
    pub fn display_line(&self) -> String {
        format!("   {} {:>6.1} KB", pad_display(&self.name, 30), self.bytes as f64 / 1024.0)
    }
}

/// Every `.png`/`.ico` file in `dir`, sorted by name. Not tied to what this run produced.
pub fn list_outputs(dir: &Path) -> Result<Vec<OutputFile>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !(name.ends_with(".png") || name.ends_with(".ico")) {
            continue;
        }
        let meta = entry.metadata()?;
        if meta.is_file() {
            out.push(OutputFile { name, bytes: meta.len() });
        }
    }
    out.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(out)
}

#[derive(Debug, Clone)]
pub struct IconRunSummary {
    pub report: GenerationReport,
    /// Directory sizes of the written container, `None` when assembly failed.
    pub container: Option<Vec<(u32, u32)>>,
}

/// Full pipeline: resize every entry, assemble the container, list what is on disk.
///
/// Errors only when the source is missing or cannot be decoded; nothing is written then.
pub fn run(opts: &IconOptions, entries: &[SizeEntry], printer: &Printer) -> Result<IconRunSummary> {
    printer.banner("🎨 Icon generator");

    let source_path = opts.source_path();
    if !source_path.is_file() {
        printer.fail(&format!("Error: input file not found {}", source_path.display()));
        printer.line("");
        printer.fail("Icon generation failed");
        return Err(ToolError::SourceMissing(source_path).into());
    }

    let report = {
        let source = match load_source(&source_path, printer) {
            Ok(img) => img,
            Err(e) => {
                printer.fail(&format!("Error processing image: {:#}", e));
                printer.line("");
                printer.fail("Icon generation failed");
                return Err(e);
            }
        };
        let report = generate_sizes(&source, entries, &opts.dir, printer);
        printer.line("");
        printer.done(&format!("Generated {} icon files", report.generated.len()));
        report
    };

    printer.line("");
    printer.banner("💾 Windows ICO file");
    let container = match assemble_container(opts, printer) {
        Ok(sizes) => {
            printer.ok(&format!("Generated: {}", opts.container.display()));
            let dims: Vec<String> = sizes.iter().map(|(w, h)| format!("{w}x{h}")).collect();
            printer.line(&format!("   Sizes: {}", dims.join(", ")));
            Some(sizes)
        }
        Err(e) => {
            let error = format!("{e:#}");
            warn!(%error, "icon container failed");
            printer.fail(&format!("Failed to generate ICO: {}", error));
            None
        }
    };

    printer.line("");
    printer.banner("✨ All icons generated!");

    printer.line("");
    printer.line("📋 Generated icon files:");
    match list_outputs(&opts.dir) {
        Ok(files) => {
            for f in files {
                printer.line(&f.display_line());
            }
        }
        Err(e) => printer.warn(&format!("Could not list {}: {:#}", opts.dir.display(), e)),
    }

    Ok(IconRunSummary { report, container })
}
