//! Windows `.ico` container: PNG-compressed frames written in order, directory read back with `ico`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::{ExtendedColorType, RgbaImage};

use crate::error::ToolError;

/// Write `frames` in order; the first one is the base frame.
pub fn write_container(path: &Path, frames: &[RgbaImage]) -> Result<()> {
    if frames.is_empty() {
        return Err(ToolError::EmptyContainer.into());
    }
    let encoded = frames
        .iter()
        .map(|f| IcoFrame::as_png(f.as_raw(), f.width(), f.height(), ExtendedColorType::Rgba8))
        .collect::<Result<Vec<_>, _>>()
        .context("encoding icon frames")?;

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    IcoEncoder::new(&mut out)
        .encode_images(&encoded)
        .with_context(|| format!("encoding {}", path.display()))?;
    out.flush().with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Parse the icon directory of the `.ico` at `path`.
pub fn read_directory(path: &Path) -> Result<::ico::IconDir> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    ::ico::IconDir::read(BufReader::new(file))
        .with_context(|| format!("reading icon directory of {}", path.display()))
}

/// `(width, height)` of every frame recorded in the `.ico` at `path`.
pub fn read_sizes(path: &Path) -> Result<Vec<(u32, u32)>> {
    Ok(read_directory(path)?
        .entries()
        .iter()
        .map(|e| (e.width(), e.height()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(side: u32) -> RgbaImage {
        RgbaImage::from_pixel(side, side, image::Rgba([1, 2, 3, 255]))
    }

    #[test]
    fn write_then_read_back_sizes_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("t.ico");
        let frames: Vec<RgbaImage> = [16u32, 48, 32].iter().map(|&s| solid(s)).collect();
        write_container(&path, &frames).unwrap();
        assert_eq!(read_sizes(&path).unwrap(), vec![(16, 16), (48, 48), (32, 32)]);
    }

    #[test]
    fn frames_are_png_and_decode_to_the_input() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("t.ico");
        write_container(&path, &[solid(32)]).unwrap();

        let dir = read_directory(&path).unwrap();
        let entry = &dir.entries()[0];
        assert!(entry.is_png());
        assert_eq!(entry.bits_per_pixel(), 32);
        let decoded = entry.decode().unwrap();
        assert_eq!(decoded.rgba_data(), solid(32).as_raw().as_slice());
    }

    #[test]
    fn non_icon_file_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("t.ico");
        std::fs::write(&path, b"\x89PNG not an icon").unwrap();
        assert!(read_sizes(&path).is_err());
        assert!(read_sizes(&tmp.path().join("missing.ico")).is_err());
    }

    #[test]
    fn empty_container_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("t.ico");
        let err = write_container(&path, &[]).unwrap_err();
        assert!(matches!(err.downcast_ref::<ToolError>(), Some(ToolError::EmptyContainer)));
        assert!(!path.exists());
    }
}
