//! PNG output and pixel-art scaling

use image::imageops::FilterType;
use image::RgbaImage;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Largest accepted integer scale factor.
pub const MAX_SCALE: u32 = 16;

/// Error type for export operations
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Save an RGBA image to a PNG file, creating parent directories.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    ensure_parent_dir(path)?;
    image.save(path)?;
    Ok(())
}

/// Scale an image by an integer factor using nearest-neighbor
/// interpolation, preserving crisp pixel edges.
///
/// The factor is clamped to `[1, 16]`; factor 1 returns the image
/// unchanged.
pub fn scale_image(image: RgbaImage, factor: u32) -> RgbaImage {
    let factor = factor.clamp(1, MAX_SCALE);
    if factor == 1 {
        return image;
    }
    let (w, h) = image.dimensions();
    image::imageops::resize(&image, w * factor, h * factor, FilterType::Nearest)
}

/// Create the parent directories of `path` if they don't exist yet.
pub fn ensure_parent_dir(path: &Path) -> Result<(), io::Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
