//! Image decoding off the UI thread.

use super::surface::ImageResource;
use crate::error::ImageError;
use std::path::{Path, PathBuf};

/// RGBA8 pixels plus the metadata the surface needs.
pub struct DecodedImage {
    pub resource: ImageResource,
    pub rgba: Vec<u8>,
}

/// Decode the file at `path`. Formats are detected from content, not from
/// the extension.
pub fn decode_image(path: &Path) -> Result<DecodedImage, ImageError> {
    let reader = image::ImageReader::open(path)
        .map_err(|source| ImageError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .with_guessed_format()
        .map_err(|source| ImageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let decoded = reader.decode().map_err(|source| ImageError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = decoded.into_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("Decoded {} ({}x{})", path.display(), width, height);
    Ok(DecodedImage {
        resource: ImageResource::new(PathBuf::from(path), width, height),
        rgba: rgba.into_raw(),
    })
}

/// Extensions offered by the file picker.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"];
