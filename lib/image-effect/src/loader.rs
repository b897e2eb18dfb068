//! Decoding uploaded files into RGBA pixel buffers.
//!
//! The format is sniffed from the leading bytes, so a file with a wrong or
//! missing extension still decodes as long as its content is a supported
//! raster format.

use crate::{ImageEffectError, ImageEffectResult, pixel_buffer::PixelBuffer};
use image::ImageReader;
use std::{io::Cursor, path::Path};

/// Extensions offered by the file picker filter.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "ico", "tif", "tiff",
];

/// Decodes encoded image bytes at their native dimensions.
pub fn decode(bytes: &[u8]) -> ImageEffectResult<PixelBuffer> {
    if bytes.is_empty() {
        return Err(ImageEffectError::Decode("empty file".to_string()));
    }

    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;

    let Some(format) = reader.format() else {
        return Err(ImageEffectError::Decode(
            "unrecognized image format".to_string(),
        ));
    };

    let image = reader.decode()?.to_rgba8();
    log::debug!(
        "decoded {:?} image: {}x{}",
        format,
        image.width(),
        image.height()
    );

    Ok(image)
}

pub fn load_file(path: impl AsRef<Path>) -> ImageEffectResult<PixelBuffer> {
    let bytes = std::fs::read(path.as_ref())?;
    decode(&bytes)
}

/// Reads and decodes `path` as one single-shot completion. The read runs on
/// the async file API and the decode on the blocking pool.
pub async fn load_file_async(path: impl AsRef<Path>) -> ImageEffectResult<PixelBuffer> {
    let bytes = tokio::fs::read(path.as_ref()).await?;

    tokio::task::spawn_blocking(move || decode(&bytes))
        .await
        .map_err(|e| ImageEffectError::Decode(format!("decode task failed: {e}")))?
}
