use crate::{
    ImageEffectError, ImageEffectResult,
    pixel_buffer::{self, PixelBuffer},
};
use derivative::Derivative;
use derive_setters::Setters;
use image::{ExtendedColorType, codecs::jpeg::JpegEncoder};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const EXPORT_FILENAME: &str = "adjusted-image.jpg";

#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct ExportConfig {
    #[derivative(Default(value = "92"))]
    quality: u8, // [1, 100]
}

impl ExportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }
}

/// What is currently on screen. A save encodes exactly these pixels.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub pixels: PixelBuffer,
}

impl RenderedImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn is_empty(&self) -> bool {
        pixel_buffer::is_empty(&self.pixels)
    }
}

pub fn render(pixels: PixelBuffer) -> RenderedImage {
    RenderedImage { pixels }
}

/// JPEG has no alpha channel, so translucent pixels are composited onto black.
pub fn encode_jpeg(pixels: &PixelBuffer, quality: u8) -> ImageEffectResult<Vec<u8>> {
    if !(1..=100).contains(&quality) {
        return Err(ImageEffectError::InvalidParameter(format!(
            "jpeg quality {quality} is outside [1, 100]"
        )));
    }

    let rgb = flatten_alpha(pixels);
    let mut encoded = Vec::new();

    JpegEncoder::new_with_quality(&mut encoded, quality).encode(
        &rgb,
        pixels.width(),
        pixels.height(),
        ExtendedColorType::Rgb8,
    )?;

    Ok(encoded)
}

/// Encodes the rendered pixels as JPEG and writes `dir/adjusted-image.jpg`.
pub fn save(
    rendered: &RenderedImage,
    dir: impl AsRef<Path>,
    config: &ExportConfig,
) -> ImageEffectResult<PathBuf> {
    let encoded = encode_jpeg(&rendered.pixels, config.quality)?;

    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let path = dir.join(EXPORT_FILENAME);
    fs::write(&path, &encoded)?;
    log::info!("saved {} bytes to {}", encoded.len(), path.display());

    Ok(path)
}

fn flatten_alpha(pixels: &PixelBuffer) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(pixels.width() as usize * pixels.height() as usize * 3);

    for pixel in pixels.pixels() {
        let alpha = pixel[3] as u32;
        for i in 0..3 {
            rgb.push(((pixel[i] as u32 * alpha + 127) / 255) as u8);
        }
    }

    rgb
}
