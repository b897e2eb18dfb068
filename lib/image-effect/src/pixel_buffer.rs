use crate::{ImageEffectError, ImageEffectResult};
use image::RgbaImage;

/// Width, height and a flat run of RGBA samples.
///
/// `RgbaImage` already guarantees `samples.len() == width * height * 4`.
pub type PixelBuffer = RgbaImage;

pub const CHANNELS: usize = 4;

/// Builds a buffer from raw parts, rejecting a sample count that does not
/// match the dimensions.
pub fn from_raw(width: u32, height: u32, samples: Vec<u8>) -> ImageEffectResult<PixelBuffer> {
    let expected = width as usize * height as usize * CHANNELS;
    let actual = samples.len();

    RgbaImage::from_raw(width, height, samples).ok_or_else(|| {
        ImageEffectError::InvalidBuffer(format!(
            "{width}x{height} needs {expected} samples, got {actual}"
        ))
    })
}

pub fn is_empty(buffer: &PixelBuffer) -> bool {
    buffer.width() == 0 || buffer.height() == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw() {
        let buffer = from_raw(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 255]).unwrap();
        assert_eq!(buffer.dimensions(), (2, 1));
        assert_eq!(buffer.as_raw().len(), 2 * CHANNELS);
    }

    #[test]
    fn test_from_raw_length_mismatch() {
        let err = from_raw(2, 2, vec![0; 12]).unwrap_err();
        assert!(matches!(err, ImageEffectError::InvalidBuffer(_)));
        assert!(err.to_string().contains("needs 16 samples, got 12"));
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = from_raw(0, 5, vec![]).unwrap();
        assert!(is_empty(&buffer));
        assert!(!is_empty(&PixelBuffer::new(1, 1)));
    }
}
