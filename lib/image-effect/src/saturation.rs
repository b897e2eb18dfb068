use crate::{
    Effect, ImageEffectError, ImageEffectResult,
    pixel_buffer::{self, CHANNELS, PixelBuffer},
};
use derivative::Derivative;
use derive_setters::Setters;
use rayon::prelude::*;

pub const MIN_LEVEL: i32 = 0;
pub const MAX_LEVEL: i32 = 200;
pub const DEFAULT_LEVEL: i32 = 100;

// ITU-R BT.601
const LUMA_R: f32 = 0.2989;
const LUMA_G: f32 = 0.5870;
const LUMA_B: f32 = 0.1140;

/// Saturation adjustment configuration
///
/// `level` is a percentage: 100 keeps the image as is, 0 gives grayscale and
/// 200 doubles each channel's distance from the pixel's luma.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct SaturationConfig {
    #[derivative(Default(value = "DEFAULT_LEVEL"))]
    level: i32, // [0, 200]
}

impl SaturationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn factor(&self) -> f32 {
        self.level as f32 / 100.0
    }
}

impl Effect for SaturationConfig {
    fn apply(&self, image: &PixelBuffer) -> ImageEffectResult<PixelBuffer> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.level) {
            return Err(ImageEffectError::InvalidParameter(format!(
                "saturation level {} is outside [{MIN_LEVEL}, {MAX_LEVEL}]",
                self.level
            )));
        }

        let factor = self.factor();
        let mut samples = image.as_raw().clone();

        samples.par_chunks_exact_mut(CHANNELS).for_each(|pixel| {
            let (r, g, b) = (pixel[0] as f32, pixel[1] as f32, pixel[2] as f32);
            let luma = LUMA_R * r + LUMA_G * g + LUMA_B * b;

            pixel[0] = to_sample(luma + factor * (r - luma));
            pixel[1] = to_sample(luma + factor * (g - luma));
            pixel[2] = to_sample(luma + factor * (b - luma));
        });

        pixel_buffer::from_raw(image.width(), image.height(), samples)
    }
}

/// Returns an adjusted copy of `image`.
pub fn saturate(image: &PixelBuffer, level: i32) -> ImageEffectResult<PixelBuffer> {
    SaturationConfig::new().with_level(level).apply(image)
}

pub fn clamp_level(level: i32) -> i32 {
    level.clamp(MIN_LEVEL, MAX_LEVEL)
}

// 8-bit storage: round to nearest, and `as` saturates into [0, 255].
#[inline]
fn to_sample(value: f32) -> u8 {
    value.round_ties_even() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample_image() -> PixelBuffer {
        PixelBuffer::from_fn(16, 8, |x, y| {
            Rgba([
                (x * 16) as u8,
                (y * 32) as u8,
                ((x + y) * 11) as u8,
                (255 - x * 7) as u8,
            ])
        })
    }

    fn luma(pixel: &Rgba<u8>) -> f64 {
        0.2989 * pixel[0] as f64 + 0.5870 * pixel[1] as f64 + 0.1140 * pixel[2] as f64
    }

    #[test]
    fn test_source_is_not_mutated() {
        let original = sample_image();
        let snapshot = original.as_raw().clone();

        for level in [0, 37, 100, 150, 200] {
            let adjusted = saturate(&original, level).unwrap();
            assert_eq!(adjusted.dimensions(), original.dimensions());
            assert_eq!(original.as_raw(), &snapshot);
        }
    }

    #[test]
    fn test_identity_level() {
        let original = sample_image();
        let adjusted = saturate(&original, 100).unwrap();

        for (a, b) in original.pixels().zip(adjusted.pixels()) {
            for i in 0..3 {
                assert!((a[i] as i32 - b[i] as i32).abs() <= 1);
            }
            assert_eq!(a[3], b[3]);
        }
    }

    #[test]
    fn test_grayscale_level() {
        let original = sample_image();
        let adjusted = saturate(&original, 0).unwrap();

        for (src, dst) in original.pixels().zip(adjusted.pixels()) {
            assert_eq!(dst[0], dst[1]);
            assert_eq!(dst[1], dst[2]);
            assert!((dst[0] as f64 - luma(src)).abs() <= 0.5 + 1e-3);
            assert_eq!(src[3], dst[3]);
        }
    }

    #[test]
    fn test_red_green_to_gray() {
        let original =
            pixel_buffer::from_raw(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 255]).unwrap();
        let adjusted = saturate(&original, 0).unwrap();

        assert_eq!(adjusted.as_raw(), &vec![76, 76, 76, 255, 150, 150, 150, 255]);
    }

    #[test]
    fn test_double_saturation_clamps() {
        let original =
            pixel_buffer::from_raw(2, 1, vec![200, 50, 50, 128, 50, 200, 200, 255]).unwrap();
        let adjusted = saturate(&original, 200).unwrap();

        // 94.8 + 2 * 105.2 overshoots
        assert_eq!(adjusted.get_pixel(0, 0)[0], 255);
        assert_eq!(adjusted.get_pixel(0, 0)[1], 5);
        assert_eq!(adjusted.get_pixel(0, 0)[3], 128);

        // 155.1 - 2 * 105.1 undershoots
        assert_eq!(adjusted.get_pixel(1, 0)[0], 0);
        assert_eq!(adjusted.get_pixel(1, 0)[3], 255);
    }

    #[test]
    fn test_increases_spread() {
        let original = pixel_buffer::from_raw(1, 1, vec![180, 120, 90, 255]).unwrap();
        let adjusted = saturate(&original, 150).unwrap();
        let before = 180 - 90;
        let after = adjusted.get_pixel(0, 0)[0] as i32 - adjusted.get_pixel(0, 0)[2] as i32;
        assert!(after > before);
    }

    #[test]
    fn test_out_of_range_level() {
        let original = sample_image();
        assert!(matches!(
            saturate(&original, 201),
            Err(ImageEffectError::InvalidParameter(_))
        ));
        assert!(saturate(&original, -1).is_err());
    }

    #[test]
    fn test_empty_image() {
        let original = PixelBuffer::new(0, 0);
        let adjusted = saturate(&original, 50).unwrap();
        assert!(adjusted.as_raw().is_empty());
    }

    #[test]
    fn test_clamp_level() {
        assert_eq!(clamp_level(-20), 0);
        assert_eq!(clamp_level(120), 120);
        assert_eq!(clamp_level(500), 200);
        assert_eq!(SaturationConfig::new().level(), 100);
        assert_eq!(SaturationConfig::new().with_level(50).factor(), 0.5);
    }
}
