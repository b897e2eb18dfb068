pub mod editor;
pub mod exporter;
pub mod loader;
pub mod pixel_buffer;
pub mod saturation;

pub use editor::{Editor, EditorState, Message, Outcome};
pub use exporter::{EXPORT_FILENAME, ExportConfig, RenderedImage};
pub use pixel_buffer::PixelBuffer;
pub use saturation::{SaturationConfig, saturate};

pub type ImageEffectResult<T> = Result<T, ImageEffectError>;

#[derive(thiserror::Error, Debug)]
pub enum ImageEffectError {
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Invalid pixel buffer: {0}")]
    InvalidBuffer(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("No image loaded")]
    NoImage,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// A pure pixel transform. The source buffer is borrowed and never modified.
pub trait Effect {
    fn apply(&self, image: &PixelBuffer) -> ImageEffectResult<PixelBuffer>;
}
