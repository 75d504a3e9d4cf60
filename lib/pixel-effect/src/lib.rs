pub mod pixelate;
pub mod pixelate_effect;

pub use pixelate::{Block, blocks, pixelate, pixelated};
pub use pixelate_effect::PixelateConfig;

use image::RgbaImage;

/// Number of channels per pixel in an RGBA buffer.
pub const CHANNELS: usize = 4;

pub type PixelEffectResult<T> = Result<T, PixelEffectError>;

#[derive(thiserror::Error, Debug)]
pub enum PixelEffectError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },
}

pub trait Effect {
    fn apply(&self, image: &mut RgbaImage) -> PixelEffectResult<()>;
}
