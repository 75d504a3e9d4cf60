use crate::{Effect, PixelEffectResult, pixelate::pixelate};
use derivative::Derivative;
use derive_setters::Setters;
use image::RgbaImage;

/// Pixelate effect configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct PixelateConfig {
    #[derivative(Default(value = "10"))]
    block_size: u32,
}

impl PixelateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }
}

impl Effect for PixelateConfig {
    fn apply(&self, image: &mut RgbaImage) -> PixelEffectResult<()> {
        let (width, height) = image.dimensions();
        pixelate(&mut **image, width, height, self.block_size)
    }
}
