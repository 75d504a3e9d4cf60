//! Decode, transform and export steps.
//!
//! Decoding is asynchronous and produces an RGBA buffer. Every step after it
//! is a plain synchronous function over that buffer.

use anyhow::{Context, Result, bail};
use art_generator::{GenerateOptions, Generator};
use image::{DynamicImage, ImageFormat, RgbaImage, imageops::FilterType};
use pixel_effect::{Effect, PixelateConfig};
use std::{fs, path::Path};

/// Reads and decodes the image at `path`.
pub async fn decode(path: impl AsRef<Path>) -> Result<RgbaImage> {
    let path = path.as_ref();

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("read {} failed", path.display()))?;

    let img = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
        .await
        .with_context(|| "decode task failed")?
        .with_context(|| format!("decode {} failed", path.display()))?
        .to_rgba8();

    log::info!(
        "decoded {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );

    Ok(img)
}

/// Redraws `image` at `width` x `height`.
pub fn resize(image: &RgbaImage, width: u32, height: u32) -> Result<RgbaImage> {
    if width == 0 || height == 0 {
        bail!("invalid dimensions {width}x{height}");
    }

    if image.dimensions() == (width, height) {
        return Ok(image.clone());
    }

    log::debug!(
        "resize {}x{} -> {width}x{height}",
        image.width(),
        image.height()
    );

    Ok(image::imageops::resize(
        image,
        width,
        height,
        FilterType::Triangle,
    ))
}

pub fn transform(mut image: RgbaImage, block_size: u32) -> Result<RgbaImage> {
    PixelateConfig::new()
        .with_block_size(block_size)
        .apply(&mut image)
        .with_context(|| format!("pixelate with block size {block_size} failed"))?;

    Ok(image)
}

/// Writes `image` to `path`, the format follows the extension (PNG when unknown).
pub fn export(image: &RgbaImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);

    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("create directory {} failed", dir.display()))?;
    }

    let result = match format {
        // No alpha in JPEG
        ImageFormat::Jpeg => DynamicImage::ImageRgba8(image.clone())
            .to_rgb8()
            .save_with_format(path, format),
        _ => image.save_with_format(path, format),
    };

    result.with_context(|| format!("save {} failed", path.display()))?;
    log::info!("saved {}", path.display());

    Ok(())
}

/// Sends `image` to the generation API and returns the first generated image.
pub async fn stylize(
    generator: &Generator,
    image: &RgbaImage,
    options: &GenerateOptions,
) -> Result<RgbaImage> {
    generator
        .generate_image(image, options)
        .await
        .with_context(|| "generate pixel art failed")?
        .into_iter()
        .next()
        .with_context(|| "generation api returned no images")
}
