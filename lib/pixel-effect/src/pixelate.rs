//! Block-averaging pixelation over raw RGBA buffers.
//!
//! The image is tiled from the top-left origin into square blocks of
//! `block_size` pixels. Every block is replaced by the truncated mean of its
//! red, green and blue channels. Blocks on the right and bottom edges are
//! clipped by the image boundary and only average the pixels they contain.
//! Alpha is never modified.

use crate::{CHANNELS, PixelEffectError, PixelEffectResult};
use std::ops::Range;

/// A tile of the image that is averaged as one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Block {
    /// Number of in-bounds pixels covered by this block.
    pub fn sample_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Byte range of each row of the block inside a buffer with `stride` bytes per row.
    fn byte_ranges(self, stride: usize) -> impl Iterator<Item = Range<usize>> {
        let x_offset = self.x as usize * CHANNELS;
        let row_len = self.width as usize * CHANNELS;

        (self.y..self.y + self.height).map(move |row| {
            let start = row as usize * stride + x_offset;
            start..start + row_len
        })
    }
}

/// Tiles a `width` x `height` image into blocks, row by row.
///
/// A `block_size` of 0 is treated as 1 here; [`pixelate`] rejects it.
pub fn blocks(width: u32, height: u32, block_size: u32) -> impl Iterator<Item = Block> {
    let step = block_size.max(1);

    (0..height).step_by(step as usize).flat_map(move |y| {
        (0..width).step_by(step as usize).map(move |x| Block {
            x,
            y,
            width: step.min(width - x),
            height: step.min(height - y),
        })
    })
}

/// Pixelates `buffer` in place.
///
/// `buffer` must hold exactly `width * height * 4` bytes of row-major RGBA
/// data. On error the buffer is left untouched.
pub fn pixelate(
    buffer: &mut [u8],
    width: u32,
    height: u32,
    block_size: u32,
) -> PixelEffectResult<()> {
    validate(buffer.len(), width, height, block_size)?;

    log::debug!("pixelate {width}x{height} with block size {block_size}");

    if block_size == 1 {
        return Ok(());
    }

    let stride = width as usize * CHANNELS;

    for block in blocks(width, height, block_size) {
        let [r, g, b] = block_average(buffer, stride, block);

        for range in block.byte_ranges(stride) {
            for pixel in buffer[range].chunks_exact_mut(CHANNELS) {
                pixel[0] = r;
                pixel[1] = g;
                pixel[2] = b;
            }
        }
    }

    Ok(())
}

/// Copying variant of [`pixelate`].
pub fn pixelated(
    buffer: &[u8],
    width: u32,
    height: u32,
    block_size: u32,
) -> PixelEffectResult<Vec<u8>> {
    let mut output = buffer.to_vec();
    pixelate(&mut output, width, height, block_size)?;
    Ok(output)
}

fn block_average(buffer: &[u8], stride: usize, block: Block) -> [u8; 3] {
    let mut sums = [0u64; 3];

    for range in block.byte_ranges(stride) {
        for pixel in buffer[range].chunks_exact(CHANNELS) {
            sums[0] += pixel[0] as u64;
            sums[1] += pixel[1] as u64;
            sums[2] += pixel[2] as u64;
        }
    }

    let count = block.sample_count();
    sums.map(|sum| (sum / count) as u8)
}

fn validate(len: usize, width: u32, height: u32, block_size: u32) -> PixelEffectResult<()> {
    if block_size == 0 {
        return Err(PixelEffectError::InvalidParameter(
            "block size must be at least 1".to_string(),
        ));
    }

    if width == 0 || height == 0 {
        return Err(PixelEffectError::InvalidParameter(format!(
            "image dimensions must be positive, got {width}x{height}"
        )));
    }

    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(CHANNELS))
        .ok_or_else(|| {
            PixelEffectError::InvalidParameter(format!(
                "image dimensions {width}x{height} are too large"
            ))
        })?;

    if len != expected {
        return Err(PixelEffectError::BufferSize {
            expected,
            actual: len,
        });
    }

    Ok(())
}
