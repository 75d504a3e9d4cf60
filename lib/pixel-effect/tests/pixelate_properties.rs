use image::{Rgba, RgbaImage};
use pixel_effect::{Effect, PixelateConfig, blocks, pixelated};

const SIZES: [(u32, u32); 4] = [(1, 1), (7, 5), (16, 16), (33, 9)];
const BLOCK_SIZES: [u32; 5] = [1, 2, 3, 8, 40];

// Deterministic noise so every run checks the same pixels.
fn noise_image(width: u32, height: u32) -> RgbaImage {
    let mut state = 0x2545_f491_u32 ^ (width * 31 + height);

    RgbaImage::from_fn(width, height, |_, _| {
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        };
        Rgba([next(), next(), next(), next()])
    })
}

fn run(img: &RgbaImage, block_size: u32) -> RgbaImage {
    let raw = pixelated(img.as_raw(), img.width(), img.height(), block_size).unwrap();
    RgbaImage::from_raw(img.width(), img.height(), raw).unwrap()
}

#[test]
fn test_block_size_one_keeps_every_pixel() {
    for (w, h) in SIZES {
        let img = noise_image(w, h);
        assert_eq!(run(&img, 1), img);
    }
}

#[test]
fn test_alpha_is_untouched() {
    for (w, h) in SIZES {
        let img = noise_image(w, h);

        for block_size in BLOCK_SIZES {
            let out = run(&img, block_size);
            for (before, after) in img.pixels().zip(out.pixels()) {
                assert_eq!(before[3], after[3]);
            }
        }
    }
}

#[test]
fn test_block_is_flat_and_within_bounds() {
    for (w, h) in SIZES {
        let img = noise_image(w, h);

        for block_size in BLOCK_SIZES {
            let out = run(&img, block_size);

            for block in blocks(w, h, block_size) {
                let first = *out.get_pixel(block.x, block.y);

                for c in 0..3 {
                    let values: Vec<u8> = (block.y..block.y + block.height)
                        .flat_map(|y| (block.x..block.x + block.width).map(move |x| (x, y)))
                        .map(|(x, y)| img.get_pixel(x, y)[c])
                        .collect();

                    let min = *values.iter().min().unwrap();
                    let max = *values.iter().max().unwrap();
                    assert!(first[c] >= min && first[c] <= max);

                    let sum: u64 = values.iter().map(|&v| v as u64).sum();
                    assert_eq!(values.len() as u64, block.sample_count());
                    assert_eq!(first[c] as u64, sum / block.sample_count());
                }

                for y in block.y..block.y + block.height {
                    for x in block.x..block.x + block.width {
                        let p = out.get_pixel(x, y);
                        assert_eq!(p.0[..3], first.0[..3]);
                    }
                }
            }
        }
    }
}

#[test]
fn test_edge_block_sample_count() {
    let (w, h, block_size) = (10u32, 7u32, 4u32);

    for block in blocks(w, h, block_size) {
        let expected = block_size.min(w - block.x) as u64 * block_size.min(h - block.y) as u64;
        assert_eq!(block.sample_count(), expected);
    }
}

#[test]
fn test_effect_matches_raw_transform() {
    let img = noise_image(33, 9);
    let expected = run(&img, 3);

    let mut actual = img.clone();
    PixelateConfig::new()
        .with_block_size(3)
        .apply(&mut actual)
        .unwrap();

    assert_eq!(actual, expected);
}
