/// Pixelate effect example
/// Writes a gradient test image pixelated at several block sizes
use image::{Rgba, RgbaImage};
use pixel_effect::{Effect, PixelateConfig};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img = RgbaImage::from_fn(800, 600, |x, y| {
        let r = (x * 255 / 800) as u8;
        let g = (y * 255 / 600) as u8;
        let b = ((x + y) * 255 / 1400) as u8;
        Rgba([r, g, b, 255])
    });

    for block_size in [4, 8, 12, 16, 20, 30] {
        let mut test_img = img.clone();
        PixelateConfig::new()
            .with_block_size(block_size)
            .apply(&mut test_img)?;

        let filename = format!("pixelate_b{}.png", block_size);
        test_img.save(output_dir.join(&filename))?;
        println!("✓ Generated {}", filename);
    }

    println!("\n✓ All pixelate effects applied successfully!");
    println!("  Images saved to: tmp/");

    Ok(())
}
