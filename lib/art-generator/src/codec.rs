use crate::Result;
use base64::{Engine, engine::general_purpose::STANDARD};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;

/// Encodes `image` as JPEG and returns it base64 encoded.
///
/// JPEG has no alpha channel, so alpha is dropped.
pub fn encode_jpeg_base64(image: &RgbaImage) -> Result<String> {
    let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();

    let mut bytes = Cursor::new(Vec::new());
    rgb.write_to(&mut bytes, ImageFormat::Jpeg)?;

    Ok(STANDARD.encode(bytes.into_inner()))
}

/// Decodes a base64 image, with or without a `data:<mime>;base64,` prefix.
pub fn decode_base64_image(data: &str) -> Result<RgbaImage> {
    let payload = match data.split_once(',') {
        Some((head, tail)) if head.starts_with("data:") => tail,
        _ => data,
    };

    let bytes = STANDARD.decode(payload.trim())?;
    Ok(image::load_from_memory(&bytes)?.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn png_base64(img: &RgbaImage) -> String {
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, ImageFormat::Png).unwrap();
        STANDARD.encode(bytes.into_inner())
    }

    #[test]
    fn test_decode_plain_and_data_url() {
        let img = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 40]));
        let encoded = png_base64(&img);

        assert_eq!(decode_base64_image(&encoded).unwrap(), img);
        assert_eq!(
            decode_base64_image(&format!("data:image/png;base64,{encoded}")).unwrap(),
            img
        );
    }

    #[test]
    fn test_encode_jpeg_keeps_dimensions() {
        let img = RgbaImage::from_pixel(16, 8, Rgba([200, 10, 10, 0]));
        let encoded = encode_jpeg_base64(&img).unwrap();

        let bytes = STANDARD.decode(&encoded).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);

        let decoded = decode_base64_image(&encoded).unwrap();
        assert_eq!(decoded.dimensions(), (16, 8));
        assert_eq!(decoded.get_pixel(0, 0)[3], 255);
    }

    #[test]
    fn test_decode_invalid_base64() {
        assert!(matches!(
            decode_base64_image("not base64!"),
            Err(crate::Error::Base64(_))
        ));
    }

    #[test]
    fn test_decode_not_an_image() {
        let encoded = STANDARD.encode(b"plain text");
        assert!(matches!(
            decode_base64_image(&encoded),
            Err(crate::Error::Image(_))
        ));
    }
}
