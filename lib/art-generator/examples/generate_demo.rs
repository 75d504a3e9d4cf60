use art_generator::{APIConfig, GenerateOptions, Generator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let api_url = std::env::var("PIXELART_API_URL").expect("Missing PIXELART_API_URL in environment");
    let api_key = std::env::var("PIXELART_API_KEY").expect("Missing PIXELART_API_KEY in environment");
    let input = std::env::args().nth(1).unwrap_or("data/test.png".to_string());

    let config = APIConfig {
        api_url,
        api_key,
        ..Default::default()
    };

    let source = image::open(&input)?.to_rgba8();
    let generator = Generator::new(config)?;

    let images = generator
        .generate_image(&source, &GenerateOptions::new())
        .await?;

    for (index, img) in images.iter().enumerate() {
        let filename = format!("generated_{index}.png");
        img.save(&filename)?;
        log::info!("saved {filename}");
    }

    Ok(())
}
