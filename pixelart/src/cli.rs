use crate::{config::Config, pipeline};
use anyhow::{Context, Result};
use art_generator::Generator;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pixelart", version, about = "Pixelate images and turn them into pixel art")]
pub struct Cli {
    /// Configuration file. Defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pixelate an image and save the result.
    Pixelate(PixelateArgs),
    /// Send an image to the generation API and save the returned pixel art.
    Generate(GenerateArgs),
    /// Print the configuration file path and its content.
    Config,
}

#[derive(Args, Debug)]
pub struct PixelateArgs {
    /// Input image.
    pub input: PathBuf,

    /// Output image, the format follows the extension.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Edge length of the averaged blocks.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub block_size: Option<u32>,

    /// Redraw the image at this width before pixelating.
    #[arg(long, requires = "height", value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Redraw the image at this height before pixelating.
    #[arg(long, requires = "width", value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Input image.
    pub input: PathBuf,

    /// Output image, the format follows the extension.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pixelate with this block size before sending the image.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub block_size: Option<u32>,

    #[arg(long)]
    pub prompt: Option<String>,

    /// Width of the generated image.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Height of the generated image.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Style identifier understood by the generation API.
    #[arg(long)]
    pub style: Option<String>,

    /// How far the result may drift from the input image.
    #[arg(long)]
    pub strength: Option<f32>,

    #[arg(long)]
    pub tile_x: bool,

    #[arg(long)]
    pub tile_y: bool,

    /// Ask the API to remove the background.
    #[arg(long)]
    pub remove_bg: bool,
}

pub async fn run(cli: Cli) -> Result<()> {
    let path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };

    let config =
        Config::load(&path).with_context(|| format!("load config {} failed", path.display()))?;

    match cli.cmd {
        Command::Pixelate(args) => pixelate(&config, args).await,
        Command::Generate(args) => generate(&config, args).await,
        Command::Config => {
            println!("# {}", config.config_path.display());
            print!("{}", config.to_display_string()?);
            Ok(())
        }
    }
}

async fn pixelate(config: &Config, args: PixelateArgs) -> Result<()> {
    let block_size = args.block_size.unwrap_or(config.pixelate.block_size);
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.pixelate.output));

    let mut img = pipeline::decode(&args.input).await?;

    if let (Some(width), Some(height)) = (args.width, args.height) {
        img = pipeline::resize(&img, width, height)?;
    }

    let img = pipeline::transform(img, block_size)?;
    pipeline::export(&img, &output)
}

async fn generate(config: &Config, args: GenerateArgs) -> Result<()> {
    let generator = Generator::new(config.generator.api_config())
        .with_context(|| "generation api is not configured")?;

    let mut options = config.generator.options();
    if let Some(prompt) = args.prompt {
        options.prompt = prompt;
    }
    if let Some(width) = args.width {
        options.width = width;
    }
    if let Some(height) = args.height {
        options.height = height;
    }
    if let Some(seed) = args.seed {
        options.seed = seed;
    }
    if let Some(style) = args.style {
        options.prompt_style = style;
    }
    if let Some(strength) = args.strength {
        options.strength = strength;
    }
    options.tile_x |= args.tile_x;
    options.tile_y |= args.tile_y;
    options.remove_bg |= args.remove_bg;

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.pixelate.output));

    let mut img = pipeline::decode(&args.input).await?;

    if let Some(block_size) = args.block_size {
        img = pipeline::transform(img, block_size)?;
    }

    let art = pipeline::stylize(&generator, &img, &options).await?;
    pipeline::export(&art, &output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pixelate() {
        let cli = Cli::try_parse_from([
            "pixelart",
            "pixelate",
            "in.png",
            "-o",
            "out.png",
            "-b",
            "12",
            "--width",
            "64",
            "--height",
            "32",
        ])
        .unwrap();

        match cli.cmd {
            Command::Pixelate(args) => {
                assert_eq!(args.input, PathBuf::from("in.png"));
                assert_eq!(args.output, Some(PathBuf::from("out.png")));
                assert_eq!(args.block_size, Some(12));
                assert_eq!((args.width, args.height), (Some(64), Some(32)));
            }
            cmd => panic!("unexpected command {cmd:?}"),
        }
    }

    #[test]
    fn test_zero_block_size_is_rejected() {
        assert!(Cli::try_parse_from(["pixelart", "pixelate", "in.png", "-b", "0"]).is_err());
    }

    #[test]
    fn test_width_requires_height() {
        assert!(Cli::try_parse_from(["pixelart", "pixelate", "in.png", "--width", "10"]).is_err());
    }

    #[test]
    fn test_parse_generate_with_global_config() {
        let cli = Cli::try_parse_from([
            "pixelart",
            "generate",
            "in.png",
            "--config",
            "custom.toml",
            "--prompt",
            "castle",
            "--remove-bg",
            "--tile-x",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        match cli.cmd {
            Command::Generate(args) => {
                assert_eq!(args.prompt.as_deref(), Some("castle"));
                assert!(args.remove_bg && args.tile_x && !args.tile_y);
                assert_eq!(args.block_size, None);
            }
            cmd => panic!("unexpected command {cmd:?}"),
        }
    }
}
