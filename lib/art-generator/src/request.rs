use derivative::Derivative;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROMPT: &str = "make this a good pixel art, no change the context of the image";

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
pub struct APIConfig {
    pub api_url: String,
    pub api_key: String,

    #[derivative(Default(value = "60"))]
    pub timeout_secs: u64,
}

/// Everything the generation API needs besides the source image.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_", into)]
pub struct GenerateOptions {
    #[derivative(Default(value = "DEFAULT_PROMPT.to_string()"))]
    pub prompt: String,

    #[derivative(Default(value = "512"))]
    pub width: u32,

    #[derivative(Default(value = "512"))]
    pub height: u32,

    #[derivative(Default(value = "1"))]
    pub num_images: u32,

    #[derivative(Default(value = "1"))]
    pub seed: u64,

    #[derivative(Default(value = "\"rd_plus__default\".to_string()"))]
    pub prompt_style: String,

    pub tile_x: bool,
    pub tile_y: bool,
    pub remove_bg: bool,

    #[derivative(Default(value = "0.45"))]
    pub strength: f32,
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub num_images: u32,
    pub seed: u64,
    pub prompt_style: String,
    pub tile_x: bool,
    pub tile_y: bool,

    /// Base64 encoded source image, without a data URL prefix.
    pub input_image: String,

    pub remove_bg: bool,
    pub strength: f32,
}

impl GenerateRequest {
    pub fn new(options: &GenerateOptions, input_image: String) -> Self {
        Self {
            prompt: options.prompt.clone(),
            width: options.width,
            height: options.height,
            num_images: options.num_images,
            seed: options.seed,
            prompt_style: options.prompt_style.clone(),
            tile_x: options.tile_x,
            tile_y: options.tile_y,
            input_image,
            remove_bg: options.remove_bg,
            strength: options.strength,
        }
    }
}
