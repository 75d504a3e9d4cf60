use crate::{Error, Result, codec::decode_base64_image};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct GenerateResponse {
    #[serde(default)]
    pub base64_images: Vec<String>,
}

impl GenerateResponse {
    /// Decodes every returned image. An empty list is an error.
    pub fn images(&self) -> Result<Vec<RgbaImage>> {
        if self.base64_images.is_empty() {
            return Err(Error::EmptyResponse);
        }

        self.base64_images
            .iter()
            .map(|item| decode_base64_image(item))
            .collect()
    }
}
