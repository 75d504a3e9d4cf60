mod codec;
mod generator;
mod request;
mod response;

pub use codec::{decode_base64_image, encode_jpeg_base64};
pub use generator::{Generator, TOKEN_HEADER};
pub use request::{APIConfig, GenerateOptions, GenerateRequest};
pub use response::GenerateResponse;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Request Error {0}")]
    Request(#[from] reqwest::Error),

    #[error("Generation API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Generation API returned no images")]
    EmptyResponse,

    #[error("Invalid response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}
