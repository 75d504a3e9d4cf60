use crate::{
    Error, Result,
    codec::encode_jpeg_base64,
    request::{APIConfig, GenerateOptions, GenerateRequest},
    response::GenerateResponse,
};
use image::RgbaImage;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;

/// Header carrying the static API token.
pub const TOKEN_HEADER: &str = "x-rd-token";

#[derive(Debug, Clone)]
pub struct Generator {
    pub config: APIConfig,
    client: reqwest::Client,
}

impl Generator {
    pub fn new(config: APIConfig) -> Result<Generator> {
        if config.api_url.trim().is_empty() {
            return Err(Error::Config("api url is empty".to_string()));
        }

        if config.api_key.trim().is_empty() {
            return Err(Error::Config("api key is empty".to_string()));
        }

        Ok(Generator {
            config,
            client: reqwest::Client::new(),
        })
    }

    fn headers(&self) -> Result<HeaderMap> {
        let token = HeaderValue::from_str(self.config.api_key.trim())
            .map_err(|_| Error::Config("api key is not a valid header value".to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(HeaderName::from_static(TOKEN_HEADER), token);

        Ok(headers)
    }

    /// Sends one request and waits for its response.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        log::info!(
            "requesting {} image(s) of {}x{} with style {}",
            request.num_images,
            request.width,
            request.height,
            request.prompt_style
        );

        let mut builder = self
            .client
            .post(&self.config.api_url)
            .headers(self.headers()?)
            .json(request);

        // 0 disables the timeout
        if self.config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(self.config.timeout_secs));
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("generation api returned {status}: {body}");
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let response = serde_json::from_slice::<GenerateResponse>(&body)?;
        log::debug!("received {} image(s)", response.base64_images.len());

        Ok(response)
    }

    /// Encodes `image` as the request's input image and decodes the returned images.
    pub async fn generate_image(
        &self,
        image: &RgbaImage,
        options: &GenerateOptions,
    ) -> Result<Vec<RgbaImage>> {
        let input_image = encode_jpeg_base64(image)?;
        let request = GenerateRequest::new(options, input_image);
        self.generate(&request).await?.images()
    }
}
