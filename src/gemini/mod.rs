pub mod text_client;

use crate::{
    config::GeminiConfig,
    error::{GeminiError, Result},
    models::TextGenerationRequest,
};
use async_trait::async_trait;

pub use text_client::TextClient;

/// Narrow seam over the hosted generation API so the relay logic can be
/// exercised with a substitute implementation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: TextGenerationRequest) -> Result<String>;
}

#[derive(Clone)]
pub struct GeminiClient {
    text_client: TextClient,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                GeminiError::ConfigError("API_KEY environment variable not set.".to_string())
            })?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| GeminiError::ClientError(e.to_string()))?;

        let mut text_client = TextClient::new(http, api_key);
        if let Some(model) = config.model {
            text_client = text_client.with_model(model);
        }
        if let Some(base_url) = config.base_url {
            text_client = text_client.with_base_url(base_url);
        }

        Ok(Self { text_client })
    }

    pub fn text(&self) -> &TextClient {
        &self.text_client
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: TextGenerationRequest) -> Result<String> {
        let response = self.text_client.generate(request).await?;
        Ok(response.text)
    }
}
