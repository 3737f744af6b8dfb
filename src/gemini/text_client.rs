use crate::{
    config::{DEFAULT_BASE_URL, DEFAULT_MODEL},
    error::{GeminiError, Result},
    models::{
        GeminiContent, GeminiRequest, GeminiResponse, GeminiModelInfo, GenerationConfig,
        ModelListResponse, PromptFeedback, TextGenerationRequest, TextGenerationResponse,
    },
};
use reqwest::Client;

#[derive(Clone)]
pub struct TextClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl TextClient {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Point the client at another endpoint, e.g. a proxy or a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate(&self, request: TextGenerationRequest) -> Result<TextGenerationResponse> {
        let model_id = request.model_id.as_deref().unwrap_or(&self.model);

        let payload = GeminiRequest {
            contents: vec![GeminiContent::user(request.prompt)],
            generation_config: Some(GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
                stop_sequences: request.stop_sequences,
            }),
        };

        let request_json = serde_json::to_string(&payload)
            .map_err(|e| GeminiError::SerializationError(e.to_string()))?;

        log::info!("Invoking model: {}", model_id);
        log::debug!("Text generation request payload: {}", request_json);

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model_id, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(request_json)
            .send()
            .await
            .map_err(|e| GeminiError::RequestError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            log::error!("Gemini API returned HTTP {}: {}", status, text);
            return Err(GeminiError::ApiError(format!("HTTP {}: {}", status, text)));
        }

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::ResponseError(e.to_string()))?;

        let generated_text: String = body
            .candidates
            .iter()
            .filter_map(|candidate| candidate.content.as_ref())
            .flat_map(|content| content.parts.iter())
            .filter_map(|part| part.text.as_deref())
            .collect();

        if generated_text.is_empty() {
            if let Some(reason) = body.prompt_feedback.as_ref().and_then(blocked_reasons) {
                return Err(GeminiError::ContentBlocked(reason));
            }
            return Err(GeminiError::ResponseError(
                "No content generated from Gemini. It might be an empty response or another issue."
                    .to_string(),
            ));
        }

        let finish_reason = body
            .candidates
            .first()
            .and_then(|candidate| candidate.finish_reason.clone());

        Ok(TextGenerationResponse {
            text: generated_text,
            model: model_id.to_string(),
            finish_reason,
        })
    }

    /// Fetch the provider's model catalog.
    pub async fn list_models(&self) -> Result<Vec<GeminiModelInfo>> {
        let url = format!("{}/models?key={}", self.base_url, self.api_key);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GeminiError::RequestError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(GeminiError::ApiError(format!("HTTP {}: {}", status, text)));
        }

        let body: ModelListResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::ResponseError(e.to_string()))?;

        Ok(body.models)
    }

    /// Catalog entries that support `generateContent`.
    pub async fn list_generation_models(&self) -> Result<Vec<GeminiModelInfo>> {
        let models = self.list_models().await?;
        Ok(models
            .into_iter()
            .filter(|model| model.supports_generate_content())
            .collect())
    }
}

fn blocked_reasons(feedback: &PromptFeedback) -> Option<String> {
    let mut reasons: Vec<String> = feedback
        .safety_ratings
        .iter()
        .filter(|rating| rating.blocked)
        .map(|rating| {
            format!(
                "Category: {}, Probability: {}",
                rating.category, rating.probability
            )
        })
        .collect();

    if reasons.is_empty() {
        if let Some(block_reason) = &feedback.block_reason {
            reasons.push(format!("Reason: {}", block_reason));
        }
    }

    if reasons.is_empty() {
        None
    } else {
        Some(reasons.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> TextClient {
        TextClient::new(Client::new(), "test_key")
    }

    #[test]
    fn test_defaults() {
        let client = test_client();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert_eq!(client.model(), DEFAULT_MODEL);
    }

    #[test]
    fn test_with_base_url() {
        let client = test_client().with_base_url("http://127.0.0.1:9999/v1beta");
        assert_eq!(client.base_url, "http://127.0.0.1:9999/v1beta");
    }

    #[test]
    fn test_with_model() {
        let client = test_client().with_model("gemini-1.5-pro-latest");
        assert_eq!(client.model(), "gemini-1.5-pro-latest");
    }

    #[test]
    fn test_url_construction() {
        let client = test_client()
            .with_base_url("https://test.api.com/v1beta")
            .with_model("gemini-custom");

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            client.base_url, client.model, client.api_key
        );
        assert_eq!(
            url,
            "https://test.api.com/v1beta/models/gemini-custom:generateContent?key=test_key"
        );
    }

    #[test]
    fn test_blocked_reasons_from_ratings() {
        let feedback = PromptFeedback {
            block_reason: Some("SAFETY".to_string()),
            safety_ratings: vec![
                crate::models::SafetyRating {
                    category: "HARM_CATEGORY_DANGEROUS_CONTENT".to_string(),
                    probability: "HIGH".to_string(),
                    blocked: true,
                },
                crate::models::SafetyRating {
                    category: "HARM_CATEGORY_HARASSMENT".to_string(),
                    probability: "NEGLIGIBLE".to_string(),
                    blocked: false,
                },
            ],
        };

        let reason = blocked_reasons(&feedback).unwrap();
        assert_eq!(
            reason,
            "Category: HARM_CATEGORY_DANGEROUS_CONTENT, Probability: HIGH"
        );
    }

    #[test]
    fn test_blocked_reasons_falls_back_to_block_reason() {
        let feedback = PromptFeedback {
            block_reason: Some("SAFETY".to_string()),
            safety_ratings: vec![],
        };

        assert_eq!(
            blocked_reasons(&feedback),
            Some("Reason: SAFETY".to_string())
        );
    }

    #[test]
    fn test_no_blocked_reasons() {
        let feedback = PromptFeedback {
            block_reason: None,
            safety_ratings: vec![],
        };

        assert!(blocked_reasons(&feedback).is_none());
    }
}
