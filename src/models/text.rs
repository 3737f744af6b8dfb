use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct TextGenerationRequest {
    pub prompt: String,
    pub max_tokens: Option<i32>,
    pub temperature: Option<f32>,
    pub stop_sequences: Option<Vec<String>>,
    pub model_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TextGenerationResponse {
    pub text: String,
    pub model: String,
    pub finish_reason: Option<String>,
}
