use serde::{Deserialize, Serialize};

/// Body of `POST /generate`. A missing field is treated as empty input.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub script_or_summary: String,
}

/// Successful relay result: exactly 3 titles plus a description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedContent {
    pub titles: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorResponse {
            error: message.into(),
        }
    }
}
