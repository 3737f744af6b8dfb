use actix_web::{http::StatusCode, web, HttpResponse};
use serde_json::json;

use super::AppState;
use crate::content;
use crate::error::GeminiError;
use crate::logger;
use crate::models::{ErrorResponse, GenerateRequest};

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub async fn generate(
    state: web::Data<AppState>,
    body: web::Json<GenerateRequest>,
) -> HttpResponse {
    let script_or_summary = body.script_or_summary.trim();

    if script_or_summary.is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Please provide a video script or summary.",
        ));
    }

    // Both checks run before any network traffic: a missing credential and a
    // client that never came up report distinct messages.
    if !state.config.has_api_key() {
        return error_response(&GeminiError::ConfigError(
            "API_KEY environment variable not set.".to_string(),
        ));
    }

    let Some(generator) = state.generator.as_ref() else {
        return error_response(&GeminiError::ClientError(
            "Gemini client could not be configured. Check API key and network.".to_string(),
        ));
    };

    let _timer = logger::timer("generate");

    match content::generate_video_content(generator.as_ref(), script_or_summary).await {
        Ok(generated) => HttpResponse::Ok().json(generated),
        Err(err) => {
            log::error!("Generation failed: {}", err);
            error_response(&err)
        }
    }
}

fn error_response(err: &GeminiError) -> HttpResponse {
    HttpResponse::build(error_status(err)).json(ErrorResponse::new(err.to_string()))
}

// Configuration and upstream failures are deliberately not distinguished in
// the status code; only invalid input maps to 400.
fn error_status(err: &GeminiError) -> StatusCode {
    match err {
        GeminiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            error_status(&GeminiError::InvalidInput("empty".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&GeminiError::ConfigError("no key".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            error_status(&GeminiError::ApiError("HTTP 503".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            error_status(&GeminiError::ContentBlocked("Category: X".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
