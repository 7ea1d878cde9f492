use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    /// The model answered, but not with the JSON we asked for.
    /// `raw` carries the model output only when the server may echo it.
    #[error("AI response error: {message}")]
    AiResponse {
        message: String,
        raw: Option<String>,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Not-found and not-owned share this error so the two cannot be told apart.
    pub fn resume_not_found() -> Self {
        AppError::NotFound("Resume not found".to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut debug = None;
        let (status, code, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg)
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "LLM_ERROR", msg)
            }
            AppError::Pdf(msg) => {
                tracing::error!("PDF error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "PDF_ERROR", msg)
            }
            AppError::AiResponse { message, raw } => {
                tracing::error!("AI response error: {message}");
                debug = raw;
                (StatusCode::INTERNAL_SERVER_ERROR, "AI_RESPONSE_ERROR", message)
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut body = json!({
            "error": {
                "code": code,
                "message": message
            }
        });
        if let Some(raw) = debug {
            body["debug"] = json!(raw);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_of(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_maps_to_400_with_message() {
        let (status, body) =
            body_of(AppError::Validation("Job description is required".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Job description is required");
    }

    #[tokio::test]
    async fn test_not_found_message_is_generic() {
        let (status, body) = body_of(AppError::resume_not_found()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Resume not found");
    }

    #[tokio::test]
    async fn test_ai_response_echoes_raw_only_when_present() {
        let (status, body) = body_of(AppError::AiResponse {
            message: "Could not parse AI response".into(),
            raw: Some("not json".into()),
        })
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["debug"], "not json");

        let (_, body) = body_of(AppError::AiResponse {
            message: "Could not parse AI response".into(),
            raw: None,
        })
        .await;
        assert!(body.get("debug").is_none());
    }

    #[tokio::test]
    async fn test_internal_hides_cause() {
        let (status, body) = body_of(AppError::Internal(anyhow::anyhow!("secret dsn"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "An internal server error occurred");
    }
}
