use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
}

/// Flatten validator output into a single readable line, fields sorted by name.
pub fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let reasons: Vec<String> = errs
                .iter()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => e.code.to_string(),
                })
                .collect();
            format!("{}: {}", field, reasons.join(", "))
        })
        .collect();
    parts.sort();
    format!("Validation error: {}", parts.join("; "))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, validation_message(e)),
            AppError::Bcrypt(e) => {
                tracing::error!("Bcrypt error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Password hashing error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::Validate;

    async fn get_response_body(response: Response) -> (StatusCode, String) {
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    #[tokio::test]
    async fn test_not_found_error() {
        let error = AppError::NotFound("Project not found".to_string());
        let (status, body) = get_response_body(error.into_response()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Project not found"));
    }

    #[tokio::test]
    async fn test_bad_request_error() {
        let error = AppError::BadRequest("Invalid project ID".to_string());
        let (status, body) = get_response_body(error.into_response()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Invalid project ID"));
    }

    #[tokio::test]
    async fn test_conflict_error() {
        let error = AppError::Conflict("Domain already exists".to_string());
        let (status, _) = get_response_body(error.into_response()).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_database_error_hides_details() {
        let error = AppError::Database(sea_orm::DbErr::Custom("secret table".to_string()));
        let (status, body) = get_response_body(error.into_response()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("secret table"));
        assert!(body.contains("Database error"));
    }

    #[tokio::test]
    async fn test_json_error_response_format() {
        let error = AppError::NotFound("Domain not found".to_string());
        let (_, body) = get_response_body(error.into_response()).await;

        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["message"], "Domain not found");
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "must not be empty"))]
        name: String,
        #[validate(range(min = 0, max = 100))]
        cpu: i32,
    }

    #[tokio::test]
    async fn test_validation_error_is_bad_request() {
        let errors = Sample {
            name: String::new(),
            cpu: 140,
        }
        .validate()
        .unwrap_err();

        let message = validation_message(&errors);
        assert!(message.starts_with("Validation error: "));
        assert!(message.contains("cpu: range"));
        assert!(message.contains("name: must not be empty"));
        // fields come out sorted
        assert!(message.find("cpu").unwrap() < message.find("name").unwrap());

        let (status, _) = get_response_body(AppError::from(errors).into_response()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_display_keeps_message() {
        let error = AppError::Conflict("Username already exists".to_string());
        assert!(error.to_string().ends_with("Username already exists"));
    }

    #[test]
    fn test_db_err_converts() {
        let error: AppError = sea_orm::DbErr::RecordNotFound("projects".to_string()).into();
        assert!(matches!(error, AppError::Database(_)));
    }
}
