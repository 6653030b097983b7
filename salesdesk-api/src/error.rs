use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use shared_types::ErrorResponse;

pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by stores, matching and enrichment
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EngineError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        EngineError::NotFound { entity, id }
    }
}

impl ResponseError for EngineError {
    fn status_code(&self) -> StatusCode {
        match self {
            EngineError::NotFound { .. } => StatusCode::NOT_FOUND,
            EngineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            EngineError::not_found("lead", 3).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            EngineError::InvalidInput("no fields".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            EngineError::from(rusqlite::Error::QueryReturnedNoRows).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            EngineError::not_found("contact", 42).to_string(),
            "contact 42 not found"
        );
    }
}
