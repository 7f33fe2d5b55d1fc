use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use craftwiki_schema::{Category, ErrorPayload, UnknownCategory};
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum WikiError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("No {category} entry with id {id}")]
    NotFound { category: Category, id: i64 },

    #[error("Failed to create table {table}: {source}")]
    Schema {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Ractor error: {0}")]
    RactorError(String),
}

impl From<UnknownCategory> for WikiError {
    fn from(err: UnknownCategory) -> Self {
        WikiError::UnknownCategory(err.0)
    }
}

impl WikiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WikiError::UnknownCategory(_) | WikiError::Validation(_) => StatusCode::BAD_REQUEST,
            WikiError::NotFound { .. } => StatusCode::NOT_FOUND,
            WikiError::Schema { .. }
            | WikiError::DatabaseError(_)
            | WikiError::IoError(_)
            | WikiError::RactorError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            // Storage details stay in the logs.
            error!(error = %self, "request failed");
            "An internal server error occurred.".to_string()
        } else {
            self.to_string()
        };
        (status, Json(ErrorPayload::new(status.as_u16(), message))).into_response()
    }
}
