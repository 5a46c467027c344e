use axum::response::{IntoResponse, Response};
use axum_helpers::{errors::ErrorCode, AppError};
use mongodb::bson::oid::ObjectId;
use storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Malformed multipart form data: {0}")]
    UploadParse(String),

    #[error("File in group '{group}' exceeds the {limit} byte limit")]
    PayloadTooLarge { group: &'static str, limit: usize },

    #[error("Too many files in group '{group}' (limit {limit})")]
    TooManyFiles { group: &'static str, limit: usize },

    #[error("Upload failed for {group}[{index}]: {source}")]
    PartialUpload {
        group: &'static str,
        index: usize,
        #[source]
        source: StorageError,
    },

    #[error("Upload timed out for {group}[{index}]")]
    UploadTimeout { group: &'static str, index: usize },

    #[error("Invalid value for field '{field}': '{value}'")]
    InvalidField { field: &'static str, value: String },

    #[error("Could not allocate a unique productId")]
    IdExhausted,

    #[error("Product not found: {0}")]
    NotFound(ObjectId),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Convert CatalogError to AppError for standardized error responses
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UploadParse(msg) => {
                AppError::BadRequest(format!("Malformed multipart form data: {}", msg))
            }
            CatalogError::PayloadTooLarge { group, limit } => AppError::PayloadTooLarge(format!(
                "File in group '{}' exceeds the {} byte limit",
                group, limit
            )),
            CatalogError::TooManyFiles { group, limit } => AppError::BadRequest(format!(
                "Too many files in group '{}' (limit {})",
                group, limit
            )),
            CatalogError::PartialUpload {
                group,
                index,
                source,
            } => {
                let code = match source {
                    StorageError::Network(_) => ErrorCode::StorageUnavailable,
                    _ => ErrorCode::StorageRejected,
                };
                AppError::BadGateway {
                    message: format!("Upload failed for {}[{}]: {}", group, index, source),
                    code,
                }
            }
            CatalogError::UploadTimeout { group, index } => AppError::BadGateway {
                message: format!("Upload timed out for {}[{}]", group, index),
                code: ErrorCode::StorageTimeout,
            },
            CatalogError::InvalidField { field, value } => {
                AppError::BadRequest(format!("Invalid value for field '{}': '{}'", field, value))
            }
            CatalogError::IdExhausted => {
                AppError::InternalServerError("Could not allocate a unique productId".to_string())
            }
            CatalogError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            CatalogError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
