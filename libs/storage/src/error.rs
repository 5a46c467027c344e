use thiserror::Error;

/// Errors surfaced by object storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend accepted the request but refused the upload
    /// (size/type rejection, auth failure, quota).
    #[error("storage backend rejected upload with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The backend could not be reached or the transfer broke mid-flight.
    #[error("storage network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Disk-backed store failed to persist the buffer.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend responded 2xx but the body did not carry a usable URL.
    #[error("unexpected storage response: {0}")]
    InvalidResponse(String),

    /// The storage backend is misconfigured.
    #[error("storage configuration error: {0}")]
    Config(String),
}
