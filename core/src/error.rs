use thiserror::Error;

/// Feiltaksonomi for kjernen.
///
/// Ingen av disse er fatale: korrupsjon og nettfeil håndteres lokalt
/// (fallback til fravær/0 eller kun lokal lagring).
#[derive(Error, Debug)]
pub enum StriveError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("corrupt entry at '{key}': {detail}")]
    StorageCorruption { key: String, detail: String },
    #[error("remote unavailable: {0}")]
    RemoteUnavailable(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl StriveError {
    pub fn validation(msg: impl Into<String>) -> Self {
        StriveError::Validation(msg.into())
    }

    /// Feil som skal tas hånd om lokalt og aldri stoppe brukeren.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StriveError::StorageCorruption { .. } | StriveError::RemoteUnavailable(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, StriveError>;
