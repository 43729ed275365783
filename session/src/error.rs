use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session I/O error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("session file is corrupted: {0}")]
    Corruption(String),
}
