use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("no image was captured")]
    MissingImage,

    #[error("failed to build multipart body: {0}")]
    Multipart(String),
}

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("failed to create HTTP client: {0}")]
    Client(String),

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}
