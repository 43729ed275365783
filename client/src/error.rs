use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logging error: {0}")]
    Logging(String),

    #[error("verification error: {0}")]
    Verification(#[from] facegate_verification::VerificationError),

    #[error("lookup error: {0}")]
    Lookup(#[from] facegate_lookup::LookupError),

    #[error("session error: {0}")]
    Session(#[from] facegate_session::SessionError),
}
