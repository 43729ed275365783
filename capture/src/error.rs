use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("scan device unavailable: {0}")]
    ScanDevice(String),
}
