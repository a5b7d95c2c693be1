use crate::models::kyc::{ImageSide, VerificationStatus};
use thiserror::Error;

/// Errors surfaced by the client workflows.
///
/// Display strings are what the user sees. Technical causes (HTTP status,
/// transport errors) are logged by the services before the error is built and
/// kept in fields for callers that need them.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Please select an ID type")]
    MissingIdType,

    #[error("Both front and back images are required")]
    MissingImage,

    #[error("Unsupported file type '{0}'. Please choose a JPEG or PNG image")]
    InvalidFileType(String),

    #[error("Image is too large ({size_bytes} bytes, limit {max_bytes} bytes)")]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },

    #[error("A verification request is already {0}")]
    AlreadySubmitted(VerificationStatus),

    #[error("You must be logged in to do this")]
    Unauthenticated,

    #[error("Failed to upload the {side} image. Please try again")]
    UploadFailed { side: ImageSide, cause: String },

    #[error("Failed to submit KYC details: {0}")]
    SubmissionFailed(String),

    #[error("Could not determine verification status: {0}")]
    StatusFetchFailed(String),

    #[error("Text extraction failed: {0}")]
    OcrFailed(String),

    #[error("Tier upgrade request failed: {0}")]
    UpgradeFailed(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
