pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod utils;

pub use crate::config::ClientConfig;
pub use crate::errors::{AppError, Result};

// Re-export commonly used types
pub use crate::models::kyc::{
    IdType, ImageSide, LocalImage, SubmissionReceipt, VerificationDraft, VerificationStatus,
};
pub use crate::models::tier::{TierLevel, TierRequestStatus, TierStanding};
pub use crate::services::{
    kyc_service::KycService, ocr_service::OcrService, poller::StatusPoller,
    session::SessionProvider, tier_service::TierService,
};
