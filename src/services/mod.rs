pub mod blob_service;
pub mod kyc_service;
pub mod ocr_service;
pub mod poller;
pub mod session;
pub mod status;
pub mod tier_service;
