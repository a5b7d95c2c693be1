pub mod kyc;
pub mod tier;
