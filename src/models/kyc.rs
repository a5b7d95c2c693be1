use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity document kinds the verification backend accepts.
///
/// The wire strings are deployment-defined; this set matches the dashboard's
/// dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdType {
    Passport,
    DriverLicense,
    NationalId,
    Ssn,
    IdCard,
}

impl IdType {
    pub const ALL: [IdType; 5] = [
        IdType::Passport,
        IdType::DriverLicense,
        IdType::NationalId,
        IdType::Ssn,
        IdType::IdCard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IdType::Passport => "passport",
            IdType::DriverLicense => "driver_license",
            IdType::NationalId => "national_id",
            IdType::Ssn => "ssn",
            IdType::IdCard => "id_card",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IdType::Passport => "Passport",
            IdType::DriverLicense => "Driver's License",
            IdType::NationalId => "National ID",
            IdType::Ssn => "Social Security Number",
            IdType::IdCard => "ID Card",
        }
    }

    pub fn parse(value: &str) -> Option<IdType> {
        match value.trim().to_lowercase().as_str() {
            "passport" => Some(IdType::Passport),
            "driver_license" | "drivers_license" => Some(IdType::DriverLicense),
            "national_id" => Some(IdType::NationalId),
            "ssn" | "nin" => Some(IdType::Ssn),
            "id_card" => Some(IdType::IdCard),
            _ => None,
        }
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The client's best-known verification status.
///
/// The first four variants mirror the backend's reported values. `Error` is
/// client-local ("could not determine status"). `Unknown` preserves a backend
/// value this client does not recognize so it is never silently dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    NotSubmitted,
    Pending,
    Approved,
    Rejected,
    Error,
    Unknown(String),
}

impl VerificationStatus {
    /// Deterministic mapping from the backend's status string.
    pub fn from_backend(raw: &str) -> VerificationStatus {
        match raw {
            "not_submitted" => VerificationStatus::NotSubmitted,
            "pending" => VerificationStatus::Pending,
            "approved" => VerificationStatus::Approved,
            "rejected" => VerificationStatus::Rejected,
            other => VerificationStatus::Unknown(other.to_string()),
        }
    }

    /// A new submission is never allowed while a request is pending review or
    /// already approved. Rejection re-enables submission.
    pub fn blocks_submission(&self) -> bool {
        matches!(
            self,
            VerificationStatus::Pending | VerificationStatus::Approved
        )
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationStatus::NotSubmitted => f.write_str("not submitted"),
            VerificationStatus::Pending => f.write_str("pending review"),
            VerificationStatus::Approved => f.write_str("approved"),
            VerificationStatus::Rejected => f.write_str("rejected"),
            VerificationStatus::Error => f.write_str("unknown (status check failed)"),
            VerificationStatus::Unknown(raw) => write!(f, "unrecognized ({})", raw),
        }
    }
}

/// Which side of the identity document an image shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSide {
    Front,
    Back,
}

impl fmt::Display for ImageSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSide::Front => f.write_str("front"),
            ImageSide::Back => f.write_str("back"),
        }
    }
}

/// A selected image that passed file-level validation but has not been
/// uploaded yet.
#[derive(Debug, Clone)]
pub struct LocalImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Reference to an image accepted by blob storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedAsset {
    pub url: String,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

/// One document side within a draft: either still local, or already uploaded.
///
/// Upload results replace the local bytes so a retried submission reuses the
/// existing URL instead of uploading again.
#[derive(Debug, Clone)]
pub enum ImageSlot {
    Local(LocalImage),
    Uploaded(UploadedAsset),
}

/// A verification request under construction, held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct VerificationDraft {
    pub id: Uuid,
    pub id_type: Option<IdType>,
    pub front: Option<ImageSlot>,
    pub back: Option<ImageSlot>,
    pub front_text: Option<String>,
    pub back_text: Option<String>,
}

impl VerificationDraft {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            ..Default::default()
        }
    }
}

/// Returned to the caller after a fully successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub draft_id: Uuid,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

/// Verification status as reported by one backend read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub status: VerificationStatus,
    pub rejection_reason: Option<String>,
}

// Wire types. Field names follow the backend contract (camelCase).

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycSubmitRequest {
    pub id_type: IdType,
    pub front_url: String,
    pub back_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct KycStatusResponse {
    pub status: String,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct KycSubmitResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct BlobUploadResponse {
    pub url: String,
}
