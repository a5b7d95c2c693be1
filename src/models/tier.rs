use serde::{Deserialize, Serialize};
use std::fmt;

/// Account tiers, ordered. The backend identifies tiers by number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TierLevel {
    Basic,
    Elite,
    Premium,
}

impl TierLevel {
    pub fn as_number(&self) -> u8 {
        match self {
            TierLevel::Basic => 1,
            TierLevel::Elite => 2,
            TierLevel::Premium => 3,
        }
    }

    pub fn from_number(value: u8) -> Option<TierLevel> {
        match value {
            1 => Some(TierLevel::Basic),
            2 => Some(TierLevel::Elite),
            3 => Some(TierLevel::Premium),
            _ => None,
        }
    }

    pub fn parse(value: &str) -> Option<TierLevel> {
        match value.trim().to_lowercase().as_str() {
            "1" | "basic" => Some(TierLevel::Basic),
            "2" | "elite" => Some(TierLevel::Elite),
            "3" | "premium" => Some(TierLevel::Premium),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TierLevel::Basic => "Basic Level",
            TierLevel::Elite => "Elite Level",
            TierLevel::Premium => "Premium Level",
        }
    }
}

impl fmt::Display for TierLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// State of the user's tier-upgrade request, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierRequestStatus {
    NoRequest,
    Pending,
    Approved,
    Rejected,
    Unknown(String),
}

impl TierRequestStatus {
    pub fn from_backend(raw: Option<&str>) -> TierRequestStatus {
        match raw {
            None => TierRequestStatus::NoRequest,
            Some("pending") => TierRequestStatus::Pending,
            Some("approved") => TierRequestStatus::Approved,
            Some("rejected") => TierRequestStatus::Rejected,
            Some(other) => TierRequestStatus::Unknown(other.to_string()),
        }
    }

    pub fn blocks_new_request(&self) -> bool {
        matches!(
            self,
            TierRequestStatus::Pending | TierRequestStatus::Approved
        )
    }
}

impl fmt::Display for TierRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TierRequestStatus::NoRequest => f.write_str("no request on file"),
            TierRequestStatus::Pending => f.write_str("pending approval"),
            TierRequestStatus::Approved => f.write_str("approved"),
            TierRequestStatus::Rejected => f.write_str("rejected"),
            TierRequestStatus::Unknown(raw) => write!(f, "unrecognized ({})", raw),
        }
    }
}

/// The user's current tier plus any outstanding upgrade request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierStanding {
    pub level: u8,
    pub request: TierRequestStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierStatusResponse {
    #[serde(default)]
    pub status: Option<String>,
    pub tier_level: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierUpgradeRequest {
    pub tier_level: u8,
}

#[derive(Debug, Deserialize)]
pub struct TierUpgradeResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TierErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
