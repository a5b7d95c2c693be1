use crate::config::ClientConfig;
use crate::errors::{AppError, Result};
use crate::models::tier::{
    TierErrorBody, TierLevel, TierRequestStatus, TierStanding, TierStatusResponse,
    TierUpgradeRequest, TierUpgradeResponse,
};
use crate::services::session::SessionProvider;
use reqwest::Client;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Client side of the tier-upgrade workflow.
///
/// Same shape as the KYC workflow, without the asset uploads: read the
/// current standing, gate locally, post the request.
pub struct TierService {
    client: Client,
    status_url: String,
    upgrade_url: String,
    session: Arc<dyn SessionProvider>,
}

impl TierService {
    pub fn new(config: &ClientConfig, session: Arc<dyn SessionProvider>) -> Self {
        let api = config.api_url.trim_end_matches('/');
        Self {
            client: Client::new(),
            status_url: format!("{}/api/users/tier-upgrade/status", api),
            upgrade_url: format!("{}/api/users/tier-upgrade", api),
            session,
        }
    }

    pub async fn fetch_standing(&self) -> Result<TierStanding> {
        let Some(token) = self.session.token() else {
            return Err(AppError::Unauthenticated);
        };

        let response = self
            .client
            .get(&self.status_url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                error!("Tier status request failed: {}", e);
                AppError::StatusFetchFailed("could not reach the account service".to_string())
            })?;

        let http_status = response.status();
        if !http_status.is_success() {
            error!("Tier status endpoint returned HTTP {}", http_status);
            return Err(AppError::StatusFetchFailed(
                "could not reach the account service".to_string(),
            ));
        }

        let body: TierStatusResponse = response.json().await.map_err(|e| {
            error!("Invalid tier status response: {}", e);
            AppError::StatusFetchFailed("invalid response from the account service".to_string())
        })?;

        let request = TierRequestStatus::from_backend(body.status.as_deref());
        if let TierRequestStatus::Unknown(raw) = &request {
            warn!("Backend reported unrecognized tier request status: {}", raw);
        }

        Ok(TierStanding {
            level: body.tier_level,
            request,
        })
    }

    /// Request an upgrade to `target`. Gated locally: an outstanding request
    /// blocks a new one, and the target must be above the current tier.
    pub async fn request_upgrade(&self, target: TierLevel) -> Result<String> {
        let Some(token) = self.session.token() else {
            return Err(AppError::Unauthenticated);
        };

        let standing = self.fetch_standing().await?;
        match standing.request {
            TierRequestStatus::Pending => {
                return Err(AppError::ValidationError(
                    "A tier upgrade request is already pending approval".to_string(),
                ));
            }
            TierRequestStatus::Approved => {
                return Err(AppError::ValidationError(
                    "Your tier upgrade has already been approved".to_string(),
                ));
            }
            _ => {}
        }
        if target.as_number() <= standing.level {
            return Err(AppError::ValidationError(format!(
                "{} is not above your current tier",
                target
            )));
        }

        let response = self
            .client
            .post(&self.upgrade_url)
            .bearer_auth(token)
            .json(&TierUpgradeRequest {
                tier_level: target.as_number(),
            })
            .send()
            .await
            .map_err(|e| {
                error!("Tier upgrade request failed: {}", e);
                AppError::UpgradeFailed("could not reach the account service".to_string())
            })?;

        let http_status = response.status();
        if !http_status.is_success() {
            let cause = match response.json::<TierErrorBody>().await {
                Ok(TierErrorBody {
                    message: Some(message),
                }) => message,
                _ => format!("account service returned HTTP {}", http_status),
            };
            error!("Tier upgrade rejected: {}", cause);
            return Err(AppError::UpgradeFailed(cause));
        }

        let message = match response.json::<TierUpgradeResponse>().await {
            Ok(TierUpgradeResponse {
                message: Some(message),
            }) => message,
            _ => format!("Upgrade to {} requested", target),
        };

        info!("Tier upgrade to {} requested", target);
        Ok(message)
    }
}
