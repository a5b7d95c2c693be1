use crate::config::ClientConfig;
use crate::errors::{AppError, Result};
use crate::models::kyc::{
    ApiErrorBody, ImageSide, ImageSlot, KycStatusResponse, KycSubmitRequest, KycSubmitResponse,
    LocalImage, StatusReport, SubmissionReceipt, UploadedAsset, VerificationDraft,
    VerificationStatus,
};
use crate::services::blob_service::BlobService;
use crate::services::session::SessionProvider;
use crate::services::status::StatusCell;
use crate::utils::validation::Validator;
use chrono::Utc;
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Client side of the KYC verification workflow.
///
/// Owns the cached verification status (shared with the poller), validates
/// drafts, orchestrates the two asset uploads, and submits the structured
/// request to the verification backend.
pub struct KycService {
    client: Client,
    status_url: String,
    submit_url: String,
    session: Arc<dyn SessionProvider>,
    blob: BlobService,
    status: Arc<StatusCell>,
    // Serializes submissions so two overlapping submit calls cannot interleave.
    submit_lock: tokio::sync::Mutex<()>,
}

impl KycService {
    pub fn new(config: &ClientConfig, session: Arc<dyn SessionProvider>) -> Self {
        let api = config.api_url.trim_end_matches('/');
        Self {
            client: Client::new(),
            status_url: format!("{}/api/kyc/status", api),
            submit_url: format!("{}/api/kyc/submit", api),
            blob: BlobService::new(config, session.clone()),
            session,
            status: Arc::new(StatusCell::new()),
            submit_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// The shared status cell, also read by the poller and the UI layer.
    pub fn status_cell(&self) -> Arc<StatusCell> {
        self.status.clone()
    }

    pub fn current_status(&self) -> VerificationStatus {
        self.status.status()
    }

    /// Attach a validated image to the draft. Pure apart from the draft
    /// mutation; a file that fails validation never enters the draft.
    pub fn attach_image(
        &self,
        draft: &mut VerificationDraft,
        side: ImageSide,
        image: LocalImage,
    ) -> Result<()> {
        Validator::validate_image_file(&image.content_type, image.bytes.len() as u64)?;
        match side {
            ImageSide::Front => {
                draft.front = Some(ImageSlot::Local(image));
                draft.front_text = None;
            }
            ImageSide::Back => {
                draft.back = Some(ImageSlot::Local(image));
                draft.back_text = None;
            }
        }
        Ok(())
    }

    /// Read the verification status from the backend and update the cache.
    ///
    /// Without a session token the call is skipped and the status defaults to
    /// not-submitted, so the form stays browsable before login. Failures map
    /// the cached status to `Error` and are not retried here; the poller (or
    /// the user) simply calls again.
    pub async fn fetch_status(&self) -> Result<StatusReport> {
        let (observed_seq, _) = self.status.snapshot();

        let Some(token) = self.session.token() else {
            debug!("No session token; treating verification status as not submitted");
            self.status
                .store_if_unchanged(observed_seq, VerificationStatus::NotSubmitted);
            return Ok(StatusReport {
                status: VerificationStatus::NotSubmitted,
                rejection_reason: None,
            });
        };

        match self.fetch_status_inner(&token).await {
            Ok(report) => {
                if !self
                    .status
                    .store_if_unchanged(observed_seq, report.status.clone())
                {
                    debug!("Discarding stale status poll result");
                }
                Ok(report)
            }
            Err(cause) => {
                error!("Verification status check failed: {}", cause);
                self.status
                    .store_if_unchanged(observed_seq, VerificationStatus::Error);
                Err(AppError::StatusFetchFailed(
                    "could not reach the verification service".to_string(),
                ))
            }
        }
    }

    async fn fetch_status_inner(&self, token: &str) -> std::result::Result<StatusReport, String> {
        let response = self
            .client
            .get(&self.status_url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("status endpoint returned HTTP {}", status));
        }

        let body: KycStatusResponse = response
            .json()
            .await
            .map_err(|e| format!("invalid status response: {}", e))?;

        let mapped = VerificationStatus::from_backend(&body.status);
        if let VerificationStatus::Unknown(raw) = &mapped {
            warn!("Backend reported unrecognized verification status: {}", raw);
        }

        Ok(StatusReport {
            status: mapped,
            rejection_reason: body.rejection_reason,
        })
    }

    /// Upload both assets (front before back) and submit the structured
    /// verification request.
    ///
    /// Upload results are written back into the draft, so retrying after a
    /// failed submission reuses the already-uploaded URLs instead of creating
    /// more orphaned blobs. On full success the cached status optimistically
    /// becomes pending without waiting for the next poll.
    pub async fn submit(&self, draft: &mut VerificationDraft) -> Result<SubmissionReceipt> {
        let Some(token) = self.session.token() else {
            return Err(AppError::Unauthenticated);
        };

        let _guard = self.submit_lock.lock().await;

        // Re-validated under the lock: a submission that finished while we
        // waited has already moved the cached status to pending.
        Validator::validate_draft(draft, &self.status.status())?;
        let id_type = draft.id_type.ok_or(AppError::MissingIdType)?;

        let front = Self::ensure_uploaded(&self.blob, ImageSide::Front, &mut draft.front).await?;
        let back = Self::ensure_uploaded(&self.blob, ImageSide::Back, &mut draft.back).await?;

        let request = KycSubmitRequest {
            id_type,
            front_url: front.url,
            back_url: back.url,
            front_text: draft.front_text.clone(),
            back_text: draft.back_text.clone(),
        };
        let submitted_at = Utc::now();

        let response = self
            .client
            .post(&self.submit_url)
            .bearer_auth(&token)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("KYC submission request failed: {}", e);
                AppError::SubmissionFailed("could not reach the verification service".to_string())
            })?;

        let http_status = response.status();
        if !http_status.is_success() {
            let cause = match response.json::<ApiErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => format!("verification service returned HTTP {}", http_status),
            };
            error!("KYC submission rejected: {}", cause);
            return Err(AppError::SubmissionFailed(cause));
        }

        let message = match response.json::<KycSubmitResponse>().await {
            Ok(body) => body.message,
            Err(e) => {
                // The backend accepted the submission; a malformed success
                // body must not turn that into a failure.
                warn!("Could not parse submission response body: {}", e);
                "KYC details submitted successfully.".to_string()
            }
        };

        self.status.store(VerificationStatus::Pending);
        info!(
            "KYC submission accepted for draft {}; status set to pending",
            draft.id
        );

        Ok(SubmissionReceipt {
            draft_id: draft.id,
            message,
            submitted_at,
        })
    }

    async fn ensure_uploaded(
        blob: &BlobService,
        side: ImageSide,
        slot: &mut Option<ImageSlot>,
    ) -> Result<UploadedAsset> {
        match slot {
            Some(ImageSlot::Uploaded(asset)) => {
                debug!("Reusing already-uploaded {} image: {}", side, asset.url);
                Ok(asset.clone())
            }
            Some(ImageSlot::Local(image)) => {
                let asset = blob.upload(side, image).await?;
                *slot = Some(ImageSlot::Uploaded(asset.clone()));
                Ok(asset)
            }
            None => Err(AppError::MissingImage),
        }
    }
}
