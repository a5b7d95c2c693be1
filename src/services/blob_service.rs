use crate::config::ClientConfig;
use crate::errors::{AppError, Result};
use crate::models::kyc::{BlobUploadResponse, ImageSide, LocalImage, UploadedAsset};
use crate::services::session::SessionProvider;
use reqwest::multipart;
use reqwest::Client;
use std::sync::Arc;
use tracing::{error, info};

/// Client for the blob storage collaborator.
///
/// Uploads image bytes and returns the stable URL blob storage assigns.
/// Assets are requested with public access so the verification backend can
/// retrieve them by URL without further authorization.
pub struct BlobService {
    client: Client,
    upload_url: String,
    session: Arc<dyn SessionProvider>,
}

impl BlobService {
    pub fn new(config: &ClientConfig, session: Arc<dyn SessionProvider>) -> Self {
        Self {
            client: Client::new(),
            upload_url: format!("{}/api/kyc/upload", config.blob_url.trim_end_matches('/')),
            session,
        }
    }

    pub async fn upload(&self, side: ImageSide, image: &LocalImage) -> Result<UploadedAsset> {
        let size_bytes = image.bytes.len() as u64;

        let part = multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| AppError::InternalError(format!("Invalid content type: {}", e)))?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("access", "public");

        let mut request = self.client.post(&self.upload_url).multipart(form);
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            error!("Blob upload request failed ({} image): {}", side, e);
            AppError::UploadFailed {
                side,
                cause: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                "Blob storage rejected {} image upload: HTTP {} {}",
                side, status, body
            );
            return Err(AppError::UploadFailed {
                side,
                cause: format!("blob storage returned HTTP {}", status),
            });
        }

        let body: BlobUploadResponse = response.json().await.map_err(|e| {
            error!("Failed to parse blob upload response ({}): {}", side, e);
            AppError::UploadFailed {
                side,
                cause: format!("invalid upload response: {}", e),
            }
        })?;

        info!(
            "Uploaded {} image {} ({} bytes) -> {}",
            side, image.file_name, size_bytes, body.url
        );

        Ok(UploadedAsset {
            url: body.url,
            file_name: image.file_name.clone(),
            content_type: image.content_type.clone(),
            size_bytes,
        })
    }
}
