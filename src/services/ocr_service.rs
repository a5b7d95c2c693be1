use crate::config::ClientConfig;
use crate::errors::{AppError, Result};
use crate::models::kyc::LocalImage;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

/// Best-effort on-device text extraction.
///
/// Pipes the image bytes through an external OCR engine (tesseract in the
/// default deployment) with a hard timeout. Output is advisory only: callers
/// log failures and move on, and nothing in the submission path depends on a
/// result being present.
pub struct OcrService {
    command: Vec<String>,
    timeout: Duration,
}

impl OcrService {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            command: config
                .ocr_command
                .split_whitespace()
                .map(str::to_string)
                .collect(),
            timeout: config.ocr_timeout(),
        }
    }

    /// Extract text from the image. Re-invoking on the same bytes restarts
    /// the extraction from scratch.
    pub async fn extract_text(&self, image: &LocalImage) -> Result<String> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| AppError::OcrFailed("no OCR command configured".to_string()))?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                warn!("Could not start OCR engine '{}': {}", program, e);
                AppError::OcrFailed(format!("could not start '{}'", program))
            })?;

        let bytes = image.bytes.clone();
        let run = async {
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(&bytes).await?;
                drop(stdin);
            }
            child.wait_with_output().await
        };

        let output = match tokio::time::timeout(self.timeout, run).await {
            // kill_on_drop reaps the abandoned child on timeout.
            Err(_) => {
                warn!(
                    "OCR timed out after {:?} on {}",
                    self.timeout, image.file_name
                );
                return Err(AppError::OcrFailed("timed out".to_string()));
            }
            Ok(Err(e)) => {
                warn!("OCR engine I/O failure: {}", e);
                return Err(AppError::OcrFailed(e.to_string()));
            }
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                "OCR engine exited with {} on {}: {}",
                output.status,
                image.file_name,
                stderr.trim()
            );
            return Err(AppError::OcrFailed(format!(
                "engine exited with {}",
                output.status
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!(
            "Extracted {} characters of text from {}",
            text.len(),
            image.file_name
        );
        Ok(text)
    }
}
