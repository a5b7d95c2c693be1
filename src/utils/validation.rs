use crate::errors::{AppError, Result};
use crate::models::kyc::{VerificationDraft, VerificationStatus};
use std::path::Path;

/// Maximum accepted identity image size.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Content types blob storage will accept for identity images.
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/jpg"];

pub struct Validator;

impl Validator {
    /// File-level check applied at selection time, before any upload.
    ///
    /// Pure and synchronous; a file that fails here never enters the draft.
    pub fn validate_image_file(content_type: &str, size_bytes: u64) -> Result<()> {
        if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
            return Err(AppError::InvalidFileType(content_type.to_string()));
        }

        if size_bytes > MAX_IMAGE_BYTES {
            return Err(AppError::FileTooLarge {
                size_bytes,
                max_bytes: MAX_IMAGE_BYTES,
            });
        }

        Ok(())
    }

    /// Submission gate. Pure and synchronous; performs no I/O.
    ///
    /// Rules are checked in order: an in-flight or approved verification wins
    /// over any draft problem.
    pub fn validate_draft(
        draft: &VerificationDraft,
        current_status: &VerificationStatus,
    ) -> Result<()> {
        if current_status.blocks_submission() {
            return Err(AppError::AlreadySubmitted(current_status.clone()));
        }

        if draft.id_type.is_none() {
            return Err(AppError::MissingIdType);
        }

        if draft.front.is_none() || draft.back.is_none() {
            return Err(AppError::MissingImage);
        }

        Ok(())
    }

    /// Content type for an image path, by extension.
    pub fn image_content_type(path: &Path) -> Result<&'static str> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "jpg" | "jpeg" => Ok("image/jpeg"),
            "png" => Ok("image/png"),
            other => Err(AppError::InvalidFileType(if other.is_empty() {
                "unknown".to_string()
            } else {
                other.to_string()
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::kyc::{IdType, ImageSlot, LocalImage};

    fn image(size: usize) -> LocalImage {
        LocalImage {
            file_name: "front.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![0u8; size],
        }
    }

    fn complete_draft() -> VerificationDraft {
        let mut draft = VerificationDraft::new();
        draft.id_type = Some(IdType::Passport);
        draft.front = Some(ImageSlot::Local(image(1024)));
        draft.back = Some(ImageSlot::Local(image(1024)));
        draft
    }

    #[test]
    fn accepts_allowed_types_up_to_the_cap() {
        for content_type in ALLOWED_IMAGE_TYPES {
            assert!(Validator::validate_image_file(content_type, 1024).is_ok());
        }
        assert!(Validator::validate_image_file("image/jpeg", MAX_IMAGE_BYTES).is_ok());
    }

    #[test]
    fn rejects_disallowed_types() {
        for content_type in ["image/gif", "application/pdf", "text/plain", ""] {
            match Validator::validate_image_file(content_type, 1024) {
                Err(AppError::InvalidFileType(reported)) => {
                    assert_eq!(reported, content_type)
                }
                other => panic!("expected InvalidFileType, got {:?}", other),
            }
        }
    }

    #[test]
    fn rejects_files_over_five_mebibytes() {
        match Validator::validate_image_file("image/png", MAX_IMAGE_BYTES + 1) {
            Err(AppError::FileTooLarge {
                size_bytes,
                max_bytes,
            }) => {
                assert_eq!(size_bytes, MAX_IMAGE_BYTES + 1);
                assert_eq!(max_bytes, MAX_IMAGE_BYTES);
            }
            other => panic!("expected FileTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn gate_rejects_while_pending_or_approved_regardless_of_draft() {
        let draft = complete_draft();
        for status in [VerificationStatus::Pending, VerificationStatus::Approved] {
            match Validator::validate_draft(&draft, &status) {
                Err(AppError::AlreadySubmitted(reported)) => assert_eq!(reported, status),
                other => panic!("expected AlreadySubmitted, got {:?}", other),
            }
        }

        // Even an empty draft reports AlreadySubmitted first.
        let empty = VerificationDraft::new();
        assert!(matches!(
            Validator::validate_draft(&empty, &VerificationStatus::Pending),
            Err(AppError::AlreadySubmitted(_))
        ));
    }

    #[test]
    fn gate_requires_id_type_then_both_images() {
        let mut draft = VerificationDraft::new();
        assert!(matches!(
            Validator::validate_draft(&draft, &VerificationStatus::NotSubmitted),
            Err(AppError::MissingIdType)
        ));

        draft.id_type = Some(IdType::NationalId);
        assert!(matches!(
            Validator::validate_draft(&draft, &VerificationStatus::NotSubmitted),
            Err(AppError::MissingImage)
        ));

        draft.front = Some(ImageSlot::Local(image(512)));
        assert!(matches!(
            Validator::validate_draft(&draft, &VerificationStatus::NotSubmitted),
            Err(AppError::MissingImage)
        ));

        draft.back = Some(ImageSlot::Local(image(512)));
        assert!(Validator::validate_draft(&draft, &VerificationStatus::NotSubmitted).is_ok());
    }

    #[test]
    fn gate_allows_resubmission_after_rejection() {
        let draft = complete_draft();
        assert!(Validator::validate_draft(&draft, &VerificationStatus::Rejected).is_ok());
    }

    #[test]
    fn content_type_inferred_from_extension() {
        assert_eq!(
            Validator::image_content_type(Path::new("scan.JPG")).unwrap(),
            "image/jpeg"
        );
        assert_eq!(
            Validator::image_content_type(Path::new("scan.png")).unwrap(),
            "image/png"
        );
        assert!(matches!(
            Validator::image_content_type(Path::new("scan.gif")),
            Err(AppError::InvalidFileType(_))
        ));
        assert!(matches!(
            Validator::image_content_type(Path::new("scan")),
            Err(AppError::InvalidFileType(_))
        ));
    }
}
