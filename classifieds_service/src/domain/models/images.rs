//! Image set rules of an ad: count bounds, size cap and upload paths

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Datelike, Utc};
use thiserror::Error;
use models_classifieds::api::ImageUpload;
use models_classifieds::service::{AdImage, FormErrors};
use uuid::Uuid;

/// Directory uploads are stored under
pub const UPLOAD_BASE: &str = "ads";

/// Largest per image size cap that can be configured
pub const MAX_IMAGE_SIZE_MB_LIMIT: u64 = 1024;

const BYTES_PER_MB: u64 = 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImagePolicyErr {
    #[error("at least 1 image per ad must be allowed")]
    NoImagesAllowed,
    #[error("image size cap must be between 1 and {limit} MB, got {0}", limit = MAX_IMAGE_SIZE_MB_LIMIT)]
    SizeOutOfRange(u64),
}

/// Limits applied to the images of one ad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePolicy {
    pub max_images: usize,
    pub max_image_size_mb: u64,
}

impl Default for ImagePolicy {
    fn default() -> Self {
        Self {
            max_images: 20,
            max_image_size_mb: 5,
        }
    }
}

impl ImagePolicy {
    pub fn new(max_images: usize, max_image_size_mb: u64) -> Result<Self, ImagePolicyErr> {
        if max_images == 0 {
            return Err(ImagePolicyErr::NoImagesAllowed);
        }
        if !(1..=MAX_IMAGE_SIZE_MB_LIMIT).contains(&max_image_size_mb) {
            return Err(ImagePolicyErr::SizeOutOfRange(max_image_size_mb));
        }
        Ok(Self {
            max_images,
            max_image_size_mb,
        })
    }

    fn max_bytes(&self) -> u64 {
        self.max_image_size_mb.saturating_mul(BYTES_PER_MB)
    }

    /// Number of images the ad holds once `delete_ids` are removed and `uploads` added
    pub fn final_count(existing: &[AdImage], uploads: &[ImageUpload], delete_ids: &[Uuid]) -> usize {
        let deleted: HashSet<Uuid> = delete_ids.iter().copied().collect();
        let kept = existing.iter().filter(|i| !deleted.contains(&i.id)).count();
        kept + uploads.len()
    }

    /// Form level checks of a submitted image set. Per upload messages are keyed by its index.
    pub fn validate_formset(
        &self,
        existing: &[AdImage],
        uploads: &[ImageUpload],
        delete_ids: &[Uuid],
    ) -> FormErrors {
        let mut errors = FormErrors::new();

        for (index, upload) in uploads.iter().enumerate() {
            if upload.size_bytes > self.max_bytes() {
                errors.add_field(
                    index.to_string(),
                    format!("Image size must be under {} MB.", self.max_image_size_mb),
                );
            }
        }

        let owned: HashSet<Uuid> = existing.iter().map(|i| i.id).collect();
        if delete_ids.iter().any(|id| !owned.contains(id)) {
            errors.add_non_field("One or more images do not belong to this ad.");
        }

        let count = Self::final_count(existing, uploads, delete_ids);
        if count == 0 {
            errors.add_non_field("You need to upload at least 1 image.");
        } else if count > self.max_images {
            errors.add_non_field(format!(
                "You can upload a maximum of {} images.",
                self.max_images
            ));
        }

        errors
    }

    /// Last check right before the write, on the records about to be stored
    pub fn validate_stored(&self, final_count: usize, new_images: &[AdImage]) -> FormErrors {
        let mut errors = FormErrors::new();

        if new_images
            .iter()
            .any(|i| u64::try_from(i.size_bytes).unwrap_or(u64::MAX) > self.max_bytes())
        {
            errors.add_non_field(format!(
                "Image size must be less than {} MB.",
                self.max_image_size_mb
            ));
        }
        if final_count > self.max_images {
            errors.add_non_field(format!(
                "Maximum {} images are allowed per Ad.",
                self.max_images
            ));
        }

        errors
    }
}

/// `ads/<YYYY>/<MM>/<random hex><.ext>` with the extension lowercased
pub fn upload_path(file_name: &str, now: DateTime<Utc>) -> String {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default();

    format!(
        "{UPLOAD_BASE}/{:04}/{:02}/{}{extension}",
        now.year(),
        now.month(),
        Uuid::new_v4().simple()
    )
}
