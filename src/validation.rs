//! Input checks for starch fields and image uploads.
//!
//! Image uploads are read once, size-checked, and embedded in the starch record as a
//! `data:` URI so the snapshot and full export stay self-contained.

use crate::errors::SeedingError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::path::Path;
use tokio::fs;

/// Default upper bound for uploaded images, in bytes.
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 500_000;

/// Trim a starch name and reject it when nothing is left.
pub fn validate_starch_name(name: &str) -> Result<String, SeedingError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SeedingError::EmptyName);
    }
    Ok(trimmed.to_string())
}

/// Trim a tournament name and reject it when nothing is left.
pub fn validate_tournament_name(name: &str) -> Result<String, SeedingError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SeedingError::EmptyTournamentName);
    }
    Ok(trimmed.to_string())
}

/// MIME type for an image path, judged by extension.
pub fn image_mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// Read an image file and return it as a `data:<mime>;base64,...` URI.
///
/// Files over `max_bytes` are rejected before their contents are read. Unknown
/// extensions and unreadable files are reported as [`SeedingError::ImageUnreadable`].
pub async fn load_image_data_uri(path: &Path, max_bytes: u64) -> Result<String, SeedingError> {
    let display = path.display().to_string();
    let unreadable = |reason: String| SeedingError::ImageUnreadable {
        path: display.clone(),
        reason,
    };

    let mime = image_mime_for(path).ok_or_else(|| unreadable("not an image file".to_string()))?;
    let metadata = fs::metadata(path).await.map_err(|e| unreadable(e.to_string()))?;
    if !metadata.is_file() {
        return Err(unreadable("not a regular file".to_string()));
    }
    if metadata.len() > max_bytes {
        return Err(SeedingError::ImageTooLarge {
            size: metadata.len(),
            limit_kb: max_bytes / 1000,
        });
    }
    let bytes = fs::read(path).await.map_err(|e| unreadable(e.to_string()))?;
    // The file may have grown between the metadata check and the read.
    if bytes.len() as u64 > max_bytes {
        return Err(SeedingError::ImageTooLarge {
            size: bytes.len() as u64,
            limit_kb: max_bytes / 1000,
        });
    }
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(&bytes)))
}
