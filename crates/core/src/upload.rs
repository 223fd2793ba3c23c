//! Photo upload validation.
//!
//! Uploaded files must carry an allowed extension and decode as an image
//! header; only the header is read to get the format and dimensions.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use crate::error::CoreError;
use crate::types::DbId;

/// Allowed photo file extensions (lowercase).
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Default upload size cap (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Format and pixel size read from an image header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub format: &'static str,
    pub width: u32,
    pub height: u32,
}

/// Return the lowercase extension of `filename` if it is allowed.
pub fn validate_extension(filename: &str) -> Result<String, CoreError> {
    let ext = match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_lowercase(),
        _ => {
            return Err(CoreError::Validation(format!(
                "File '{filename}' has no extension"
            )))
        }
    };
    if SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported image format '.{ext}'. Supported: {}",
            SUPPORTED_IMAGE_EXTENSIONS.join(", ")
        )))
    }
}

/// Reject empty or oversized uploads.
pub fn validate_size(len: usize, max_bytes: usize) -> Result<(), CoreError> {
    if len == 0 {
        return Err(CoreError::Validation("Uploaded file is empty".into()));
    }
    if len > max_bytes {
        return Err(CoreError::Validation(format!(
            "Uploaded file is {len} bytes; the limit is {max_bytes} bytes"
        )));
    }
    Ok(())
}

/// Detect the image format from content and read its dimensions.
pub fn probe_image(data: &[u8]) -> Result<ImageInfo, CoreError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| CoreError::Internal(format!("Failed to read upload: {e}")))?;

    let format = match reader.format() {
        Some(ImageFormat::Jpeg) => "jpeg",
        Some(ImageFormat::Png) => "png",
        Some(ImageFormat::Gif) => "gif",
        Some(ImageFormat::WebP) => "webp",
        _ => {
            return Err(CoreError::Validation(
                "Uploaded file is not a supported image".into(),
            ))
        }
    };

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| CoreError::Validation(format!("Corrupt image: {e}")))?;

    Ok(ImageInfo {
        format,
        width,
        height,
    })
}

/// Name under which an upload is stored: `family_{id}/{unique}.{ext}`.
pub fn stored_file_name(family_id: DbId, unique: &str, ext: &str) -> String {
    format!("family_{family_id}/{unique}.{ext}")
}

/// Client-supplied image URLs must be absolute `http(s)` links. Local
/// paths such as `/uploads/...` are reserved for files stored by the server.
pub fn validate_external_url(url: &str) -> Result<(), CoreError> {
    let lower = url.trim().to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"));
    match rest {
        Some(host_and_path) if !host_and_path.is_empty() && !host_and_path.starts_with('/') => {
            Ok(())
        }
        _ => Err(CoreError::Validation(format!(
            "Image URL must be an http(s) link, got '{url}'"
        ))),
    }
}
