//! Upload ingestion gateway
//!
//! Decodes the two-file multipart request, validates each file against the
//! allowed image types and size limit, and persists them through the
//! asset store. Validation failures are terminal and reported before any
//! scoring call is made.

use crate::store::{Asset, AssetStore};
use artscan_common::error::InvalidReason;
use artscan_common::{Error, Result};
use axum::extract::multipart::Multipart;
use axum::body::Bytes;
use std::path::Path;

/// Fixed multipart field name for the first image
pub const FIELD_ONE: &str = "file1";
/// Fixed multipart field name for the second image
pub const FIELD_TWO: &str = "file2";

/// Per-file upload limit (50 MiB)
pub const MAX_FILE_BYTES: u64 = 50 * 1024 * 1024;

/// Allowed image types; extension and declared media type must both match
const ALLOWED_TYPES: [&str; 6] = ["jpeg", "jpg", "png", "gif", "svg", "webp"];

struct UploadedFile {
    name: String,
    mime_type: String,
    data: Bytes,
}

/// Validate an upload's name, declared media type and size
///
/// The extension and the media type must jointly fall within the allowed
/// set; a matching media type with a disallowed extension (or vice versa)
/// is rejected.
pub fn validate_upload(name: &str, mime_type: &str, size_bytes: u64) -> Result<()> {
    let extension = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let extension_allowed = ALLOWED_TYPES.contains(&extension.as_str());
    // "image/svg+xml" and friends match by containment, as the original
    // upload filter did
    let mime = mime_type.to_lowercase();
    let mime_allowed = ALLOWED_TYPES.iter().any(|t| mime.contains(t));

    if !extension_allowed || !mime_allowed {
        return Err(Error::InvalidAsset {
            filename: name.to_string(),
            reason: InvalidReason::UnsupportedType {
                extension,
                mime_type: mime_type.to_string(),
            },
        });
    }

    if size_bytes > MAX_FILE_BYTES {
        return Err(Error::InvalidAsset {
            filename: name.to_string(),
            reason: InvalidReason::Oversize {
                size_bytes,
                limit_bytes: MAX_FILE_BYTES,
            },
        });
    }

    Ok(())
}

/// Decode, validate and store both files of a comparison request
///
/// Missing field(s) fail with `MissingAsset` naming them. Files are
/// validated and stored in field order, so file1 may already be persisted
/// when file2 is rejected; such orphans are left to the external retention
/// policy.
pub async fn ingest_pair(
    multipart: &mut Multipart,
    store: &dyn AssetStore,
) -> Result<(Asset, Asset)> {
    let mut first: Option<UploadedFile> = None;
    let mut second: Option<UploadedFile> = None;

    // Decode failures (truncated body, over-limit stream) are the
    // caller's fault, not an internal error
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::MalformedRequest(e.to_string()))?
    {
        let Some(field_name) = field.name().map(str::to_string) else {
            continue;
        };
        if field_name != FIELD_ONE && field_name != FIELD_TWO {
            // Unknown fields are ignored, not rejected
            continue;
        }

        let name = field.file_name().unwrap_or("unnamed").to_string();
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| Error::MalformedRequest(e.to_string()))?;

        let file = UploadedFile {
            name,
            mime_type,
            data,
        };
        if field_name == FIELD_ONE {
            first = Some(file);
        } else {
            second = Some(file);
        }
    }

    match (first, second) {
        (Some(first), Some(second)) => {
            validate_upload(&first.name, &first.mime_type, first.data.len() as u64)?;
            let asset_a = store
                .store(FIELD_ONE, &first.name, &first.mime_type, &first.data)
                .await?;
            tracing::info!(field = FIELD_ONE, name = %first.name, "Stored upload");

            validate_upload(&second.name, &second.mime_type, second.data.len() as u64)?;
            let asset_b = store
                .store(FIELD_TWO, &second.name, &second.mime_type, &second.data)
                .await?;
            tracing::info!(field = FIELD_TWO, name = %second.name, "Stored upload");

            Ok((asset_a, asset_b))
        }
        (first, second) => {
            let mut fields = Vec::new();
            if first.is_none() {
                fields.push(FIELD_ONE.to_string());
            }
            if second.is_none() {
                fields.push(FIELD_TWO.to_string());
            }
            Err(Error::MissingAsset { fields })
        }
    }
}
