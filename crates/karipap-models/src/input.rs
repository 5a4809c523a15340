//! User-supplied input: pasted text or a selected image.
//!
//! An image goes through three shapes:
//!
//! ```text
//! ImageFile        raw bytes + sniffed MIME type, straight from disk
//!   └─ accept()    size / MIME validation against the configured ceiling
//!      SelectedImage
//!      ├── ImagePreview   data URL + metadata, shown locally
//!      └── ImagePayload   base64 body sent to the backend (data-URL prefix stripped)
//! ```

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// One mebibyte, the unit the image ceilings are expressed in.
pub const MIB: u64 = 1024 * 1024;

/// Image ceiling of the versioned front end.
pub const VERSIONED_MAX_IMAGE_BYTES: u64 = 10 * MIB;

/// Image ceiling of the legacy front end.
pub const LEGACY_MAX_IMAGE_BYTES: u64 = 5 * MIB;

// ---------------------------------------------------------------------------
// ImageFile
// ---------------------------------------------------------------------------

/// A file read from disk, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// File name without directories, used in alerts and the preview.
    pub file_name: String,
    /// MIME type sniffed from the content.
    pub mime: String,
    /// Pixel dimensions, when the image could be decoded.
    pub dimensions: Option<(u32, u32)>,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Size of the file in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

// ---------------------------------------------------------------------------
// ImagePayload
// ---------------------------------------------------------------------------

/// Base64 image body as the backend expects it: no `data:` prefix.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct ImagePayload(String);

impl ImagePayload {
    /// Strip the `data:<mime>;base64,` prefix from a data URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use karipap_models::ImagePayload;
    ///
    /// let payload = ImagePayload::from_data_url("data:image/png;base64,iVBORw0K").unwrap();
    /// assert_eq!(payload.as_str(), "iVBORw0K");
    /// ```
    pub fn from_data_url(data_url: &str) -> Result<Self, ModelError> {
        let rest = data_url
            .strip_prefix("data:")
            .ok_or_else(|| ModelError::MalformedDataUrl {
                reason: "missing `data:` scheme".into(),
            })?;
        let (header, body) = rest.split_once(',').ok_or_else(|| ModelError::MalformedDataUrl {
            reason: "missing `,` separator".into(),
        })?;
        if !header.ends_with(";base64") {
            return Err(ModelError::MalformedDataUrl {
                reason: "payload is not base64 encoded".into(),
            });
        }
        Ok(Self(body.to_string()))
    }

    /// Return the base64 string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the encoded payload in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Payloads are megabytes of base64; keep them out of debug logs.
impl fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImagePayload({} bytes)", self.0.len())
    }
}

// ---------------------------------------------------------------------------
// ImagePreview
// ---------------------------------------------------------------------------

/// Locally rendered preview of the selected image.
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePreview {
    /// `data:<mime>;base64,<content>` URL of the image.
    pub data_url: String,
    /// File name without directories.
    pub file_name: String,
    /// Sniffed MIME type.
    pub mime: String,
    /// Original file size in bytes.
    pub size: u64,
    /// Pixel dimensions, when known.
    pub dimensions: Option<(u32, u32)>,
}

impl fmt::Debug for ImagePreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePreview")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("size", &self.size)
            .field("dimensions", &self.dimensions)
            .finish_non_exhaustive()
    }
}

/// Build a `data:` URL for `bytes`.
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

// ---------------------------------------------------------------------------
// SelectedImage
// ---------------------------------------------------------------------------

/// An image that passed validation, ready to preview and send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    /// What the user sees.
    pub preview: ImagePreview,
    /// What the backend receives.
    pub payload: ImagePayload,
}

impl SelectedImage {
    /// Validate `file` against `max_bytes` and build its preview and payload.
    ///
    /// Size is checked before the MIME type. A rejected file is dropped and
    /// the error says why.
    pub fn accept(file: ImageFile, max_bytes: u64) -> Result<Self, ModelError> {
        let size = file.size();
        if size > max_bytes {
            return Err(ModelError::ImageTooLarge {
                file_name: file.file_name,
                size,
                limit: max_bytes,
            });
        }
        if !file.mime.starts_with("image/") {
            return Err(ModelError::NotAnImage {
                file_name: file.file_name,
                mime: file.mime,
            });
        }

        let data_url = to_data_url(&file.mime, &file.bytes);
        let payload = ImagePayload::from_data_url(&data_url)?;

        Ok(Self {
            preview: ImagePreview {
                data_url,
                file_name: file.file_name,
                mime: file.mime,
                size,
                dimensions: file.dimensions,
            },
            payload,
        })
    }
}

// ---------------------------------------------------------------------------
// PendingInput
// ---------------------------------------------------------------------------

/// Snapshot of the input at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingInput {
    /// Text to classify.
    Text(String),
    /// Image to OCR and classify.
    Image(ImagePayload),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn file(name: &str, mime: &str, bytes: Vec<u8>) -> ImageFile {
        ImageFile {
            file_name: name.into(),
            mime: mime.into(),
            dimensions: None,
            bytes,
        }
    }

    #[test]
    fn accept_builds_preview_and_payload() {
        let img =
            SelectedImage::accept(file("a.png", "image/png", PNG_MAGIC.to_vec()), MIB).unwrap();
        assert!(img.preview.data_url.starts_with("data:image/png;base64,"));
        assert_eq!(img.payload.as_str(), STANDARD.encode(PNG_MAGIC));
        assert_eq!(img.preview.size, 8);
        assert_eq!(img.preview.file_name, "a.png");
    }

    #[test]
    fn accept_rejects_oversized_before_mime() {
        let big = vec![0u8; (VERSIONED_MAX_IMAGE_BYTES + 1) as usize];
        let err =
            SelectedImage::accept(file("big.txt", "text/plain", big), VERSIONED_MAX_IMAGE_BYTES)
                .unwrap_err();
        assert!(matches!(
            err,
            ModelError::ImageTooLarge { limit, .. } if limit == VERSIONED_MAX_IMAGE_BYTES
        ));
    }

    #[test]
    fn accept_allows_exactly_the_limit() {
        let bytes = vec![0u8; 1024];
        assert!(SelectedImage::accept(file("x.gif", "image/gif", bytes), 1024).is_ok());
    }

    #[test]
    fn accept_rejects_non_image() {
        let err = SelectedImage::accept(file("doc.pdf", "application/pdf", vec![1, 2, 3]), MIB)
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::NotAnImage {
                file_name: "doc.pdf".into(),
                mime: "application/pdf".into()
            }
        );
    }

    #[test]
    fn legacy_limit_is_five_mib() {
        let six_mib = vec![0u8; (6 * MIB) as usize];
        let photo = || file("p.jpg", "image/jpeg", six_mib.clone());
        assert!(SelectedImage::accept(photo(), LEGACY_MAX_IMAGE_BYTES).is_err());
        assert!(SelectedImage::accept(photo(), VERSIONED_MAX_IMAGE_BYTES).is_ok());
    }

    #[test]
    fn payload_from_data_url_rejects_bad_shapes() {
        assert!(ImagePayload::from_data_url("image/png;base64,AAAA").is_err());
        assert!(ImagePayload::from_data_url("data:image/png;base64").is_err());
        assert!(ImagePayload::from_data_url("data:text/plain,hello").is_err());
    }

    #[test]
    fn payload_debug_hides_content() {
        let payload = ImagePayload::from_data_url("data:image/png;base64,QUJD").unwrap();
        assert_eq!(format!("{payload:?}"), "ImagePayload(4 bytes)");
    }
}
