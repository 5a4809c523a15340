//! Error types for the `karipap-models` crate.
//!
//! Input validation and response decoding both return variants of
//! [`ModelError`].  The variants carry enough context for the controller to
//! phrase a user-facing alert without re-inspecting the input.

/// Errors produced when validating user input or decoding backend payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The selected file exceeds the configured image ceiling.
    #[error("image \"{file_name}\" is {size} bytes, larger than the {limit} byte limit")]
    ImageTooLarge {
        /// Name of the rejected file.
        file_name: String,
        /// Actual size in bytes.
        size: u64,
        /// Configured ceiling in bytes.
        limit: u64,
    },

    /// The selected file is not an image.
    #[error("file \"{file_name}\" has MIME type \"{mime}\", expected image/*")]
    NotAnImage {
        /// Name of the rejected file.
        file_name: String,
        /// MIME type that was detected.
        mime: String,
    },

    /// A text submission was empty or whitespace only.
    #[error("no text to analyze")]
    EmptyText,

    /// An image submission was attempted with no image selected.
    #[error("no image selected")]
    MissingImage,

    /// A data URL did not have the `data:<mime>;base64,<payload>` shape.
    #[error("malformed data URL: {reason}")]
    MalformedDataUrl {
        /// Human-readable explanation.
        reason: String,
    },

    /// A 2xx detection payload contained neither a fake-news nor a
    /// clickbait section.
    #[error("response contained no detection result")]
    MissingDetection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_too_large() {
        let err = ModelError::ImageTooLarge {
            file_name: "scan.png".into(),
            size: 11_534_336,
            limit: 10_485_760,
        };
        assert_eq!(
            err.to_string(),
            "image \"scan.png\" is 11534336 bytes, larger than the 10485760 byte limit"
        );
    }

    #[test]
    fn error_display_not_an_image() {
        let err = ModelError::NotAnImage {
            file_name: "notes.txt".into(),
            mime: "application/octet-stream".into(),
        };
        assert_eq!(
            err.to_string(),
            "file \"notes.txt\" has MIME type \"application/octet-stream\", expected image/*"
        );
    }

    #[test]
    fn error_display_missing_detection() {
        assert_eq!(
            ModelError::MissingDetection.to_string(),
            "response contained no detection result"
        );
    }
}
