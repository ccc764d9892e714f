use std::path::PathBuf;

use crate::images::encoding::ImageEncoding;

/// Convenience result type used across the crate.
pub type TimelapseResult<T> = Result<T, TimelapseError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum TimelapseError {
    /// Invalid user-provided request data (frame rate, scale, paths).
    #[error("validation error: {0}")]
    Validation(String),

    /// The selected images do not form a usable image set.
    #[error("image set error: {0}")]
    ImageSet(#[from] ImageSetError),

    /// Errors while preparing or supervising the external encoder.
    #[error("encoder error: {0}")]
    Encoder(String),

    /// Errors while reading or interpreting configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TimelapseError {
    /// Build a [`TimelapseError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TimelapseError::Encoder`] value.
    pub fn encoder(msg: impl Into<String>) -> Self {
        Self::Encoder(msg.into())
    }

    /// Build a [`TimelapseError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Reasons an image selection cannot be encoded as one movie.
///
/// Display strings are complete sentences meant to be shown to the user as-is.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageSetError {
    /// No images were selected.
    #[error("You must pass in at least 1 image.")]
    Empty,

    /// A file's extension maps to no supported encoding.
    #[error("Unknown file extension '{extension}'.")]
    UnknownExtension {
        /// Lower-cased extension without the leading dot.
        extension: String,
    },

    /// Two files in the set use different encodings.
    #[error(
        "Mixed image encodings: '{}' has encoding '{first_encoding}', but '{}' has encoding '{other_encoding}'.",
        .first.display(),
        .other.display()
    )]
    MixedEncodings {
        /// First image of the set; it decides the expected encoding.
        first: PathBuf,
        /// Encoding of `first`.
        first_encoding: ImageEncoding,
        /// The first image whose encoding differs.
        other: PathBuf,
        /// Encoding of `other`.
        other_encoding: ImageEncoding,
    },
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
