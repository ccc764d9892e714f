use std::fmt;
use std::path::Path;

use crate::foundation::error::ImageSetError;

/// Still-image encodings the encoder accepts as movie frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageEncoding {
    /// `.jpg` / `.jpeg`
    Jpeg,
    /// `.png`
    Png,
}

impl ImageEncoding {
    /// Classify a file extension. Case-insensitive; a leading dot is ignored.
    pub fn from_extension(extension: &str) -> Result<Self, ImageSetError> {
        let stripped = extension.trim_matches('.').to_ascii_lowercase();
        match stripped.as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            _ => Err(ImageSetError::UnknownExtension {
                extension: stripped,
            }),
        }
    }

    /// Classify a file by its extension. Files without an extension are unknown.
    pub fn from_path(path: &Path) -> Result<Self, ImageSetError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy())
            .unwrap_or_default();
        Self::from_extension(&extension)
    }

    /// Token passed to MEncoder's `-mf type=` option.
    pub fn encoder_type(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

impl fmt::Display for ImageEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
        })
    }
}

/// Detect the single encoding shared by every image in `paths`.
///
/// The first path decides the expected encoding. The first unknown extension or the first file
/// that disagrees with it is reported; later files are not inspected.
pub fn detect_encoding<P: AsRef<Path>>(paths: &[P]) -> Result<ImageEncoding, ImageSetError> {
    let Some((first, rest)) = paths.split_first() else {
        return Err(ImageSetError::Empty);
    };

    let first = first.as_ref();
    let first_encoding = ImageEncoding::from_path(first)?;

    for other in rest {
        let other = other.as_ref();
        let other_encoding = ImageEncoding::from_path(other)?;
        if other_encoding != first_encoding {
            return Err(ImageSetError::MixedEncodings {
                first: first.to_path_buf(),
                first_encoding,
                other: other.to_path_buf(),
                other_encoding,
            });
        }
    }

    Ok(first_encoding)
}

#[cfg(test)]
#[path = "../../tests/unit/images/encoding.rs"]
mod tests;
