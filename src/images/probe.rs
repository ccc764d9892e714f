use std::io::{BufRead, Cursor, Seek};
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{TimelapseError, TimelapseResult};

/// Content type and pixel size read from an image header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    /// MIME type guessed from the leading bytes, e.g. `image/png`.
    pub content_type: &'static str,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Read content type and dimensions of the image at `path`.
///
/// Only the header is decoded; pixel data is never loaded.
pub fn probe_image(path: &Path) -> TimelapseResult<ImageInfo> {
    let reader = image::ImageReader::open(path)
        .with_context(|| format!("failed to open image '{}'", path.display()))?;
    probe_reader(reader).map_err(|e| match e {
        TimelapseError::Validation(msg) => {
            TimelapseError::validation(format!("{}: {msg}", path.display()))
        }
        other => other,
    })
}

/// Read content type and dimensions from in-memory image data.
///
/// `data` may be the whole file or just enough of its header for the format.
pub fn probe_image_data(data: &[u8]) -> TimelapseResult<ImageInfo> {
    probe_reader(image::ImageReader::new(Cursor::new(data)))
}

fn probe_reader<R: BufRead + Seek>(reader: image::ImageReader<R>) -> TimelapseResult<ImageInfo> {
    let reader = reader
        .with_guessed_format()
        .context("failed to read image header")?;
    let Some(format) = reader.format() else {
        return Err(TimelapseError::validation("unrecognized image format"));
    };
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| TimelapseError::validation(format!("unreadable {format:?} header: {e}")))?;

    Ok(ImageInfo {
        content_type: format.to_mime_type(),
        width,
        height,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/images/probe.rs"]
mod tests;
