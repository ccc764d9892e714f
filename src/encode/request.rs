use std::fmt;
use std::path::{Path, PathBuf};

use crate::foundation::error::{TimelapseError, TimelapseResult};
use crate::images::encoding::{ImageEncoding, detect_encoding};

/// Movie frame rate in frames per second.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct FrameRate(f64);

impl FrameRate {
    /// Create a validated frame rate. Must be finite and > 0.
    pub fn new(fps: f64) -> TimelapseResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(TimelapseError::validation(format!(
                "frames per second must be a positive number, got {fps}"
            )));
        }
        Ok(Self(fps))
    }

    /// Frames per second.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `24.0` renders as `24`, fractional rates keep their digits.
        write!(f, "{}", self.0)
    }
}

/// Uniform output frame size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scale {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl Scale {
    /// Create a validated scale with both dimensions > 0.
    pub fn new(width: u32, height: u32) -> TimelapseResult<Self> {
        if width == 0 || height == 0 {
            return Err(TimelapseError::validation(
                "scale width and height must be positive",
            ));
        }
        Ok(Self { width, height })
    }

    /// Combine optional dimensions. Both or neither must be present.
    pub fn from_parts(width: Option<u32>, height: Option<u32>) -> TimelapseResult<Option<Self>> {
        match (width, height) {
            (Some(w), Some(h)) => Self::new(w, h).map(Some),
            (None, None) => Ok(None),
            _ => Err(TimelapseError::validation(
                "To scale the images, you must specify both the width and the height.",
            )),
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Everything needed to run one encode.
#[derive(Clone, Debug)]
pub struct EncodeRequest {
    images: Vec<PathBuf>,
    encoding: ImageEncoding,
    fps: FrameRate,
    scale: Option<Scale>,
}

impl EncodeRequest {
    /// Validate `images` and assemble a request.
    ///
    /// Fails when the image set is empty, not uniformly encoded, or holds a path that cannot
    /// be written to the text manifest.
    pub fn new(
        images: Vec<PathBuf>,
        fps: FrameRate,
        scale: Option<Scale>,
    ) -> TimelapseResult<Self> {
        let encoding = detect_encoding(&images)?;
        if let Some(bad) = images.iter().find(|p| p.to_str().is_none()) {
            return Err(TimelapseError::validation(format!(
                "image path '{}' is not valid UTF-8",
                bad.display()
            )));
        }
        Ok(Self {
            images,
            encoding,
            fps,
            scale,
        })
    }

    /// Input frames in movie order.
    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    /// Encoding shared by every input frame.
    pub fn encoding(&self) -> ImageEncoding {
        self.encoding
    }

    /// Requested frame rate.
    pub fn fps(&self) -> FrameRate {
        self.fps
    }

    /// Requested output size, if any.
    pub fn scale(&self) -> Option<Scale> {
        self.scale
    }

    /// Directory holding the first frame; outputs are written beside it.
    pub fn input_dir(&self) -> &Path {
        match self.images[0].parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

/// Result of one encoder run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncodeOutcome {
    /// The encoder exited with status 0.
    Created {
        /// Absolute path of the produced movie.
        movie_path: PathBuf,
    },
    /// The encoder could not be started or exited non-zero.
    Failed {
        /// Exit code for diagnostics; `None` when the process never ran or was killed by a
        /// signal.
        exit_code: Option<i32>,
    },
}

impl EncodeOutcome {
    /// Movie path on success.
    pub fn movie_path(&self) -> Option<&Path> {
        match self {
            Self::Created { movie_path } => Some(movie_path),
            Self::Failed { .. } => None,
        }
    }

    /// Return `true` when a movie was produced.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/request.rs"]
mod tests;
