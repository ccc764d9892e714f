use std::path::PathBuf;

use crate::encode::mencoder::MovieBuilder;
use crate::encode::request::{EncodeOutcome, EncodeRequest, FrameRate};
use crate::foundation::error::{ImageSetError, TimelapseError, TimelapseResult};
use crate::images::encoding::{ImageEncoding, detect_encoding};
use crate::images::probe::probe_image;
use crate::job::background::{EncodeJob, JobResult, JobStatus};
use crate::session::scale_input::ScaleInput;

/// Status line shown when a build finishes without a movie.
pub const FAILURE_MESSAGE: &str = "Error in creating movie.";

/// What a host learns from [`Session::poll`].
#[derive(Debug)]
pub enum SessionEvent {
    /// No build is in flight.
    Idle,
    /// A build is in flight; poll again later.
    Running,
    /// The in-flight build just finished.
    Finished(JobResult),
}

/// The select → build → report workflow, independent of any UI toolkit.
///
/// A host feeds it file-picker results and field edits, calls [`Session::create_movie`],
/// then calls [`Session::poll`] on a timer until it reports [`SessionEvent::Finished`]. The
/// [`Session::status`] line carries every user-facing message.
#[derive(Debug)]
pub struct Session {
    builder: MovieBuilder,
    images: Vec<PathBuf>,
    encoding: Option<ImageEncoding>,
    fps: FrameRate,
    scale: ScaleInput,
    status: String,
    job: Option<EncodeJob>,
}

impl Session {
    /// Create an empty session.
    pub fn new(builder: MovieBuilder, fps: FrameRate) -> Self {
        Self {
            builder,
            images: Vec::new(),
            encoding: None,
            fps,
            scale: ScaleInput::new(),
            status: String::new(),
            job: None,
        }
    }

    /// Replace the selection with `paths`.
    ///
    /// An empty selection (a cancelled picker) changes nothing. An invalid set is rejected,
    /// the selection is cleared, and the reason becomes the status line. On success the scale
    /// input is pre-filled with the first image's size when its header can be read.
    pub fn select_images(&mut self, paths: Vec<PathBuf>) -> Result<(), ImageSetError> {
        if paths.is_empty() {
            return Ok(());
        }
        tracing::debug!("Setting images to {paths:?}");
        self.status.clear();

        match detect_encoding(&paths) {
            Ok(encoding) => {
                self.encoding = Some(encoding);
                self.images = paths;
                match probe_image(&self.images[0]) {
                    Ok(info) => self.scale.set_width_and_height(info.width, info.height),
                    Err(e) => {
                        tracing::warn!("could not read size of first image: {e}");
                        self.scale.clear();
                    }
                }
                Ok(())
            }
            Err(e) => {
                self.user_message(e.to_string());
                self.encoding = None;
                self.images.clear();
                Err(e)
            }
        }
    }

    /// Selected images in movie order.
    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    /// Encoding of the current selection.
    pub fn encoding(&self) -> Option<ImageEncoding> {
        self.encoding
    }

    /// Current frame rate.
    pub fn fps(&self) -> FrameRate {
        self.fps
    }

    /// Change the frame rate for the next build.
    pub fn set_fps(&mut self, fps: FrameRate) {
        self.fps = fps;
    }

    /// The width/height fields.
    pub fn scale_input(&self) -> &ScaleInput {
        &self.scale
    }

    /// Mutable access to the width/height fields, e.g. to register a validity callback.
    pub fn scale_input_mut(&mut self) -> &mut ScaleInput {
        &mut self.scale
    }

    /// Last user-facing message.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Return `true` while a build is in flight.
    pub fn is_busy(&self) -> bool {
        self.job.is_some()
    }

    /// Return `true` when [`Session::create_movie`] would start a build.
    pub fn can_create_movie(&self) -> bool {
        !self.images.is_empty() && self.scale.is_valid() && !self.is_busy()
    }

    /// Start building a movie from the current selection in the background.
    ///
    /// Only one build may be in flight: outputs have fixed names beside the inputs.
    pub fn create_movie(&mut self) -> TimelapseResult<()> {
        if self.is_busy() {
            return Err(TimelapseError::validation(
                "a movie is already being created",
            ));
        }
        if self.images.is_empty() {
            return Err(ImageSetError::Empty.into());
        }
        let scale = match self.scale.scale() {
            Ok(scale) => scale,
            Err(e) => {
                self.user_message("Invalid image scaling.");
                return Err(e);
            }
        };

        let request = match EncodeRequest::new(self.images.clone(), self.fps, scale) {
            Ok(request) => request,
            Err(e) => {
                self.user_message(e.to_string());
                return Err(e);
            }
        };

        self.user_message("Creating movie...");
        let resolution = scale.map_or_else(|| "<image-size>".to_string(), |s| format!("({s})"));
        tracing::debug!(
            "Creating movie: images={:?}, FPS=({}), resolution={resolution}",
            self.images,
            self.fps
        );

        self.job = Some(EncodeJob::spawn(self.builder.clone(), request)?);
        Ok(())
    }

    /// Check the in-flight build without blocking.
    pub fn poll(&mut self) -> SessionEvent {
        let Some(job) = self.job.as_mut() else {
            return SessionEvent::Idle;
        };
        match job.poll() {
            JobStatus::Running => {
                tracing::debug!("MEncoder is still running; rescheduling check.");
                SessionEvent::Running
            }
            JobStatus::Finished(result) => {
                self.job = None;
                self.report(&result);
                SessionEvent::Finished(result)
            }
        }
    }

    fn report(&mut self, result: &JobResult) {
        match result {
            Ok(EncodeOutcome::Created { movie_path }) => {
                self.user_message(format!("Created movie: {}", movie_path.display()));
            }
            Ok(EncodeOutcome::Failed { .. }) => self.user_message(FAILURE_MESSAGE),
            Err(e) => {
                tracing::error!("{e}");
                self.user_message(FAILURE_MESSAGE);
            }
        }
    }

    fn user_message(&mut self, message: impl Into<String>) {
        self.status = message.into();
        tracing::info!("{}", self.status);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/controller.rs"]
mod tests;
