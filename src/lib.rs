//! Build time-lapse movies from still image sequences with MEncoder.
//!
//! The flow is linear:
//!
//! - Validate that the selected images share one encoding ([`detect_encoding`])
//! - Describe the movie as an [`EncodeRequest`]
//! - Run it on a background thread ([`EncodeJob`]) and poll or wait for the [`EncodeOutcome`]
//!
//! [`Session`] wraps these steps for interactive hosts.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Configuration file.
pub mod config;
/// Encoder invocation.
pub mod encode;
/// Image set validation and header probing.
pub mod images;
/// Background jobs.
pub mod job;
/// Interactive workflow state.
pub mod session;

pub use crate::foundation::error::{ImageSetError, TimelapseError, TimelapseResult};

pub use crate::config::{EncoderConfig, TimelapseConfig};
pub use crate::encode::manifest::{MANIFEST_FILE_NAME, write_manifest};
pub use crate::encode::mencoder::{
    EncoderLocation, MENCODER_PROGRAM, MOVIE_FILE_NAME, MovieBuilder, create_movie_from_images,
    encoder_args,
};
pub use crate::encode::request::{EncodeOutcome, EncodeRequest, FrameRate, Scale};
pub use crate::encode::runner::{EncoderInvocation, EncoderRunner, RunStatus, SystemRunner};
pub use crate::images::encoding::{ImageEncoding, detect_encoding};
pub use crate::images::probe::{ImageInfo, probe_image, probe_image_data};
pub use crate::job::background::{DEFAULT_POLL_INTERVAL, EncodeJob, JobResult, JobStatus, drive};
pub use crate::session::controller::{FAILURE_MESSAGE, Session, SessionEvent};
pub use crate::session::scale_input::ScaleInput;
