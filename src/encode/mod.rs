//! Encoder invocation: request types, the frame manifest, and the MEncoder driver.

/// Frame manifest writer.
pub mod manifest;
/// MEncoder command construction and the [`mencoder::MovieBuilder`].
pub mod mencoder;
/// Frame rate, scale, request and outcome types.
pub mod request;
/// Process-spawn seam.
pub mod runner;
