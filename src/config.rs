use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::encode::mencoder::EncoderLocation;
use crate::encode::request::FrameRate;
use crate::foundation::error::{TimelapseError, TimelapseResult};

/// Encoder section of the configuration file.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncoderConfig {
    /// Directory holding the MEncoder executable; also its working directory.
    pub install_dir: Option<PathBuf>,
    /// Explicit executable, overriding the name derived from `install_dir`.
    pub program: Option<PathBuf>,
}

impl EncoderConfig {
    /// Turn the section into an [`EncoderLocation`].
    pub fn location(&self) -> EncoderLocation {
        let location = match &self.install_dir {
            Some(dir) => EncoderLocation::in_dir(dir),
            None => EncoderLocation::on_path(),
        };
        match &self.program {
            Some(program) => location.with_program(program),
            None => location,
        }
    }
}

/// Application configuration, read from JSON.
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimelapseConfig {
    /// Encoder location.
    pub encoder: EncoderConfig,
    /// Default movie frame rate.
    pub frames_per_second: f64,
    /// Interval between completion checks of a running encode.
    pub poll_interval_ms: u64,
    /// Log filter used when neither the command line nor `RUST_LOG` sets one.
    pub log_level: String,
}

impl Default for TimelapseConfig {
    fn default() -> Self {
        Self {
            encoder: EncoderConfig::default(),
            frames_per_second: 24.0,
            poll_interval_ms: 100,
            log_level: "info".to_string(),
        }
    }
}

impl TimelapseConfig {
    /// Read and validate a configuration file.
    pub fn from_path(path: &Path) -> TimelapseResult<Self> {
        let file = File::open(path).map_err(|e| {
            TimelapseError::config(format!("failed to open '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            TimelapseError::config(format!("failed to parse '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check value ranges.
    pub fn validate(&self) -> TimelapseResult<()> {
        self.frame_rate()?;
        if self.poll_interval_ms == 0 {
            return Err(TimelapseError::config("poll_interval_ms must be non-zero"));
        }
        Ok(())
    }

    /// Default frame rate as a validated value.
    pub fn frame_rate(&self) -> TimelapseResult<FrameRate> {
        FrameRate::new(self.frames_per_second)
            .map_err(|e| TimelapseError::config(format!("frames_per_second: {e}")))
    }

    /// Poll interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
