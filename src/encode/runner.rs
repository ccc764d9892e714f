use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::foundation::error::{TimelapseError, TimelapseResult};

/// A fully resolved encoder command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncoderInvocation {
    /// Program to execute.
    pub program: PathBuf,
    /// Arguments, one argv element each.
    pub args: Vec<OsString>,
    /// Working directory of the spawned process.
    pub working_dir: Option<PathBuf>,
}

impl EncoderInvocation {
    /// Render the invocation as a single line for logs.
    pub fn display_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// How a finished encoder process ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunStatus {
    /// Process exit code; `None` when terminated by a signal.
    pub exit_code: Option<i32>,
    /// Captured standard error, lossily decoded.
    pub stderr: String,
}

impl RunStatus {
    /// Return `true` for exit code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Spawns the external encoder and waits for it.
///
/// `Err` means the process could not be run at all; a process that ran and failed is an
/// `Ok` with a non-zero [`RunStatus`].
pub trait EncoderRunner: Send + Sync {
    /// Run `invocation` to completion.
    fn run(&self, invocation: &EncoderInvocation) -> TimelapseResult<RunStatus>;
}

/// Runs the encoder as a child process of this program.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl EncoderRunner for SystemRunner {
    fn run(&self, invocation: &EncoderInvocation) -> TimelapseResult<RunStatus> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        if let Some(dir) = &invocation.working_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|e| {
            TimelapseError::encoder(format!(
                "failed to run '{}' (is it installed?): {e}",
                invocation.program.display()
            ))
        })?;

        Ok(RunStatus {
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/runner.rs"]
mod tests;
