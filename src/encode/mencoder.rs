use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::encode::manifest::{MANIFEST_FILE_NAME, write_manifest};
use crate::encode::request::{EncodeOutcome, EncodeRequest, FrameRate, Scale};
use crate::encode::runner::{EncoderInvocation, EncoderRunner, SystemRunner};
use crate::foundation::error::TimelapseResult;
use crate::images::encoding::ImageEncoding;

/// File name of the movie written beside the input images.
pub const MOVIE_FILE_NAME: &str = "TimeLapse.avi";

/// Base name of the MEncoder executable.
pub const MENCODER_PROGRAM: &str = "mencoder";

/// Codec options passed to `-lavcopts`.
const LAVC_OPTS: &str = "vcodec=mpeg4:mbd=2:trell";

const STDERR_TAIL_LINES: usize = 20;

/// Where to find MEncoder and which directory to run it from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncoderLocation {
    install_dir: Option<PathBuf>,
    program: Option<PathBuf>,
}

impl EncoderLocation {
    /// Resolve `mencoder` through `PATH` and run it from the input directory.
    pub fn on_path() -> Self {
        Self::default()
    }

    /// Run `<dir>/mencoder` with `dir` as its working directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            install_dir: Some(dir.into()),
            program: None,
        }
    }

    /// Override the executable. A bare name is looked up on `PATH`; a relative path is
    /// resolved against the caller's current directory, not the install directory.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = Some(program.into());
        self
    }

    /// Install directory, if configured.
    pub fn install_dir(&self) -> Option<&Path> {
        self.install_dir.as_deref()
    }

    /// Executable to spawn.
    pub fn program(&self) -> PathBuf {
        if let Some(program) = &self.program {
            return program.clone();
        }
        let file_name = format!("{MENCODER_PROGRAM}{}", std::env::consts::EXE_SUFFIX);
        match &self.install_dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }
}

/// Build the MEncoder argument vector.
///
/// `manifest` and `movie` should be absolute; the encoder may run from another directory.
pub fn encoder_args(
    encoding: ImageEncoding,
    fps: FrameRate,
    scale: Option<Scale>,
    manifest: &Path,
    movie: &Path,
) -> Vec<OsString> {
    let mut frames_arg = OsString::from("mf://@");
    frames_arg.push(manifest);

    let mut args = vec![
        frames_arg,
        "-mf".into(),
        format!("type={}:fps={fps}", encoding.encoder_type()).into(),
    ];
    if let Some(scale) = scale {
        args.push("-vf".into());
        args.push(format!("scale={}:{}", scale.width, scale.height).into());
    }
    args.extend([
        "-ovc".into(),
        "lavc".into(),
        "-lavcopts".into(),
        LAVC_OPTS.into(),
        "-o".into(),
        movie.as_os_str().to_owned(),
    ]);
    args
}

/// Turns an [`EncodeRequest`] into a movie by running MEncoder.
#[derive(Clone)]
pub struct MovieBuilder {
    location: EncoderLocation,
    runner: Arc<dyn EncoderRunner>,
}

impl std::fmt::Debug for MovieBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovieBuilder")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

impl MovieBuilder {
    /// Builder that spawns the encoder as a child process.
    pub fn new(location: EncoderLocation) -> Self {
        Self {
            location,
            runner: Arc::new(SystemRunner),
        }
    }

    /// Replace the process runner.
    pub fn with_runner(mut self, runner: Arc<dyn EncoderRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Encoder location used by this builder.
    pub fn location(&self) -> &EncoderLocation {
        &self.location
    }

    /// Resolve the command line for `request` without touching the filesystem.
    ///
    /// Returns the invocation and the movie path it will write.
    pub fn plan(&self, request: &EncodeRequest) -> TimelapseResult<(EncoderInvocation, PathBuf)> {
        let input_dir = absolute(request.input_dir())?;
        let manifest_path = input_dir.join(MANIFEST_FILE_NAME);
        let movie_path = input_dir.join(MOVIE_FILE_NAME);

        let args = encoder_args(
            request.encoding(),
            request.fps(),
            request.scale(),
            &manifest_path,
            &movie_path,
        );
        let working_dir = match self.location.install_dir() {
            Some(dir) => absolute(dir)?,
            None => input_dir,
        };

        // The child starts in `working_dir`, so a relative program path would be looked up
        // from there.
        let mut program = self.location.program();
        if program.components().count() > 1 {
            program = absolute(&program)?;
        }

        let invocation = EncoderInvocation {
            program,
            args,
            working_dir: Some(working_dir),
        };
        Ok((invocation, movie_path))
    }

    /// Write the frame manifest and run the encoder to completion.
    ///
    /// Input problems are `Err`; an encoder that cannot start or exits non-zero is
    /// [`EncodeOutcome::Failed`].
    #[tracing::instrument(
        skip_all,
        fields(frames = request.images().len(), fps = %request.fps(), encoding = %request.encoding())
    )]
    pub fn build(&self, request: &EncodeRequest) -> TimelapseResult<EncodeOutcome> {
        let (invocation, movie_path) = self.plan(request)?;

        let images = request
            .images()
            .iter()
            .map(|p| absolute(p))
            .collect::<TimelapseResult<Vec<_>>>()?;
        let manifest_path = movie_path.with_file_name(MANIFEST_FILE_NAME);
        write_manifest(&manifest_path, &images)?;

        tracing::debug!("{}", invocation.display_line());
        if let Some(dir) = &invocation.working_dir {
            tracing::debug!("mencoder directory = '{}'", dir.display());
        }

        let status = match self.runner.run(&invocation) {
            Ok(status) => status,
            Err(e) => {
                tracing::error!("{e}");
                return Ok(EncodeOutcome::Failed { exit_code: None });
            }
        };

        if status.success() {
            let movie_path = std::fs::canonicalize(&movie_path).unwrap_or(movie_path);
            tracing::debug!(movie = %movie_path.display(), "mencoder finished");
            return Ok(EncodeOutcome::Created { movie_path });
        }

        match status.exit_code {
            Some(code) => tracing::error!("mencoder failed with code {code}."),
            None => tracing::error!("mencoder was terminated by a signal."),
        }
        let tail = stderr_tail(&status.stderr, STDERR_TAIL_LINES);
        if !tail.is_empty() {
            tracing::debug!("mencoder stderr:\n{tail}");
        }
        Ok(EncodeOutcome::Failed {
            exit_code: status.exit_code,
        })
    }
}

/// Validate raw inputs and build a movie in one call.
///
/// The scale is checked before the image set, so a half-specified size never reaches the
/// filesystem or the encoder.
pub fn create_movie_from_images(
    builder: &MovieBuilder,
    images: Vec<PathBuf>,
    fps: f64,
    width: Option<u32>,
    height: Option<u32>,
) -> TimelapseResult<EncodeOutcome> {
    let scale = Scale::from_parts(width, height)?;
    let fps = FrameRate::new(fps)?;
    let request = EncodeRequest::new(images, fps, scale)?;
    builder.build(&request)
}

fn absolute(path: &Path) -> TimelapseResult<PathBuf> {
    Ok(std::path::absolute(path)
        .with_context(|| format!("failed to resolve '{}'", path.display()))?)
}

fn stderr_tail(stderr: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = stderr.trim_end().lines().collect();
    let start = lines.len().saturating_sub(max_lines);
    lines[start..].join("\n")
}

#[cfg(test)]
#[path = "../../tests/unit/encode/mencoder.rs"]
mod tests;
