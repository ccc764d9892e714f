use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use timelapse::{
    EncodeOutcome, EncodeRequest, EncoderLocation, FAILURE_MESSAGE, FrameRate, MovieBuilder,
    Scale, TimelapseConfig, TimelapseError,
};

#[derive(Parser, Debug)]
#[command(
    name = "timelapse",
    version,
    about = "Create time lapse movies from series of images."
)]
struct Cli {
    /// JSON configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (overrides `RUST_LOG` and the configuration file).
    #[arg(long, value_enum, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the images share one supported encoding.
    Check(CheckArgs),
    /// Print content type and size of an image.
    Probe(ProbeArgs),
    /// Build `TimeLapse.avi` beside the images (requires MEncoder).
    Build(BuildArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Images, in movie order.
    #[arg(required = true)]
    images: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    /// Image to inspect.
    image: PathBuf,
}

#[derive(Parser, Debug)]
struct BuildArgs {
    /// Images, in movie order.
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Frames per second (defaults to the configuration value).
    #[arg(long)]
    fps: Option<f64>,

    /// Output width in pixels; requires --height.
    #[arg(long)]
    width: Option<u32>,

    /// Output height in pixels; requires --width.
    #[arg(long)]
    height: Option<u32>,

    /// Directory holding the MEncoder executable.
    #[arg(long)]
    encoder_dir: Option<PathBuf>,

    /// MEncoder executable to run.
    #[arg(long)]
    encoder: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    #[value(alias = "warn")]
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => TimelapseConfig::from_path(path)?,
        None => TimelapseConfig::default(),
    };
    init_logging(cli.log_level, &config.log_level)?;

    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Probe(args) => cmd_probe(args),
        Command::Build(args) => cmd_build(args, &config),
    }
}

fn init_logging(flag: Option<LogLevel>, configured: &str) -> anyhow::Result<()> {
    let filter = match flag {
        Some(level) => EnvFilter::new(level.directive()),
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(configured))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<ExitCode> {
    match timelapse::detect_encoding(&args.images) {
        Ok(encoding) => {
            println!("{encoding} ({} images)", args.images.len());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{e}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<ExitCode> {
    let info = timelapse::probe_image(&args.image)?;
    println!("{} {}x{}", info.content_type, info.width, info.height);
    Ok(ExitCode::SUCCESS)
}

fn cmd_build(args: BuildArgs, config: &TimelapseConfig) -> anyhow::Result<ExitCode> {
    let scale = Scale::from_parts(args.width, args.height)?;
    let fps = match args.fps {
        Some(fps) => FrameRate::new(fps)?,
        None => config.frame_rate()?,
    };
    let request = match EncodeRequest::new(args.images, fps, scale) {
        Ok(request) => request,
        Err(TimelapseError::ImageSet(e)) => {
            eprintln!("{e}");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    let mut location = match args.encoder_dir {
        Some(dir) => EncoderLocation::in_dir(dir),
        None => config.encoder.location(),
    };
    if let Some(program) = args.encoder {
        location = location.with_program(program);
    }

    tracing::info!("Creating movie...");
    let job = timelapse::EncodeJob::spawn(MovieBuilder::new(location), request)
        .context("start encode")?;
    let result = timelapse::drive(job, config.poll_interval(), |_| {});

    match result {
        Ok(EncodeOutcome::Created { movie_path }) => {
            println!("Created movie: {}", movie_path.display());
            Ok(ExitCode::SUCCESS)
        }
        Ok(EncodeOutcome::Failed { .. }) => {
            eprintln!("{FAILURE_MESSAGE}");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("{FAILURE_MESSAGE}");
            Ok(ExitCode::FAILURE)
        }
    }
}
