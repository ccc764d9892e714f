use super::*;
use crate::encode::mencoder::{EncoderLocation, MOVIE_FILE_NAME};
use crate::encode::request::FrameRate;
use crate::encode::runner::{EncoderInvocation, EncoderRunner, RunStatus};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Blocks in `run` until the test releases it.
struct GatedRunner {
    release: Mutex<mpsc::Receiver<()>>,
    exit_code: Option<i32>,
}

impl EncoderRunner for GatedRunner {
    fn run(&self, _invocation: &EncoderInvocation) -> TimelapseResult<RunStatus> {
        self.release.lock().unwrap().recv().unwrap();
        Ok(RunStatus {
            exit_code: self.exit_code,
            stderr: String::new(),
        })
    }
}

struct PanickingRunner;

impl EncoderRunner for PanickingRunner {
    fn run(&self, _invocation: &EncoderInvocation) -> TimelapseResult<RunStatus> {
        panic!("encoder blew up");
    }
}

fn gated(exit_code: Option<i32>) -> (MovieBuilder, mpsc::Sender<()>) {
    let (tx, rx) = mpsc::channel();
    let runner = Arc::new(GatedRunner {
        release: Mutex::new(rx),
        exit_code,
    });
    (
        MovieBuilder::new(EncoderLocation::on_path()).with_runner(runner),
        tx,
    )
}

fn request(name: &str) -> (EncodeRequest, PathBuf) {
    let dir = std::path::absolute(PathBuf::from("target").join("unit_job").join(name)).unwrap();
    std::fs::create_dir_all(&dir).unwrap();
    let req = EncodeRequest::new(
        vec![dir.join("a.jpg"), dir.join("b.jpg")],
        FrameRate::new(24.0).unwrap(),
        None,
    )
    .unwrap();
    (req, dir)
}

#[test]
fn poll_reports_running_until_encoder_exits() {
    let (builder, release) = gated(Some(0));
    let (req, dir) = request("poll");

    let mut job = EncodeJob::spawn(builder, req).unwrap();
    assert!(matches!(job.poll(), JobStatus::Running));
    assert!(matches!(job.poll(), JobStatus::Running));

    release.send(()).unwrap();
    let result = loop {
        match job.poll() {
            JobStatus::Running => std::thread::sleep(Duration::from_millis(5)),
            JobStatus::Finished(result) => break result,
        }
    };
    assert_eq!(
        result.unwrap(),
        EncodeOutcome::Created {
            movie_path: dir.join(MOVIE_FILE_NAME)
        }
    );

    // The result is handed out once.
    assert!(matches!(job.poll(), JobStatus::Finished(Err(_))));
}

#[test]
fn wait_returns_failure_outcome() {
    let (builder, release) = gated(Some(1));
    let (req, _) = request("wait");

    let job = EncodeJob::spawn(builder, req).unwrap();
    release.send(()).unwrap();
    assert_eq!(
        job.wait().unwrap(),
        EncodeOutcome::Failed { exit_code: Some(1) }
    );
}

#[test]
fn callback_sees_the_result() {
    let (builder, release) = gated(Some(0));
    let (req, _) = request("callback");
    let (done_tx, done_rx) = mpsc::channel();

    let job = EncodeJob::spawn_with_callback(builder, req, move |result| {
        let ok = matches!(result, Ok(outcome) if outcome.is_success());
        done_tx.send(ok).unwrap();
    })
    .unwrap();

    release.send(()).unwrap();
    assert!(done_rx.recv_timeout(Duration::from_secs(10)).unwrap());
    assert!(job.wait().unwrap().is_success());
}

#[test]
fn drive_ticks_while_running() {
    let (builder, release) = gated(Some(0));
    let (req, _) = request("drive");
    let job = EncodeJob::spawn(builder, req).unwrap();

    let mut ticks = 0;
    let mut release = Some(release);
    let result = drive(job, Duration::from_millis(1), |_| {
        ticks += 1;
        if ticks == 3 {
            release.take().unwrap().send(()).unwrap();
        }
    });

    assert!(result.unwrap().is_success());
    assert!(ticks >= 3);
}

#[test]
fn worker_panic_becomes_encoder_error() {
    let (req, _) = request("panic");
    let builder =
        MovieBuilder::new(EncoderLocation::on_path()).with_runner(Arc::new(PanickingRunner));

    let job = EncodeJob::spawn(builder, req).unwrap();
    let err = job.wait().unwrap_err();
    assert!(matches!(err, TimelapseError::Encoder(msg) if msg.contains("panicked")));
}
