use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::encode::mencoder::MovieBuilder;
use crate::encode::request::{EncodeOutcome, EncodeRequest};
use crate::foundation::error::{TimelapseError, TimelapseResult};

/// Interval between completion checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Result delivered by a finished job.
pub type JobResult = TimelapseResult<EncodeOutcome>;

/// Non-blocking view of a job.
#[derive(Debug)]
pub enum JobStatus {
    /// The encoder is still running.
    Running,
    /// The job finished. The result is handed out exactly once.
    Finished(JobResult),
}

/// One encode running on its own thread.
///
/// There is no cancellation: once spawned, the encoder runs until it exits.
#[derive(Debug)]
pub struct EncodeJob {
    rx: Receiver<JobResult>,
    handle: Option<JoinHandle<()>>,
    started: Instant,
    taken: bool,
}

impl EncodeJob {
    /// Start `request` on a background thread.
    pub fn spawn(builder: MovieBuilder, request: EncodeRequest) -> TimelapseResult<Self> {
        Self::spawn_inner(builder, request, |_| {})
    }

    /// Start `request` and call `on_complete` on the background thread when it finishes.
    ///
    /// The result is still available through [`EncodeJob::poll`] or [`EncodeJob::wait`].
    pub fn spawn_with_callback<F>(
        builder: MovieBuilder,
        request: EncodeRequest,
        on_complete: F,
    ) -> TimelapseResult<Self>
    where
        F: FnOnce(&JobResult) + Send + 'static,
    {
        Self::spawn_inner(builder, request, on_complete)
    }

    fn spawn_inner<F>(
        builder: MovieBuilder,
        request: EncodeRequest,
        on_complete: F,
    ) -> TimelapseResult<Self>
    where
        F: FnOnce(&JobResult) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let span = tracing::Span::current();

        let handle = std::thread::Builder::new()
            .name("timelapse-encode".to_string())
            .spawn(move || {
                let _entered = span.enter();
                let result = builder.build(&request);
                on_complete(&result);
                // The receiver may be gone if the job handle was dropped.
                let _ = tx.send(result);
            })
            .map_err(|e| TimelapseError::encoder(format!("failed to start encode thread: {e}")))?;

        Ok(Self {
            rx,
            handle: Some(handle),
            started: Instant::now(),
            taken: false,
        })
    }

    /// Check for completion without blocking.
    ///
    /// After the result has been returned once, further polls report an error.
    pub fn poll(&mut self) -> JobStatus {
        if self.taken {
            return JobStatus::Finished(Err(TimelapseError::encoder(
                "encode result was already taken",
            )));
        }
        match self.rx.try_recv() {
            Ok(result) => JobStatus::Finished(self.finish(result)),
            Err(TryRecvError::Empty) => JobStatus::Running,
            Err(TryRecvError::Disconnected) => {
                let err = self.join_error();
                JobStatus::Finished(self.finish(Err(err)))
            }
        }
    }

    /// Block until the job finishes.
    pub fn wait(mut self) -> JobResult {
        if self.taken {
            return Err(TimelapseError::encoder("encode result was already taken"));
        }
        match self.rx.recv() {
            Ok(result) => self.finish(result),
            Err(_) => {
                let err = self.join_error();
                self.finish(Err(err))
            }
        }
    }

    /// Time since the job was started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn finish(&mut self, result: JobResult) -> JobResult {
        self.taken = true;
        if let Some(handle) = self.handle.take() {
            // The thread has sent its result or died; joining does not block for long.
            let _ = handle.join();
        }
        tracing::debug!(elapsed = ?self.elapsed(), "encode job finished");
        result
    }

    fn join_error(&mut self) -> TimelapseError {
        match self.handle.take().map(JoinHandle::join) {
            Some(Err(_)) => TimelapseError::encoder("encode thread panicked"),
            _ => TimelapseError::encoder("encode thread exited without a result"),
        }
    }
}

/// Poll `job` every `interval` until it finishes, calling `on_tick` while it runs.
///
/// For hosts without their own event loop; `on_tick` is where such a host keeps its surface
/// responsive.
pub fn drive<F>(mut job: EncodeJob, interval: Duration, mut on_tick: F) -> JobResult
where
    F: FnMut(&EncodeJob),
{
    loop {
        match job.poll() {
            JobStatus::Finished(result) => return result,
            JobStatus::Running => {
                tracing::debug!("MEncoder is still running; rescheduling check.");
                on_tick(&job);
                std::thread::sleep(interval);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/job/background.rs"]
mod tests;
