//! Background execution of "describe current weather".
//!
//! Submitters push jobs into a bounded channel that acts as the broker; a
//! dispatcher task pulls them off and runs each on its own task, at most
//! `concurrency` at a time. Every job reports back on a oneshot channel.
//!
//! Waiting with a timeout does not cancel anything: a job that outlives its
//! submitter's wait keeps running and its result is dropped unless the handle
//! is waited on again. Call [`JobHandle::cancel`] to stop it at the next
//! suspension point.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::{
    sync::{Semaphore, mpsc, oneshot},
    task::JoinHandle,
};
use tokio_util::{sync::CancellationToken, task::TaskTracker};
use tracing::{Instrument, debug, info, info_span, warn};

use crate::{
    config::JobConfig,
    context::WeatherContext,
    error::{Result, WeatherError},
    model::CoordinateDirective,
    session::WeatherSession,
};

pub type JobId = u64;

/// Input of a weather job.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherJob {
    pub directive: CoordinateDirective,
    pub language: String,
    /// Validated when the job runs; an unknown value is a failed job.
    pub unit_group: String,
}

impl WeatherJob {
    pub fn new(
        directive: CoordinateDirective,
        language: impl Into<String>,
        unit_group: impl Into<String>,
    ) -> Self {
        Self {
            directive,
            language: language.into(),
            unit_group: unit_group.into(),
        }
    }
}

/// What a submitter observes when it stops waiting.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    Completed(String),
    Failed(WeatherError),
    /// The wait elapsed. The job itself may still be running.
    TimedOut,
}

struct JobRequest {
    id: JobId,
    job: WeatherJob,
    cancel: CancellationToken,
    reply: oneshot::Sender<Result<String>>,
}

pub struct JobQueue {
    sender: mpsc::Sender<JobRequest>,
    next_id: AtomicU64,
    wait_timeout: Duration,
    dispatcher: JoinHandle<()>,
}

impl JobQueue {
    /// Spawn the dispatcher on the current tokio runtime.
    pub fn start(ctx: WeatherContext, config: &JobConfig) -> Self {
        let (sender, receiver) = mpsc::channel(config.queue_capacity.max(1));
        let dispatcher = tokio::spawn(dispatch(ctx, receiver, config.concurrency.max(1)));

        Self {
            sender,
            next_id: AtomicU64::new(1),
            wait_timeout: config.wait_timeout(),
            dispatcher,
        }
    }

    /// Enqueue a job. Waits for room if the broker is full.
    pub async fn submit(&self, job: WeatherJob) -> Result<JobHandle> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (reply, result) = oneshot::channel();
        let cancel = CancellationToken::new();

        debug!(job_id = id, directive = %job.directive, "Submitting weather job");

        self.sender
            .send(JobRequest { id, job, cancel: cancel.clone(), reply })
            .await
            .map_err(|_| WeatherError::QueueClosed)?;

        Ok(JobHandle {
            id,
            result,
            cancel,
            default_timeout: self.wait_timeout,
            finished: None,
        })
    }

    /// Stop accepting jobs and wait for in-flight ones to finish.
    pub async fn shutdown(self) {
        drop(self.sender);
        if let Err(err) = self.dispatcher.await {
            warn!(error = %err, "Job dispatcher terminated abnormally");
        }
    }
}

/// Submitter-side view of one job.
#[derive(Debug)]
pub struct JobHandle {
    id: JobId,
    result: oneshot::Receiver<Result<String>>,
    cancel: CancellationToken,
    default_timeout: Duration,
    finished: Option<JobOutcome>,
}

impl JobHandle {
    pub fn id(&self) -> JobId {
        self.id
    }

    /// Wait up to `timeout` for the result.
    ///
    /// `TimedOut` leaves the job running and the handle usable; once a result
    /// arrives every later call returns it again.
    pub async fn wait(&mut self, timeout: Duration) -> JobOutcome {
        if let Some(outcome) = &self.finished {
            return outcome.clone();
        }

        let outcome = match tokio::time::timeout(timeout, &mut self.result).await {
            Err(_) => {
                debug!(job_id = self.id, ?timeout, "Stopped waiting for job");
                return JobOutcome::TimedOut;
            }
            Ok(Ok(Ok(line))) => JobOutcome::Completed(line),
            Ok(Ok(Err(err))) => JobOutcome::Failed(err),
            // Executor went away without replying.
            Ok(Err(_)) => JobOutcome::Failed(WeatherError::QueueClosed),
        };

        self.finished = Some(outcome.clone());
        outcome
    }

    /// Wait with the queue's configured timeout.
    pub async fn wait_default(&mut self) -> JobOutcome {
        self.wait(self.default_timeout).await
    }

    /// Ask the job to stop at its next suspension point.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

async fn dispatch(
    ctx: WeatherContext,
    mut receiver: mpsc::Receiver<JobRequest>,
    concurrency: usize,
) {
    let permits = Arc::new(Semaphore::new(concurrency));
    let tracker = TaskTracker::new();

    while let Some(request) = receiver.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };

        let ctx = ctx.clone();
        let span = info_span!("weather_job", job_id = request.id);

        tracker.spawn(
            async move {
                let _permit = permit;
                let result = run_job(&ctx, &request.job, &request.cancel).await;

                match &result {
                    Ok(_) => info!("Job completed"),
                    Err(err) => warn!(error = %err, "Job failed"),
                }

                if request.reply.send(result).is_err() {
                    debug!("Submitter dropped the handle; result discarded");
                }
            }
            .instrument(span),
        );
    }

    tracker.close();
    tracker.wait().await;
}

async fn run_job(
    ctx: &WeatherContext,
    job: &WeatherJob,
    cancel: &CancellationToken,
) -> Result<String> {
    let session = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(WeatherError::Cancelled),
        session = WeatherSession::new(ctx, &job.directive, &job.language, &job.unit_group) => {
            session?
        }
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(WeatherError::Cancelled),
        line = session.describe_current_weather() => line,
    }
}
