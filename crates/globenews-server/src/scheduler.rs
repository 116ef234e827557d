//! Background extraction scheduler.
//!
//! Runs the enrichment pipeline once right after startup and then on a fixed
//! interval. Runs never overlap: a tick that fires while the previous run is
//! still going is skipped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use globenews_pipeline::{EnrichmentPipeline, RunReport};
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Handle to the running scheduler. Call [`EnrichmentScheduler::shutdown`]
/// to stop it.
pub struct EnrichmentScheduler {
    scheduler: JobScheduler,
}

impl EnrichmentScheduler {
    /// Registers the startup run and the repeating run, then starts the
    /// scheduler.
    ///
    /// # Errors
    ///
    /// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
    /// a job cannot be registered, or the scheduler fails to start.
    pub async fn start(
        pipeline: Arc<EnrichmentPipeline>,
        interval: Duration,
    ) -> Result<Self, JobSchedulerError> {
        let scheduler = JobScheduler::new().await?;
        let in_progress = Arc::new(AtomicBool::new(false));

        let startup = {
            let pipeline = Arc::clone(&pipeline);
            let in_progress = Arc::clone(&in_progress);
            Job::new_one_shot_async(Duration::ZERO, move |_uuid, _lock| {
                let pipeline = Arc::clone(&pipeline);
                let in_progress = Arc::clone(&in_progress);
                Box::pin(async move {
                    run_guarded(&pipeline, &in_progress).await;
                })
            })?
        };
        scheduler.add(startup).await?;

        let repeating = Job::new_repeated_async(interval, move |_uuid, _lock| {
            let pipeline = Arc::clone(&pipeline);
            let in_progress = Arc::clone(&in_progress);
            Box::pin(async move {
                run_guarded(&pipeline, &in_progress).await;
            })
        })?;
        scheduler.add(repeating).await?;

        scheduler.start().await?;
        tracing::info!(
            interval_secs = interval.as_secs(),
            "scheduler: extraction jobs registered"
        );
        Ok(Self { scheduler })
    }

    /// Stops firing new runs. A run already in flight is not interrupted.
    ///
    /// # Errors
    ///
    /// Returns [`JobSchedulerError`] if the scheduler fails to shut down.
    pub async fn shutdown(mut self) -> Result<(), JobSchedulerError> {
        tracing::info!("scheduler: shutting down");
        self.scheduler.shutdown().await
    }
}

/// Holds the in-progress flag for the duration of one run.
struct RunGuard<'a>(&'a AtomicBool);

impl<'a> RunGuard<'a> {
    fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

async fn run_guarded(
    pipeline: &EnrichmentPipeline,
    in_progress: &AtomicBool,
) -> Option<RunReport> {
    let Some(_guard) = RunGuard::try_acquire(in_progress) else {
        tracing::warn!("scheduler: previous extraction run still in progress; skipping tick");
        return None;
    };

    tracing::info!("scheduler: starting extraction run");
    let report = pipeline.run().await;
    tracing::info!(
        inserted = report.inserted,
        skipped = report.skipped(),
        "scheduler: extraction run finished"
    );
    Some(report)
}
