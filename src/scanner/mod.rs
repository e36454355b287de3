//! Scanner module - fans probes out across a bounded worker pool.
//!
//! Targets are pulled lazily in fixed-size batches. Each batch spawns one task
//! per target, a semaphore caps how many of those probe at once, and results
//! are drained in completion order while a [`ScanObserver`] is told about
//! every completion.

mod interrupt;
mod observer;

pub use interrupt::{Interrupt, InterruptAction};
pub use observer::{ScanObserver, SilentObserver};

use crate::error::{ScanError, ScanResult};
use crate::probe::{BoxedProbe, Protocol};
use crate::types::{ProbeResult, Targets};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time;
use tracing::{debug, info, warn};

/// Targets submitted per batch.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Default per-probe timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Extra time a task gets beyond the probe timeout before it is abandoned.
const TASK_GRACE: Duration = Duration::from_millis(250);

/// Everything needed to run one scan.
pub struct ScanJob {
    targets: Targets,
    probe: BoxedProbe,
    pool_size: usize,
    timeout: Duration,
    batch_size: usize,
    cancel: Option<Arc<AtomicBool>>,
}

impl ScanJob {
    /// Create a job. Fails if `pool_size` is not positive.
    pub fn new(
        targets: Targets,
        probe: BoxedProbe,
        pool_size: i64,
        timeout: Duration,
    ) -> ScanResult<Self> {
        let pool_size = usize::try_from(pool_size)
            .ok()
            .filter(|&n| n > 0 && n <= Semaphore::MAX_PERMITS)
            .ok_or_else(|| {
                ScanError::InvalidSelection(format!(
                    "thread count must be a positive integer, got {}",
                    pool_size
                ))
            })?;

        Ok(Self {
            targets,
            probe,
            pool_size,
            timeout,
            batch_size: DEFAULT_BATCH_SIZE,
            cancel: None,
        })
    }

    /// Set how many targets are submitted at a time.
    pub fn with_batch_size(mut self, batch_size: usize) -> ScanResult<Self> {
        if batch_size == 0 {
            return Err(ScanError::InvalidSelection(
                "batch size must be a positive integer".to_string(),
            ));
        }
        self.batch_size = batch_size;
        Ok(self)
    }

    /// Stop submitting new batches once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Number of targets the job will submit.
    pub fn total(&self) -> usize {
        self.targets.len()
    }

    /// Protocol of the attached probe.
    pub fn protocol(&self) -> Protocol {
        self.probe.protocol()
    }

    /// Maximum number of probes in flight.
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Results of a completed scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub protocol: Protocol,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    /// Targets the job held.
    pub total: usize,
    /// Targets that finished probing.
    pub completed: usize,
    /// Whether the scan stopped early on request.
    pub cancelled: bool,
    /// Successful probes, in completion order.
    pub results: Vec<ProbeResult>,
}

impl ScanReport {
    /// Get a short summary of the scan.
    pub fn summary(&self) -> String {
        format!(
            "{} of {} hosts responded over {} [{:.2}s]",
            self.results.len(),
            self.completed,
            self.protocol,
            self.duration_ms as f64 / 1000.0
        )
    }
}

/// Run a scan to completion (or until cancelled between batches).
pub async fn run_scan(mut job: ScanJob, observer: &mut dyn ScanObserver) -> ScanReport {
    let started_at = Utc::now();
    let start = Instant::now();
    let total = job.total();
    let protocol = job.protocol();
    let deadline = job.timeout.saturating_add(TASK_GRACE);

    // Create semaphore for bounded concurrency
    let semaphore = Arc::new(Semaphore::new(job.pool_size));

    info!(
        total,
        pool_size = job.pool_size,
        batch_size = job.batch_size,
        %protocol,
        "starting scan"
    );
    observer.on_start(total, protocol);

    let mut results = Vec::new();
    let mut completed = 0usize;
    let mut cancelled = false;

    loop {
        if job.is_cancelled() {
            warn!(completed, total, "scan cancelled");
            cancelled = true;
            break;
        }

        let batch: Vec<String> = job.targets.by_ref().take(job.batch_size).collect();
        if batch.is_empty() {
            break;
        }
        debug!(size = batch.len(), "submitting batch");

        let mut tasks = JoinSet::new();
        for host in batch {
            let probe = Arc::clone(&job.probe);
            let sem = Arc::clone(&semaphore);
            let timeout = job.timeout;

            tasks.spawn(async move {
                let _permit = sem.acquire_owned().await.ok()?;

                match time::timeout(deadline, probe.probe(&host, timeout)).await {
                    Ok(result) => result,
                    Err(_) => {
                        debug!(host = %host, "probe abandoned after deadline");
                        None
                    }
                }
            });
        }

        while let Some(joined) = tasks.join_next().await {
            completed += 1;
            observer.on_progress(completed, total);

            match joined {
                Ok(Some(result)) => {
                    observer.on_found(&result);
                    results.push(result);
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, "probe task failed"),
            }
        }
    }

    observer.on_finish(results.len(), completed);
    info!(found = results.len(), completed, "scan finished");

    ScanReport {
        protocol,
        started_at,
        duration_ms: start.elapsed().as_millis() as u64,
        total,
        completed,
        cancelled,
        results,
    }
}
