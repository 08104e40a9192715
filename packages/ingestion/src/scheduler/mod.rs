//! Recurring execution of pipeline runs with job identity and failure
//! isolation.
//!
//! Built on `tokio-cron-scheduler`: one scheduling loop dispatches each
//! due job's action onto its own task, so a slow or failing run cannot
//! delay other jobs' fires. Registration is upsert-by-id.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};
use uuid::Uuid;

use crate::error::{PipelineError, SchedulerError};

/// Job id of the default recurring fetch.
pub const DAILY_FETCH_JOB_ID: &str = "daily_fetch_papers";

/// When a job fires.
#[derive(Debug, Clone)]
pub enum Trigger {
    /// Fixed interval between fires
    Interval(Duration),

    /// Cron expression (6-field, seconds first)
    Cron(String),
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Interval(d) => write!(f, "interval[{}s]", d.as_secs()),
            Trigger::Cron(expr) => write!(f, "cron[{expr}]"),
        }
    }
}

/// A job to register: stable id, bound keyword, and trigger.
#[derive(Debug, Clone)]
pub struct JobSpec {
    /// Stable identifier; re-registering the same id replaces the job
    pub id: String,

    /// Keyword passed to the bound action on each fire
    pub keyword: String,

    pub trigger: Trigger,
}

impl JobSpec {
    /// Create a job spec.
    pub fn new(id: impl Into<String>, keyword: impl Into<String>, trigger: Trigger) -> Self {
        Self {
            id: id.into(),
            keyword: keyword.into(),
            trigger,
        }
    }
}

/// Read-only snapshot of one registered job.
#[derive(Debug, Clone, Serialize)]
pub struct JobStatus {
    pub id: String,
    pub keyword: String,
    pub next_run_time: Option<DateTime<Utc>>,
    pub trigger: String,
}

/// Read-only scheduler snapshot, safe to take concurrently with fires.
#[derive(Debug, Clone, Serialize)]
pub struct SchedulerStatus {
    pub scheduler_running: bool,
    pub jobs: Vec<JobStatus>,
}

struct RegisteredJob {
    scheduler_id: Uuid,
    keyword: String,
    trigger: String,
}

/// Scheduler owning the job registry and the underlying timer loop.
pub struct IngestScheduler {
    inner: JobScheduler,
    registry: RwLock<HashMap<String, RegisteredJob>>,
    running: AtomicBool,
}

impl IngestScheduler {
    /// Create a scheduler; no jobs registered, timer not started.
    pub async fn new() -> Result<Self, SchedulerError> {
        Ok(Self {
            inner: JobScheduler::new().await?,
            registry: RwLock::new(HashMap::new()),
            running: AtomicBool::new(false),
        })
    }

    /// Register `spec`, binding `action` to fire on its trigger.
    ///
    /// Upsert-by-id: an existing job with the same id is removed first,
    /// never duplicated. Any `Err` the action returns during a fire is
    /// caught at the job boundary and logged; the job stays scheduled
    /// for its next fire.
    pub async fn register<F, Fut>(&self, spec: JobSpec, action: F) -> Result<(), SchedulerError>
    where
        F: Fn(String) -> Fut + Send + Sync + Clone + 'static,
        Fut: Future<Output = Result<(), PipelineError>> + Send + 'static,
    {
        let job_id = spec.id.clone();
        let keyword = spec.keyword.clone();
        let runner = move |_uuid, _sched| {
            let action = action.clone();
            let job_id = job_id.clone();
            let keyword = keyword.clone();
            Box::pin(async move {
                let fired_at = Utc::now();
                if let Err(e) = action(keyword.clone()).await {
                    error!(
                        job = %job_id,
                        keyword = %keyword,
                        fired_at = %fired_at,
                        error = %e,
                        "scheduled run failed"
                    );
                }
            }) as std::pin::Pin<Box<dyn Future<Output = ()> + Send>>
        };

        let job = match &spec.trigger {
            Trigger::Interval(duration) => {
                if duration.is_zero() {
                    return Err(SchedulerError::InvalidTrigger {
                        job_id: spec.id,
                        reason: "interval must be non-zero".to_string(),
                    });
                }
                Job::new_repeated_async(*duration, runner)?
            }
            Trigger::Cron(expr) => Job::new_async(expr.as_str(), runner)?,
        };

        // Upsert: drop any previous job with this id before adding.
        let previous = self.registry.write().await.remove(&spec.id);
        if let Some(previous) = previous {
            self.inner.remove(&previous.scheduler_id).await?;
        }

        let scheduler_id = self.inner.add(job).await?;
        self.registry.write().await.insert(
            spec.id.clone(),
            RegisteredJob {
                scheduler_id,
                keyword: spec.keyword.clone(),
                trigger: spec.trigger.to_string(),
            },
        );

        info!(job = %spec.id, trigger = %spec.trigger, keyword = %spec.keyword, "job registered");
        Ok(())
    }

    /// Start the timer loop.
    pub async fn start(&self) -> Result<(), SchedulerError> {
        self.inner.start().await?;
        self.running.store(true, Ordering::SeqCst);
        info!("scheduler started");
        Ok(())
    }

    /// Stop the timer loop. In-flight fires are not cancelled, but no
    /// new fires occur after this returns.
    pub async fn shutdown(&self) -> Result<(), SchedulerError> {
        let mut inner = self.inner.clone();
        inner.shutdown().await?;
        self.running.store(false, Ordering::SeqCst);
        info!("scheduler stopped");
        Ok(())
    }

    /// Snapshot of the scheduler and its jobs.
    pub async fn status(&self) -> SchedulerStatus {
        let registry = self.registry.read().await;
        let mut jobs = Vec::with_capacity(registry.len());
        for (id, job) in registry.iter() {
            let mut inner = self.inner.clone();
            let next_run_time = inner
                .next_tick_for_job(job.scheduler_id)
                .await
                .ok()
                .flatten();
            jobs.push(JobStatus {
                id: id.clone(),
                keyword: job.keyword.clone(),
                next_run_time,
                trigger: job.trigger.clone(),
            });
        }
        jobs.sort_by(|a, b| a.id.cmp(&b.id));

        SchedulerStatus {
            scheduler_running: self.running.load(Ordering::SeqCst),
            jobs,
        }
    }
}
