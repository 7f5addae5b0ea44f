//! Background jobs run on fixed intervals next to the HTTP server.
//!
//! Each `PeriodicTask` gets its own tokio task and shares the injected
//! store. Jobs: the orphan sweep and the simulated metric sampler.

use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::config::scheduler::SchedulerConfig;
use crate::storage::{NewSystemMetric, Storage};

#[async_trait]
pub trait PeriodicTask: Send + Sync {
    fn name(&self) -> &'static str;

    fn interval(&self) -> Duration;

    async fn run(&self, storage: &dyn Storage) -> anyhow::Result<()>;
}

/// Tasks enabled by the given config. A zero interval disables a task.
pub fn configured_tasks(config: &SchedulerConfig) -> Vec<Box<dyn PeriodicTask>> {
    let mut tasks: Vec<Box<dyn PeriodicTask>> = Vec::new();

    if !config.orphan_sweep_interval.is_zero() {
        tasks.push(Box::new(OrphanSweepTask {
            every: config.orphan_sweep_interval,
        }));
    }
    if !config.metrics_sample_interval.is_zero() {
        tasks.push(Box::new(MetricsSampleTask {
            every: config.metrics_sample_interval,
        }));
    }

    tasks
}

/// Spawn every enabled task. The handles are returned so callers may abort them.
pub fn start_scheduler(storage: Arc<dyn Storage>, config: &SchedulerConfig) -> Vec<JoinHandle<()>> {
    let handles: Vec<JoinHandle<()>> = configured_tasks(config)
        .into_iter()
        .map(|task| {
            let storage = storage.clone();
            tokio::spawn(async move {
                run_task(task, storage).await;
            })
        })
        .collect();

    tracing::info!(tasks = handles.len(), "Periodic task scheduler started");
    handles
}

/// Drive one task forever. The first run happens one full interval after start.
async fn run_task(task: Box<dyn PeriodicTask>, storage: Arc<dyn Storage>) {
    let period = task.interval();
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let started = Instant::now();
        if let Err(e) = task.run(storage.as_ref()).await {
            tracing::error!(task = task.name(), error = %e, "Periodic task failed");
            continue;
        }
        tracing::debug!(
            task = task.name(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Periodic task completed"
        );
    }
}

// ============================================================================
// Orphan Sweep Task
// ============================================================================

/// Removes domains and databases whose project no longer exists
pub struct OrphanSweepTask {
    pub every: Duration,
}

#[async_trait]
impl PeriodicTask for OrphanSweepTask {
    fn name(&self) -> &'static str {
        "orphan_sweep"
    }

    fn interval(&self) -> Duration {
        self.every
    }

    async fn run(&self, storage: &dyn Storage) -> anyhow::Result<()> {
        let removed = storage.purge_orphans().await?;
        if removed > 0 {
            tracing::info!(removed, "Removed orphaned domains and databases");
        }
        Ok(())
    }
}

// ============================================================================
// Metrics Sample Task
// ============================================================================

/// Records a simulated host utilisation snapshot
pub struct MetricsSampleTask {
    pub every: Duration,
}

impl MetricsSampleTask {
    pub fn sample() -> NewSystemMetric {
        let mut rng = rand::rng();
        NewSystemMetric {
            cpu_usage: rng.random_range(5..=95),
            memory_usage: rng.random_range(20..=90),
            disk_usage: rng.random_range(10..=80),
            network_usage: rng.random_range(0..=1000),
        }
    }
}

#[async_trait]
impl PeriodicTask for MetricsSampleTask {
    fn name(&self) -> &'static str {
        "metrics_sample"
    }

    fn interval(&self) -> Duration {
        self.every
    }

    async fn run(&self, storage: &dyn Storage) -> anyhow::Result<()> {
        let sample = Self::sample();
        storage.create_system_metric(sample).await?;
        Ok(())
    }
}
