use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Interval of the orphan reconciliation sweep; zero disables it
    pub orphan_sweep_interval: Duration,
    /// Interval of the simulated system-metric sampler; zero disables it
    pub metrics_sample_interval: Duration,
}

fn secs_from_env(key: &str, default: u64) -> Duration {
    Duration::from_secs(
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default),
    )
}

impl SchedulerConfig {
    pub fn from_env() -> Self {
        Self {
            orphan_sweep_interval: secs_from_env("LAUNCHPAD_ORPHAN_SWEEP_SECS", 300),
            metrics_sample_interval: secs_from_env("LAUNCHPAD_METRICS_SAMPLE_SECS", 60),
        }
    }
}
