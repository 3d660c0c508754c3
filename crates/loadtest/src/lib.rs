//! Load generator for a running Chatgate service.
//!
//! Virtual users are ramped up at a fixed rate; each one loops forever, waiting
//! a random think time and then firing one weighted task. The run ends when the
//! configured run time elapses or the shutdown token is cancelled.

#![deny(missing_docs)]

mod questions;
mod stats;
mod task;

use std::{ops::RangeInclusive, sync::Arc, time::Duration};

use anyhow::Context;
use rand::{Rng, SeedableRng, rngs::StdRng};
use reqwest::Client;
use tokio::{task::JoinSet, time::Instant};
use tokio_util::sync::CancellationToken;

pub use questions::QUESTIONS;
pub use stats::{Rating, Summary};
pub use task::Task;

use stats::Stats;
use task::{Outcome, TaskPicker};

/// Settings of one load test run.
#[derive(Debug, Clone)]
pub struct LoadTestConfig {
    /// Base URL of the service, e.g. `http://localhost:8000`.
    pub host: String,
    /// Number of virtual users to start.
    pub users: usize,
    /// Users started per second.
    pub spawn_rate: f64,
    /// Stop after this long; run until cancelled when unset.
    pub run_time: Option<Duration>,
    /// Think time between two tasks of one user, in milliseconds.
    pub wait_ms: RangeInclusive<u64>,
}

impl LoadTestConfig {
    /// A run against `host` with the default one to three second think time.
    pub fn new(host: impl Into<String>, users: usize, spawn_rate: f64) -> Self {
        Self {
            host: host.into(),
            users,
            spawn_rate,
            run_time: None,
            wait_ms: 1_000..=3_000,
        }
    }
}

/// Runs the load test until `run_time` expires or `shutdown` is cancelled.
pub async fn run(config: LoadTestConfig, shutdown: CancellationToken) -> anyhow::Result<Summary> {
    anyhow::ensure!(config.users > 0, "At least one user is required");
    anyhow::ensure!(config.spawn_rate > 0.0, "Spawn rate must be positive");

    let spawn_interval = Duration::try_from_secs_f64(1.0 / config.spawn_rate)
        .with_context(|| format!("Spawn rate {} is too low", config.spawn_rate))?;

    // Targets are often local services with self-signed certificates.
    let client = Client::builder()
        .danger_accept_invalid_certs(true)
        .build()
        .context("Failed to create HTTP client")?;

    let host = Arc::<str>::from(config.host.trim_end_matches('/'));
    let stats = Arc::new(Stats::default());
    let picker = Arc::new(TaskPicker::new());

    // Cancelling the run stops every user, but not the caller's token.
    let stop = shutdown.child_token();

    if let Some(run_time) = config.run_time {
        let stop = stop.clone();

        tokio::spawn(async move {
            tokio::time::sleep(run_time).await;
            log::debug!("Run time of {run_time:?} elapsed");
            stop.cancel();
        });
    }

    log::info!(
        "Starting {} users at {} users/s against {host}",
        config.users,
        config.spawn_rate
    );

    let mut users = JoinSet::new();
    let mut next_spawn = Instant::now();

    for id in 0..config.users {
        tokio::select! {
            biased;

            _ = stop.cancelled() => break,
            _ = tokio::time::sleep_until(next_spawn) => {}
        }

        users.spawn(user(
            id,
            client.clone(),
            host.clone(),
            config.wait_ms.clone(),
            picker.clone(),
            stats.clone(),
            stop.clone(),
        ));

        next_spawn += spawn_interval;
    }

    while let Some(result) = users.join_next().await {
        if let Err(e) = result {
            log::error!("Virtual user crashed: {e}");
        }
    }

    Ok(stats.summary())
}

async fn user(
    id: usize,
    client: Client,
    host: Arc<str>,
    wait_ms: RangeInclusive<u64>,
    picker: Arc<TaskPicker>,
    stats: Arc<Stats>,
    stop: CancellationToken,
) {
    let mut rng = StdRng::from_entropy();
    log::debug!("User {id} started");

    loop {
        let wait = Duration::from_millis(rng.gen_range(wait_ms.clone()));

        tokio::select! {
            biased;

            _ = stop.cancelled() => break,
            _ = tokio::time::sleep(wait) => {}
        }

        let task = picker.pick(&mut rng);
        let started = Instant::now();

        let outcome = tokio::select! {
            biased;

            _ = stop.cancelled() => break,
            outcome = task::execute(&client, &host, task, &mut rng) => outcome,
        };

        let elapsed = started.elapsed();

        match outcome {
            Outcome::Success => stats.record(true, elapsed),
            Outcome::Failure(reason) => {
                log::warn!("{task} failed: {reason}");
                stats.record(false, elapsed);
            }
        }
    }

    log::debug!("User {id} stopped");
}
