// Mutuals - app/fetch.rs
//
// Fetch lifecycle management. Runs the per-user fetch jobs on a tokio
// runtime and delivers their outcomes to the controller thread via an
// mpsc channel.
//
// Architecture:
//   - `FetchManager` lives on the controller (UI) thread and owns the runtime.
//   - Each job fetches one user's profile and follower list concurrently and
//     sends exactly one `FetchOutcome`.
//   - Jobs never touch the registry; the controller is the only consumer of
//     the channel and applies outcomes in arrival order.
//   - There is no cancellation: a job for a removed user runs to completion
//     and the controller drops the stale outcome by generation.

use crate::core::fetch::{fetch_followers, fetch_profile, Transport};
use crate::core::model::{FetchOutcome, FollowerIdentity, Profile};
use crate::util::constants::FETCH_WORKER_THREADS;
use crate::util::error::{FetchError, MutualsError, Result};
use std::sync::{mpsc, Arc};
use std::time::Duration;

/// Spawns fetch jobs and collects their outcomes.
pub struct FetchManager {
    runtime: tokio::runtime::Runtime,
    transport: Arc<dyn Transport>,
    outcome_tx: mpsc::Sender<FetchOutcome>,
    outcome_rx: mpsc::Receiver<FetchOutcome>,
}

impl FetchManager {
    /// Start the background runtime. Jobs are spawned with `start_fetch`.
    pub fn new(transport: Arc<dyn Transport>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(FETCH_WORKER_THREADS)
            .thread_name("mutuals-fetch")
            .enable_all()
            .build()
            .map_err(|source| MutualsError::Runtime { source })?;

        let (outcome_tx, outcome_rx) = mpsc::channel();

        Ok(Self {
            runtime,
            transport,
            outcome_tx,
            outcome_rx,
        })
    }

    /// Spawn the joint profile + follower fetch for `login`.
    ///
    /// Returns immediately; the outcome arrives on the channel tagged with
    /// `generation`.
    pub fn start_fetch(&self, login: String, generation: u64) {
        let transport = Arc::clone(&self.transport);
        let tx = self.outcome_tx.clone();

        tracing::debug!(login = %login, generation, "Fetch started");

        self.runtime.spawn(async move {
            let result = fetch_tracked_user(transport.as_ref(), &login).await;
            // Receiver lives as long as the manager; a send error only
            // happens during shutdown.
            let _ = tx.send(FetchOutcome {
                login,
                generation,
                result,
            });
        });
    }

    /// Poll for outcomes without blocking. Returns all pending outcomes.
    pub fn poll_outcomes(&self) -> Vec<FetchOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Block for up to `timeout` waiting for the next outcome.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<FetchOutcome> {
        self.outcome_rx.recv_timeout(timeout).ok()
    }
}

/// Fetch profile and followers of `login` concurrently.
///
/// Fails with the first error from either fetch.
pub async fn fetch_tracked_user(
    transport: &dyn Transport,
    login: &str,
) -> std::result::Result<(Profile, Vec<FollowerIdentity>), FetchError> {
    tokio::try_join!(
        fetch_profile(transport, login),
        fetch_followers(transport, login)
    )
}
