// Mutuals - app/session.rs
//
// Session controller: the single owner of the tracked-user registry and
// the error banner. Every mutation (add, remove, edit, applying a fetch
// outcome) goes through this type, on the thread that owns it.
//
// Per-user lifecycle:
//   add_user  -> Pending entry with a fresh generation, fetch job spawned
//   outcome   -> Ok:  entry Resolved (if the generation still matches)
//                Err: entry removed, banner set (if the generation still matches)
//
// Outcomes whose generation no longer matches (user removed, or removed and
// re-added) are dropped, so a late fetch never brings back a removed user.

use crate::app::banner::ErrorBanner;
use crate::app::fetch::FetchManager;
use crate::core::aggregate;
use crate::core::fetch::Transport;
use crate::core::model::{FetchOutcome, FollowerIdentity, PendingPolicy, TrackedUser};
use crate::core::registry::Registry;
use crate::platform::config::AppConfig;
use crate::util::constants;
use crate::util::error::{Result, ValidationError};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Controller settings, usually derived from `AppConfig`.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Users added by `seed_defaults`.
    pub default_users: Vec<String>,
    /// How long an error stays in the banner.
    pub error_display: Duration,
    pub pending_policy: PendingPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for SessionConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            default_users: config.default_users.clone(),
            error_display: config.error_display,
            pending_policy: config.pending_policy,
        }
    }
}

/// Orchestrates tracked users, their fetches, and the error banner.
pub struct SessionController {
    registry: Registry,
    banner: ErrorBanner,
    fetcher: FetchManager,
    config: SessionConfig,
    /// Jobs started whose outcome has not been received yet.
    in_flight: usize,
    next_generation: u64,
    seeded: bool,
}

impl SessionController {
    /// Create a controller with an empty registry. Nothing is fetched until
    /// `seed_defaults` or `add_user` is called.
    pub fn new(transport: Arc<dyn Transport>, config: SessionConfig) -> Result<Self> {
        Ok(Self {
            registry: Registry::new(),
            banner: ErrorBanner::new(config.error_display),
            fetcher: FetchManager::new(transport)?,
            config,
            in_flight: 0,
            next_generation: 1,
            seeded: false,
        })
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Start tracking `name`.
    ///
    /// Validation failures are reported in the banner and returned; no
    /// request is made. On success the entry is Pending until its fetch
    /// outcome is applied by `poll`/`wait_idle`.
    pub fn add_user(&mut self, name: &str) -> std::result::Result<(), ValidationError> {
        let login = name.trim();

        if let Err(e) = self.validate_new_login(login) {
            tracing::warn!(login, error = %e, "Add user rejected");
            self.report_error(e.to_string());
            return Err(e);
        }

        let generation = self.next_generation;
        self.next_generation += 1;

        self.registry.insert_pending(login, generation);
        self.in_flight += 1;
        self.fetcher.start_fetch(login.to_string(), generation);

        tracing::info!(login, generation, "User added");
        Ok(())
    }

    /// Stop tracking `name`. Absent names are ignored.
    pub fn remove_user(&mut self, name: &str) {
        if let Some(removed) = self.registry.remove(name) {
            tracing::info!(
                login = %removed.login,
                generation = removed.generation,
                pending = removed.is_pending(),
                "User removed"
            );
        }
    }

    /// Replace `old` with `new`: a remove followed by an add.
    ///
    /// Not atomic. If the add is rejected the old entry is already gone.
    pub fn edit_user(&mut self, old: &str, new: &str) -> std::result::Result<(), ValidationError> {
        self.remove_user(old);
        self.add_user(new)
    }

    /// Add the configured default users. Only the first call has any effect.
    pub fn seed_defaults(&mut self) {
        if self.seeded {
            return;
        }
        self.seeded = true;

        let users = self.config.default_users.clone();
        tracing::info!(count = users.len(), "Seeding default users");
        for user in &users {
            // Rejections are already in the banner and the log.
            let _ = self.add_user(user);
        }
    }

    /// Apply every fetch outcome received so far, without blocking.
    /// Returns the number of outcomes processed (including stale ones).
    pub fn poll(&mut self) -> usize {
        let outcomes = self.fetcher.poll_outcomes();
        let count = outcomes.len();
        for outcome in outcomes {
            self.apply_outcome(outcome);
        }
        count
    }

    /// Block, applying outcomes as they arrive, until no fetch is in flight
    /// or `timeout` elapses. Returns true if the session went idle.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        self.poll();
        let deadline = Instant::now() + timeout;

        while self.in_flight > 0 {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            match self.fetcher.recv_timeout(deadline - now) {
                Some(outcome) => self.apply_outcome(outcome),
                None => break,
            }
        }

        if self.in_flight > 0 {
            tracing::warn!(in_flight = self.in_flight, "Timed out waiting for fetches");
        }
        self.in_flight == 0
    }

    /// Clear the banner if its display time is over.
    pub fn tick(&mut self) {
        if self.banner.expire(Instant::now()) {
            tracing::debug!("Error banner cleared");
        }
    }

    // -------------------------------------------------------------------------
    // Read access for the presentation layer
    // -------------------------------------------------------------------------

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Tracked users in display order.
    pub fn users(&self) -> impl Iterator<Item = &TrackedUser> {
        self.registry.iter()
    }

    /// Followers common to the tracked users, under the configured policy.
    pub fn common_followers(&self) -> Vec<FollowerIdentity> {
        aggregate::common_followers(&self.registry, self.config.pending_policy)
    }

    /// True while any fetch job has not reported back.
    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn error(&self) -> Option<&str> {
        self.banner.message()
    }

    /// Time until the current error clears, for repaint scheduling.
    pub fn error_remaining(&self) -> Option<Duration> {
        self.banner.remaining(Instant::now())
    }

    /// Users can be removed only while more than the minimum are tracked.
    pub fn is_removable(&self) -> bool {
        self.registry.len() > constants::MIN_TRACKED_FOR_REMOVAL
    }

    pub fn pending_policy(&self) -> PendingPolicy {
        self.config.pending_policy
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn validate_new_login(&self, login: &str) -> std::result::Result<(), ValidationError> {
        if login.is_empty() {
            return Err(ValidationError::EmptyLogin);
        }
        if !is_valid_login(login) {
            return Err(ValidationError::InvalidLogin {
                login: login.to_string(),
            });
        }
        if self.registry.contains(login) {
            return Err(ValidationError::DuplicateLogin {
                login: login.to_string(),
            });
        }
        Ok(())
    }

    fn apply_outcome(&mut self, outcome: FetchOutcome) {
        self.in_flight = self.in_flight.saturating_sub(1);

        let FetchOutcome {
            login,
            generation,
            result,
        } = outcome;

        match result {
            Ok((profile, followers)) => {
                let follower_count = followers.len();
                if self.registry.resolve(&login, generation, profile, followers) {
                    tracing::info!(login = %login, followers = follower_count, "User resolved");
                } else {
                    tracing::debug!(login = %login, generation, "Discarded stale fetch result");
                }
            }
            Err(e) => {
                if self.registry.discard_failed(&login, generation) {
                    tracing::warn!(login = %login, error = %e, "Fetch failed; user removed");
                    self.report_error(e.to_string());
                } else {
                    tracing::debug!(
                        login = %login,
                        generation,
                        error = %e,
                        "Discarded stale fetch failure"
                    );
                }
            }
        }
    }

    fn report_error(&mut self, message: String) {
        self.banner.show(message, Instant::now());
    }
}

/// GitHub logins: ASCII letters, digits and '-', at most `MAX_LOGIN_LEN`.
fn is_valid_login(login: &str) -> bool {
    login.len() <= constants::MAX_LOGIN_LEN
        && login
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}
