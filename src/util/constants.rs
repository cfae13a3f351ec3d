// Mutuals - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.
// Every tunable that config.toml can override has a DEFAULT_ value and a
// MIN_/MAX_ range here.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "Mutuals";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "Mutuals";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// GitHub API
// =============================================================================

/// Base URL of the public GitHub REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Media type requested on every API call.
pub const API_ACCEPT_HEADER: &str = "application/vnd.github+json";

/// Page size used when walking a follower list. A page holding exactly this
/// many entries means another page may follow.
pub const FOLLOWERS_PER_PAGE: usize = 100;

/// Upper bound on follower pages fetched for a single user (100 000
/// followers). Reaching it aborts the walk with `FetchError::TooManyPages`.
pub const MAX_FOLLOWER_PAGES: u32 = 1_000;

/// Longest login GitHub accepts.
pub const MAX_LOGIN_LEN: usize = 39;

/// Whole-request timeout applied by the HTTP client (seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Minimum user-configurable request timeout (seconds).
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Maximum user-configurable request timeout (seconds).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Worker threads for the fetch runtime. Fetches are I/O bound, so a small
/// pool is enough regardless of core count.
pub const FETCH_WORKER_THREADS: usize = 2;

// =============================================================================
// Session
// =============================================================================

/// Users tracked on first launch when neither the CLI nor config.toml names any.
pub const DEFAULT_USERS: [&str; 2] = ["tumiduong", "mildlywilde"];

/// Maximum number of users config.toml may seed.
pub const MAX_DEFAULT_USERS: usize = 20;

/// How long an error message stays on screen (seconds).
pub const DEFAULT_ERROR_DISPLAY_SECS: u64 = 5;

/// Minimum user-configurable error display time (seconds).
pub const MIN_ERROR_DISPLAY_SECS: u64 = 1;

/// Maximum user-configurable error display time (seconds).
pub const MAX_ERROR_DISPLAY_SECS: u64 = 60;

/// Tracked users may only be removed while more than this many are tracked.
pub const MIN_TRACKED_FOR_REMOVAL: usize = 2;

/// How long `--headless` waits for all fetches before giving up (seconds).
pub const HEADLESS_WAIT_SECS: u64 = 120;

// =============================================================================
// UI
// =============================================================================

/// Repaint interval while fetches are in flight (ms), so outcomes delivered
/// on the channel show up without user input.
pub const LOADING_REPAINT_INTERVAL_MS: u64 = 100;

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug, nor config.toml set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// File names
// =============================================================================

/// Configuration file name, resolved relative to the platform config dir.
pub const CONFIG_FILE_NAME: &str = "config.toml";
