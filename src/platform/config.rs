// Mutuals - platform/config.rs
//
// Platform-specific directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::PendingPolicy;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Resolved platform paths for Mutuals configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/mutuals/ or %APPDATA%\Mutuals\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Full path of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub api: ApiSection,
    pub session: SessionSection,
    pub aggregation: AggregationSection,
    pub logging: LoggingSection,
}

/// `[api]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ApiSection {
    /// API base URL (GitHub Enterprise: "https://host/api/v3").
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// `[session]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SessionSection {
    /// Users tracked at startup.
    pub default_users: Option<Vec<String>>,
    /// Seconds an error message stays visible.
    pub error_display_secs: Option<u64>,
}

/// `[aggregation]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct AggregationSection {
    /// "exclude" or "require_all".
    pub pending_policy: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Every value is checked against the named constants at load time;
/// invalid values produce a warning and keep the default.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- API --
    pub api_base_url: String,
    pub request_timeout: Duration,

    // -- Session --
    pub default_users: Vec<String>,
    pub error_display: Duration,

    // -- Aggregation --
    pub pending_policy: PendingPolicy,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: constants::DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(constants::DEFAULT_REQUEST_TIMEOUT_SECS),
            default_users: constants::DEFAULT_USERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            error_display: Duration::from_secs(constants::DEFAULT_ERROR_DISPLAY_SECS),
            pending_policy: PendingPolicy::default(),
            log_level: None,
            log_file: None,
        }
    }
}

/// Load and validate `config.toml` at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal
/// warnings. A missing file yields defaults with no warnings (first run);
/// an unreadable or unparseable file yields defaults plus one warning, so
/// the application still starts but the user is told why.
///
/// Called before logging is initialised (the log level lives in this
/// file), so the caller is responsible for logging the warnings.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<ConfigError>) {
    let mut warnings: Vec<ConfigError> = Vec::new();

    if !config_path.exists() {
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(source) => {
            warnings.push(ConfigError::Io {
                path: config_path.to_path_buf(),
                source,
            });
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(source) => {
            warnings.push(ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source,
            });
            return (AppConfig::default(), warnings);
        }
    };

    let config = validate(raw, &mut warnings);
    (config, warnings)
}

/// Apply each raw field over the defaults, accumulating range errors.
fn validate(raw: RawConfig, warnings: &mut Vec<ConfigError>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- API: base_url --
    if let Some(url) = raw.api.base_url {
        if url.starts_with("http://") || url.starts_with("https://") {
            config.api_base_url = url;
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[api] base_url".to_string(),
                value: url,
                expected: format!(
                    "an http:// or https:// URL. Using default ({})",
                    constants::DEFAULT_API_BASE_URL
                ),
            });
        }
    }

    // -- API: timeout_secs --
    if let Some(secs) = raw.api.timeout_secs {
        if (constants::MIN_REQUEST_TIMEOUT_SECS..=constants::MAX_REQUEST_TIMEOUT_SECS)
            .contains(&secs)
        {
            config.request_timeout = Duration::from_secs(secs);
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[api] timeout_secs".to_string(),
                value: secs.to_string(),
                expected: format!(
                    "{}-{}. Using default ({})",
                    constants::MIN_REQUEST_TIMEOUT_SECS,
                    constants::MAX_REQUEST_TIMEOUT_SECS,
                    constants::DEFAULT_REQUEST_TIMEOUT_SECS,
                ),
            });
        }
    }

    // -- Session: default_users --
    if let Some(users) = raw.session.default_users {
        if users.len() <= constants::MAX_DEFAULT_USERS {
            config.default_users = users;
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[session] default_users".to_string(),
                value: format!("{} users", users.len()),
                expected: format!(
                    "at most {} users. Using default ({})",
                    constants::MAX_DEFAULT_USERS,
                    constants::DEFAULT_USERS.join(", "),
                ),
            });
        }
    }

    // -- Session: error_display_secs --
    if let Some(secs) = raw.session.error_display_secs {
        if (constants::MIN_ERROR_DISPLAY_SECS..=constants::MAX_ERROR_DISPLAY_SECS).contains(&secs)
        {
            config.error_display = Duration::from_secs(secs);
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[session] error_display_secs".to_string(),
                value: secs.to_string(),
                expected: format!(
                    "{}-{}. Using default ({})",
                    constants::MIN_ERROR_DISPLAY_SECS,
                    constants::MAX_ERROR_DISPLAY_SECS,
                    constants::DEFAULT_ERROR_DISPLAY_SECS,
                ),
            });
        }
    }

    // -- Aggregation: pending_policy --
    if let Some(policy) = raw.aggregation.pending_policy {
        match PendingPolicy::from_config_str(&policy) {
            Some(p) => config.pending_policy = p,
            None => warnings.push(ConfigError::ValueOutOfRange {
                field: "[aggregation] pending_policy".to_string(),
                value: policy,
                expected: "\"exclude\" or \"require_all\". Using default (exclude)".to_string(),
            }),
        }
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level);
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[logging] level".to_string(),
                value: level,
                expected: "error, warn, info, debug, trace. Using default (info)".to_string(),
            });
        }
    }

    // -- Logging: file --
    if let Some(file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file);
        }
    }

    config
}
