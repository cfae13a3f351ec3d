// Mutuals - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Display strings are what the user sees in the error banner, so the
// upstream API message is passed through verbatim.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all Mutuals operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum MutualsError {
    /// A username was rejected before any request was made.
    Validation(ValidationError),

    /// Fetching a profile or follower list failed.
    Fetch(FetchError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// The background fetch runtime could not be started.
    Runtime { source: io::Error },
}

impl fmt::Display for MutualsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "{e}"),
            Self::Fetch(e) => write!(f, "{e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Runtime { source } => {
                write!(f, "Failed to start the fetch runtime: {source}")
            }
        }
    }
}

impl std::error::Error for MutualsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Fetch(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Runtime { source } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

/// Username rejected by `SessionController::add_user` without a network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The username was empty (after trimming whitespace).
    EmptyLogin,

    /// The username is already tracked.
    DuplicateLogin { login: String },

    /// The username contains characters GitHub never allows, or is too long.
    InvalidLogin { login: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLogin => write!(f, "Username is empty"),
            Self::DuplicateLogin { login } => {
                write!(f, "Username: \"{login}\" already exists")
            }
            Self::InvalidLogin { login } => write!(
                f,
                "Username: \"{login}\" is not a valid GitHub login \
                 (letters, digits and '-' only, at most {} characters)",
                super::constants::MAX_LOGIN_LEN
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for MutualsError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

// ---------------------------------------------------------------------------
// Fetch errors
// ---------------------------------------------------------------------------

/// Errors produced while fetching a profile or follower list.
#[derive(Debug)]
pub enum FetchError {
    /// The API answered with `{"message": ...}` instead of data
    /// (unknown login, rate limit, ...). Displayed verbatim.
    Api { message: String },

    /// Transport-level failure (DNS, TLS, connection reset, timeout).
    Network {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error HTTP status with a body that was not JSON.
    Status { url: String, status: u16 },

    /// The body was JSON but not the expected shape.
    Decode {
        url: String,
        source: serde_json::Error,
    },

    /// The follower walk hit `MAX_FOLLOWER_PAGES` without reaching a short page.
    TooManyPages { login: String, max_pages: u32 },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api { message } => f.write_str(message),
            Self::Network { url, source } => {
                write!(f, "Network error requesting '{url}': {source}")
            }
            Self::Status { url, status } => {
                write!(f, "'{url}' returned HTTP {status}")
            }
            Self::Decode { url, source } => {
                write!(f, "Unexpected response from '{url}': {source}")
            }
            Self::TooManyPages { login, max_pages } => write!(
                f,
                "Follower list of '{login}' exceeds {max_pages} pages; giving up"
            ),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Network { source, .. } => Some(source.as_ref()),
            Self::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<FetchError> for MutualsError {
    fn from(e: FetchError) -> Self {
        Self::Fetch(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for MutualsError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for Mutuals results.
pub type Result<T> = std::result::Result<T, MutualsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_message_is_displayed_verbatim() {
        let e = FetchError::Api {
            message: "Not Found".to_string(),
        };
        assert_eq!(e.to_string(), "Not Found");
        // Wrapping must not add a prefix either: the banner shows this text.
        assert_eq!(MutualsError::from(e).to_string(), "Not Found");
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::EmptyLogin.to_string(), "Username is empty");
        let dup = ValidationError::DuplicateLogin {
            login: "octocat".to_string(),
        };
        assert_eq!(dup.to_string(), "Username: \"octocat\" already exists");
    }

    #[test]
    fn test_network_error_preserves_source() {
        let e = FetchError::Network {
            url: "https://api.github.com/users/x".to_string(),
            source: Box::new(io::Error::new(io::ErrorKind::TimedOut, "timed out")),
        };
        let source = std::error::Error::source(&e).expect("source must be kept");
        assert_eq!(source.to_string(), "timed out");
    }
}
