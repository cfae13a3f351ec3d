// Mutuals - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::error::FetchError;
use serde::{Deserialize, Serialize};

// =============================================================================
// Profile
// =============================================================================

/// A GitHub account as returned by `GET /users/{login}`.
///
/// Immutable once fetched; a re-fetch replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Stable numeric account id.
    pub id: u64,

    /// Login name (case preserved as GitHub reports it).
    pub login: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub company: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub twitter_username: Option<String>,

    #[serde(default)]
    pub public_repos: u32,

    #[serde(default)]
    pub followers: u32,

    #[serde(default)]
    pub following: u32,

    /// Browser URL of the profile page.
    #[serde(default)]
    pub html_url: String,

    #[serde(default)]
    pub avatar_url: String,
}

impl Profile {
    /// Human-readable detail lines for tooltips, skipping empty attributes.
    pub fn info_lines(&self) -> Vec<String> {
        [
            ("Name", &self.name),
            ("Company", &self.company),
            ("Location", &self.location),
            ("Twitter", &self.twitter_username),
        ]
        .into_iter()
        .filter_map(|(label, value)| match value.as_deref() {
            Some(v) if !v.is_empty() => Some(format!("{label}: {v}")),
            _ => None,
        })
        .collect()
    }
}

// =============================================================================
// Follower identity
// =============================================================================

/// Minimal identity of an account, as listed by the followers endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowerIdentity {
    pub id: u64,
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
}

// =============================================================================
// Tracked users
// =============================================================================

/// Fetch state of a tracked user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryState {
    /// Added; profile and follower fetches have not both completed.
    Pending,

    /// Both fetches succeeded.
    Resolved {
        profile: Profile,
        followers: Vec<FollowerIdentity>,
    },
}

/// A username the user asked to track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedUser {
    /// Login exactly as entered (after trimming).
    pub login: String,

    /// Serial number of the add that created this entry. Fetch outcomes
    /// carrying a different generation are stale and discarded.
    pub generation: u64,

    pub state: EntryState,
}

impl TrackedUser {
    pub fn pending(login: impl Into<String>, generation: u64) -> Self {
        Self {
            login: login.into(),
            generation,
            state: EntryState::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, EntryState::Pending)
    }

    pub fn profile(&self) -> Option<&Profile> {
        match &self.state {
            EntryState::Resolved { profile, .. } => Some(profile),
            EntryState::Pending => None,
        }
    }

    /// Resolved follower list; `None` while pending.
    pub fn followers(&self) -> Option<&[FollowerIdentity]> {
        match &self.state {
            EntryState::Resolved { followers, .. } => Some(followers),
            EntryState::Pending => None,
        }
    }
}

// =============================================================================
// Fetch outcome (background -> controller)
// =============================================================================

/// Result of the joint profile + follower fetch for one tracked user.
///
/// Sent from the fetch runtime to the session controller over an mpsc
/// channel; the controller is the only consumer and the only writer of
/// the registry.
#[derive(Debug)]
pub struct FetchOutcome {
    pub login: String,
    pub generation: u64,
    pub result: Result<(Profile, Vec<FollowerIdentity>), FetchError>,
}

// =============================================================================
// Aggregation policy
// =============================================================================

/// How pending or follower-less users take part in the common-follower
/// computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingPolicy {
    /// Only resolved users with at least one follower are intersected;
    /// everyone else is left out of both the tally and the denominator.
    #[default]
    Exclude,

    /// Strict intersection over every tracked user: the result is empty
    /// while anyone is pending or has no followers.
    RequireAllResolved,
}

impl PendingPolicy {
    /// Parse the config.toml spelling of a policy.
    pub fn from_config_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "exclude" => Some(Self::Exclude),
            "require_all" | "require_all_resolved" => Some(Self::RequireAllResolved),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserialises_github_shape() {
        let json = r#"{
            "login": "octocat",
            "id": 583231,
            "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
            "html_url": "https://github.com/octocat",
            "type": "User",
            "name": "The Octocat",
            "company": "@github",
            "location": "San Francisco",
            "twitter_username": null,
            "public_repos": 8,
            "followers": 9000,
            "following": 9
        }"#;
        let p: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, 583231);
        assert_eq!(p.login, "octocat");
        assert_eq!(p.twitter_username, None);
        assert_eq!(p.followers, 9000);
    }

    #[test]
    fn test_info_lines_skip_missing_fields() {
        let p = Profile {
            id: 1,
            login: "a".to_string(),
            name: Some("Alice".to_string()),
            company: Some(String::new()),
            location: None,
            twitter_username: Some("alice_tw".to_string()),
            public_repos: 0,
            followers: 0,
            following: 0,
            html_url: String::new(),
            avatar_url: String::new(),
        };
        assert_eq!(p.info_lines(), vec!["Name: Alice", "Twitter: alice_tw"]);
    }

    #[test]
    fn test_pending_policy_parse() {
        assert_eq!(
            PendingPolicy::from_config_str("Exclude"),
            Some(PendingPolicy::Exclude)
        );
        assert_eq!(
            PendingPolicy::from_config_str("require_all"),
            Some(PendingPolicy::RequireAllResolved)
        );
        assert_eq!(PendingPolicy::from_config_str("sometimes"), None);
    }
}
