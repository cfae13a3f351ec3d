// Mutuals - core/fetch.rs
//
// Profile and follower fetchers over an abstract JSON transport.
//
// The transport only knows how to GET a path and hand back the decoded
// JSON body; everything GitHub-specific (paths, page walking, the
// `{"message": ...}` error convention) lives here so it can be tested
// against an in-memory transport. The reqwest-backed implementation is
// `platform::http::HttpTransport`.

use crate::core::model::{FollowerIdentity, Profile};
use crate::util::constants::{FOLLOWERS_PER_PAGE, MAX_FOLLOWER_PAGES};
use crate::util::error::FetchError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Source of JSON documents addressed by API path (e.g. `/users/octocat`).
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `path` and return the parsed JSON body.
    ///
    /// Implementations return the body even for error statuses when it is
    /// JSON, so that `{"message": ...}` reaches `decode_body`.
    async fn get_json(&self, path: &str) -> Result<Value, FetchError>;
}

pub fn profile_path(login: &str) -> String {
    format!("/users/{login}")
}

pub fn followers_path(login: &str, page: u32) -> String {
    format!("/users/{login}/followers?per_page={FOLLOWERS_PER_PAGE}&page={page}")
}

/// Interpret an API body: `{"message": ...}` is an API error, anything
/// else must deserialize as `T`.
pub fn decode_body<T: DeserializeOwned>(path: &str, body: Value) -> Result<T, FetchError> {
    if let Some(message) = body.get("message").and_then(Value::as_str) {
        return Err(FetchError::Api {
            message: message.to_string(),
        });
    }
    serde_json::from_value(body).map_err(|source| FetchError::Decode {
        url: path.to_string(),
        source,
    })
}

/// Fetch the profile of `login` with a single request.
pub async fn fetch_profile(transport: &dyn Transport, login: &str) -> Result<Profile, FetchError> {
    let path = profile_path(login);
    let body = transport.get_json(&path).await?;
    let profile: Profile = decode_body(&path, body)?;
    tracing::debug!(login, id = profile.id, "Profile fetched");
    Ok(profile)
}

/// Fetch the complete follower list of `login`.
///
/// Walks pages of `FOLLOWERS_PER_PAGE` starting at page 1; a full page
/// means another may follow, a short (or empty) page ends the walk.
/// Pages are concatenated in arrival order without de-duplication.
pub async fn fetch_followers(
    transport: &dyn Transport,
    login: &str,
) -> Result<Vec<FollowerIdentity>, FetchError> {
    let mut followers = Vec::new();
    let mut page: u32 = 1;

    loop {
        if page > MAX_FOLLOWER_PAGES {
            return Err(FetchError::TooManyPages {
                login: login.to_string(),
                max_pages: MAX_FOLLOWER_PAGES,
            });
        }

        let path = followers_path(login, page);
        let body = transport.get_json(&path).await?;
        let batch: Vec<FollowerIdentity> = decode_body(&path, body)?;
        let batch_len = batch.len();
        followers.extend(batch);

        tracing::trace!(login, page, batch_len, "Follower page fetched");

        if batch_len < FOLLOWERS_PER_PAGE {
            break;
        }
        page += 1;
    }

    tracing::debug!(login, pages = page, total = followers.len(), "Followers fetched");
    Ok(followers)
}
