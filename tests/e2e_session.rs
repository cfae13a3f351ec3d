// Mutuals - tests/e2e_session.rs
//
// End-to-end tests for the session controller.
//
// These drive the real controller, real fetch runtime, real page walk and
// real aggregation against an in-memory GitHub (`FakeGithub`) that speaks
// the same JSON shapes and `{"message": ...}` error convention as the
// real API. Only the HTTP socket is replaced.

use async_trait::async_trait;
use mutuals::app::session::{SessionConfig, SessionController};
use mutuals::core::fetch::Transport;
use mutuals::core::model::PendingPolicy;
use mutuals::util::error::{FetchError, ValidationError};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

// =============================================================================
// Helpers
// =============================================================================

const WAIT: Duration = Duration::from_secs(10);

/// In-memory GitHub: login -> follower ids. Logins in `slow` never answer
/// within a test's lifetime.
#[derive(Default)]
struct FakeGithub {
    users: HashMap<String, Vec<u64>>,
    slow: HashSet<String>,
    requests: Mutex<Vec<String>>,
}

impl FakeGithub {
    fn user(mut self, login: &str, followers: &[u64]) -> Self {
        self.users.insert(login.to_string(), followers.to_vec());
        self
    }

    fn slow(mut self, login: &str) -> Self {
        self.users.insert(login.to_string(), vec![1]);
        self.slow.insert(login.to_string());
        self
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for FakeGithub {
    async fn get_json(&self, path: &str) -> Result<Value, FetchError> {
        self.requests.lock().unwrap().push(path.to_string());

        let rest = path.trim_start_matches("/users/");
        let (login, tail) = rest.split_once('/').unwrap_or((rest, ""));

        if self.slow.contains(login) {
            tokio::time::sleep(Duration::from_secs(600)).await;
        }

        let Some(ids) = self.users.get(login) else {
            return Ok(json!({ "message": "Not Found" }));
        };

        if tail.starts_with("followers") {
            let page: usize = path
                .rsplit("page=")
                .next()
                .and_then(|p| p.parse().ok())
                .unwrap_or(1);
            let start = (page - 1) * 100;
            let slice: Vec<Value> = ids
                .iter()
                .skip(start)
                .take(100)
                .map(|id| json!({ "id": id, "login": format!("f{id}") }))
                .collect();
            Ok(Value::Array(slice))
        } else {
            Ok(json!({
                "id": 10_000 + ids.len(),
                "login": login,
                "followers": ids.len(),
                "html_url": format!("https://github.com/{login}"),
            }))
        }
    }
}

fn config(users: &[&str]) -> SessionConfig {
    SessionConfig {
        default_users: users.iter().map(|s| s.to_string()).collect(),
        ..SessionConfig::default()
    }
}

fn controller(fake: FakeGithub, config: SessionConfig) -> (SessionController, Arc<FakeGithub>) {
    let fake = Arc::new(fake);
    let session = SessionController::new(fake.clone(), config).unwrap();
    (session, fake)
}

fn common_ids(session: &SessionController) -> Vec<u64> {
    let mut ids: Vec<u64> = session.common_followers().iter().map(|f| f.id).collect();
    ids.sort_unstable();
    ids
}

fn logins(session: &SessionController) -> Vec<String> {
    session.users().map(|u| u.login.clone()).collect()
}

/// Poll until `cond` holds or the deadline passes.
fn wait_until(session: &mut SessionController, cond: impl Fn(&SessionController) -> bool) -> bool {
    let deadline = Instant::now() + WAIT;
    while Instant::now() < deadline {
        session.poll();
        if cond(session) {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    false
}

// =============================================================================
// Seeding and aggregation
// =============================================================================

#[test]
fn e2e_seed_resolves_defaults_and_intersects() {
    let fake = FakeGithub::default().user("a", &[1, 2, 3]).user("b", &[2, 3, 4]);
    let (mut session, _) = controller(fake, config(&["a", "b"]));

    session.seed_defaults();
    assert!(session.loading());
    assert!(session.wait_idle(WAIT));

    assert!(!session.loading());
    assert_eq!(logins(&session), vec!["a", "b"]);
    assert!(session.users().all(|u| !u.is_pending()));
    assert_eq!(common_ids(&session), vec![2, 3]);
    assert_eq!(session.error(), None);
}

#[test]
fn e2e_seed_runs_only_once() {
    let fake = FakeGithub::default().user("a", &[1]).user("b", &[1]);
    let (mut session, fake) = controller(fake, config(&["a", "b"]));

    session.seed_defaults();
    assert!(session.wait_idle(WAIT));
    let requests = fake.request_count();

    session.seed_defaults();
    assert!(session.wait_idle(WAIT));
    assert_eq!(fake.request_count(), requests);
    assert_eq!(session.registry().len(), 2);
    assert_eq!(session.error(), None);
}

#[test]
fn e2e_multi_page_follower_lists() {
    // 250 followers each, overlapping on 150..250.
    let a: Vec<u64> = (0..250).collect();
    let b: Vec<u64> = (150..400).collect();
    let fake = FakeGithub::default().user("a", &a).user("b", &b);
    let (mut session, _) = controller(fake, config(&["a", "b"]));

    session.seed_defaults();
    assert!(session.wait_idle(WAIT));

    let a_user = session.registry().get("a").unwrap();
    assert_eq!(a_user.followers().unwrap().len(), 250);
    assert_eq!(common_ids(&session), (150..250).collect::<Vec<u64>>());
}

#[test]
fn e2e_pending_user_policy() {
    let fake = FakeGithub::default().user("a", &[1, 2]).user("b", &[1, 2, 3]).slow("c");

    for (policy, expected) in [
        (PendingPolicy::Exclude, vec![1u64, 2]),
        (PendingPolicy::RequireAllResolved, Vec::new()),
    ] {
        let fake = FakeGithub {
            users: fake.users.clone(),
            slow: fake.slow.clone(),
            ..Default::default()
        };
        let cfg = SessionConfig {
            pending_policy: policy,
            ..config(&["a", "b", "c"])
        };
        let (mut session, _) = controller(fake, cfg);
        session.seed_defaults();

        let resolved = wait_until(&mut session, |s| {
            s.users().filter(|u| !u.is_pending()).count() == 2
        });
        assert!(resolved, "a and b should resolve");
        assert!(session.registry().get("c").unwrap().is_pending());
        assert!(session.loading());
        assert_eq!(common_ids(&session), expected, "policy {policy:?}");
    }
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn e2e_duplicate_add_is_rejected_without_request() {
    let fake = FakeGithub::default().user("a", &[1]).user("b", &[1]);
    let (mut session, fake) = controller(fake, config(&["a", "b"]));
    session.seed_defaults();
    assert!(session.wait_idle(WAIT));
    let requests = fake.request_count();

    let err = session.add_user("a").unwrap_err();

    assert_eq!(
        err,
        ValidationError::DuplicateLogin {
            login: "a".to_string()
        }
    );
    assert_eq!(logins(&session), vec!["a", "b"]);
    assert_eq!(fake.request_count(), requests);
    assert!(!session.loading());
    assert_eq!(session.error(), Some("Username: \"a\" already exists"));
}

#[test]
fn e2e_empty_add_is_rejected_without_request() {
    let (mut session, fake) = controller(FakeGithub::default(), config(&[]));

    assert_eq!(session.add_user(""), Err(ValidationError::EmptyLogin));
    assert_eq!(session.add_user("   "), Err(ValidationError::EmptyLogin));

    assert!(session.registry().is_empty());
    assert_eq!(fake.request_count(), 0);
    assert_eq!(session.error(), Some("Username is empty"));
}

#[test]
fn e2e_invalid_login_is_rejected_without_request() {
    let (mut session, fake) = controller(FakeGithub::default(), config(&[]));
    let err = session.add_user("../../orgs/x").unwrap_err();
    assert!(matches!(err, ValidationError::InvalidLogin { .. }));
    assert!(session.registry().is_empty());
    assert_eq!(fake.request_count(), 0);
}

#[test]
fn e2e_add_trims_whitespace() {
    let fake = FakeGithub::default().user("a", &[1]);
    let (mut session, _) = controller(fake, config(&[]));
    session.add_user("  a ").unwrap();
    assert!(session.wait_idle(WAIT));
    assert_eq!(logins(&session), vec!["a"]);
}

// =============================================================================
// Removal, renaming, stale results
// =============================================================================

#[test]
fn e2e_remove_absent_is_noop() {
    let fake = FakeGithub::default().user("a", &[1]).user("b", &[1]);
    let (mut session, _) = controller(fake, config(&["a", "b"]));
    session.seed_defaults();
    assert!(session.wait_idle(WAIT));

    session.remove_user("nobody");

    assert_eq!(logins(&session), vec!["a", "b"]);
    assert_eq!(session.error(), None);
}

#[test]
fn e2e_removed_user_is_not_resurrected_by_late_fetch() {
    let fake = FakeGithub::default().user("a", &[1]).user("b", &[1]).user("c", &[1]);
    let (mut session, _) = controller(fake, config(&["a", "b"]));
    session.seed_defaults();
    assert!(session.wait_idle(WAIT));

    session.add_user("c").unwrap();
    // Outcomes are only applied by poll/wait_idle, so c is still pending here.
    session.remove_user("c");
    assert!(session.loading(), "c's fetch is still in flight");

    assert!(session.wait_idle(WAIT));
    assert!(!session.loading());
    assert_eq!(logins(&session), vec!["a", "b"]);
}

#[test]
fn e2e_readded_user_only_takes_newest_fetch() {
    let fake = FakeGithub::default().user("a", &[1, 2]);
    let (mut session, _) = controller(fake, config(&[]));

    session.add_user("a").unwrap();
    let first_generation = session.registry().get("a").unwrap().generation;
    session.remove_user("a");
    session.add_user("a").unwrap();
    let second_generation = session.registry().get("a").unwrap().generation;
    assert!(second_generation > first_generation);

    assert!(session.wait_idle(WAIT));
    let a = session.registry().get("a").unwrap();
    assert_eq!(a.generation, second_generation);
    assert!(!a.is_pending());
    assert_eq!(session.registry().len(), 1);
}

#[test]
fn e2e_edit_user_renames() {
    let fake = FakeGithub::default().user("a", &[1, 2]).user("b", &[2]).user("c", &[2, 3]);
    let (mut session, _) = controller(fake, config(&["a", "b"]));
    session.seed_defaults();
    assert!(session.wait_idle(WAIT));

    session.edit_user("a", "c").unwrap();
    assert!(session.wait_idle(WAIT));

    assert_eq!(logins(&session), vec!["b", "c"]);
    assert_eq!(common_ids(&session), vec![2]);
}

#[test]
fn e2e_edit_user_is_not_atomic() {
    let fake = FakeGithub::default().user("a", &[1]).user("b", &[1]);
    let (mut session, _) = controller(fake, config(&["a", "b"]));
    session.seed_defaults();
    assert!(session.wait_idle(WAIT));

    // Renaming onto an existing user: the old entry is already gone.
    let err = session.edit_user("a", "b").unwrap_err();
    assert!(matches!(err, ValidationError::DuplicateLogin { .. }));
    assert_eq!(logins(&session), vec!["b"]);
}

// =============================================================================
// Fetch failures and the error banner
// =============================================================================

#[test]
fn e2e_unknown_user_is_removed_with_api_message() {
    let fake = FakeGithub::default().user("a", &[1]).user("b", &[1]);
    let (mut session, _) = controller(fake, config(&["a", "b"]));
    session.seed_defaults();
    assert!(session.wait_idle(WAIT));

    session.add_user("ghost-user").unwrap();
    assert!(session.registry().get("ghost-user").unwrap().is_pending());
    assert!(session.wait_idle(WAIT));

    assert!(session.registry().get("ghost-user").is_none());
    assert_eq!(session.error(), Some("Not Found"));
    assert_eq!(logins(&session), vec!["a", "b"]);
}

#[test]
fn e2e_error_banner_clears_after_display_time() {
    let cfg = SessionConfig {
        error_display: Duration::from_millis(50),
        ..config(&[])
    };
    let (mut session, _) = controller(FakeGithub::default(), cfg);

    let _ = session.add_user("");
    session.tick();
    assert_eq!(session.error(), Some("Username is empty"));

    std::thread::sleep(Duration::from_millis(80));
    session.tick();
    assert_eq!(session.error(), None);
}

#[test]
fn e2e_removable_only_above_two_users() {
    let fake = FakeGithub::default().user("a", &[1]).user("b", &[1]).user("c", &[1]);
    let (mut session, _) = controller(fake, config(&["a", "b"]));
    session.seed_defaults();
    assert!(!session.is_removable());
    session.add_user("c").unwrap();
    assert!(session.is_removable());
    assert!(session.wait_idle(WAIT));
}
