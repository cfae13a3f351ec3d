// Mutuals - core/registry.rs
//
// In-memory registry of tracked users, keyed by login.
//
// Entries are kept in insertion order for display. The registry is tiny
// (a handful of users), so lookups are linear scans.

use crate::core::model::{EntryState, FollowerIdentity, Profile, TrackedUser};

/// Tracked users in insertion order, unique by exact login.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    users: Vec<TrackedUser>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn contains(&self, login: &str) -> bool {
        self.get(login).is_some()
    }

    pub fn get(&self, login: &str) -> Option<&TrackedUser> {
        self.users.iter().find(|u| u.login == login)
    }

    /// Tracked users in display (insertion) order.
    pub fn iter(&self) -> impl Iterator<Item = &TrackedUser> {
        self.users.iter()
    }

    /// Insert a pending entry. Returns false (and changes nothing) if the
    /// login is already tracked.
    pub fn insert_pending(&mut self, login: &str, generation: u64) -> bool {
        if self.contains(login) {
            return false;
        }
        self.users.push(TrackedUser::pending(login, generation));
        true
    }

    /// Remove an entry. Returns the removed entry, `None` if absent.
    pub fn remove(&mut self, login: &str) -> Option<TrackedUser> {
        let pos = self.users.iter().position(|u| u.login == login)?;
        Some(self.users.remove(pos))
    }

    /// Resolve a pending entry, but only if it still belongs to `generation`.
    ///
    /// Returns false when the entry is gone, was re-added under a newer
    /// generation, or is already resolved; the data is dropped in that case.
    pub fn resolve(
        &mut self,
        login: &str,
        generation: u64,
        profile: Profile,
        followers: Vec<FollowerIdentity>,
    ) -> bool {
        match self.users.iter_mut().find(|u| u.login == login) {
            Some(user) if user.generation == generation && user.is_pending() => {
                user.state = EntryState::Resolved { profile, followers };
                true
            }
            _ => false,
        }
    }

    /// Remove an entry whose fetch failed, but only if it is still the
    /// pending entry for `generation`.
    pub fn discard_failed(&mut self, login: &str, generation: u64) -> bool {
        let current = self
            .get(login)
            .is_some_and(|u| u.generation == generation && u.is_pending());
        if current {
            self.remove(login);
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: u64, login: &str) -> Profile {
        serde_json::from_value(serde_json::json!({ "id": id, "login": login })).unwrap()
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let mut reg = Registry::new();
        assert!(reg.insert_pending("a", 1));
        assert!(!reg.insert_pending("a", 2));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("a").unwrap().generation, 1);
    }

    #[test]
    fn test_logins_are_case_sensitive() {
        let mut reg = Registry::new();
        assert!(reg.insert_pending("Octocat", 1));
        assert!(reg.insert_pending("octocat", 2));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut reg = Registry::new();
        for (i, name) in ["c", "a", "b"].iter().enumerate() {
            reg.insert_pending(name, i as u64);
        }
        let names: Vec<_> = reg.iter().map(|u| u.login.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut reg = Registry::new();
        reg.insert_pending("a", 1);
        assert!(reg.remove("zzz").is_none());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_resolve_with_stale_generation_is_dropped() {
        let mut reg = Registry::new();
        reg.insert_pending("a", 1);
        reg.remove("a");
        reg.insert_pending("a", 2);

        assert!(!reg.resolve("a", 1, profile(10, "a"), vec![]));
        assert!(reg.get("a").unwrap().is_pending());

        assert!(reg.resolve("a", 2, profile(10, "a"), vec![]));
        assert!(!reg.get("a").unwrap().is_pending());
    }

    #[test]
    fn test_resolve_removed_user_does_not_resurrect() {
        let mut reg = Registry::new();
        reg.insert_pending("a", 1);
        reg.remove("a");
        assert!(!reg.resolve("a", 1, profile(10, "a"), vec![]));
        assert!(reg.is_empty());
    }

    #[test]
    fn test_discard_failed_only_touches_matching_generation() {
        let mut reg = Registry::new();
        reg.insert_pending("a", 2);
        assert!(!reg.discard_failed("a", 1));
        assert!(reg.contains("a"));
        assert!(reg.discard_failed("a", 2));
        assert!(!reg.contains("a"));
    }
}
