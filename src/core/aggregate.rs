// Mutuals - core/aggregate.rs
//
// Common-follower computation. A pure function of the registry: the
// result is recomputed on demand and never stored or mutated.

use crate::core::model::{FollowerIdentity, PendingPolicy, TrackedUser};
use crate::core::registry::Registry;
use std::collections::{HashMap, HashSet};

/// Followers that follow every contributing tracked user.
///
/// A user contributes when resolved with a non-empty follower list. Each
/// contributing user counts a follower id at most once; an id is common
/// when its tally equals the number of contributing users.
///
/// Output is in first-seen order (registry order, then follower order),
/// each id once, so it is stable for a given registry.
pub fn common_followers(registry: &Registry, policy: PendingPolicy) -> Vec<FollowerIdentity> {
    if policy == PendingPolicy::RequireAllResolved && !all_contribute(registry) {
        return Vec::new();
    }

    let mut first_seen: Vec<&FollowerIdentity> = Vec::new();
    let mut tally: HashMap<u64, usize> = HashMap::new();
    let mut contributors = 0usize;

    for followers in registry.iter().filter_map(contributing_followers) {
        contributors += 1;
        let mut seen_here: HashSet<u64> = HashSet::with_capacity(followers.len());
        for follower in followers {
            if !seen_here.insert(follower.id) {
                continue;
            }
            let count = tally.entry(follower.id).or_insert(0);
            if *count == 0 {
                first_seen.push(follower);
            }
            *count += 1;
        }
    }

    if contributors == 0 {
        return Vec::new();
    }

    first_seen
        .into_iter()
        .filter(|f| tally.get(&f.id) == Some(&contributors))
        .cloned()
        .collect()
}

fn contributing_followers(user: &TrackedUser) -> Option<&[FollowerIdentity]> {
    user.followers().filter(|f| !f.is_empty())
}

fn all_contribute(registry: &Registry) -> bool {
    registry.iter().all(|u| contributing_followers(u).is_some())
}
