//! Vote bookkeeping
//!
//! Decides what a vote does; the plugin carries out the toggle and sends the
//! messages.

use std::collections::HashSet;

/// What a cast vote led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// Only one human present: toggle without a vote
    Instant,
    /// Enabling is refused while more humans than the limit are present
    TooManyPlayers,
    /// This player already voted
    AlreadyVoted,
    /// Vote counted, threshold not yet reached
    Counted {
        /// Votes so far
        current: usize,
        /// Votes required
        needed: usize,
    },
    /// Threshold reached; the voter set was cleared
    Passed {
        /// Votes when it passed
        current: usize,
        /// Votes required
        needed: usize,
    },
}

/// Votes needed to toggle wave mode with `humans` players present
///
/// `max(2, ceil(humans * threshold))`
pub fn votes_needed(humans: usize, threshold: f32) -> usize {
    let scaled = (humans as f64 * f64::from(threshold)).ceil() as usize;
    scaled.max(2)
}

/// Cast a vote from `steam_id`
///
/// `enabling` is true when wave mode is currently off.
pub fn cast(
    voters: &mut HashSet<u64>,
    steam_id: u64,
    humans: usize,
    max_players: usize,
    threshold: f32,
    enabling: bool,
) -> VoteOutcome {
    if humans == 1 {
        return VoteOutcome::Instant;
    }
    if enabling && humans > max_players {
        return VoteOutcome::TooManyPlayers;
    }
    if !voters.insert(steam_id) {
        return VoteOutcome::AlreadyVoted;
    }

    let needed = votes_needed(humans, threshold);
    let current = voters.len();
    if current >= needed {
        voters.clear();
        VoteOutcome::Passed { current, needed }
    } else {
        VoteOutcome::Counted { current, needed }
    }
}

/// Re-check a pending vote after the player count dropped
///
/// Voters not in `present` are dropped first. Returns the passing tally if
/// the remaining votes already meet the new threshold; the set is cleared in
/// that case.
pub fn recount(
    voters: &mut HashSet<u64>,
    present: &HashSet<u64>,
    humans: usize,
    threshold: f32,
) -> Option<(usize, usize)> {
    voters.retain(|id| present.contains(id));
    if voters.is_empty() || humans < 2 {
        return None;
    }

    let needed = votes_needed(humans, threshold);
    let current = voters.len();
    if current >= needed {
        voters.clear();
        Some((current, needed))
    } else {
        None
    }
}
