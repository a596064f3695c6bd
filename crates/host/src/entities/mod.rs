//! Player and team types
//!
//! Players and teams are owned by the host game engine. The plugin side only
//! ever sees [`PlayerInfo`] snapshots and asks the [`Host`](crate::Host) to act
//! on them by slot.
//!
//! ```ignore
//! use botwaves_host::entities::{PlayerInfo, Team};
//!
//! for player in host.players() {
//!     if player.is_valid_human() && !player.is_spectator() {
//!         println!("{} is on {}", player.name, player.team);
//!     }
//! }
//! ```

mod player;

pub use player::{PlayerConnectedState, PlayerInfo, Team, MAX_PLAYERS};

/// Count connected human players
pub fn count_humans<'a>(players: impl IntoIterator<Item = &'a PlayerInfo>) -> usize {
    players
        .into_iter()
        .filter(|p| p.is_valid_human() && p.is_connected())
        .count()
}

/// Count bots currently on `team`, and how many of those are alive
///
/// Returns `(total, alive)`.
pub fn count_bots_on<'a>(players: impl IntoIterator<Item = &'a PlayerInfo>, team: Team) -> (usize, usize) {
    players
        .into_iter()
        .filter(|p| p.is_bot && p.team == team)
        .fold((0, 0), |(total, alive), p| {
            (total + 1, alive + usize::from(p.alive))
        })
}
