//! The host game server, as seen from a plugin
//!
//! The plugin never owns players, teams or cvars. Everything it does to the
//! server goes through this trait: console commands, chat, team changes and
//! player queries. Implementations sit on top of whatever SDK the server
//! exposes.

use crate::entities::{count_humans, PlayerInfo, Team};
use crate::error::HostError;

/// Operations a plugin can request from the game server
pub trait Host {
    /// Execute a console command on the server (e.g. `bot_kick`)
    ///
    /// Commands are fire-and-forget: `Ok` means the host accepted the string,
    /// not that the engine acted on it.
    fn execute_command(&mut self, command: &str) -> Result<(), HostError>;

    /// Print a chat message to every player
    fn print_to_chat_all(&mut self, message: &str) -> Result<(), HostError>;

    /// Print a chat message to a single player
    fn print_to_chat(&mut self, slot: i32, message: &str) -> Result<(), HostError>;

    /// Move a player to another team
    fn change_team(&mut self, slot: i32, team: Team) -> Result<(), HostError>;

    /// Remove every weapon except the knife from a player's pawn
    fn strip_weapons(&mut self, slot: i32) -> Result<(), HostError>;

    /// Snapshot of every player controller currently in the server
    fn players(&self) -> Vec<PlayerInfo>;

    /// Maximum player slots of the server
    fn max_players(&self) -> usize;

    /// Read the current value of a console variable
    ///
    /// Hosts without read access return `None`; callers then fall back to the
    /// known engine default.
    fn read_cvar(&self, _name: &str) -> Option<String> {
        None
    }

    /// Look up a single player by slot / user id
    fn player(&self, slot: i32) -> Option<PlayerInfo> {
        self.players().into_iter().find(|p| p.slot == slot)
    }

    /// Look up a player by slot, but only if the same SteamID still occupies it
    ///
    /// Deferred work uses this to make sure the player it was scheduled for
    /// has not left (and been replaced) in the meantime.
    fn find_live_player(&self, slot: i32, steam_id: u64) -> Option<PlayerInfo> {
        self.player(slot).filter(|p| p.steam_id == steam_id)
    }

    /// Number of connected human players
    fn human_count(&self) -> usize {
        count_humans(&self.players())
    }
}
