//! In-memory host
//!
//! [`RecordingHost`] keeps a player list and a cvar table, and records every
//! request a plugin makes: console commands, chat lines, team changes and
//! weapon strips. Tests drive a plugin against it and assert on the log; an
//! embedding that only needs the command stream can replay it elsewhere.

use std::collections::HashMap;

use crate::entities::{PlayerInfo, Team, MAX_PLAYERS};
use crate::error::HostError;
use crate::host::Host;

/// A [`Host`] that applies team changes to its own player list and logs the rest
#[derive(Debug, Clone)]
pub struct RecordingHost {
    players: Vec<PlayerInfo>,
    max_players: usize,
    cvars: HashMap<String, String>,
    rejected_prefixes: Vec<String>,

    /// Console commands, in execution order
    pub commands: Vec<String>,
    /// Broadcast chat lines
    pub chat_all: Vec<String>,
    /// Private chat lines as (slot, message)
    pub chat_private: Vec<(i32, String)>,
    /// Team changes as (slot, team)
    pub team_changes: Vec<(i32, Team)>,
    /// Slots whose weapons were stripped
    pub stripped: Vec<i32>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingHost {
    /// Empty server with the default slot count
    pub fn new() -> Self {
        Self::with_max_players(MAX_PLAYERS)
    }

    /// Empty server with `max_players` slots
    pub fn with_max_players(max_players: usize) -> Self {
        Self {
            players: Vec::new(),
            max_players,
            cvars: HashMap::new(),
            rejected_prefixes: Vec::new(),
            commands: Vec::new(),
            chat_all: Vec::new(),
            chat_private: Vec::new(),
            team_changes: Vec::new(),
            stripped: Vec::new(),
        }
    }

    /// Add (or replace) a connected human
    pub fn add_human(&mut self, slot: i32, steam_id: u64, name: &str, team: Team) -> PlayerInfo {
        self.add_player(PlayerInfo::human(slot, steam_id, name, team))
    }

    /// Add (or replace) a connected bot
    pub fn add_bot(&mut self, slot: i32, name: &str, team: Team) -> PlayerInfo {
        self.add_player(PlayerInfo::bot(slot, name, team))
    }

    /// Add (or replace) an arbitrary player snapshot
    pub fn add_player(&mut self, player: PlayerInfo) -> PlayerInfo {
        self.players.retain(|p| p.slot != player.slot);
        self.players.push(player.clone());
        player
    }

    /// Remove the player in `slot`
    pub fn remove_player(&mut self, slot: i32) -> Option<PlayerInfo> {
        let index = self.players.iter().position(|p| p.slot == slot)?;
        Some(self.players.remove(index))
    }

    /// Mark a player alive or dead
    pub fn set_alive(&mut self, slot: i32, alive: bool) {
        if let Some(player) = self.players.iter_mut().find(|p| p.slot == slot) {
            player.alive = alive;
        }
    }

    /// Move a player without logging a team change
    pub fn set_team(&mut self, slot: i32, team: Team) {
        if let Some(player) = self.players.iter_mut().find(|p| p.slot == slot) {
            player.team = team;
        }
    }

    /// Remove every bot
    pub fn remove_bots(&mut self) {
        self.players.retain(|p| !p.is_bot);
    }

    /// Set a cvar value returned by `read_cvar`
    pub fn set_cvar(&mut self, name: &str, value: &str) {
        self.cvars.insert(name.to_string(), value.to_string());
    }

    /// Reject every console command starting with `prefix`
    pub fn fail_commands_matching(&mut self, prefix: &str) {
        self.rejected_prefixes.push(prefix.to_string());
    }

    /// Take the command log, leaving it empty
    pub fn take_commands(&mut self) -> Vec<String> {
        std::mem::take(&mut self.commands)
    }

    /// Forget everything recorded so far (players and cvars stay)
    pub fn clear_log(&mut self) {
        self.commands.clear();
        self.chat_all.clear();
        self.chat_private.clear();
        self.team_changes.clear();
        self.stripped.clear();
    }

    /// Check whether `command` was executed verbatim
    pub fn ran(&self, command: &str) -> bool {
        self.commands.iter().any(|c| c == command)
    }

    /// Number of times `command` was executed verbatim
    pub fn count_command(&self, command: &str) -> usize {
        self.commands.iter().filter(|c| *c == command).count()
    }

    /// Check whether any broadcast contains `needle`
    pub fn broadcast_contains(&self, needle: &str) -> bool {
        self.chat_all.iter().any(|m| m.contains(needle))
    }

    /// Check whether `slot` was privately told something containing `needle`
    pub fn told(&self, slot: i32, needle: &str) -> bool {
        self.chat_private
            .iter()
            .any(|(s, m)| *s == slot && m.contains(needle))
    }
}

impl Host for RecordingHost {
    fn execute_command(&mut self, command: &str) -> Result<(), HostError> {
        if self
            .rejected_prefixes
            .iter()
            .any(|prefix| command.starts_with(prefix.as_str()))
        {
            return Err(HostError::CommandRejected(command.to_string()));
        }
        self.commands.push(command.to_string());
        Ok(())
    }

    fn print_to_chat_all(&mut self, message: &str) -> Result<(), HostError> {
        self.chat_all.push(message.to_string());
        Ok(())
    }

    fn print_to_chat(&mut self, slot: i32, message: &str) -> Result<(), HostError> {
        if !self.players.iter().any(|p| p.slot == slot) {
            return Err(HostError::PlayerNotFound(slot));
        }
        self.chat_private.push((slot, message.to_string()));
        Ok(())
    }

    fn change_team(&mut self, slot: i32, team: Team) -> Result<(), HostError> {
        let player = self
            .players
            .iter_mut()
            .find(|p| p.slot == slot)
            .ok_or(HostError::PlayerNotFound(slot))?;
        player.team = team;
        self.team_changes.push((slot, team));
        Ok(())
    }

    fn strip_weapons(&mut self, slot: i32) -> Result<(), HostError> {
        let player = self
            .players
            .iter()
            .find(|p| p.slot == slot)
            .ok_or(HostError::PlayerNotFound(slot))?;
        if !player.alive {
            return Err(HostError::InvalidPlayer {
                slot,
                reason: "pawn is dead".to_string(),
            });
        }
        self.stripped.push(slot);
        Ok(())
    }

    fn players(&self) -> Vec<PlayerInfo> {
        self.players.clone()
    }

    fn max_players(&self) -> usize {
        self.max_players
    }

    fn read_cvar(&self, name: &str) -> Option<String> {
        self.cvars.get(name).cloned()
    }
}
