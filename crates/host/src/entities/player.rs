//! Player snapshots, connection states and teams

use std::fmt;

/// Maximum number of player slots (CS2 default)
pub const MAX_PLAYERS: usize = 64;

/// Player connection state
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerConnectedState {
    /// Player has never connected
    NeverConnected = -1,
    /// Player is fully connected
    Connected = 0,
    /// Player is connecting
    Connecting = 1,
    /// Player is reconnecting
    Reconnecting = 2,
    /// Player is disconnecting
    Disconnecting = 3,
    /// Player has disconnected
    Disconnected = 4,
    /// Slot is reserved
    Reserved = 5,
}

impl From<i32> for PlayerConnectedState {
    fn from(value: i32) -> Self {
        match value {
            -1 => Self::NeverConnected,
            0 => Self::Connected,
            1 => Self::Connecting,
            2 => Self::Reconnecting,
            3 => Self::Disconnecting,
            4 => Self::Disconnected,
            5 => Self::Reserved,
            _ => Self::Disconnected,
        }
    }
}

/// Game team
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Team {
    /// Unassigned
    #[default]
    None = 0,
    /// Spectators
    Spectator = 1,
    /// Terrorists
    Terrorist = 2,
    /// Counter-Terrorists
    CounterTerrorist = 3,
}

impl From<i32> for Team {
    fn from(value: i32) -> Self {
        match value {
            1 => Self::Spectator,
            2 => Self::Terrorist,
            3 => Self::CounterTerrorist,
            _ => Self::None,
        }
    }
}

impl Team {
    /// Short name used by bot console commands (`bot_join_team ct`, `bot_add_t`)
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Terrorist => "t",
            Self::CounterTerrorist => "ct",
            Self::Spectator => "spec",
            Self::None => "any",
        }
    }

    /// Returns true for the two playing teams
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Terrorist | Self::CounterTerrorist)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::Spectator => "Spectator",
            Self::Terrorist => "Terrorist",
            Self::CounterTerrorist => "CounterTerrorist",
        };
        f.write_str(name)
    }
}

/// Snapshot of a player controller as reported by the host
///
/// `slot` doubles as the event user id; events refer to players by it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerInfo {
    /// Player slot (0-63)
    pub slot: i32,
    /// SteamID64 (0 for bots)
    pub steam_id: u64,
    /// Display name
    pub name: String,
    /// Current team
    pub team: Team,
    /// AI-controlled
    pub is_bot: bool,
    /// SourceTV / HLTV relay
    pub is_hltv: bool,
    /// Connection state
    pub connected: PlayerConnectedState,
    /// Whether the player's pawn is alive
    pub alive: bool,
}

impl PlayerInfo {
    /// Build a connected, alive human
    pub fn human(slot: i32, steam_id: u64, name: &str, team: Team) -> Self {
        Self {
            slot,
            steam_id,
            name: name.to_string(),
            team,
            is_bot: false,
            is_hltv: false,
            connected: PlayerConnectedState::Connected,
            alive: true,
        }
    }

    /// Build a connected, alive bot
    pub fn bot(slot: i32, name: &str, team: Team) -> Self {
        Self {
            slot,
            steam_id: 0,
            name: name.to_string(),
            team,
            is_bot: true,
            is_hltv: false,
            connected: PlayerConnectedState::Connected,
            alive: true,
        }
    }

    /// Not a bot and not an HLTV relay
    pub fn is_valid_human(&self) -> bool {
        !self.is_bot && !self.is_hltv
    }

    /// Check if the player is fully connected
    pub fn is_connected(&self) -> bool {
        self.connected == PlayerConnectedState::Connected
    }

    /// Check if the player is spectating
    pub fn is_spectator(&self) -> bool {
        self.team == Team::Spectator
    }
}
