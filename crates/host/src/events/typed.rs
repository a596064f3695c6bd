//! Typed game event structures
//!
//! Provides strongly-typed wrappers around the game events a survival-mode
//! plugin listens to.

use super::raw::RawEvent;
use crate::entities::Team;

/// Trait for typed game events
pub trait TypedEvent: Sized {
    /// The event name (e.g., "player_death")
    const NAME: &'static str;

    /// Create from a raw event
    fn from_raw(event: &RawEvent) -> Self;
}

/// Player finished connecting and is in the server
#[derive(Debug, Clone, PartialEq)]
pub struct EventPlayerConnectFull {
    /// User ID of the connecting player
    pub userid: i32,
}

impl TypedEvent for EventPlayerConnectFull {
    const NAME: &'static str = "player_connect_full";

    fn from_raw(event: &RawEvent) -> Self {
        Self {
            userid: event.get_int("userid", -1),
        }
    }
}

/// Player disconnect event
///
/// The player may already be gone from the host's player list when this
/// fires, so the identifying fields are carried on the event itself.
#[derive(Debug, Clone, PartialEq)]
pub struct EventPlayerDisconnect {
    /// User ID
    pub userid: i32,
    /// SteamID64 of the leaving player
    pub steamid: u64,
    /// Disconnect reason
    pub reason: i32,
    /// Player name
    pub name: String,
    /// Is it a bot?
    pub bot: bool,
}

impl TypedEvent for EventPlayerDisconnect {
    const NAME: &'static str = "player_disconnect";

    fn from_raw(event: &RawEvent) -> Self {
        Self {
            userid: event.get_int("userid", -1),
            steamid: event.get_uint64("xuid", 0),
            reason: event.get_int("reason", 0),
            name: event.get_string("name", ""),
            bot: event.get_bool("bot", false),
        }
    }
}

/// Player team change event
#[derive(Debug, Clone, PartialEq)]
pub struct EventPlayerTeam {
    /// User ID
    pub userid: i32,
    /// New team
    pub team: Team,
    /// Old team
    pub oldteam: Team,
    /// Is disconnect?
    pub disconnect: bool,
    /// Is it a bot?
    pub isbot: bool,
}

impl TypedEvent for EventPlayerTeam {
    const NAME: &'static str = "player_team";

    fn from_raw(event: &RawEvent) -> Self {
        Self {
            userid: event.get_int("userid", -1),
            team: Team::from(event.get_int("team", 0)),
            oldteam: Team::from(event.get_int("oldteam", 0)),
            disconnect: event.get_bool("disconnect", false),
            isbot: event.get_bool("isbot", false),
        }
    }
}

/// Player spawn event
#[derive(Debug, Clone, PartialEq)]
pub struct EventPlayerSpawn {
    /// User ID of the player who spawned
    pub userid: i32,
}

impl TypedEvent for EventPlayerSpawn {
    const NAME: &'static str = "player_spawn";

    fn from_raw(event: &RawEvent) -> Self {
        Self {
            userid: event.get_int("userid", -1),
        }
    }
}

/// Player death event
#[derive(Debug, Clone, PartialEq)]
pub struct EventPlayerDeath {
    /// User ID of the player who died
    pub userid: i32,
    /// User ID of the attacker (-1 for world)
    pub attacker: i32,
    /// Weapon used for the kill
    pub weapon: String,
    /// Was it a headshot?
    pub headshot: bool,
}

impl TypedEvent for EventPlayerDeath {
    const NAME: &'static str = "player_death";

    fn from_raw(event: &RawEvent) -> Self {
        Self {
            userid: event.get_int("userid", -1),
            attacker: event.get_int("attacker", -1),
            weapon: event.get_string("weapon", ""),
            headshot: event.get_bool("headshot", false),
        }
    }
}

/// Round start event
#[derive(Debug, Clone, PartialEq)]
pub struct EventRoundStart {
    /// Time limit for the round
    pub timelimit: i32,
}

impl TypedEvent for EventRoundStart {
    const NAME: &'static str = "round_start";

    fn from_raw(event: &RawEvent) -> Self {
        Self {
            timelimit: event.get_int("timelimit", 0),
        }
    }
}

/// Round end event
#[derive(Debug, Clone, PartialEq)]
pub struct EventRoundEnd {
    /// Winning team
    pub winner: Team,
    /// Reason for round end
    pub reason: i32,
    /// Is match end
    pub match_end: bool,
}

impl TypedEvent for EventRoundEnd {
    const NAME: &'static str = "round_end";

    fn from_raw(event: &RawEvent) -> Self {
        Self {
            winner: Team::from(event.get_int("winner", 0)),
            reason: event.get_int("reason", 0),
            match_end: event.get_bool("match_end", false),
        }
    }
}
