//! Game Event System
//!
//! Game events (player_death, round_start, ...) and server lifecycle
//! notifications (map start/end) arrive as one closed tagged union,
//! [`GameEvent`], so a plugin can handle them with a single `match`.
//!
//! # Architecture
//!
//! ```text
//! Host SDK event → RawEvent → GameEvent::from_raw → plugin handler
//! Host map listeners ─────────→ GameEvent::MapStart / MapEnd
//! ```
//!
//! # Example
//!
//! ```ignore
//! use botwaves_host::events::{GameEvent, RawEvent};
//!
//! let raw = RawEvent::new("round_end").with("winner", 2);
//! if let Some(GameEvent::RoundEnd(end)) = GameEvent::from_raw(&raw) {
//!     tracing::info!("Round won by {}", end.winner);
//! }
//! ```

mod raw;
pub mod typed;
mod types;

pub use raw::{EventValue, RawEvent};
pub use typed::{
    EventPlayerConnectFull, EventPlayerDeath, EventPlayerDisconnect, EventPlayerSpawn,
    EventPlayerTeam, EventRoundEnd, EventRoundStart, TypedEvent,
};
pub use types::HookResult;

/// Every event the host can deliver to a plugin
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A map finished loading
    MapStart {
        /// Map name (e.g. "de_dust2")
        map: String,
    },
    /// The current map is being unloaded
    MapEnd,
    /// A player finished connecting
    PlayerConnectFull(EventPlayerConnectFull),
    /// A player left the server
    PlayerDisconnect(EventPlayerDisconnect),
    /// A player changed team
    PlayerTeam(EventPlayerTeam),
    /// A player spawned
    PlayerSpawn(EventPlayerSpawn),
    /// A player died
    PlayerDeath(EventPlayerDeath),
    /// A round started
    RoundStart(EventRoundStart),
    /// A round ended
    RoundEnd(EventRoundEnd),
}

impl GameEvent {
    /// Convert a raw engine event into a typed one
    ///
    /// Returns `None` for event names the plugin does not listen to.
    pub fn from_raw(event: &RawEvent) -> Option<Self> {
        let typed = match event.get_name() {
            EventPlayerConnectFull::NAME => {
                Self::PlayerConnectFull(EventPlayerConnectFull::from_raw(event))
            }
            EventPlayerDisconnect::NAME => {
                Self::PlayerDisconnect(EventPlayerDisconnect::from_raw(event))
            }
            EventPlayerTeam::NAME => Self::PlayerTeam(EventPlayerTeam::from_raw(event)),
            EventPlayerSpawn::NAME => Self::PlayerSpawn(EventPlayerSpawn::from_raw(event)),
            EventPlayerDeath::NAME => Self::PlayerDeath(EventPlayerDeath::from_raw(event)),
            EventRoundStart::NAME => Self::RoundStart(EventRoundStart::from_raw(event)),
            EventRoundEnd::NAME => Self::RoundEnd(EventRoundEnd::from_raw(event)),
            _ => return None,
        };
        Some(typed)
    }

    /// The engine-side name of this event
    pub fn name(&self) -> &'static str {
        match self {
            Self::MapStart { .. } => "map_start",
            Self::MapEnd => "map_end",
            Self::PlayerConnectFull(_) => EventPlayerConnectFull::NAME,
            Self::PlayerDisconnect(_) => EventPlayerDisconnect::NAME,
            Self::PlayerTeam(_) => EventPlayerTeam::NAME,
            Self::PlayerSpawn(_) => EventPlayerSpawn::NAME,
            Self::PlayerDeath(_) => EventPlayerDeath::NAME,
            Self::RoundStart(_) => EventRoundStart::NAME,
            Self::RoundEnd(_) => EventRoundEnd::NAME,
        }
    }
}
