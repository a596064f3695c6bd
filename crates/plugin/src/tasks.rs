//! Deferred work
//!
//! Handlers never capture state in closures. They schedule one of these
//! values and the plugin runs it when the scheduler hands it back.

/// Work scheduled for a later frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaveTask {
    /// `mp_restartgame 1`, if wave mode is still active
    RestartMatch,
    /// Set up bots, round time and teams for a new round
    SetupRound,
    /// Verify bots spawned and re-enable win conditions
    SpawnCheck,
    /// Second look after bots had to be re-requested
    SpawnRecheck,
    /// Re-evaluate votes and the empty-server rule after a disconnect
    DisconnectRecount,
    /// Periodic help broadcast
    HelpMessage,
    /// Greet a newly connected player
    Welcome {
        slot: i32,
        steam_id: u64,
    },
    /// Disable wave mode if a new player pushed the count past the limit
    PlayerLimitCheck {
        slot: i32,
        steam_id: u64,
    },
    /// Put a player back on the team wave mode wants them on
    EnforceTeam {
        slot: i32,
        steam_id: u64,
    },
    /// Take a bot's weapons away, leaving the knife
    StripWeapons {
        slot: i32,
    },
}

impl WaveTask {
    /// Tasks that only make sense while wave mode is on
    pub fn requires_active(&self) -> bool {
        !matches!(
            self,
            Self::HelpMessage | Self::Welcome { .. } | Self::DisconnectRecount
        )
    }
}
