//! Runtime state of wave mode
//!
//! One [`WaveState`] per plugin instance. It owns the timer handles for the
//! wave's deferred work so that replacing or resetting state can cancel them.

use std::collections::{HashMap, HashSet};
use std::fmt;

use botwaves_host::{Team, TimerKey};

/// Team the humans are forced onto
pub const HUMAN_TEAM: Team = Team::Terrorist;

/// Team the bots are forced onto
pub const BOT_TEAM: Team = Team::CounterTerrorist;

/// Bot difficulty preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    /// Knife-only bots (when weapon stripping is enabled)
    #[default]
    Easy,
    /// Fully armed bots
    Hard,
}

impl Difficulty {
    /// The other preset
    pub fn toggled(self) -> Self {
        match self {
            Self::Easy => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "Easy"),
            Self::Hard => write!(f, "Hard"),
        }
    }
}

/// Respawn compensation for maps with fewer spawn points than bots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Respawn {
    /// Every bot spawned; bots stay dead
    #[default]
    Disabled,
    /// Bots respawn until `remaining` more have died
    Enabled {
        /// Respawns left before the cvar is turned off again
        remaining: u32,
        /// Kills the round requires in total (the bot target)
        needed: u32,
    },
}

/// Where the current round stands, derived from the state flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Wave mode is off
    Inactive,
    /// Wave mode was just enabled; the next round end is the restart
    JustActivated,
    /// A wave round is being played
    RoundActive,
    /// Between round end and the next round start
    RoundEnded,
}

/// Named timer owned by the wave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSlot {
    Help,
    SpawnCheck,
    Restart,
    DisconnectCheck,
}

/// Timer handles owned by the wave
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaveTimers {
    pub help: Option<TimerKey>,
    pub spawn_check: Option<TimerKey>,
    pub restart: Option<TimerKey>,
    pub disconnect_check: Option<TimerKey>,
}

impl WaveTimers {
    /// Handle stored for `slot`
    pub fn slot_mut(&mut self, slot: TimerSlot) -> &mut Option<TimerKey> {
        match slot {
            TimerSlot::Help => &mut self.help,
            TimerSlot::SpawnCheck => &mut self.spawn_check,
            TimerSlot::Restart => &mut self.restart,
            TimerSlot::DisconnectCheck => &mut self.disconnect_check,
        }
    }

    /// Take every handle except the help timer, leaving them empty
    pub fn take_wave_timers(&mut self) -> Vec<TimerKey> {
        [
            self.spawn_check.take(),
            self.restart.take(),
            self.disconnect_check.take(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Mutable wave-mode state
#[derive(Debug, Clone, Default)]
pub struct WaveState {
    /// Wave mode on
    pub active: bool,
    /// Bot target for the next round
    pub bot_count: u32,
    /// Set on enable; cleared by the first round end, which is skipped
    pub just_activated: bool,
    /// Enabled with the admin password, so the player limit is not enforced
    pub started_with_override: bool,
    /// Between round start and round end
    pub round_active: bool,
    pub difficulty: Difficulty,
    pub consecutive_failures: u32,
    /// Non-spectator humans when the round was set up
    pub players_at_round_start: u32,
    pub respawn: Respawn,
    /// Bot-team deaths this round
    pub bot_deaths: u32,
    /// Kills per human SteamID this round
    pub round_kills: HashMap<u64, u32>,
    /// SteamIDs that voted to toggle wave mode
    pub voters: HashSet<u64>,
    /// SteamIDs the plugin placed on the human team
    pub assigned: HashSet<u64>,
    /// Server cvars captured on enable, restored on disable
    pub saved_cvars: Vec<(String, String)>,
    /// Filler bots for normal play are on
    pub bot_quota_enabled: bool,
    pub timers: WaveTimers,
}

impl WaveState {
    /// Fresh state with filler bots on
    pub fn new() -> Self {
        Self {
            bot_quota_enabled: true,
            ..Self::default()
        }
    }

    /// Enter wave mode with `start_bots` bots
    pub fn initialize(&mut self, start_bots: u32, admin_override: bool) {
        self.active = true;
        self.bot_count = start_bots;
        self.just_activated = true;
        self.started_with_override = admin_override;
        self.round_active = false;
        self.difficulty = Difficulty::Easy;
        self.consecutive_failures = 0;
        self.players_at_round_start = 0;
        self.voters.clear();
        self.assigned.clear();
        self.reset_round();
    }

    /// Leave wave mode
    ///
    /// Timer handles and the saved cvars are left in place for the caller to
    /// cancel and restore.
    pub fn reset(&mut self) {
        self.active = false;
        self.bot_count = 0;
        self.just_activated = false;
        self.started_with_override = false;
        self.round_active = false;
        self.difficulty = Difficulty::Easy;
        self.consecutive_failures = 0;
        self.players_at_round_start = 0;
        self.voters.clear();
        self.assigned.clear();
        self.reset_round();
    }

    /// Clear per-round bookkeeping
    pub fn reset_round(&mut self) {
        self.respawn = Respawn::Disabled;
        self.bot_deaths = 0;
        self.round_kills.clear();
    }

    /// Derived round phase
    pub fn phase(&self) -> RoundPhase {
        if !self.active {
            RoundPhase::Inactive
        } else if self.just_activated {
            RoundPhase::JustActivated
        } else if self.round_active {
            RoundPhase::RoundActive
        } else {
            RoundPhase::RoundEnded
        }
    }

    /// Count a kill for a human attacker
    pub fn record_kill(&mut self, steam_id: u64) -> u32 {
        let kills = self.round_kills.entry(steam_id).or_insert(0);
        *kills += 1;
        *kills
    }

    /// The attacker with the most kills this round, ties broken by lowest id
    pub fn kill_leader(&self) -> Option<(u64, u32)> {
        self.round_kills
            .iter()
            .map(|(id, kills)| (*id, *kills))
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
    }
}

impl fmt::Display for WaveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "active={} bots={} difficulty={} phase={:?} failures={} players_at_start={} \
             respawn={:?} voters={} override={} filler={}",
            self.active,
            self.bot_count,
            self.difficulty,
            self.phase(),
            self.consecutive_failures,
            self.players_at_round_start,
            self.respawn,
            self.voters.len(),
            self.started_with_override,
            self.bot_quota_enabled,
        )
    }
}
