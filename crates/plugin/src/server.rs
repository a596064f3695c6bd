//! Console commands sent to the game server
//!
//! Everything the plugin asks the engine to do is one of these. `Display`
//! renders the exact console string.

use std::fmt;

use botwaves_host::{Host, Team};

use crate::logging::SERVER;

/// A console command understood by the game server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerCommand {
    /// `bot_quota <n>`
    BotQuota(u32),
    /// `bot_quota_mode <mode>`
    BotQuotaMode(&'static str),
    /// `bot_kick`
    BotKick,
    /// `bot_join_team <team>`
    BotJoinTeam(Team),
    /// `bot_add_<team>`
    BotAdd(Team),
    /// `mp_restartgame <seconds>`
    RestartGame(u32),
    /// `mp_warmup_end`
    WarmupEnd,
    /// `mp_ignore_round_win_conditions 0|1`
    IgnoreRoundWinConditions(bool),
    /// `mp_respawn_on_death_ct 0|1`
    RespawnOnDeathCt(bool),
    /// `mp_roundtime <minutes>`
    RoundTime(String),
    /// `exec <file>`
    Exec(String),
    /// `<cvar> <value>`
    SetCvar(String, String),
}

impl fmt::Display for ServerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BotQuota(n) => write!(f, "bot_quota {}", n),
            Self::BotQuotaMode(mode) => write!(f, "bot_quota_mode {}", mode),
            Self::BotKick => write!(f, "bot_kick"),
            Self::BotJoinTeam(team) => write!(f, "bot_join_team {}", team.short_name()),
            Self::BotAdd(team) => write!(f, "bot_add_{}", team.short_name()),
            Self::RestartGame(seconds) => write!(f, "mp_restartgame {}", seconds),
            Self::WarmupEnd => write!(f, "mp_warmup_end"),
            Self::IgnoreRoundWinConditions(on) => {
                write!(f, "mp_ignore_round_win_conditions {}", u8::from(*on))
            }
            Self::RespawnOnDeathCt(on) => write!(f, "mp_respawn_on_death_ct {}", u8::from(*on)),
            Self::RoundTime(minutes) => write!(f, "mp_roundtime {}", minutes),
            Self::Exec(file) => write!(f, "exec {}", file),
            Self::SetCvar(name, value) => write!(f, "{} {}", name, value),
        }
    }
}

/// Send a command, logging a rejection instead of failing
///
/// Server commands are fire-and-forget; one being refused must not stop the
/// rest of a sequence.
pub fn run<H: Host + ?Sized>(host: &mut H, command: ServerCommand) {
    let line = command.to_string();
    tracing::trace!(target: SERVER, "> {}", line);
    if let Err(e) = host.execute_command(&line) {
        tracing::warn!(target: SERVER, "Command '{}' failed: {}", line, e);
    }
}

/// Send each command in order
pub fn run_all<H: Host + ?Sized>(host: &mut H, commands: impl IntoIterator<Item = ServerCommand>) {
    for command in commands {
        run(host, command);
    }
}

/// `exec` a config file unless the name is blank
pub fn exec_config<H: Host + ?Sized>(host: &mut H, file: &str) {
    let file = file.trim();
    if file.is_empty() {
        tracing::debug!(target: SERVER, "No config file set, skipping exec");
        return;
    }
    run(host, ServerCommand::Exec(file.to_string()));
}
