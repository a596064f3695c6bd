//! Turning wave mode on and off, and changing it while it runs

use std::time::Duration;

use botwaves_host::{Host, Scheduler, TimerFlags};

use super::{announce, BotWaves};
use crate::cvars;
use crate::logging::WAVE;
use crate::messages;
use crate::server::{self, exec_config, ServerCommand};
use crate::state::{Difficulty, TimerSlot, BOT_TEAM, HUMAN_TEAM};
use crate::tasks::WaveTask;

/// Pause between re-arming bots and restarting the match
const QUICK_RESTART_DELAY: Duration = Duration::from_millis(300);

impl<S: Scheduler<WaveTask>> BotWaves<S> {
    /// Enable wave mode with `start_bots` bots
    pub(super) fn enable<H: Host + ?Sized>(&mut self, host: &mut H, start_bots: u32, admin_override: bool) {
        tracing::info!(
            target: WAVE,
            "Enabling wave mode: bots={} override={}",
            start_bots,
            admin_override
        );

        self.state.initialize(start_bots, admin_override);
        if self.config.save_server_cvars {
            self.state.saved_cvars = cvars::snapshot(host, &self.config);
        }

        server::run_all(host, [ServerCommand::BotQuota(0), ServerCommand::BotKick]);
        server::run_all(host, cvars::balance_overrides());
        server::run(host, ServerCommand::WarmupEnd);
        if let Some(command) = cvars::skill_balance_override(&self.config) {
            server::run(host, command);
        }
        exec_config(host, &self.config.wave_enabled_config);
        exec_config(host, &self.config.difficulty_easy_config);

        self.move_humans(host);

        self.prespawn_bots(host);
        self.replace_timer(
            TimerSlot::Restart,
            self.config.restart_delay(),
            TimerFlags::STOP_ON_MAPCHANGE,
            WaveTask::RestartMatch,
        );

        tracing::debug!(target: WAVE, "State: {}", self.state);
    }

    /// Disable wave mode and put the server back the way it was
    pub(super) fn disable<H: Host + ?Sized>(&mut self, host: &mut H) {
        tracing::info!(target: WAVE, "Disabling wave mode");

        server::run_all(
            host,
            [
                ServerCommand::IgnoreRoundWinConditions(false),
                ServerCommand::RespawnOnDeathCt(false),
                ServerCommand::BotKick,
            ],
        );
        exec_config(host, &self.config.wave_disabled_config);

        if self.config.restore_cvars_on_disable {
            cvars::restore(host, &mut self.state.saved_cvars);
        } else {
            self.state.saved_cvars.clear();
        }

        server::run(host, ServerCommand::BotQuota(self.filler_quota()));

        self.state.reset();
        for key in self.state.timers.take_wave_timers() {
            self.scheduler.cancel(key);
        }
        self.start_help_timer();

        tracing::debug!(target: WAVE, "State: {}", self.state);
    }

    /// Flip wave mode (used by votes)
    pub(super) fn toggle<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.state.active {
            self.disable(host);
        } else {
            self.enable(host, 1, false);
        }
    }

    pub(super) fn restart_match<H: Host + ?Sized>(&mut self, host: &mut H) {
        tracing::debug!(target: WAVE, "Restarting match with {} bots", self.state.bot_count);
        server::run(host, ServerCommand::RestartGame(1));
    }

    /// Set a new bot target while wave mode runs
    pub(super) fn change_bot_count<H: Host + ?Sized>(&mut self, host: &mut H, bots: u32) {
        tracing::info!(target: WAVE, "Bot count {} -> {}", self.state.bot_count, bots);
        self.state.bot_count = bots;
        self.state.consecutive_failures = 0;

        server::run(host, ServerCommand::BotKick);
        self.prespawn_bots(host);
        self.replace_timer(
            TimerSlot::Restart,
            QUICK_RESTART_DELAY,
            TimerFlags::STOP_ON_MAPCHANGE,
            WaveTask::RestartMatch,
        );
        announce(host, &messages::bot_count_changed(bots));
    }

    /// Switch between Easy and Hard
    pub(super) fn toggle_difficulty<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.state.difficulty = self.state.difficulty.toggled();
        tracing::info!(target: WAVE, "Difficulty -> {}", self.state.difficulty);

        server::run_all(host, [ServerCommand::BotQuota(0), ServerCommand::BotKick]);
        let file = self.difficulty_config().to_string();
        exec_config(host, &file);
        announce(host, &messages::difficulty_changed(self.state.difficulty));

        self.prespawn_bots(host);
        self.replace_timer(
            TimerSlot::Restart,
            QUICK_RESTART_DELAY,
            TimerFlags::STOP_ON_MAPCHANGE,
            WaveTask::RestartMatch,
        );
    }

    /// Turn normal-play filler bots on or off
    ///
    /// Returns the new setting.
    pub(super) fn toggle_filler_bots<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        self.state.bot_quota_enabled = !self.state.bot_quota_enabled;
        server::run(host, ServerCommand::BotQuota(self.filler_quota()));
        tracing::info!(target: WAVE, "Filler bots enabled={}", self.state.bot_quota_enabled);
        self.state.bot_quota_enabled
    }

    /// Config file for the current difficulty
    pub(super) fn difficulty_config(&self) -> &str {
        match self.state.difficulty {
            Difficulty::Easy => &self.config.difficulty_easy_config,
            Difficulty::Hard => &self.config.difficulty_hard_config,
        }
    }

    fn filler_quota(&self) -> u32 {
        if self.state.bot_quota_enabled {
            self.config.filler_bot_quota
        } else {
            0
        }
    }

    /// Ask for the bot target on the bot team ahead of a restart
    fn prespawn_bots<H: Host + ?Sized>(&mut self, host: &mut H) {
        server::run_all(
            host,
            [
                ServerCommand::BotJoinTeam(BOT_TEAM),
                ServerCommand::BotQuotaMode("normal"),
                ServerCommand::BotQuota(self.state.bot_count),
            ],
        );
    }

    /// Move every playing human onto the human team
    ///
    /// Spectators stay where they are. Returns how many were moved.
    pub(super) fn move_humans<H: Host + ?Sized>(&mut self, host: &mut H) -> usize {
        let mut moved = 0;
        for player in host.players() {
            if !player.is_valid_human() || player.is_spectator() {
                continue;
            }
            if player.team != HUMAN_TEAM {
                tracing::debug!(
                    target: WAVE,
                    "Moving {} from {} to {}",
                    player.name,
                    player.team,
                    HUMAN_TEAM
                );
                if let Err(e) = host.change_team(player.slot, HUMAN_TEAM) {
                    tracing::warn!(target: WAVE, "Could not move {}: {}", player.name, e);
                    continue;
                }
                moved += 1;
            }
            self.state.assigned.insert(player.steam_id);
        }
        moved
    }
}
