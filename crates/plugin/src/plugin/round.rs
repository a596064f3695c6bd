//! Round setup, spawn checks, respawn compensation and outcomes

use botwaves_host::entities::{count_bots_on, count_humans};
use botwaves_host::events::{EventPlayerDeath, EventRoundEnd};
use botwaves_host::{Host, Scheduler, TimerFlags};

use super::{announce, BotWaves};
use crate::error::WaveResult;
use crate::logging::{ROUND, SPAWN};
use crate::messages;
use crate::progression;
use crate::server::{self, exec_config, ServerCommand};
use crate::state::{Respawn, TimerSlot, BOT_TEAM, HUMAN_TEAM};
use crate::tasks::WaveTask;

/// Remaining respawns at or below which every death is announced
const RESPAWN_COUNTDOWN: u32 = 3;

impl<S: Scheduler<WaveTask>> BotWaves<S> {
    pub(super) fn on_round_start(&mut self) {
        if !self.state.active {
            return;
        }
        tracing::debug!(target: ROUND, "Round start: {}", self.state);

        self.state.round_active = true;
        self.state.reset_round();
        self.cancel_timer(TimerSlot::SpawnCheck);
        self.scheduler.next_frame(WaveTask::SetupRound);
    }

    /// Bring the server in line with the wave for the round that just started
    pub(super) fn setup_round<H: Host + ?Sized>(&mut self, host: &mut H) -> WaveResult<()> {
        tracing::debug!(
            target: ROUND,
            "Setting up round: bots={} difficulty={}",
            self.state.bot_count,
            self.state.difficulty
        );

        server::run_all(
            host,
            [
                ServerCommand::IgnoreRoundWinConditions(true),
                ServerCommand::BotJoinTeam(BOT_TEAM),
                ServerCommand::BotQuotaMode("normal"),
            ],
        );
        let file = self.difficulty_config().to_string();
        exec_config(host, &file);
        self.apply_round_time(host);

        self.move_humans(host);

        let players = host.players();
        let playing = players
            .iter()
            .filter(|p| p.is_valid_human() && p.is_connected() && !p.is_spectator())
            .count();
        self.state.players_at_round_start = u32::try_from(playing).unwrap_or(u32::MAX);

        let humans = count_humans(&players);
        let capacity = progression::bot_capacity(host.max_players(), humans);
        let wanted = self.state.bot_count;
        let target = wanted.min(capacity);
        if target < wanted {
            tracing::info!(target: SPAWN, "Bots capped at {} of {} (server full)", target, wanted);
            announce(host, &messages::bots_capped(target, wanted));
        }

        let (existing, _) = count_bots_on(&players, BOT_TEAM);
        let existing = u32::try_from(existing).unwrap_or(u32::MAX);
        let missing = target.saturating_sub(existing);
        tracing::debug!(
            target: SPAWN,
            "humans={} playing={} existing_bots={} adding={}",
            humans,
            playing,
            existing,
            missing
        );
        for _ in 0..missing {
            server::run(host, ServerCommand::BotAdd(BOT_TEAM));
        }

        if self.config.show_wave_start_messages {
            announce(host, &messages::round_start(wanted, self.state.difficulty));
        }

        self.replace_timer(
            TimerSlot::SpawnCheck,
            self.config.spawn_check_delay(),
            TimerFlags::STOP_ON_MAPCHANGE,
            WaveTask::SpawnCheck,
        );
        Ok(())
    }

    fn apply_round_time<H: Host + ?Sized>(&self, host: &mut H) {
        if !self.config.enable_dynamic_round_time {
            return;
        }
        let seconds = progression::round_time_seconds(&self.config, self.state.bot_count);
        let minutes = progression::round_time_minutes(seconds);
        tracing::debug!(
            target: ROUND,
            "Round time {}s ({} min) for {} bots",
            seconds,
            minutes,
            self.state.bot_count
        );
        server::run(host, ServerCommand::RoundTime(minutes));
    }

    /// Make sure bots made it into the round, then let it be won
    pub(super) fn spawn_check<H: Host + ?Sized>(&mut self, host: &mut H) {
        let (total, alive) = count_bots_on(&host.players(), BOT_TEAM);
        tracing::debug!(
            target: SPAWN,
            "Spawn check: bots={} alive={} target={}",
            total,
            alive,
            self.state.bot_count
        );

        if total == 0 {
            tracing::warn!(target: SPAWN, "No bots on the bot team, requesting them again");
            server::run_all(
                host,
                [
                    ServerCommand::BotJoinTeam(BOT_TEAM),
                    ServerCommand::BotQuota(self.state.bot_count),
                ],
            );
            self.replace_timer(
                TimerSlot::SpawnCheck,
                self.config.spawn_check_delay(),
                TimerFlags::STOP_ON_MAPCHANGE,
                WaveTask::SpawnRecheck,
            );
        } else {
            self.check_respawns(host);
        }

        server::run(host, ServerCommand::IgnoreRoundWinConditions(false));
    }

    /// Turn on respawns when the map could not spawn every bot
    pub(super) fn check_respawns<H: Host + ?Sized>(&mut self, host: &mut H) {
        let (total, alive) = count_bots_on(&host.players(), BOT_TEAM);
        let alive = u32::try_from(alive).unwrap_or(u32::MAX);
        let target = self.state.bot_count;

        if total > 0 && alive == 0 {
            tracing::warn!(target: SPAWN, "{} bots present but none alive", total);
        }

        if alive < target {
            let remaining = target - alive;
            self.state.respawn = Respawn::Enabled {
                remaining,
                needed: target,
            };
            tracing::info!(
                target: SPAWN,
                "Limited spawn points: {} of {} alive, {} respawn(s)",
                alive,
                target,
                remaining
            );
            server::run(host, ServerCommand::RespawnOnDeathCt(true));
            if self.config.show_respawn_messages {
                announce(host, &messages::limited_spawns(alive, target));
            }
        } else {
            self.state.respawn = Respawn::Disabled;
            tracing::debug!(target: SPAWN, "All bots spawned, no respawns needed");
        }
    }

    pub(super) fn on_player_death<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        event: EventPlayerDeath,
    ) -> WaveResult<()> {
        if !self.state.active || !self.state.round_active {
            return Ok(());
        }

        if event.attacker != event.userid {
            if let Some(attacker) = host.player(event.attacker).filter(|p| p.is_valid_human()) {
                let kills = self.state.record_kill(attacker.steam_id);
                tracing::trace!(target: ROUND, "{} has {} kill(s)", attacker.name, kills);
            }
        }

        let Some(victim) = host.player(event.userid) else {
            return Ok(());
        };
        if !victim.is_bot || victim.team != BOT_TEAM {
            return Ok(());
        }
        self.state.bot_deaths += 1;

        let Respawn::Enabled { remaining, needed } = self.state.respawn else {
            return Ok(());
        };
        let remaining = remaining.saturating_sub(1);
        tracing::debug!(
            target: SPAWN,
            "{} died, {} respawn(s) left of {} kills",
            victim.name,
            remaining,
            needed
        );

        if remaining == 0 {
            self.state.respawn = Respawn::Disabled;
            server::run(host, ServerCommand::RespawnOnDeathCt(false));
            if self.config.show_respawn_messages {
                announce(host, &messages::no_more_respawns());
            }
            return Ok(());
        }

        self.state.respawn = Respawn::Enabled { remaining, needed };
        let every = self.config.show_respawn_every_x_deaths.max(1);
        if self.config.show_respawn_messages
            && (self.state.bot_deaths % every == 0 || remaining <= RESPAWN_COUNTDOWN)
        {
            announce(host, &messages::respawns_left(remaining));
        }
        Ok(())
    }

    pub(super) fn on_round_end<H: Host + ?Sized>(&mut self, host: &mut H, event: EventRoundEnd) {
        tracing::debug!(target: ROUND, "Round end, winner={}", event.winner);
        self.state.round_active = false;

        if matches!(self.state.respawn, Respawn::Enabled { .. }) {
            server::run(host, ServerCommand::RespawnOnDeathCt(false));
            self.state.respawn = Respawn::Disabled;
        }

        if !self.state.active {
            return;
        }
        if self.state.just_activated {
            tracing::debug!(target: ROUND, "Skipping the restart round after activation");
            self.state.just_activated = false;
            return;
        }

        if let Some((steam_id, kills)) = self.state.kill_leader() {
            let name = host
                .players()
                .into_iter()
                .find(|p| p.steam_id == steam_id && p.is_valid_human())
                .map(|p| p.name)
                .unwrap_or_else(|| steam_id.to_string());
            tracing::info!(target: ROUND, "Top fragger: {} ({} kills)", name, kills);
        }

        match event.winner {
            HUMAN_TEAM => self.handle_victory(host),
            BOT_TEAM => self.handle_defeat(host),
            other => tracing::debug!(target: ROUND, "No winner ({}), wave unchanged", other),
        }
        tracing::debug!(target: ROUND, "State: {}", self.state);
    }

    fn handle_victory<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.state.consecutive_failures = 0;
        let increment =
            progression::victory_increment(&self.config, self.state.players_at_round_start);
        let before = self.state.bot_count;
        self.state.bot_count = before.saturating_add(increment);
        tracing::info!(
            target: ROUND,
            "Victory: bots {} + {} = {}",
            before,
            increment,
            self.state.bot_count
        );

        if self.config.show_wave_end_messages {
            announce(host, &messages::victory(increment, self.state.bot_count));
        }
        self.rearm_bots(host);
    }

    fn handle_defeat<H: Host + ?Sized>(&mut self, host: &mut H) {
        let outcome = progression::apply_defeat(
            &self.config,
            self.state.bot_count,
            self.state.consecutive_failures,
        );
        self.state.bot_count = outcome.bot_count;
        self.state.consecutive_failures = outcome.failures;

        match outcome.reduced {
            Some((before, after)) => {
                tracing::info!(target: ROUND, "Defeat: reducing bots {} -> {}", before, after);
                if self.config.show_wave_end_messages {
                    announce(
                        host,
                        &messages::defeat(
                            self.config.max_failures_before_reduction,
                            self.config.max_failures_before_reduction,
                        ),
                    );
                    announce(host, &messages::reduced(before, after));
                }
            }
            None => {
                tracing::info!(
                    target: ROUND,
                    "Defeat {}/{}",
                    outcome.failures,
                    self.config.max_failures_before_reduction
                );
                if self.config.show_wave_end_messages {
                    announce(
                        host,
                        &messages::defeat(outcome.failures, self.config.max_failures_before_reduction),
                    );
                }
            }
        }
        self.rearm_bots(host);
    }

    /// Replace the bots so the next round starts with the new target
    fn rearm_bots<H: Host + ?Sized>(&mut self, host: &mut H) {
        server::run_all(
            host,
            [
                ServerCommand::BotKick,
                ServerCommand::BotJoinTeam(BOT_TEAM),
                ServerCommand::BotQuota(self.state.bot_count),
            ],
        );
    }
}
