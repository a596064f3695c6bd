//! Console/chat commands and voting

use botwaves_host::{CommandInfo, CommandRegistry, Host, PlayerInfo, Scheduler};

use super::{announce, BotWaves};
use crate::error::{WaveError, WaveResult};
use crate::logging::{CMD, VOTE};
use crate::messages;
use crate::progression;
use crate::tasks::WaveTask;
use crate::vote::{self, VoteOutcome};

/// Commands owned by the plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveCommand {
    /// `css_wave [count|off|disable] [password]`
    Wave,
    /// `css_wave_off`
    WaveOff,
    /// `css_dif` / `css_diff`
    Difficulty,
    /// `css_bot`
    FillerBots,
}

/// Register every console command; `css_` names double as `!`/`/` chat commands
pub(super) fn register_all(registry: &mut CommandRegistry<WaveCommand>) {
    let commands = [
        ("css_wave", "Vote for wave mode, or start it with a bot count", WaveCommand::Wave),
        ("css_wave_off", "Turn wave mode off", WaveCommand::WaveOff),
        ("css_dif", "Toggle wave difficulty", WaveCommand::Difficulty),
        ("css_diff", "Toggle wave difficulty", WaveCommand::Difficulty),
        ("css_bot", "Toggle filler bots outside wave mode", WaveCommand::FillerBots),
    ];
    for (name, description, id) in commands {
        registry.register(name, description, id == WaveCommand::Difficulty, id);
    }
}

/// Reply to whoever ran a command: the player's chat, or the log for the console
fn reply<H: Host + ?Sized>(host: &mut H, player: Option<&PlayerInfo>, message: &str) -> WaveResult<()> {
    match player {
        Some(player) => host.print_to_chat(player.slot, message)?,
        None => tracing::info!(target: CMD, "{}", message),
    }
    Ok(())
}

impl<S: Scheduler<WaveTask>> BotWaves<S> {
    pub(super) fn dispatch_command<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        id: WaveCommand,
        info: &CommandInfo,
    ) -> WaveResult<()> {
        // Refresh the caller: the snapshot in `info` may predate a team change
        let player = match info.player() {
            Some(p) => Some(
                host.player(p.slot)
                    .filter(|p| p.is_valid_human())
                    .ok_or(WaveError::PlayerGone { slot: p.slot })?,
            ),
            None => None,
        };
        tracing::debug!(
            target: CMD,
            "{} from {}: '{}'",
            info.command_name(),
            player.as_ref().map(|p| p.name.as_str()).unwrap_or("console"),
            info.arg_string()
        );

        match id {
            WaveCommand::Wave => self.wave_command(host, player.as_ref(), info.arg(1).trim(), info.arg(2).trim()),
            WaveCommand::WaveOff => self.wave_off(host, player.as_ref()),
            WaveCommand::Difficulty => match player {
                Some(player) => self.difficulty_command(host, &player),
                None => Err(WaveError::ClientOnly(info.command_name().to_string())),
            },
            WaveCommand::FillerBots => self.filler_bots_command(host, player.as_ref()),
        }
    }

    /// Bare chat words that act like commands: `wave`, `dif`, `diff`, `bot`
    pub(super) fn handle_plain_trigger<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        player: &PlayerInfo,
        message: &str,
    ) -> WaveResult<()> {
        match message.trim().to_lowercase().as_str() {
            "wave" => self.handle_vote(host, player),
            "dif" | "diff" => self.difficulty_command(host, player),
            "bot" => self.filler_bots_command(host, Some(player)),
            _ => Ok(()),
        }
    }

    fn wave_command<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        player: Option<&PlayerInfo>,
        count: &str,
        password: &str,
    ) -> WaveResult<()> {
        if count.eq_ignore_ascii_case("off") || count.eq_ignore_ascii_case("disable") {
            return self.wave_off(host, player);
        }
        let Some(player) = player else {
            return reply(host, None, &messages::players_only());
        };

        if count.is_empty() {
            return self.handle_vote(host, player);
        }

        let requested = match count.parse::<u32>() {
            Ok(n) if n > 0 => n,
            _ => return reply(host, Some(player), &messages::invalid_number()),
        };
        let bots = progression::requested_bots(requested);
        if bots < requested {
            tracing::debug!(target: CMD, "Bot count {} capped at {}", requested, bots);
        }

        let is_admin = self.config.password_matches(password);
        if !password.is_empty() && !is_admin {
            tracing::info!(target: CMD, "{} used a wrong password", player.name);
            return reply(host, Some(player), &messages::wrong_password());
        }

        if self.state.active {
            self.change_bot_count(host, bots);
            return Ok(());
        }

        let humans = host.human_count();
        if humans > self.config.max_players_allowed as usize && !is_admin {
            return reply(
                host,
                Some(player),
                &messages::too_many_players(self.config.max_players_allowed),
            );
        }

        // Without the password a count only skips the vote for a lone player
        if !is_admin && humans > 1 {
            return self.handle_vote(host, player);
        }

        self.enable(host, bots, is_admin);
        if is_admin {
            announce(host, &messages::admin_start(bots));
        } else {
            announce(host, &messages::enabled(bots));
        }
        Ok(())
    }

    fn wave_off<H: Host + ?Sized>(&mut self, host: &mut H, player: Option<&PlayerInfo>) -> WaveResult<()> {
        if !self.state.active {
            return reply(host, player, &messages::not_active());
        }
        self.disable(host);
        announce(host, &messages::disabled());
        Ok(())
    }

    fn difficulty_command<H: Host + ?Sized>(&mut self, host: &mut H, player: &PlayerInfo) -> WaveResult<()> {
        if !self.state.active {
            return reply(host, Some(player), &messages::need_wave_active());
        }
        self.toggle_difficulty(host);
        Ok(())
    }

    fn filler_bots_command<H: Host + ?Sized>(&mut self, host: &mut H, player: Option<&PlayerInfo>) -> WaveResult<()> {
        if self.state.active {
            return reply(host, player, &messages::not_while_active());
        }
        let enabled = self.toggle_filler_bots(host);
        announce(host, &messages::filler_bots(enabled));
        Ok(())
    }

    /// Count a vote to toggle wave mode
    pub(super) fn handle_vote<H: Host + ?Sized>(&mut self, host: &mut H, player: &PlayerInfo) -> WaveResult<()> {
        let humans = host.human_count();
        let enabling = !self.state.active;
        let outcome = vote::cast(
            &mut self.state.voters,
            player.steam_id,
            humans,
            self.config.max_players_allowed as usize,
            self.config.vote_threshold,
            enabling,
        );
        tracing::debug!(target: VOTE, "Vote from {} ({} humans): {:?}", player.name, humans, outcome);

        match outcome {
            VoteOutcome::Instant => {
                if enabling {
                    self.enable(host, 1, false);
                    announce(host, &messages::enabled(1));
                } else {
                    self.disable(host);
                    reply(host, Some(player), &messages::disabled())?;
                }
            }
            VoteOutcome::TooManyPlayers => {
                reply(
                    host,
                    Some(player),
                    &messages::too_many_players(self.config.max_players_allowed),
                )?;
            }
            VoteOutcome::AlreadyVoted => reply(host, Some(player), &messages::already_voted())?,
            VoteOutcome::Counted { current, needed } => {
                announce(host, &messages::vote_cast(&player.name, current, needed, enabling));
            }
            VoteOutcome::Passed { current, needed } => {
                announce(host, &messages::vote_cast(&player.name, current, needed, enabling));
                tracing::info!(target: VOTE, "Vote passed ({}/{})", current, needed);
                self.toggle(host);
                announce(host, &messages::vote_passed(enabling));
            }
        }
        Ok(())
    }
}
