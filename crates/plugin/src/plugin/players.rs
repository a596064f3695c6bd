//! Player connect/disconnect, team and spawn handling

use std::collections::HashSet;
use std::time::Duration;

use botwaves_host::events::{
    EventPlayerConnectFull, EventPlayerDisconnect, EventPlayerSpawn, EventPlayerTeam,
};
use botwaves_host::{Host, Scheduler, Team, TimerFlags};

use super::{announce, BotWaves};
use crate::error::WaveResult;
use crate::logging::{EVENT, TEAM, VOTE};
use crate::messages;
use crate::state::{Difficulty, TimerSlot, BOT_TEAM, HUMAN_TEAM};
use crate::tasks::WaveTask;
use crate::vote;

/// Delay before stripping a bot, so the spawn loadout has been handed out
const STRIP_DELAY: Duration = Duration::from_millis(100);

impl<S: Scheduler<WaveTask>> BotWaves<S> {
    pub(super) fn on_player_connect_full<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        event: EventPlayerConnectFull,
    ) -> WaveResult<()> {
        let Some(player) = host.player(event.userid).filter(|p| p.is_valid_human()) else {
            return Ok(());
        };
        tracing::debug!(target: EVENT, "{} connected", player.name);

        let slot = player.slot;
        let steam_id = player.steam_id;
        if self.state.active {
            self.scheduler
                .next_frame(WaveTask::PlayerLimitCheck { slot, steam_id });
        } else if self.config.show_welcome_messages {
            let delay = self.config.welcome_delay();
            self.schedule(delay, WaveTask::Welcome { slot, steam_id });
        }
        Ok(())
    }

    /// Turn wave mode off if a new player pushed the server past the limit
    pub(super) fn player_limit_check<H: Host + ?Sized>(&mut self, host: &mut H, slot: i32, steam_id: u64) {
        if host.find_live_player(slot, steam_id).is_none() {
            return;
        }
        let humans = host.human_count();
        tracing::debug!(target: EVENT, "Player count now {}", humans);

        if self.state.started_with_override {
            if humans > self.config.max_players_allowed as usize {
                tracing::debug!(target: EVENT, "{} players, override active, allowing", humans);
            }
            return;
        }
        if self.config.disable_on_player_limit_exceeded
            && humans > self.config.max_players_allowed as usize
        {
            tracing::info!(target: EVENT, "Player limit exceeded ({}), disabling wave mode", humans);
            announce(host, &messages::player_limit_exceeded());
            self.disable(host);
        }
    }

    pub(super) fn welcome<H: Host + ?Sized>(&mut self, host: &mut H, slot: i32, steam_id: u64) -> WaveResult<()> {
        if self.state.active {
            return Ok(());
        }
        let Some(player) = host.find_live_player(slot, steam_id) else {
            return Ok(());
        };
        host.print_to_chat(player.slot, &messages::welcome(&player.name))?;
        Ok(())
    }

    pub(super) fn on_player_disconnect(&mut self, event: EventPlayerDisconnect) -> WaveResult<()> {
        if event.bot {
            return Ok(());
        }
        tracing::debug!(target: EVENT, "{} disconnected (reason {})", event.name, event.reason);

        if self.state.voters.remove(&event.steamid) {
            tracing::debug!(target: VOTE, "Removed vote of {}", event.name);
        }
        self.replace_timer(
            TimerSlot::DisconnectCheck,
            self.config.disconnect_check_delay(),
            TimerFlags::STOP_ON_MAPCHANGE,
            WaveTask::DisconnectRecount,
        );
        Ok(())
    }

    /// Settle votes and the empty-server rule once the player list caught up
    pub(super) fn disconnect_recount<H: Host + ?Sized>(&mut self, host: &mut H) {
        let players = host.players();
        let present: HashSet<u64> = players
            .iter()
            .filter(|p| p.is_valid_human() && p.is_connected())
            .map(|p| p.steam_id)
            .collect();
        let humans = present.len();
        tracing::debug!(target: EVENT, "Post-disconnect check: {} human(s)", humans);

        if humans == 0 {
            self.state.voters.clear();
            if self.state.active {
                tracing::info!(target: EVENT, "Server empty, disabling wave mode");
                self.disable(host);
            }
            return;
        }

        let enabling = !self.state.active;
        if enabling && humans > self.config.max_players_allowed as usize {
            return;
        }
        if let Some((current, needed)) =
            vote::recount(&mut self.state.voters, &present, humans, self.config.vote_threshold)
        {
            tracing::info!(target: VOTE, "Vote passes after disconnect ({}/{})", current, needed);
            self.toggle(host);
            announce(host, &messages::vote_passed(enabling));
        }
    }

    pub(super) fn on_player_team<H: Host + ?Sized>(&mut self, host: &mut H, event: EventPlayerTeam) -> WaveResult<()> {
        if !self.state.active || event.disconnect {
            return Ok(());
        }
        let Some(player) = host.player(event.userid) else {
            return Ok(());
        };
        tracing::debug!(target: TEAM, "{} (bot={}) -> {}", player.name, player.is_bot, event.team);

        if wrong_team(player.is_bot, event.team).is_some() {
            self.scheduler.next_frame(WaveTask::EnforceTeam {
                slot: player.slot,
                steam_id: player.steam_id,
            });
        }
        Ok(())
    }

    /// Put a player back where wave mode wants them
    pub(super) fn enforce_team<H: Host + ?Sized>(&mut self, host: &mut H, slot: i32, steam_id: u64) -> WaveResult<()> {
        let Some(player) = host.find_live_player(slot, steam_id) else {
            return Ok(());
        };
        if let Some(team) = wrong_team(player.is_bot, player.team) {
            tracing::debug!(target: TEAM, "Forcing {} to {}", player.name, team);
            host.change_team(player.slot, team)?;
            if !player.is_bot {
                self.state.assigned.insert(player.steam_id);
            }
        }
        Ok(())
    }

    pub(super) fn on_player_spawn<H: Host + ?Sized>(&mut self, host: &mut H, event: EventPlayerSpawn) -> WaveResult<()> {
        if !self.state.active {
            return Ok(());
        }
        let Some(player) = host.player(event.userid) else {
            return Ok(());
        };

        if player.is_bot {
            if player.team == BOT_TEAM
                && self.state.difficulty == Difficulty::Easy
                && self.config.strip_weapons_on_easy_mode
            {
                self.schedule(STRIP_DELAY, WaveTask::StripWeapons { slot: player.slot });
            }
            return Ok(());
        }

        if player.is_valid_human()
            && player.team.is_playing()
            && player.team != HUMAN_TEAM
            && !self.state.assigned.contains(&player.steam_id)
        {
            tracing::debug!(target: TEAM, "{} spawned as {}, moving", player.name, player.team);
            host.change_team(player.slot, HUMAN_TEAM)?;
            self.state.assigned.insert(player.steam_id);
        }
        Ok(())
    }

    pub(super) fn strip_weapons<H: Host + ?Sized>(&mut self, host: &mut H, slot: i32) -> WaveResult<()> {
        let Some(player) = host.player(slot).filter(|p| p.is_bot && p.team == BOT_TEAM) else {
            return Ok(());
        };
        if !player.alive || self.state.difficulty != Difficulty::Easy {
            return Ok(());
        }
        tracing::trace!(target: TEAM, "Stripping weapons from {}", player.name);
        host.strip_weapons(slot)?;
        Ok(())
    }
}

/// The team a player must be moved to, if they are on the wrong one
fn wrong_team(is_bot: bool, team: Team) -> Option<Team> {
    if is_bot {
        (team != BOT_TEAM && team != Team::None).then_some(BOT_TEAM)
    } else {
        (team == BOT_TEAM).then_some(HUMAN_TEAM)
    }
}
