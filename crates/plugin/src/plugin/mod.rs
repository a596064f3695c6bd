//! The Bot Waves plugin object
//!
//! [`BotWaves`] owns the config, the wave state and a scheduler. The host
//! feeds it events, commands, chat lines and frame ticks:
//!
//! ```text
//! host event   ── handle_event(host, GameEvent) ──┐
//! console cmd  ── handle_command(host, info) ─────┼──► BotWaves ──► Host (commands, chat, teams)
//! chat line    ── handle_chat(host, slot, msg) ───┤        │
//! frame tick   ── run_frame(host, now) ───────────┘        └──► Scheduler<WaveTask>
//! ```
//!
//! Handlers return [`WaveResult`] internally; the public entry points log
//! errors and always let the host continue.

mod commands;
mod lifecycle;
mod players;
mod round;

use std::path::Path;
use std::time::Duration;

use botwaves_host::commands::ChatTriggers;
use botwaves_host::{
    CommandInfo, CommandRegistry, GameEvent, Host, HookResult, PluginConfig, Scheduler,
    TaskScheduler, TimerFlags, TimerKey,
};

use crate::config::WaveConfig;
use crate::error::{WaveError, WaveResult};
use crate::logging;
use crate::messages;
use crate::state::{TimerSlot, WaveState};
use crate::tasks::WaveTask;

pub use commands::WaveCommand;

/// Cooperative survival mode: humans against escalating waves of bots
pub struct BotWaves<S = TaskScheduler<WaveTask>> {
    config: WaveConfig,
    state: WaveState,
    scheduler: S,
    commands: CommandRegistry<WaveCommand>,
    triggers: ChatTriggers,
}

impl BotWaves {
    /// Create the plugin with the default scheduler
    ///
    /// The config is validated first.
    pub fn new(config: WaveConfig) -> Self {
        Self::with_scheduler(config, TaskScheduler::new())
    }

    /// Load `configs/plugins/botwaves/botwaves.json` under `base`
    /// (written with defaults when missing) and install logging.
    pub fn load(base: &Path) -> WaveResult<Self> {
        let config = WaveConfig::load(base)?;
        logging::init(config.debug_mode);
        Ok(Self::new(config))
    }
}

impl<S: Scheduler<WaveTask>> BotWaves<S> {
    /// Create the plugin on top of a custom scheduler
    pub fn with_scheduler(mut config: WaveConfig, scheduler: S) -> Self {
        config.validate();

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        Self {
            config,
            state: WaveState::new(),
            scheduler,
            commands: registry,
            triggers: ChatTriggers::default(),
        }
    }

    /// Current config
    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    /// Current wave state
    pub fn state(&self) -> &WaveState {
        &self.state
    }

    /// The scheduler holding pending work
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Registered console/chat commands
    pub fn commands(&self) -> &CommandRegistry<WaveCommand> {
        &self.commands
    }

    /// Re-read the config file under `base`
    ///
    /// Takes effect for everything computed after the call; an active wave
    /// keeps running. The help timer restarts with the new interval.
    pub fn reload_config(&mut self, base: &Path) -> WaveResult<()> {
        self.config.reload(base)?;
        let corrections = self.config.validate();
        tracing::info!(
            target: logging::WAVE,
            "Config reloaded ({} value(s) corrected)",
            corrections.len()
        );
        self.start_help_timer();
        Ok(())
    }

    /// Plugin loaded: start advertising the mode
    pub fn on_load<H: Host + ?Sized>(&mut self, _host: &mut H) {
        tracing::info!(target: logging::WAVE, "Bot Waves loaded");
        if self.config.debug_mode {
            tracing::debug!(
                target: logging::WAVE,
                "max_players_allowed={} vote_threshold={} admin_password={}",
                self.config.max_players_allowed,
                self.config.vote_threshold,
                if self.config.admin_password.is_empty() { "(not set)" } else { "(set)" }
            );
        }
        self.start_help_timer();
    }

    /// Plugin unloading: leave the server as it was found
    pub fn on_unload<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.state.active {
            self.disable(host);
        }
        self.scheduler.clear();
        self.state.timers = Default::default();
        tracing::info!(target: logging::WAVE, "Bot Waves unloaded");
    }

    /// Handle a game event
    pub fn handle_event<H: Host + ?Sized>(&mut self, host: &mut H, event: GameEvent) -> HookResult {
        let name = event.name();
        let result = match event {
            GameEvent::MapStart { map } => {
                self.on_map_start(&map);
                Ok(())
            }
            GameEvent::MapEnd => {
                self.on_map_end();
                Ok(())
            }
            GameEvent::PlayerConnectFull(e) => self.on_player_connect_full(host, e),
            GameEvent::PlayerDisconnect(e) => self.on_player_disconnect(e),
            GameEvent::PlayerTeam(e) => self.on_player_team(host, e),
            GameEvent::PlayerSpawn(e) => self.on_player_spawn(host, e),
            GameEvent::PlayerDeath(e) => self.on_player_death(host, e),
            GameEvent::RoundStart(_) => {
                self.on_round_start();
                Ok(())
            }
            GameEvent::RoundEnd(e) => {
                self.on_round_end(host, e);
                Ok(())
            }
        };

        if let Err(e) = result {
            tracing::error!(target: logging::EVENT, "Error handling {}: {}", name, e);
        }
        HookResult::Continue
    }

    /// Handle a console command
    ///
    /// Returns `Handled` for commands this plugin owns, `Continue` otherwise.
    pub fn handle_command<H: Host + ?Sized>(&mut self, host: &mut H, info: CommandInfo) -> HookResult {
        let entry = if info.context().is_chat() {
            self.commands.find_by_short_name(info.command_name())
        } else {
            self.commands.find_by_name(info.command_name())
        };
        let Some((id, client_only)) = entry.map(|e| (e.id, e.client_only)) else {
            return HookResult::Continue;
        };
        if client_only && info.player().is_none() {
            let e = WaveError::ClientOnly(info.command_name().to_string());
            tracing::warn!(target: logging::CMD, "{}", e);
            return HookResult::Handled;
        }

        if let Err(e) = self.dispatch_command(host, id, &info) {
            tracing::error!(target: logging::CMD, "Error in {}: {}", info.command_name(), e);
        }
        HookResult::Handled
    }

    /// Handle a chat line from `slot`
    ///
    /// `!cmd` and `/cmd` run registered commands (`/` hides the line from
    /// chat). The bare words `wave`, `dif`, `diff` and `bot` work too.
    pub fn handle_chat<H: Host + ?Sized>(&mut self, host: &mut H, slot: i32, message: &str) -> HookResult {
        let Some(player) = host.player(slot).filter(|p| p.is_valid_human()) else {
            return HookResult::Continue;
        };

        if let Some(info) = self.triggers.parse(message, Some(player.clone())) {
            let silent = info.context().is_silent();
            let Some(id) = self
                .commands
                .find_by_short_name(info.command_name())
                .map(|e| e.id)
            else {
                return HookResult::Continue;
            };

            if let Err(e) = self.dispatch_command(host, id, &info) {
                tracing::error!(target: logging::CMD, "Error in !{}: {}", info.command_name(), e);
            }
            return if silent { HookResult::Handled } else { HookResult::Continue };
        }

        if let Err(e) = self.handle_plain_trigger(host, &player, message) {
            tracing::error!(target: logging::CMD, "Error handling chat trigger: {}", e);
        }
        HookResult::Continue
    }

    /// Advance the clock and run every task that is due
    pub fn run_frame<H: Host + ?Sized>(&mut self, host: &mut H, now: Duration) {
        for task in self.scheduler.poll(now) {
            if task.requires_active() && !self.state.active {
                tracing::trace!(target: logging::EVENT, "Dropping {:?}, wave mode is off", task);
                continue;
            }
            let label = format!("{:?}", task);
            if let Err(e) = self.run_task(host, task) {
                tracing::error!(target: logging::EVENT, "Error running {}: {}", label, e);
            }
        }
    }

    fn run_task<H: Host + ?Sized>(&mut self, host: &mut H, task: WaveTask) -> WaveResult<()> {
        match task {
            WaveTask::RestartMatch => {
                self.state.timers.restart = None;
                self.restart_match(host);
                Ok(())
            }
            WaveTask::SetupRound => self.setup_round(host),
            WaveTask::SpawnCheck => {
                self.state.timers.spawn_check = None;
                self.spawn_check(host);
                Ok(())
            }
            WaveTask::SpawnRecheck => {
                self.state.timers.spawn_check = None;
                self.check_respawns(host);
                Ok(())
            }
            WaveTask::DisconnectRecount => {
                self.state.timers.disconnect_check = None;
                self.disconnect_recount(host);
                Ok(())
            }
            WaveTask::HelpMessage => {
                self.help_message(host);
                Ok(())
            }
            WaveTask::Welcome { slot, steam_id } => self.welcome(host, slot, steam_id),
            WaveTask::PlayerLimitCheck { slot, steam_id } => {
                self.player_limit_check(host, slot, steam_id);
                Ok(())
            }
            WaveTask::EnforceTeam { slot, steam_id } => self.enforce_team(host, slot, steam_id),
            WaveTask::StripWeapons { slot } => self.strip_weapons(host, slot),
        }
    }

    fn on_map_start(&mut self, map: &str) {
        tracing::debug!(target: logging::EVENT, "Map starting: {}", map);
        self.forget_wave();
        self.start_help_timer();
    }

    fn on_map_end(&mut self) {
        tracing::debug!(target: logging::EVENT, "Map ending");
        let cancelled = self.scheduler.cancel_mapchange();
        tracing::trace!(target: logging::EVENT, "Cancelled {} timer(s)", cancelled);
        self.state.timers = Default::default();
        self.forget_wave();
    }

    /// Drop a wave the map change killed; its cvars died with the map
    fn forget_wave(&mut self) {
        if self.state.active {
            tracing::debug!(target: logging::WAVE, "Wave mode was active, resetting");
            self.state.reset();
            self.state.saved_cvars.clear();
        }
    }

    /// Schedule a one-shot task that dies with the map
    fn schedule(&mut self, delay: Duration, task: WaveTask) -> TimerKey {
        self.scheduler
            .schedule(delay, TimerFlags::STOP_ON_MAPCHANGE, task)
    }

    /// Schedule into a named slot, cancelling whatever the slot held
    fn replace_timer(&mut self, slot: TimerSlot, delay: Duration, flags: TimerFlags, task: WaveTask) {
        self.cancel_timer(slot);
        let key = self.scheduler.schedule(delay, flags, task);
        *self.state.timers.slot_mut(slot) = Some(key);
    }

    fn cancel_timer(&mut self, slot: TimerSlot) {
        if let Some(key) = self.state.timers.slot_mut(slot).take() {
            self.scheduler.cancel(key);
        }
    }

    fn start_help_timer(&mut self) {
        if !self.config.show_help_messages {
            self.cancel_timer(TimerSlot::Help);
            return;
        }
        self.replace_timer(
            TimerSlot::Help,
            self.config.help_interval(),
            TimerFlags::REPEAT | TimerFlags::STOP_ON_MAPCHANGE,
            WaveTask::HelpMessage,
        );
    }

    fn help_message<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.state.active {
            return;
        }
        let humans = host.human_count();
        if humans >= 1 && humans <= self.config.max_players_allowed as usize {
            for line in messages::help() {
                announce(host, &line);
            }
        }
    }
}

/// Broadcast, logging a failure instead of propagating it
fn announce<H: Host + ?Sized>(host: &mut H, message: &str) {
    if let Err(e) = host.print_to_chat_all(message) {
        tracing::warn!(target: logging::EVENT, "Broadcast failed: {}", e);
    }
}
