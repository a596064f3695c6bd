//! Wave-mode configuration
//!
//! Loaded once from `configs/plugins/botwaves/botwaves.json` and clamped by
//! [`WaveConfig::validate`]. Every field has a default, so a partial file
//! only overrides what it names.

use std::fmt;
use std::time::Duration;

use botwaves_host::PluginConfig;
use serde::{Deserialize, Serialize};

/// Plugin configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Verbose logging for every plugin target
    pub debug_mode: bool,

    // Player limits
    /// Human count above which wave mode cannot start without the password
    pub max_players_allowed: u32,
    /// Password for `css_wave <count> <password>`; empty disables the override
    pub admin_password: String,
    /// Turn wave mode off when a player joins past the limit
    pub disable_on_player_limit_exceeded: bool,

    // Voting
    /// Fraction of humans that must vote (clamped to 0.1..=1.0)
    pub vote_threshold: f32,

    // Progression
    pub minimum_wave_increment: u32,
    pub minimum_bots_per_wave: u32,
    pub max_failures_before_reduction: u32,
    pub wave_reduction_percentage: u32,

    // Round time
    pub enable_dynamic_round_time: bool,
    pub base_round_time_seconds: u32,
    pub bot_threshold_for_extra_time: u32,
    pub extra_seconds_per_bot: u32,

    // Delays, in seconds
    pub spawn_check_delay: f32,
    pub restart_delay: f32,
    pub disconnect_check_delay: f32,

    // Messages
    pub show_welcome_messages: bool,
    pub welcome_message_delay_seconds: f32,
    pub show_wave_start_messages: bool,
    pub show_wave_end_messages: bool,
    pub show_respawn_messages: bool,
    pub show_respawn_every_x_deaths: u32,
    pub show_help_messages: bool,
    pub help_message_interval_seconds: u32,

    // Server handling
    /// Bots on the bot team spawn with a knife only in Easy mode
    pub strip_weapons_on_easy_mode: bool,
    /// Also neutralise `css_skill_autobalance_minplayers` while active
    pub disable_skill_auto_balance: bool,
    pub save_server_cvars: bool,
    pub restore_cvars_on_disable: bool,
    /// Bot quota for normal play while wave mode is off
    pub filler_bot_quota: u32,

    // Server config files to `exec` (empty = skip)
    pub wave_enabled_config: String,
    pub wave_disabled_config: String,
    pub difficulty_easy_config: String,
    pub difficulty_hard_config: String,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            debug_mode: false,
            max_players_allowed: 5,
            admin_password: String::new(),
            disable_on_player_limit_exceeded: true,
            vote_threshold: 0.5,
            minimum_wave_increment: 1,
            minimum_bots_per_wave: 1,
            max_failures_before_reduction: 7,
            wave_reduction_percentage: 10,
            enable_dynamic_round_time: true,
            base_round_time_seconds: 40,
            bot_threshold_for_extra_time: 10,
            extra_seconds_per_bot: 3,
            spawn_check_delay: 1.0,
            restart_delay: 0.5,
            disconnect_check_delay: 0.5,
            show_welcome_messages: true,
            welcome_message_delay_seconds: 5.0,
            show_wave_start_messages: true,
            show_wave_end_messages: true,
            show_respawn_messages: true,
            show_respawn_every_x_deaths: 5,
            show_help_messages: true,
            help_message_interval_seconds: 60,
            strip_weapons_on_easy_mode: true,
            disable_skill_auto_balance: true,
            save_server_cvars: true,
            restore_cvars_on_disable: true,
            filler_bot_quota: 1,
            wave_enabled_config: String::new(),
            wave_disabled_config: String::new(),
            difficulty_easy_config: String::new(),
            difficulty_hard_config: String::new(),
        }
    }
}

impl PluginConfig for WaveConfig {
    const PLUGIN_NAME: &'static str = "botwaves";
}

/// A value changed by [`WaveConfig::validate`]
#[derive(Debug, Clone, PartialEq)]
pub struct Correction {
    /// Field name as written in the config file
    pub field: &'static str,
    /// Value found in the file
    pub rejected: String,
    /// Value used instead
    pub corrected: String,
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.field, self.rejected, self.corrected)
    }
}

fn clamp_u32(field: &'static str, value: &mut u32, min: u32, max: u32, out: &mut Vec<Correction>) {
    let clamped = (*value).clamp(min, max);
    if clamped != *value {
        out.push(Correction {
            field,
            rejected: value.to_string(),
            corrected: clamped.to_string(),
        });
        *value = clamped;
    }
}

fn clamp_f32(field: &'static str, value: &mut f32, min: f32, max: f32, out: &mut Vec<Correction>) {
    // NaN falls to the lower bound
    let clamped = if value.is_nan() { min } else { value.clamp(min, max) };
    if clamped != *value {
        out.push(Correction {
            field,
            rejected: value.to_string(),
            corrected: clamped.to_string(),
        });
        *value = clamped;
    }
}

impl WaveConfig {
    /// Clamp every bounded field into range
    ///
    /// Each correction is logged and returned.
    pub fn validate(&mut self) -> Vec<Correction> {
        let mut out = Vec::new();

        clamp_f32("vote_threshold", &mut self.vote_threshold, 0.1, 1.0, &mut out);
        clamp_u32("max_players_allowed", &mut self.max_players_allowed, 1, u32::MAX, &mut out);
        clamp_u32("minimum_wave_increment", &mut self.minimum_wave_increment, 1, u32::MAX, &mut out);
        clamp_u32("minimum_bots_per_wave", &mut self.minimum_bots_per_wave, 1, u32::MAX, &mut out);
        clamp_u32(
            "max_failures_before_reduction",
            &mut self.max_failures_before_reduction,
            1,
            u32::MAX,
            &mut out,
        );
        clamp_u32("wave_reduction_percentage", &mut self.wave_reduction_percentage, 1, 100, &mut out);
        clamp_u32("base_round_time_seconds", &mut self.base_round_time_seconds, 30, u32::MAX, &mut out);
        clamp_u32(
            "help_message_interval_seconds",
            &mut self.help_message_interval_seconds,
            10,
            u32::MAX,
            &mut out,
        );
        clamp_u32(
            "show_respawn_every_x_deaths",
            &mut self.show_respawn_every_x_deaths,
            1,
            u32::MAX,
            &mut out,
        );
        clamp_f32("spawn_check_delay", &mut self.spawn_check_delay, 0.1, 30.0, &mut out);
        clamp_f32("restart_delay", &mut self.restart_delay, 0.0, 10.0, &mut out);
        clamp_f32("disconnect_check_delay", &mut self.disconnect_check_delay, 0.0, 10.0, &mut out);
        clamp_f32(
            "welcome_message_delay_seconds",
            &mut self.welcome_message_delay_seconds,
            0.0,
            120.0,
            &mut out,
        );

        for correction in &out {
            tracing::warn!(
                field = correction.field,
                rejected = %correction.rejected,
                corrected = %correction.corrected,
                "Config value out of range, corrected"
            );
        }

        out
    }

    /// Whether `candidate` matches a configured, non-empty admin password
    pub fn password_matches(&self, candidate: &str) -> bool {
        !self.admin_password.is_empty() && !candidate.is_empty() && candidate == self.admin_password
    }

    /// Delay between round setup and the spawn check
    pub fn spawn_check_delay(&self) -> Duration {
        Duration::from_secs_f32(self.spawn_check_delay)
    }

    /// Delay before `mp_restartgame` after enabling wave mode
    pub fn restart_delay(&self) -> Duration {
        Duration::from_secs_f32(self.restart_delay)
    }

    /// Delay before recounting humans after a disconnect
    pub fn disconnect_check_delay(&self) -> Duration {
        Duration::from_secs_f32(self.disconnect_check_delay)
    }

    /// Delay before greeting a new player
    pub fn welcome_delay(&self) -> Duration {
        Duration::from_secs_f32(self.welcome_message_delay_seconds)
    }

    /// Interval of the repeating help message
    pub fn help_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.help_message_interval_seconds))
    }
}
