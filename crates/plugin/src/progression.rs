//! Wave progression arithmetic
//!
//! Pure functions over the config and a few counters; the plugin applies the
//! results and issues the matching server commands.

use botwaves_host::entities::MAX_PLAYERS;

use crate::config::WaveConfig;

/// Largest bot target a command can ask for; no server has more slots
pub const MAX_BOT_TARGET: u32 = MAX_PLAYERS as u32;

/// Result of a round the bots won
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefeatOutcome {
    /// Consecutive losses after this one (0 when a reduction happened)
    pub failures: u32,
    /// Bot target for the next round
    pub bot_count: u32,
    /// `Some((before, after))` when the target was reduced
    pub reduced: Option<(u32, u32)>,
}

/// Bots added after a human win
pub fn victory_increment(config: &WaveConfig, players_at_round_start: u32) -> u32 {
    config.minimum_wave_increment.max(players_at_round_start)
}

/// Bots removed once the failure threshold is reached
///
/// `max(1, round(count * pct / 100))`, rounding half away from zero.
pub fn reduction_amount(bot_count: u32, percentage: u32) -> u32 {
    let exact = f64::from(bot_count) * f64::from(percentage) / 100.0;
    (exact.round() as u32).max(1)
}

/// Apply a loss to the failure counter and bot target
pub fn apply_defeat(config: &WaveConfig, bot_count: u32, failures: u32) -> DefeatOutcome {
    let failures = failures + 1;
    if failures < config.max_failures_before_reduction {
        return DefeatOutcome {
            failures,
            bot_count,
            reduced: None,
        };
    }

    let remove = reduction_amount(bot_count, config.wave_reduction_percentage);
    let reduced = bot_count
        .saturating_sub(remove)
        .max(config.minimum_bots_per_wave);
    DefeatOutcome {
        failures: 0,
        bot_count: reduced,
        reduced: Some((bot_count, reduced)),
    }
}

/// Round length in seconds for `bot_count` bots
pub fn round_time_seconds(config: &WaveConfig, bot_count: u32) -> u32 {
    let extra_bots = bot_count.saturating_sub(config.bot_threshold_for_extra_time);
    config
        .base_round_time_seconds
        .saturating_add(extra_bots.saturating_mul(config.extra_seconds_per_bot))
}

/// Clamp a typed bot count to [`MAX_BOT_TARGET`]
pub fn requested_bots(requested: u32) -> u32 {
    requested.min(MAX_BOT_TARGET)
}

/// Round length as the `mp_roundtime` argument (minutes, two decimals)
pub fn round_time_minutes(seconds: u32) -> String {
    format!("{:.2}", f64::from(seconds) / 60.0)
}

/// Bots the server can hold next to `humans`, always at least one
///
/// One slot stays free for a joining player.
pub fn bot_capacity(max_players: usize, humans: usize) -> u32 {
    let free = max_players.saturating_sub(humans).saturating_sub(1).max(1);
    u32::try_from(free).unwrap_or(u32::MAX)
}
