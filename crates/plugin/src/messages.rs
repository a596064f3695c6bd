//! Chat messages
//!
//! Every line starts with [`PREFIX`].

use crate::state::Difficulty;

/// Prefix of every chat line
pub const PREFIX: &str = "[Bot Waves]";

fn line(text: impl AsRef<str>) -> String {
    format!("{} {}", PREFIX, text.as_ref())
}

pub fn enabled(bots: u32) -> String {
    line(format!("Wave mode enabled! Starting with {} bot(s).", bots))
}

pub fn disabled() -> String {
    line("Wave mode disabled.")
}

pub fn admin_start(bots: u32) -> String {
    line(format!("Admin started wave mode with {} bot(s). Player limit lifted.", bots))
}

pub fn invalid_number() -> String {
    line("Please use a positive number: !wave <bots>")
}

pub fn wrong_password() -> String {
    line("Wrong password.")
}

pub fn too_many_players(max: u32) -> String {
    line(format!("Wave mode is limited to {} players.", max))
}

pub fn player_limit_exceeded() -> String {
    line("Too many players joined, wave mode turned off.")
}

pub fn need_wave_active() -> String {
    line("Wave mode is not active. Type !wave to start it.")
}

pub fn already_voted() -> String {
    line("You already voted.")
}

pub fn vote_cast(name: &str, current: usize, needed: usize, enabling: bool) -> String {
    let action = if enabling { "enable" } else { "disable" };
    line(format!(
        "{} voted to {} wave mode ({}/{}).",
        name, action, current, needed
    ))
}

pub fn vote_passed(enabling: bool) -> String {
    if enabling {
        line("Vote passed! Wave mode enabled.")
    } else {
        line("Vote passed! Wave mode disabled.")
    }
}

pub fn bot_count_changed(bots: u32) -> String {
    line(format!("Bot count changed to {}.", bots))
}

pub fn difficulty_changed(difficulty: Difficulty) -> String {
    match difficulty {
        Difficulty::Easy => line("Difficulty: Easy. Bots are armed with knives only."),
        Difficulty::Hard => line("Difficulty: Hard. Bots are fully armed."),
    }
}

pub fn round_start(bots: u32, difficulty: Difficulty) -> String {
    line(format!("Wave of {} bot(s) incoming! Difficulty: {}", bots, difficulty))
}

pub fn bots_capped(spawned: u32, wanted: u32) -> String {
    line(format!(
        "Server is full: spawning {} of {} bots.",
        spawned, wanted
    ))
}

pub fn victory(increment: u32, next: u32) -> String {
    line(format!("Wave cleared! +{} bot(s), next wave: {}.", increment, next))
}

pub fn defeat(failures: u32, max_failures: u32) -> String {
    line(format!("Wave lost ({}/{}). Try again!", failures, max_failures))
}

pub fn reduced(before: u32, after: u32) -> String {
    line(format!("Too many losses, bots reduced from {} to {}.", before, after))
}

pub fn limited_spawns(spawned: u32, target: u32) -> String {
    line(format!(
        "Only {} of {} bots could spawn. Bots respawn until {} are killed.",
        spawned, target, target
    ))
}

pub fn respawns_left(remaining: u32) -> String {
    line(format!("{} bot respawn(s) left.", remaining))
}

pub fn no_more_respawns() -> String {
    line("No more respawns, finish them off!")
}

pub fn help() -> Vec<String> {
    vec![
        line("Type !wave to vote for wave mode (humans vs. waves of bots)."),
        line("Type !wave <bots> to start at a custom wave, !dif to switch difficulty."),
        line("Type !wave off to turn it off again."),
    ]
}

pub fn welcome(name: &str) -> String {
    line(format!("Welcome {}! Type !wave to fight waves of bots.", name))
}

pub fn filler_bots(enabled: bool) -> String {
    if enabled {
        line("Filler bots enabled.")
    } else {
        line("Filler bots disabled.")
    }
}

pub fn not_while_active() -> String {
    line("Not available while wave mode is active.")
}

pub fn not_active() -> String {
    line("Wave mode is not active.")
}

pub fn players_only() -> String {
    line("This command can only be used by players.")
}
