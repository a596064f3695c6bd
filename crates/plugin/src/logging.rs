//! Tracing subscriber setup
//!
//! Log targets follow the plugin's areas so they can be filtered
//! individually, e.g. `RUST_LOG=botwaves=info,botwaves::vote=debug`.

use tracing_subscriber::EnvFilter;

/// Target for enabling/disabling wave mode and bot count changes
pub const WAVE: &str = "botwaves::wave";
/// Target for round setup and outcomes
pub const ROUND: &str = "botwaves::round";
/// Target for spawn checks and respawn compensation
pub const SPAWN: &str = "botwaves::spawn";
/// Target for votes
pub const VOTE: &str = "botwaves::vote";
/// Target for team enforcement
pub const TEAM: &str = "botwaves::team";
/// Target for connect/disconnect and other player events
pub const EVENT: &str = "botwaves::event";
/// Target for console/chat commands
pub const CMD: &str = "botwaves::cmd";
/// Target for cvar snapshot/restore
pub const CVAR: &str = "botwaves::cvar";
/// Target for console commands sent to the server
pub const SERVER: &str = "botwaves::server";

/// Install a global fmt subscriber
///
/// `RUST_LOG` wins when set; otherwise `debug_mode` picks between `debug`
/// and `info` for the plugin's own targets. If the host already installed a
/// subscriber this is a no-op.
pub fn init(debug_mode: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(debug_mode))
        .with_target(true)
        .try_init();
}

fn filter(debug_mode: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(debug_mode)))
}

fn default_directive(debug_mode: bool) -> &'static str {
    if debug_mode {
        "info,botwaves=debug,botwaves_host=debug"
    } else {
        "info"
    }
}
