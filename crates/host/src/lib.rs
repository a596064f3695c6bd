//! Bot Waves - Host Abstraction
//!
//! This crate contains everything a game-server plugin needs from its host
//! without depending on any particular server SDK:
//!
//! - [`events`] - Typed game events and the [`GameEvent`] tagged union
//! - [`host`] - The [`Host`] trait (console commands, chat, teams, players)
//! - [`scheduler`] - Deferred work as data, driven by the host's frame loop
//! - [`commands`] - Console and chat command parsing and registry
//! - [`config`] - Plugin configuration files (JSON or TOML)
//! - [`recording`] - An in-memory host that records everything it is asked to do
//!
//! A host adapter translates its SDK callbacks into [`GameEvent`]s and command
//! invocations, implements [`Host`] on top of its server API, and calls the
//! plugin's frame function once per tick.

pub mod commands;
pub mod config;
pub mod entities;
pub mod error;
pub mod events;
pub mod host;
pub mod recording;
pub mod scheduler;
pub mod tasks;
pub mod timers;

// Re-export commonly used items
pub use commands::{CommandContext, CommandInfo, CommandKey, CommandRegistry, CSS_PREFIX};
pub use config::{ConfigError, ConfigFormat, ConfigResult, PluginConfig};
pub use entities::{PlayerConnectedState, PlayerInfo, Team};
pub use error::HostError;
pub use events::{EventValue, GameEvent, HookResult, RawEvent};
pub use host::Host;
pub use recording::RecordingHost;
pub use scheduler::{Scheduler, TaskScheduler};
pub use timers::{TimerFlags, TimerKey};
