//! Console and Chat Command System
//!
//! Provides unified command handling for both console and chat commands.
//!
//! # Prefixes
//!
//! - Commands registered with the `css_` prefix auto-register as chat commands
//! - Example: `css_wave` can be called as `!wave` or `/wave` in chat
//!
//! # Example
//!
//! ```ignore
//! let mut registry = CommandRegistry::new();
//! registry.register("css_wave", "Toggle wave mode", true, MyCommand::Wave);
//!
//! let info = ChatTriggers::default().parse("!wave 10", Some(player)).unwrap();
//! let id = registry.find_by_short_name(info.command_name()).map(|e| e.id);
//! ```

pub mod chat;
mod info;
mod manager;

pub use chat::{ChatTriggers, DEFAULT_PUBLIC_TRIGGER, DEFAULT_SILENT_TRIGGER};
pub use info::{CommandContext, CommandInfo};
pub use manager::{CommandEntry, CommandKey, CommandRegistry, CSS_PREFIX};
