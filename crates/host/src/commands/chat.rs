//! Chat command triggers
//!
//! A chat line that starts with a trigger character is a command: `!wave`
//! is echoed to chat as usual, `/wave` is hidden.

use super::info::{CommandContext, CommandInfo};
use crate::entities::PlayerInfo;

/// Default public chat trigger
pub const DEFAULT_PUBLIC_TRIGGER: char = '!';

/// Default silent chat trigger
pub const DEFAULT_SILENT_TRIGGER: char = '/';

/// Chat trigger configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatTriggers {
    /// Public trigger character (message shown in chat)
    pub public: char,
    /// Silent trigger character (message hidden from chat)
    pub silent: char,
}

impl Default for ChatTriggers {
    fn default() -> Self {
        Self {
            public: DEFAULT_PUBLIC_TRIGGER,
            silent: DEFAULT_SILENT_TRIGGER,
        }
    }
}

impl ChatTriggers {
    /// Check if a message starts with a chat trigger
    ///
    /// Returns (is_silent, command_text) if a trigger is found
    pub fn check<'a>(&self, message: &'a str) -> Option<(bool, &'a str)> {
        let message = message.trim_start();
        let first_char = message.chars().next()?;

        if first_char == self.public {
            Some((false, &message[first_char.len_utf8()..]))
        } else if first_char == self.silent {
            Some((true, &message[first_char.len_utf8()..]))
        } else {
            None
        }
    }

    /// Turn a chat line into a command invocation
    ///
    /// The returned info carries the short command name at index 0
    /// (`wave`, not `css_wave`). Returns `None` for ordinary chat or a bare
    /// trigger character.
    pub fn parse(&self, message: &str, player: Option<PlayerInfo>) -> Option<CommandInfo> {
        let (silent, text) = self.check(message)?;
        let (name, mut args) = parse_chat_command(text);
        if name.is_empty() {
            return None;
        }
        args[0] = name;

        let context = if silent {
            CommandContext::ChatSilent
        } else {
            CommandContext::ChatPublic
        };
        Some(CommandInfo::new(args, player, context))
    }
}

/// Parse a chat command into lowercase name and arguments
pub fn parse_chat_command(text: &str) -> (String, Vec<String>) {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let command_name = parts.first().map(|s| s.to_lowercase()).unwrap_or_default();
    let args: Vec<String> = parts.iter().map(|s| s.to_string()).collect();
    (command_name, args)
}
