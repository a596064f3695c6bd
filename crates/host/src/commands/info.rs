//! A single command invocation

use crate::entities::PlayerInfo;

/// Where a command line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandContext {
    /// Server console or rcon, no player attached
    ServerConsole,
    /// A player's console
    ClientConsole,
    /// `!cmd` in chat; the line stays visible
    ChatPublic,
    /// `/cmd` in chat; the line is swallowed
    ChatSilent,
}

impl CommandContext {
    /// Typed in chat rather than a console
    pub fn is_chat(&self) -> bool {
        matches!(self, Self::ChatPublic | Self::ChatSilent)
    }

    pub fn is_silent(&self) -> bool {
        *self == Self::ChatSilent
    }
}

/// Tokenized command line plus who sent it
#[derive(Debug, Clone)]
pub struct CommandInfo {
    // args[0] is the command name
    args: Vec<String>,
    player: Option<PlayerInfo>,
    context: CommandContext,
}

impl CommandInfo {
    pub fn new(args: Vec<String>, player: Option<PlayerInfo>, context: CommandContext) -> Self {
        Self {
            args,
            player,
            context,
        }
    }

    /// Split `line` on whitespace, keeping `"quoted text"` as one argument
    pub fn parse(line: &str, player: Option<PlayerInfo>, context: CommandContext) -> Self {
        Self::new(tokenize(line), player, context)
    }

    /// Argument `index`, or `""` past the end
    pub fn arg(&self, index: usize) -> &str {
        self.args.get(index).map(String::as_str).unwrap_or_default()
    }

    pub fn command_name(&self) -> &str {
        self.arg(0)
    }

    /// Everything after the command name, space-joined
    pub fn arg_string(&self) -> String {
        self.args.get(1..).map(|rest| rest.join(" ")).unwrap_or_default()
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The sending player; `None` for the server console
    pub fn player(&self) -> Option<&PlayerInfo> {
        self.player.as_ref()
    }

    pub fn context(&self) -> CommandContext {
        self.context
    }
}

fn tokenize(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    // `""` is an argument too, so track "started" apart from `current`
    let mut started = false;

    for c in line.chars() {
        if c == '"' {
            quoted = !quoted;
            started = true;
        } else if c.is_whitespace() && !quoted {
            if started {
                args.push(std::mem::take(&mut current));
                started = false;
            }
        } else {
            current.push(c);
            started = true;
        }
    }
    if started {
        args.push(current);
    }
    args
}
