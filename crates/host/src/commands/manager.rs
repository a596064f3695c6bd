//! Command registry - registration and lookup
//!
//! The registry maps console names (`css_wave`) and chat short names
//! (`wave`, reached via `!wave` or `/wave`) to a plugin-defined command id.
//! Dispatching on the id is left to the plugin.

use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle for a registered command
    pub struct CommandKey;
}

/// CounterStrikeSharp-compatible command prefix
pub const CSS_PREFIX: &str = "css_";

/// Registered command information
#[derive(Debug, Clone)]
pub struct CommandEntry<C> {
    /// Full command name (e.g., "css_wave")
    pub name: String,
    /// Short name without prefix (e.g., "wave")
    pub short_name: String,
    /// Command description
    pub description: String,
    /// Plugin-side command id
    pub id: C,
    /// Only callable by a player (not from the server console)
    pub client_only: bool,
}

/// Registry of console/chat commands
#[derive(Debug)]
pub struct CommandRegistry<C> {
    /// Commands indexed by key
    commands: SlotMap<CommandKey, CommandEntry<C>>,

    /// Lookup by full command name (case-insensitive, lowercase)
    by_name: HashMap<String, CommandKey>,

    /// Lookup by short name for chat commands (case-insensitive, lowercase)
    by_short_name: HashMap<String, CommandKey>,
}

impl<C> Default for CommandRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> CommandRegistry<C> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            commands: SlotMap::with_key(),
            by_name: HashMap::new(),
            by_short_name: HashMap::new(),
        }
    }

    /// Register a command
    ///
    /// Returns `None` if a command with the same name is already registered.
    pub fn register(
        &mut self,
        name: &str,
        description: &str,
        client_only: bool,
        id: C,
    ) -> Option<CommandKey> {
        let name_lower = name.to_lowercase();

        if self.by_name.contains_key(&name_lower) {
            tracing::warn!("Command '{}' already registered", name);
            return None;
        }

        let short_name = name_lower
            .strip_prefix(CSS_PREFIX)
            .unwrap_or(&name_lower)
            .to_string();

        let entry = CommandEntry {
            name: name.to_string(),
            short_name: short_name.clone(),
            description: description.to_string(),
            id,
            client_only,
        };

        let key = self.commands.insert(entry);
        self.by_name.insert(name_lower.clone(), key);

        // Only register short name if it's different from the full name
        if short_name != name_lower {
            self.by_short_name.insert(short_name, key);
        }

        tracing::debug!("Registered command: {}", name);
        Some(key)
    }

    /// Unregister a command by key
    pub fn unregister(&mut self, key: CommandKey) -> bool {
        if let Some(entry) = self.commands.remove(key) {
            self.by_name.remove(&entry.name.to_lowercase());
            self.by_short_name.remove(&entry.short_name);
            tracing::debug!("Unregistered command: {}", entry.name);
            true
        } else {
            false
        }
    }

    /// Find command by full console name
    pub fn find_by_name(&self, name: &str) -> Option<&CommandEntry<C>> {
        self.by_name
            .get(&name.to_lowercase())
            .and_then(|key| self.commands.get(*key))
    }

    /// Find command by short name (for chat commands)
    pub fn find_by_short_name(&self, name: &str) -> Option<&CommandEntry<C>> {
        self.by_short_name
            .get(&name.to_lowercase())
            .and_then(|key| self.commands.get(*key))
    }

    /// Iterate registered commands
    pub fn iter(&self) -> impl Iterator<Item = &CommandEntry<C>> {
        self.commands.values()
    }

    /// Number of registered commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
