//! Event system types

/// Result from an event or command handler determining how the host should proceed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum HookResult {
    /// Continue processing, call other listeners and fire the event normally
    #[default]
    Continue = 0,

    /// Result changed (reserved for future use)
    Changed = 1,

    /// Block original event from firing, but continue calling other hooks
    Handled = 3,

    /// Block original event AND stop processing other hooks
    Stop = 4,
}

impl HookResult {
    /// Returns true if the host should suppress its default behavior
    pub fn blocks(&self) -> bool {
        *self >= Self::Handled
    }
}
