//! Error types for host operations

/// Error returned by a [`Host`](crate::Host) when a request cannot be carried out
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The host refused or failed to execute a console command
    #[error("Command rejected: {0}")]
    CommandRejected(String),

    /// No player occupies the given slot
    #[error("Player not found in slot {0}")]
    PlayerNotFound(i32),

    /// The player exists but the request does not apply to them
    #[error("Invalid player in slot {slot}: {reason}")]
    InvalidPlayer {
        /// Player slot
        slot: i32,
        /// Why the request was refused
        reason: String,
    },

    /// The host does not support this operation
    #[error("Operation not supported by host: {0}")]
    Unsupported(&'static str),
}
