//! Plugin error types

use botwaves_host::{ConfigError, HostError};

/// Errors raised inside wave-mode handlers
///
/// None of these reach the host: the public entry points log them and
/// carry on.
#[derive(Debug, thiserror::Error)]
pub enum WaveError {
    /// A host request failed where the handler cannot continue without it
    #[error("host error: {0}")]
    Host(#[from] HostError),

    /// The config file could not be read or written
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// A handler needed a player that is no longer on the server
    #[error("player {slot} is no longer connected")]
    PlayerGone {
        /// Slot the player occupied
        slot: i32,
    },

    /// A command that only players can run came from the server console
    #[error("'{0}' can only be used by a player")]
    ClientOnly(String),
}

/// Result type for wave-mode handlers
pub type WaveResult<T> = Result<T, WaveError>;
