//! Bot Waves
//!
//! A cooperative survival mode for a Counter-Strike server: humans are put
//! on the Terrorist side, bots on the Counter-Terrorist side, and the number
//! of bots grows every round the humans win and shrinks after repeated
//! losses.
//!
//! - [`config`] - The config file and its limits
//! - [`state`] - Wave state, difficulty and respawn bookkeeping
//! - [`progression`] - Bot count and round time arithmetic
//! - [`vote`] - Vote counting
//! - [`cvars`] - Saving and restoring server cvars
//! - [`server`] - The console commands sent to the server
//! - [`plugin`] - [`BotWaves`], the object a host drives
//!
//! # Example
//!
//! ```ignore
//! use botwaves::BotWaves;
//!
//! let mut waves = BotWaves::load(base_dir)?;
//! waves.on_load(&mut host);
//!
//! // From the host's callbacks:
//! waves.handle_event(&mut host, event);
//! waves.handle_chat(&mut host, slot, "!wave");
//! waves.run_frame(&mut host, elapsed);
//! ```

pub mod config;
pub mod cvars;
pub mod error;
pub mod logging;
pub mod messages;
pub mod plugin;
pub mod progression;
pub mod server;
pub mod state;
pub mod tasks;
pub mod vote;

pub use config::WaveConfig;
pub use error::{WaveError, WaveResult};
pub use plugin::{BotWaves, WaveCommand};
pub use state::{Difficulty, Respawn, RoundPhase, WaveState};
pub use tasks::WaveTask;
