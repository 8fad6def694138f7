//! Persistence for coffee pairs
//!
//! Everything that lives on disk between rounds: the JSON configuration
//! (participants, pair history, delivery settings), the round schedule
//! derived from it, and the prompt quotes file.
//!
//! The configuration is written back only after a successful round, with
//! an atomic tmp-and-rename so a crash never leaves a truncated file.

pub mod config;
pub mod schedule;
pub mod quotes;

pub use config::{ConfigError, ConfigStore, PairingConfig};
pub use quotes::{QuoteBook, QuoteError};
pub use schedule::{Schedule, ScheduleError, ScheduledRound};
