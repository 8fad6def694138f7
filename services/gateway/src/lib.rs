//! Slack gateway for coffee pairs
//!
//! Outbound side of the tool: announces each round on Slack and builds the
//! roster from reactions to a kickstart message. The pairing itself lives
//! in `matching-engine`; configuration and history in `persistence`.

pub mod error;
pub mod message;
pub mod models;
pub mod notifier;
pub mod rate_limit;
pub mod round;
pub mod setup;
pub mod slack;

pub use error::GatewayError;
pub use notifier::{notifier_from_config, Notifier};
pub use round::{execute_round, run_round, Clock, RoundOptions, RoundReport, RoundStatus};
pub use setup::setup_from_reactions;
pub use slack::SlackClient;
