//! Types library for coffee pairs
//!
//! Core type definitions shared by the matcher, the configuration store
//! and the Slack gateway.
//!
//! # Modules
//! - `ids`: Participant identifiers and participant records
//! - `roster`: Validated roster of participants for a round
//! - `pair`: Unordered pairs and the pairing history
//! - `matching`: The pairs produced by one round
//! - `errors`: Validation errors

// Public modules
pub mod ids;
pub mod roster;
pub mod pair;
pub mod matching;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "0.1.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::roster::*;
    pub use crate::pair::*;
    pub use crate::matching::*;
    pub use crate::errors::*;
}
