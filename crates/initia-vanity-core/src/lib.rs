//! Initia Vanity Core Engine
//!
//! Multi-threaded search for `init1...` addresses matching a pattern.

mod error;
mod search;
mod stats;
mod store;

pub use error::SearchError;
pub use search::{EngineState, SearchConfig, VanityGenerator, VanityResult};
pub use stats::{ProgressReport, SearchStats, StatsSnapshot};
pub use store::{Insertion, ResultStore};

// Re-exports for convenience
pub use initia_vanity_keys::{DeriveError, DerivedKey, Deriver, DeriverKind, HdPath, HRP};
pub use initia_vanity_pattern::{
    calculate_difficulty, format_difficulty, is_match, Pattern, PatternError, PatternMatcher, Position,
};
