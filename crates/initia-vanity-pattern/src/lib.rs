//! Initia Vanity Pattern Matching
//!
//! Positions: start (after `init1`), end, any.

mod matcher;
mod difficulty;

pub use matcher::{is_match, Pattern, PatternError, PatternMatcher, Position, BECH32_CHARSET, MATCH_PREFIX};
pub use difficulty::{calculate_difficulty, format_difficulty};
