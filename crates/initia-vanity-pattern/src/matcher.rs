//! Pattern matching implementation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed address prefix a `start` pattern must follow
pub const MATCH_PREFIX: &str = "init1";

/// Characters a bech32 data part can contain
pub const BECH32_CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern cannot be empty")]
    EmptyPattern,
    #[error("invalid position '{0}': must be one of: start, end, any")]
    InvalidPosition(String),
}

/// Where in the address the pattern has to appear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Right after the `init1` prefix
    Start,
    /// At the end of the address
    #[default]
    End,
    /// Anywhere in the address
    Any,
}

impl FromStr for Position {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Position::Start),
            "end" => Ok(Position::End),
            "any" => Ok(Position::Any),
            _ => Err(PatternError::InvalidPosition(s.to_string())),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Start => write!(f, "start"),
            Position::End => write!(f, "end"),
            Position::Any => write!(f, "any"),
        }
    }
}

/// A pattern to search for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    /// The pattern string to match
    pub value: String,
    /// Where the pattern must appear
    pub position: Position,
    /// Compare without lowercasing
    pub case_sensitive: bool,
}

impl Pattern {
    pub fn new(value: impl Into<String>, position: Position, case_sensitive: bool) -> Self {
        Self {
            value: value.into(),
            position,
            case_sensitive,
        }
    }

    /// Reject patterns that can never be searched for
    pub fn validate(&self) -> Result<(), PatternError> {
        if self.value.is_empty() {
            return Err(PatternError::EmptyPattern);
        }
        Ok(())
    }

    /// First character outside the bech32 data alphabet at the compared case.
    ///
    /// The data part after `init1` is lowercase bech32, so `1`, `b`, `i`, `o`
    /// and any uppercase letter in a case-sensitive pattern can only match
    /// inside the prefix itself.
    pub fn find_non_bech32_char(&self) -> Option<char> {
        self.value.chars().find(|&c| {
            let c = if self.case_sensitive { c } else { c.to_ascii_lowercase() };
            !BECH32_CHARSET.contains(c)
        })
    }
}

/// Pattern match against an address.
///
/// With `case_sensitive == false` both sides are ASCII-lowercased first.
pub fn is_match(address: &str, pattern: &str, position: Position, case_sensitive: bool) -> bool {
    if case_sensitive {
        check_position(address, pattern, position)
    } else {
        check_position(
            &address.to_ascii_lowercase(),
            &pattern.to_ascii_lowercase(),
            position,
        )
    }
}

fn check_position(address: &str, pattern: &str, position: Position) -> bool {
    match position {
        Position::Start => address
            .strip_prefix(MATCH_PREFIX)
            .map_or(false, |rest| rest.starts_with(pattern)),
        Position::End => address.ends_with(pattern),
        Position::Any => address.contains(pattern),
    }
}

/// Pattern matcher holding the pattern pre-normalized for the hot loop
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: Pattern,
    needle: String,
}

impl PatternMatcher {
    pub fn new(pattern: Pattern) -> Self {
        let needle = if pattern.case_sensitive {
            pattern.value.clone()
        } else {
            pattern.value.to_ascii_lowercase()
        };
        Self { pattern, needle }
    }

    /// Check if address matches the pattern
    pub fn matches(&self, address: &str) -> bool {
        if self.pattern.case_sensitive {
            check_position(address, &self.needle, self.pattern.position)
        } else {
            check_position(&address.to_ascii_lowercase(), &self.needle, self.pattern.position)
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}
