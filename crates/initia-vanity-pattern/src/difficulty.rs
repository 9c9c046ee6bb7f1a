//! Difficulty calculation for vanity patterns

use crate::{Pattern, Position, BECH32_CHARSET, MATCH_PREFIX};

/// Bech32 characters after `init1` (32 payload + 6 checksum)
const ADDRESS_DATA_LEN: usize = 38;

/// Calculate the difficulty (expected number of attempts) for a pattern.
///
/// Every offset the position allows is scored against the fixed `init1`
/// prefix and the random data part, so an `any` pattern that overlaps the
/// prefix (`nit`, `t1`) is cheap rather than impossible.
///
/// Returns `f64::INFINITY` when the pattern can never match.
pub fn calculate_difficulty(pattern: &Pattern) -> f64 {
    let needle: Vec<char> = if pattern.case_sensitive {
        pattern.value.chars().collect()
    } else {
        pattern.value.to_ascii_lowercase().chars().collect()
    };
    let address_len = MATCH_PREFIX.len() + ADDRESS_DATA_LEN;

    if needle.is_empty() || needle.len() > address_len {
        return f64::INFINITY;
    }

    let last_offset = address_len - needle.len();
    let offsets = match pattern.position {
        Position::Start => MATCH_PREFIX.len()..=MATCH_PREFIX.len(),
        Position::End => last_offset..=last_offset,
        Position::Any => 0..=last_offset,
    };

    // Union bound over offsets; close enough for an estimate
    let probability: f64 = offsets.map(|offset| window_probability(&needle, offset)).sum();
    if probability > 0.0 {
        (1.0 / probability).max(1.0)
    } else {
        f64::INFINITY
    }
}

/// Chance that `needle` sits at `offset` of a random address
fn window_probability(needle: &[char], offset: usize) -> f64 {
    let prefix: Vec<char> = MATCH_PREFIX.chars().collect();
    let address_len = prefix.len() + ADDRESS_DATA_LEN;
    let mut random_chars = 0;

    for (i, &c) in needle.iter().enumerate() {
        let at = offset + i;
        if at >= address_len {
            return 0.0;
        }
        match prefix.get(at) {
            Some(&fixed) if fixed != c => return 0.0,
            Some(_) => {}
            None if BECH32_CHARSET.contains(c) => random_chars += 1,
            None => return 0.0,
        }
    }

    (BECH32_CHARSET.len() as f64).powi(-random_chars)
}

/// Format difficulty as human-readable string
pub fn format_difficulty(difficulty: f64) -> String {
    if difficulty.is_infinite() {
        "impossible".to_string()
    } else if difficulty >= 1e15 {
        format!("{:.2}P", difficulty / 1e15)
    } else if difficulty >= 1e12 {
        format!("{:.2}T", difficulty / 1e12)
    } else if difficulty >= 1e9 {
        format!("{:.2}G", difficulty / 1e9)
    } else if difficulty >= 1e6 {
        format!("{:.2}M", difficulty / 1e6)
    } else if difficulty >= 1e3 {
        format!("{:.2}K", difficulty / 1e3)
    } else {
        format!("{:.0}", difficulty)
    }
}
