//! Live search statistics

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Thread-safe search counters
#[derive(Debug, Default)]
pub struct SearchStats {
    /// Completed attempts (derivations that reached the matcher)
    attempts: AtomicU64,
    /// Results appended to the store
    found: AtomicU64,
    /// Set once when workers are spawned
    start_time: OnceLock<Instant>,
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub attempts: u64,
    pub found: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock; later calls keep the first instant
    pub fn start(&self) {
        let _ = self.start_time.set(Instant::now());
    }

    pub fn record_attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_found(&self) {
        self.found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    pub fn found(&self) -> u64 {
        self.found.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            attempts: self.attempts(),
            found: self.found(),
        }
    }

    /// Time since `start`, zero if the search never started
    pub fn elapsed(&self) -> Duration {
        self.start_time.get().map(Instant::elapsed).unwrap_or_default()
    }

    /// Get attempts per second
    pub fn attempts_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.attempts() as f64 / elapsed
        } else {
            0.0
        }
    }

    pub fn report(&self, target: usize) -> ProgressReport {
        ProgressReport {
            attempts: self.attempts(),
            found: self.found(),
            target: target as u64,
            elapsed: self.elapsed(),
            attempts_per_second: self.attempts_per_second(),
        }
    }
}

/// Sampled progress delivered to observers on each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressReport {
    pub attempts: u64,
    pub found: u64,
    pub target: u64,
    pub elapsed: Duration,
    pub attempts_per_second: f64,
}

impl ProgressReport {
    /// Get formatted progress line
    pub fn format(&self, difficulty: f64) -> String {
        let remaining = self.target.saturating_sub(self.found) as f64;

        let eta = if difficulty.is_finite() && self.attempts_per_second > 0.0 {
            remaining * difficulty / self.attempts_per_second
        } else {
            f64::INFINITY
        };

        format!(
            "[{:.2} Kkey/s][Found {}/{}][Total {}][ETA {}]",
            self.attempts_per_second / 1_000.0,
            self.found,
            self.target,
            format_keys(self.attempts),
            format_duration(eta)
        )
    }
}

fn format_keys(keys: u64) -> String {
    if keys >= 1_000_000_000_000 {
        format!("{:.2}T", keys as f64 / 1e12)
    } else if keys >= 1_000_000_000 {
        format!("{:.2}G", keys as f64 / 1e9)
    } else if keys >= 1_000_000 {
        format!("{:.2}M", keys as f64 / 1e6)
    } else if keys >= 1000 {
        format!("{:.2}K", keys as f64 / 1e3)
    } else {
        format!("{}", keys)
    }
}

fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "never".to_string();
    }
    if seconds <= 0.0 {
        return "now".to_string();
    }
    if seconds < 1.0 {
        format!("{:.0}ms", seconds * 1000.0)
    } else if seconds < 60.0 {
        format!("{:.0}s", seconds)
    } else if seconds < 3600.0 {
        format!("{:.0}m", seconds / 60.0)
    } else if seconds < 86400.0 {
        format!("{:.1}h", seconds / 3600.0)
    } else if seconds < 86400.0 * 365.0 {
        format!("{:.1}d", seconds / 86400.0)
    } else {
        format!("{:.1}y", seconds / (86400.0 * 365.0))
    }
}
