//! Result and statistics formatting

use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use initia_vanity_core::{StatsSnapshot, VanityResult};

use crate::config::OutputFormat;

/// Render results as text blocks or a JSON array; empty input renders as ""
pub fn format_results(results: &[VanityResult], format: OutputFormat) -> Result<String> {
    if results.is_empty() {
        return Ok(String::new());
    }

    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(results).context("error encoding JSON")
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for result in results {
                writeln!(out, "Address: {}", result.address)?;
                writeln!(out, "Private key: {}", result.private_key_hex)?;
                writeln!(out, "Public key: {}", result.public_key)?;

                if let Some(mnemonic) = &result.mnemonic {
                    writeln!(out, "Mnemonic: {}", mnemonic)?;
                    if let Some(path) = &result.derivation_path {
                        writeln!(out, "Derivation path: {}", path)?;
                    }
                    writeln!(out, "Note: Import this mnemonic in your wallet to access this address")?;
                }

                writeln!(out, "---")?;
            }
            Ok(out)
        }
    }
}

pub fn format_stats(stats: StatsSnapshot, duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    let speed = if secs > 0.0 { stats.attempts as f64 / secs } else { 0.0 };

    let mut out = String::from("\nStatistics:\n");
    out.push_str(&format!("Duration: {}\n", format_elapsed(duration)));
    out.push_str(&format!("Total attempts: {}\n", stats.attempts));
    out.push_str(&format!("Addresses found: {}\n", stats.found));
    out.push_str(&format!("Average speed: {:.2} addresses/second\n", speed));

    if stats.found > 0 {
        let per_match = stats.attempts as f64 / stats.found as f64;
        out.push_str(&format!("Attempts per match: {:.2}\n", per_match));
    }

    out
}

/// Whole seconds as `1h2m3s` / `4m5s` / `6s`
fn format_elapsed(duration: Duration) -> String {
    let total = duration.as_secs_f64().round() as u64;
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

pub fn write_output(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("error writing to file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(address: &str, mnemonic: Option<&str>) -> VanityResult {
        VanityResult {
            address: address.to_string(),
            private_key_hex: format!("{}-key", address),
            public_key: format!("{}-pub", address),
            mnemonic: mnemonic.map(str::to_string),
            derivation_path: mnemonic.map(|_| "m/44'/118'/0'/0/0".to_string()),
        }
    }

    #[test]
    fn test_empty_results() {
        assert_eq!(format_results(&[], OutputFormat::Text).unwrap(), "");
        assert_eq!(format_results(&[], OutputFormat::Json).unwrap(), "");
    }

    #[test]
    fn test_text_format() {
        let results = vec![sample("init1test123", None), sample("init1test456", None)];
        let out = format_results(&results, OutputFormat::Text).unwrap();

        assert_eq!(
            out,
            "Address: init1test123\nPrivate key: init1test123-key\nPublic key: init1test123-pub\n---\n\
             Address: init1test456\nPrivate key: init1test456-key\nPublic key: init1test456-pub\n---\n"
        );
    }

    #[test]
    fn test_text_format_mnemonic_block() {
        let out = format_results(&[sample("init1abc", Some("word word"))], OutputFormat::Text).unwrap();
        assert!(out.contains("Mnemonic: word word\n"));
        assert!(out.contains("Derivation path: m/44'/118'/0'/0/0\n"));
        assert!(out.contains("Note: Import this mnemonic"));
        assert!(out.ends_with("---\n"));
    }

    #[test]
    fn test_json_format() {
        let results = vec![sample("init1test123", None), sample("init1test456", Some("word word"))];
        let out = format_results(&results, OutputFormat::Json).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["address"], "init1test123");
        assert_eq!(parsed[0]["private_key"], "init1test123-key");
        assert_eq!(parsed[0]["public_key"], "init1test123-pub");
        assert!(parsed[0].get("mnemonic").is_none());
        assert_eq!(parsed[1]["mnemonic"], "word word");
        assert_eq!(parsed[1]["derivation_path"], "m/44'/118'/0'/0/0");

        let roundtrip: Vec<VanityResult> = serde_json::from_str(&out).unwrap();
        assert_eq!(roundtrip, results);
    }

    #[test]
    fn test_format_stats() {
        let out = format_stats(StatsSnapshot { attempts: 1000, found: 2 }, Duration::from_secs(10));
        assert!(out.contains("Duration: 10s\n"));
        assert!(out.contains("Total attempts: 1000\n"));
        assert!(out.contains("Addresses found: 2\n"));
        assert!(out.contains("Average speed: 100.00 addresses/second\n"));
        assert!(out.contains("Attempts per match: 500.00\n"));

        let none = format_stats(StatsSnapshot { attempts: 10, found: 0 }, Duration::from_secs(1));
        assert!(!none.contains("Attempts per match"));
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(400)), "0s");
        assert_eq!(format_elapsed(Duration::from_secs(65)), "1m5s");
        assert_eq!(format_elapsed(Duration::from_secs(3723)), "1h2m3s");
    }

    #[test]
    fn test_write_output() {
        let path = std::env::temp_dir().join(format!("initia-vanity-test-{}.txt", std::process::id()));
        write_output(&path, "Address: init1abc\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Address: init1abc\n");
        std::fs::remove_file(&path).unwrap();
    }
}
