//! Initia Vanity CLI
//!
//! Vanity address generator for Initia accounts.

mod config;
mod output;

use std::io::Write;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use initia_vanity_core::{format_difficulty, VanityGenerator};
use tracing::warn;

use crate::config::{Cli, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.quiet { tracing::Level::WARN } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.into()),
        )
        .init();

    run(cli)
}

fn run(mut cli: Cli) -> Result<()> {
    // No pattern: show help
    let Some(pattern) = cli.pattern.take() else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::from_cli(cli, pattern).context("invalid configuration")?;
    let search_config = config.search_config();

    if config.mnemonic.is_some() && !config.use_mnemonic {
        warn!("--mnemonic has no effect without --use-mnemonic");
    }

    let unmatched = search_config.pattern().find_non_bech32_char();
    let generator = Arc::new(VanityGenerator::new(search_config)?);

    if generator.difficulty().is_infinite() {
        match unmatched {
            Some(c) => warn!(
                pattern = %config.pattern,
                character = %c,
                "pattern contains '{}', which never appears at that position of an Initia address; the search will not finish on its own",
                c
            ),
            None => warn!(
                pattern = %config.pattern,
                "pattern can never match an Initia address at that position; the search will not finish on its own"
            ),
        }
    }

    if !config.quiet {
        eprintln!("Searching for pattern: {}", config.pattern);
        eprintln!("Position: {}", config.position);
        eprintln!("Using {} threads", config.threads);
        if config.use_mnemonic {
            if config.mnemonic.is_some() {
                eprintln!("Using provided mnemonic for address generation");
            } else {
                eprintln!("Using new random mnemonic for address generation");
            }
        }
        eprintln!("Difficulty: {} attempts per match", format_difficulty(generator.difficulty()));
        eprintln!();
    }

    {
        let generator = generator.clone();
        ctrlc::set_handler(move || generator.stop())
            .context("failed to install Ctrl-C handler")?;
    }

    if let Some(secs) = config.timeout {
        let generator = generator.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_secs(secs));
            generator.stop();
        });
    }

    let start_time = Instant::now();
    let difficulty = generator.difficulty();
    let quiet = config.quiet;

    generator
        .generate_with_progress(config.threads, |report| {
            if !quiet {
                eprint!("\r{}", report.format(difficulty));
                let _ = std::io::stderr().flush();
            }
        })
        .context("generation failed")?;

    if !quiet {
        eprintln!(); // New line after progress
    }

    let elapsed = start_time.elapsed();
    let results = generator.results();
    if results.len() < config.count {
        warn!(
            found = results.len(),
            requested = config.count,
            "search stopped before all requested addresses were found"
        );
    }

    let rendered = output::format_results(&results, config.format)?;

    match &config.output {
        Some(path) => {
            output::write_output(path, &rendered)?;
            if !quiet {
                eprintln!("Results written to {}", path.display());
            }
        }
        None => println!("{}", rendered),
    }

    if config.stats && !quiet {
        eprint!("{}", output::format_stats(generator.stats(), elapsed));
    }

    Ok(())
}
