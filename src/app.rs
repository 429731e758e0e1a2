// Declare modules
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod models;
pub mod patterns;

use anyhow::{Context, Result};
use clap::Parser;
use std::env;

use self::cli::Cli;
use self::config::ConfigProvider;
use self::formatter::OutputGenerator;
use self::patterns::ContentSet;

/// Loads the declaration once and reports on it.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Identify Project Root
    // Content patterns resolve against the working directory, wherever the
    // declaration itself lives.
    let current_dir = env::current_dir().context("Failed to get current directory")?;

    // 3. Locate Declaration
    let provider = ConfigProvider::discover(args.config, &current_dir);
    let origin = provider.source().name();

    // 4. Load & Validate
    let config = provider
        .load_validated()
        .with_context(|| format!("Failed to load configuration from {}", origin))?;

    log::info!(
        "Loaded {} content pattern(s) and {} plugin(s) from {}",
        config.content().len(),
        config.plugins().len(),
        origin
    );

    // 5. Generate Output
    let output = if let Some(paths) = args.check {
        let content_set = ContentSet::new(&config)?;
        let results: Vec<_> = paths
            .into_iter()
            .map(|path| {
                let matched = content_set.matches(&current_dir, &path);
                (path, matched)
            })
            .collect();
        OutputGenerator::generate_check_report(&results)
    } else if args.print {
        OutputGenerator::generate_toml(&config)?
    } else {
        OutputGenerator::generate_summary(&config, &origin)
    };

    // 6. Print to Stdout
    println!("{}", output);

    Ok(())
}
