mod cli;

use subrules::{config, read_subscription, Summary};
use subrules_model::{BalancedSelectorChecker, SubscriptionCodec};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "subrules=trace,subrules_model=trace,subrules_core=trace".to_string()
        } else {
            "subrules=info,subrules_model=info".to_string()
        }
    });

    // Logs go to stderr so `fmt` output on stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check { file } => check_file(&file, cli.config.as_deref()),
        Commands::Fmt {
            file,
            pretty,
            output,
        } => format_file(&file, cli.config.as_deref(), pretty, output.as_deref()),
        Commands::Version => {
            println!("subrules {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn check_file(file: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let codec = SubscriptionCodec::new(config.codec.clone());

    tracing::info!("Checking subscription: {:?}", file);
    let doc = read_subscription(file, &codec)?;
    let summary = Summary::of(&doc, &BalancedSelectorChecker);

    println!("{}", summary);

    if config.check.report_duplicates {
        for duplicate in &summary.duplicates {
            println!("  Duplicate: {}", duplicate);
        }
    }

    if config.check.fail_on_invalid_selectors && !summary.invalid_groups.is_empty() {
        anyhow::bail!(
            "{} group(s) contain invalid selectors",
            summary.invalid_groups.len()
        );
    }

    println!("✓ Subscription is valid");
    Ok(())
}

fn format_file(
    file: &Path,
    config_path: Option<&Path>,
    pretty: bool,
    output: Option<&Path>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    // Override indentation from CLI if specified
    config.codec.pretty |= pretty;

    let codec = SubscriptionCodec::new(config.codec);
    let doc = read_subscription(file, &codec)?;
    let text = codec.stringify(&doc)?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{text}\n"))
                .with_context(|| format!("Failed to write output file: {:?}", path))?;
            tracing::info!("Wrote canonical subscription to {:?}", path);
        }
        None => println!("{}", text),
    }

    Ok(())
}
