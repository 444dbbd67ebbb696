//! ssdtag CLI - Extract record sheet metadata and maintain annotations.

use anyhow::Context;
use clap::Parser;
use ssdtag_cli::commands;
use ssdtag_cli::{Cli, CliError, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config.validate()?;
    if cli.dry_run {
        config.processor.dry_run = true;
    }

    // Determine output format and color
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let result: Result<(), CliError> = match cli.command {
        Command::Parse(args) => commands::execute_parse(args, &config, &formatter),
        Command::Merge(args) => commands::execute_merge(args, &config, &formatter),
        Command::Check(args) => commands::execute_check(args, &formatter),
        Command::Describe(args) => commands::execute_describe(args, &config, &formatter),
        Command::Refresh(args) => commands::execute_refresh(args, &config, &formatter),
        Command::Composites(args) => commands::execute_composites(args, &config, &formatter),
        Command::Config => commands::execute_config(&config),
    };
    Ok(result?)
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
