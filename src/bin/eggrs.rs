// Eggrs CLI
// Listens to the terminal and fires easter eggs when their key sequence is typed

#![cfg_attr(not(feature = "cli"), allow(dead_code))]

#[cfg(feature = "cli")]
use std::io::Write;
use std::path::PathBuf;

#[cfg(feature = "cli")]
use anyhow::Context;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
use eggrs::terminal;
#[cfg(feature = "cli")]
use eggrs_core::{all_named_keys, Config};

/// Terminal easter-egg listener
#[cfg_attr(feature = "cli", derive(Parser, Debug))]
#[cfg_attr(feature = "cli", command(name = "eggrs"))]
#[cfg_attr(feature = "cli", command(version, long_about = None))]
#[cfg_attr(feature = "cli", command(about = "Fire easter eggs on typed key sequences"))]
struct Args {
    /// TOML pattern file (default: ~/.config/eggrs/eggs.toml, then built-in patterns)
    #[cfg_attr(feature = "cli", arg(short, long, value_name = "CONFIG"))]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[cfg_attr(feature = "cli", arg(short, long))]
    verbose: bool,

    /// Validate config and exit
    #[cfg_attr(feature = "cli", arg(long))]
    check_config: bool,

    /// List key names usable in patterns
    #[cfg_attr(feature = "cli", arg(long))]
    list_keys: bool,
}

#[cfg(feature = "cli")]
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        // Raw mode needs an explicit carriage return
        .format(|buf, record| {
            writeln!(buf, "[{} {}] {}\r", record.level(), record.target(), record.args())
        })
        .init();
}

/// Resolve config with precedence: --config > default path > built-in
#[cfg(feature = "cli")]
fn load_config(args: &Args) -> anyhow::Result<Config> {
    match &args.config {
        Some(path) => Config::from_toml_path(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Config::load_default().context("failed to load default config"),
    }
}

#[cfg(feature = "cli")]
fn list_keys() {
    println!("{} named keys:", all_named_keys().len());
    for (name, code) in all_named_keys() {
        println!("  {:>3}  {}", code, name);
    }
}

#[cfg(feature = "cli")]
fn check_config(config: &Config) -> anyhow::Result<()> {
    // Building the registry also catches duplicate patterns
    terminal::build_registry(config, &terminal::Banner::new())?;
    match &config.source_path {
        Some(path) => println!("Configuration {} is valid", path.display()),
        None => println!("Built-in configuration is valid"),
    }
    for entry in &config.patterns {
        println!(
            "  - {}: {} ({}, {} symbols)",
            entry.name,
            entry.target,
            entry.policy,
            entry.symbols.kind()
        );
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.list_keys {
        list_keys();
        return Ok(());
    }

    let config = load_config(&args)?;

    if args.check_config {
        return check_config(&config);
    }

    log::debug!("Listening for {} pattern(s)", config.patterns.len());
    terminal::run(&config)
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("Error: eggrs binary requires the 'cli' feature to be enabled.");
    eprintln!("Please build with: cargo build --release --features cli --bin eggrs");
    std::process::exit(1);
}
