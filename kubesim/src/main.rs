use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use config::{Config, Environment};
use console::{Console, Entry, EntryKind, BANNER};
use resources::{config::SimConfig, store::ResourceStore};
use termion::{color, style};
use tracing_subscriber::EnvFilter;

mod apply;
mod command;
mod console;
mod delete;
mod describe;
mod error;
mod get;
mod help;
mod table;
#[cfg(test)]
mod testing;
mod utils;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file, ignored if missing
    #[clap(long, parse(from_os_str), default_value = "/etc/kubesim/config.yaml")]
    config: PathBuf,
    /// Seed for the generated cluster
    #[clap(long)]
    seed: Option<u64>,
    /// Load the cluster from a YAML snapshot instead of generating one
    #[clap(long, parse(from_os_str))]
    fixture: Option<PathBuf>,
    /// Log level: trace, debug, info, warn or error
    #[clap(long)]
    log_level: Option<String>,
    /// Disable coloured output
    #[clap(long)]
    no_color: bool,
    /// Run these lines and exit instead of starting a session
    #[clap(short = 'c', long = "command")]
    commands: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(&config.log_level);

    let store = ResourceStore::from_provider(config.provider().as_ref())
        .context("Failed to load initial cluster state")?;
    let mut console = Console::new(store);

    if cli.commands.is_empty() {
        repl(&mut console, &config)
    } else {
        for line in &cli.commands {
            let seen = console.log().len();
            console.submit_line(line);
            print_entries(console.log().entries_since(seen), &config, true);
        }
        Ok(())
    }
}

/// File, then `KUBESIM_*` variables, then command line.
fn load_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = Config::builder()
        .add_source(config::File::from(cli.config.as_path()).required(false))
        .add_source(Environment::with_prefix("KUBESIM").try_parsing(true))
        .build()?
        .try_deserialize::<SimConfig>()
        .with_context(|| format!("Failed to parse config {}", cli.config.display()))?;

    if let Some(ref level) = cli.log_level {
        config.log_level = level.to_owned();
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.fixture.is_some() {
        config.fixture = cli.fixture.to_owned();
    }
    if cli.no_color {
        config.color = false;
    }
    Ok(config)
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kubesim={0},resources={0}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn repl(console: &mut Console, config: &SimConfig) -> Result<()> {
    println!("{}", BANNER);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}", config.prompt);
        io::stdout().flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        if matches!(line.trim(), "exit" | "quit") {
            break;
        }
        let seen = console.log().len();
        console.submit_line(&line);
        print_entries(console.log().entries_since(seen), config, false);
    }
    tracing::debug!(entries = console.log().len(), "Session ended");
    Ok(())
}

/// The terminal already shows what was typed, so echoes are only printed in batch mode.
fn print_entries(entries: &[Entry], config: &SimConfig, echo: bool) {
    for entry in entries {
        tracing::trace!(
            kind = %entry.kind,
            at = %entry.timestamp.format("%H:%M:%S"),
            "Printing log entry"
        );
        match (entry.kind, config.color) {
            (EntryKind::Command, _) if !echo => {},
            (EntryKind::Command, true) => {
                println!("{}{}{}{}", style::Bold, config.prompt, entry.content, style::Reset)
            },
            (EntryKind::Command, false) => println!("{}{}", config.prompt, entry.content),
            (EntryKind::Error, true) => println!(
                "{}{}{}",
                color::Fg(color::Red),
                entry.content,
                color::Fg(color::Reset)
            ),
            (EntryKind::Output | EntryKind::Error, _) => println!("{}", entry.content),
        }
    }
}
