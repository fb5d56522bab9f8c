use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use byteweave_core::{ConcatConfig, Concatenator, MessageRecord};
use clap::Parser;

mod config;
mod feed;

use config::Settings;
use feed::{FeedEvent, FrameFeed};

/// Replay a capture of decoded bus frames and print the coalesced messages.
#[derive(Debug, Parser)]
#[command(name = "byteweave", version, about)]
struct Cli {
    /// JSON-lines capture of decoder frames; stdin when omitted.
    input: Option<PathBuf>,

    /// Settings file (defaults to the per-user config path).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Display format: ascii or hex.
    #[arg(long)]
    format: Option<String>,

    /// Delimiter: none, newline, null, space, semicolon, tab, or 0xNN.
    #[arg(long)]
    delimiter: Option<String>,

    /// Packet timeout in microseconds; 0 selects the built-in default.
    #[arg(long)]
    timeout_us: Option<u64>,

    /// Literal prefix for every displayed message.
    #[arg(long)]
    prefix: Option<String>,

    /// Emit records as JSON instead of display text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = build_config(&cli)?;

    let feed = match &cli.input {
        Some(path) => FrameFeed::spawn(BufReader::new(File::open(path)?)),
        None => FrameFeed::spawn(BufReader::new(io::stdin())),
    };

    let mut concat = Concatenator::new(&cfg);
    for event in feed.events() {
        match event {
            FeedEvent::Frame(frame) => {
                if let Some(record) = concat.push(&frame) {
                    emit(&record, &cfg, cli.json)?;
                }
            }
            FeedEvent::Skipped { line, reason } => {
                eprintln!("byteweave: line {line}: {reason}");
            }
            FeedEvent::Eof => break,
        }
    }
    if let Some(record) = concat.finish() {
        emit(&record, &cfg, cli.json)?;
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<ConcatConfig> {
    let mut settings = Settings::default();
    let explicit = cli.config.is_some();
    if let Some(path) = cli.config.clone().or_else(Settings::default_path) {
        if path.exists() {
            settings = Settings::load(&path)?;
        } else if explicit {
            anyhow::bail!("settings file {} does not exist", path.display());
        }
    }

    let mut cfg = settings.into_config();
    if let Some(format) = &cli.format {
        cfg.display_format = format.parse().unwrap_or_default();
    }
    if let Some(delimiter) = &cli.delimiter {
        cfg.delimiter = config::parse_delimiter(delimiter);
    }
    if let Some(us) = cli.timeout_us {
        cfg.timeout = Duration::from_micros(us);
    }
    if let Some(prefix) = &cli.prefix {
        cfg.prefix = prefix.clone();
    }
    Ok(cfg)
}

fn emit(record: &MessageRecord, cfg: &ConcatConfig, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(record)?);
    } else {
        println!("{}", record.display(&cfg.prefix));
    }
    Ok(())
}
