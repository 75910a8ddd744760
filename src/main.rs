//! `petsq`: inspect and edit a Pet Square store kept in a JSON file.

use std::path::PathBuf;
use std::rc::Rc;

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use pet_square::area::FileArea;
use pet_square::{ConfigError, Storage, StorageConfig, StorageError, clock, fixtures};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("value for `{key}` is not valid JSON: {source}")]
    InvalidValue { key: String, source: serde_json::Error },
    #[error("no value stored at `{0}`")]
    NotFound(String),
}

#[derive(Parser, Debug)]
#[command(name = "petsq", about = "Inspect and edit a Pet Square store file")]
struct Cli {
    /// Store file; created on first write.
    #[arg(long, env = "PET_SQUARE_FILE", default_value = "pet-square.json")]
    file: PathBuf,

    /// Key namespace; overrides PET_SQUARE_STORAGE_PREFIX.
    #[arg(long)]
    prefix: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List logical keys in the namespace.
    Keys,
    /// Print the value at a key.
    Get { key: String },
    /// Store a JSON value at a key.
    Set { key: String, value: String },
    /// Delete a key.
    Remove { key: String },
    /// Delete every key in the namespace.
    Clear,
    /// Write the demo records unless the store is already initialized.
    Seed,
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("petsq: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = StorageConfig::from_env()?;
    if let Some(prefix) = cli.prefix {
        config.prefix = prefix;
    }
    let area = FileArea::open(&cli.file)?;
    let storage = Storage::from_config(Rc::new(area), &config);

    match cli.command {
        Command::Keys => {
            let mut keys = storage.keys();
            keys.sort();
            for key in keys {
                println!("{key}");
            }
        }
        Command::Get { key } => {
            let raw = storage
                .get_raw(&key)
                .filter(|raw| !raw.is_empty())
                .ok_or_else(|| CliError::NotFound(key.clone()))?;
            match serde_json::from_str::<Value>(&raw) {
                Ok(value) => print_json(&value)?,
                // Written by something other than the gateway; show it as stored.
                Err(_) => println!("{raw}"),
            }
        }
        Command::Set { key, value } => {
            let parsed: Value =
                serde_json::from_str(&value).map_err(|source| CliError::InvalidValue { key: key.clone(), source })?;
            storage.try_set(&key, &parsed)?;
        }
        Command::Remove { key } => storage.try_remove(&key)?,
        Command::Clear => {
            let removed = storage.try_clear()?;
            eprintln!("removed {removed} keys");
        }
        Command::Seed => {
            if fixtures::initialize_storage(&storage, clock::today()) {
                eprintln!("seeded {}", cli.file.display());
            } else {
                eprintln!("already initialized");
            }
        }
    }
    Ok(())
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value).map_err(StorageError::from)?;
    println!("{rendered}");
    Ok(())
}
