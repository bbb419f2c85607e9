//! # Scripture CLI (`scripture`)
//!
//! Creates and loads the corpus database, queries it from the terminal,
//! and starts the HTTP server.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `scripture init` | Create the SQLite database and schema |
//! | `scripture import <file>` | Load a JSON corpus into an empty database |
//! | `scripture get <id>` | Print a verse, or with `--find-end` its whole passage |
//! | `scripture range <book> <chapter> <range>` | Print verses `N` or `N-M` of a chapter |
//! | `scripture serve` | Start the HTTP server |
//!
//! ## Examples
//!
//! ```bash
//! scripture init --config ./config/scripture.toml
//! scripture import ./data/corpus.json --config ./config/scripture.toml
//! scripture get 1 --find-end
//! scripture range "gênesis" 1 1-5
//! RUST_LOG=scripture=debug scripture serve
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scripture::{config, get, import, migrate, server};

/// Scripture — a read-only HTTP API over a scripture corpus.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/scripture.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "scripture",
    about = "Scripture — verses by id, passage continuation and verse ranges over HTTP",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/scripture.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and the `book` and `verse` tables.
    /// Running it more than once is safe.
    Init,

    /// Import a corpus from a JSON file.
    ///
    /// The file is an array of `{book, chapter, verse, text}` objects in
    /// canonical order. Ids are assigned from 1 in file order.
    Import {
        /// Path to the JSON corpus file.
        file: PathBuf,

        /// Delete the existing corpus before importing.
        #[arg(long)]
        replace: bool,
    },

    /// Print a verse by id.
    Get {
        /// Verse id (positive integer).
        #[arg(allow_hyphen_values = true)]
        id: String,

        /// Extend the verse to the end of its sentence or chapter.
        #[arg(long)]
        find_end: bool,
    },

    /// Print a verse range within one chapter.
    Range {
        /// Book name (case-insensitive).
        book: String,
        /// Chapter number.
        chapter: String,
        /// A verse number `N` or a span `N-M`.
        #[arg(allow_hyphen_values = true)]
        range: String,
    },

    /// Start the HTTP server.
    ///
    /// Binds to the address configured in `[server].bind`.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scripture=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;
    tracing::debug!(config = %cli.config.display(), "configuration loaded");

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Import { file, replace } => {
            import::run_import(&cfg, &file, replace).await?;
        }
        Commands::Get { id, find_end } => {
            get::run_get(&cfg, &id, find_end).await?;
        }
        Commands::Range {
            book,
            chapter,
            range,
        } => {
            get::run_range(&cfg, &book, &chapter, &range).await?;
        }
        Commands::Serve => {
            tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting scripture server");
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
