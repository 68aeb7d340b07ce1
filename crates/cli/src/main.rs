//! Minicart CLI - Drive a file-persisted cart from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add a product (id optional; repeat adds merge)
//! minicart add --name "Mug" --price '$9.50' --id mug-01
//!
//! # Repeat addition by id
//! minicart add --id mug-01 --qty 2
//!
//! # Set an absolute quantity (0 removes)
//! minicart set-qty mug-01 4
//!
//! # Show lines, count, and total
//! minicart show
//! ```
//!
//! The cart snapshot lives under `--state-dir` (or `MINICART_STATE_DIR`,
//! default `.minicart`), so the cart survives between invocations the way the
//! browser widget's cart survives page loads.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use minicart_store::{CartStore, ConfigError, FileStorage, SnapshotStore, WidgetConfig};

mod commands;

#[derive(Parser)]
#[command(name = "minicart")]
#[command(author, version, about = "Shopping-cart widget demo")]
struct Cli {
    /// Directory the cart snapshot is stored under
    /// (default: `MINICART_STATE_DIR` or `.minicart`)
    #[arg(long)]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a product to the cart
    Add {
        /// Product name
        #[arg(short, long)]
        name: Option<String>,

        /// Unit price, numeric or currency-formatted ("$9.50")
        #[arg(short, long)]
        price: Option<String>,

        /// Stable product id; omitted ids are minted
        #[arg(short, long)]
        id: Option<String>,

        /// Product image URL
        #[arg(long)]
        image: Option<String>,

        /// Units to add (default 1)
        #[arg(short, long)]
        qty: Option<u32>,
    },
    /// Remove a line by id
    Remove {
        /// Line item id
        id: String,
    },
    /// Set an absolute quantity for a line (0 or below removes it)
    SetQty {
        /// Line item id
        id: String,
        /// New quantity
        qty: i64,
    },
    /// Empty the cart
    Clear,
    /// Print the cart lines, unit count, and total
    Show,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ConfigError> {
    let config = WidgetConfig::from_env()?;
    let state_dir = cli.state_dir.unwrap_or_else(|| {
        std::env::var("MINICART_STATE_DIR")
            .map_or_else(|_| PathBuf::from(".minicart"), PathBuf::from)
    });
    let persistence = SnapshotStore::new(FileStorage::new(state_dir), &config);
    let mut store = CartStore::open(persistence, config);

    match cli.command {
        Commands::Add {
            name,
            price,
            id,
            image,
            qty,
        } => commands::add(&mut store, name, price, id, image, qty),
        Commands::Remove { id } => commands::remove(&mut store, &id),
        Commands::SetQty { id, qty } => commands::set_qty(&mut store, &id, qty),
        Commands::Clear => commands::clear(&mut store),
        Commands::Show => commands::show(&store),
    }
    Ok(())
}
