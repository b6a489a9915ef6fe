//! Nepali Shop CLI - drive the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! shop-cli products
//! shop-cli products --category spiritual
//!
//! # Change the cart
//! shop-cli add 1
//! shop-cli add 2 -q 2
//! shop-cli update 2 5
//! shop-cli remove 1
//! shop-cli clear
//!
//! # Show the cart with line items and subtotal
//! shop-cli show
//!
//! # Haptic feedback preference
//! shop-cli haptics off
//! ```
//!
//! The cart persists under `--data-dir` (default `.shop-data`), one file per
//! storage key. Set `RUST_LOG=nepali_shop_cart=debug` to see store diagnostics.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nepali_shop_core::ProductId;

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "shop-cli")]
#[command(author, version, about = "Nepali Shop cart tools")]
struct Cli {
    /// Directory holding the persisted cart and preferences
    #[arg(long, global = true, default_value = ".shop-data")]
    data_dir: PathBuf,

    /// YAML product catalog (defaults to the built-in catalog)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// YAML cart configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Products {
        /// Only show this category (e.g. clothing, spiritual)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Add a product to the cart
    Add {
        /// Product ID
        id: ProductId,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Set a product's quantity (0 or less removes it)
    Update {
        /// Product ID
        id: ProductId,

        /// New quantity
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },
    /// Show the cart
    Show,
    /// Empty the cart
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Manage haptic feedback
    Haptics {
        #[command(subcommand)]
        action: HapticsAction,
    },
}

#[derive(Subcommand)]
enum HapticsAction {
    /// Enable haptic feedback
    On,
    /// Disable haptic feedback
    Off,
    /// Show haptic feedback status
    Status,
}

fn init_tracing(json: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Quiet by default: the terminal presenter is the user-facing output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = commands::SessionOptions {
        data_dir: cli.data_dir,
        catalog: cli.catalog,
        config: cli.config,
    };

    match cli.command {
        Commands::Products { category } => commands::products::list(&options, category.as_deref())?,
        Commands::Add { id, quantity } => commands::cart::add(&options, id, quantity)?,
        Commands::Remove { id } => commands::cart::remove(&options, id)?,
        Commands::Update { id, quantity } => commands::cart::update(&options, id, &quantity)?,
        Commands::Show => commands::cart::show(&options)?,
        Commands::Clear { yes } => commands::cart::clear(&options, yes)?,
        Commands::Haptics { action } => match action {
            HapticsAction::On => commands::haptics::set(&options, true)?,
            HapticsAction::Off => commands::haptics::set(&options, false)?,
            HapticsAction::Status => commands::haptics::status(&options)?,
        },
    }
    Ok(())
}
