//! KloudCart CLI - terminal storefront for the KloudCart shop API.
//!
//! # Usage
//!
//! ```bash
//! # List the vegetable catalog
//! kloud-cli browse
//!
//! # Create an account
//! kloud-cli register -u alice -p "s3cret"
//!
//! # Log in, fill a cart, and place an order in one session
//! kloud-cli order -u alice -p "s3cret" --item 1:2 --item 3:1
//! ```
//!
//! # Commands
//!
//! - `browse` - Fetch and display the catalog
//! - `register` - Create an account (does not log in)
//! - `order` - One-shot login / add-to-cart / checkout flow
//!
//! # Environment Variables
//!
//! - `KLOUD_API_URL` - Base URL of the shop API (default: `http://127.0.0.1:5000`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use kloudcart_client::config::ClientConfig;
use kloudcart_client::shop::Shop;

mod commands;

#[derive(Parser)]
#[command(name = "kloud-cli")]
#[command(author, version, about = "KloudCart terminal storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and display the vegetable catalog
    Browse,
    /// Create an account (does not log in)
    Register {
        /// Account username
        #[arg(short, long)]
        username: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Log in, fill a cart, and place an order in one session
    Order {
        /// Account username
        #[arg(short, long)]
        username: String,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Cart line as `VEGETABLE_ID:QUANTITY` (repeatable)
        #[arg(short, long = "item", value_name = "ID:QTY", required = true)]
        items: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let shop = Shop::new(&config);

    match cli.command {
        Commands::Browse => commands::browse::run(&shop).await?,
        Commands::Register { username, password } => {
            commands::account::register(&shop, &username, &password).await?;
        }
        Commands::Order {
            username,
            password,
            items,
        } => commands::order::run(&shop, &username, &password, &items).await?,
    }
    Ok(())
}
