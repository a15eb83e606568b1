//! Shoebox CLI - cart operations from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Show the current cart
//! shoebox show
//!
//! # Add one unit of product 1 (merges if already in the cart)
//! shoebox add 1
//!
//! # Set the quantity of product 1 to 3
//! shoebox set 1 3
//!
//! # Remove product 1 entirely
//! shoebox remove 1
//! ```
//!
//! Configuration comes from the environment (see `CartConfig`), with
//! `.env` support via dotenvy. The cart snapshot lives in the file named by
//! `SHOEBOX_CART_PATH`, so consecutive invocations operate on the same
//! session.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};

use shoebox_cart::{
    ApiClient, CartConfig, CartStore, JsonFilePersistence, TracingNotifier,
};
use shoebox_core::{Cart, ProductId};

#[derive(Parser)]
#[command(name = "shoebox")]
#[command(author, version, about = "Shoebox cart CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current cart
    Show,
    /// Add one unit of a product to the cart
    Add {
        /// Product ID
        id: i32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        id: i32,
    },
    /// Set the exact quantity of a product already in the cart
    Set {
        /// Product ID
        id: i32,
        /// New quantity
        amount: u32,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CartConfig::from_env()?;
    let api = ApiClient::new(&config)?;
    let persistence = JsonFilePersistence::new(&config.cart_path);

    let mut store = CartStore::load(api.clone(), api, persistence)
        .await?
        .with_notifier(Arc::new(TracingNotifier));

    match cli.command {
        Commands::Show => {}
        Commands::Add { id } => store.add_product(ProductId::new(id)).await?,
        Commands::Remove { id } => store.remove_product(ProductId::new(id)).await?,
        Commands::Set { id, amount } => {
            store.update_product_amount(ProductId::new(id), amount).await?;
        }
    }

    print_cart(store.cart());
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("cart is empty");
        return;
    }

    for item in cart {
        println!(
            "{:>4}  {:<30} {:>3} x {:>9} = {:>9}",
            item.id,
            item.title,
            item.amount,
            item.price.display(),
            item.line_total().display()
        );
    }
    println!("{:>54} {:>9}", "subtotal", cart.subtotal().display());
}
