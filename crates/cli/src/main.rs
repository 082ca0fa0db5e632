//! tabcart CLI - A shopping cart kept in a local storage file.
//!
//! # Usage
//!
//! ```bash
//! # Add products
//! tabcart add "Book" 10.00
//! tabcart add "Caneca" 25,90
//!
//! # Adjust lines by name or position
//! tabcart inc Book
//! tabcart dec --index 1
//! tabcart remove Caneca
//!
//! # Inspect
//! tabcart show
//! tabcart show --html
//! tabcart export
//!
//! # Finish the purchase (prints the receipt, then empties the cart)
//! tabcart receipt --checkout
//! ```
//!
//! # Environment Variables
//!
//! - `TABCART_STORE_PATH` - Store file (default: tabcart-storage.json)
//! - `TABCART_STORAGE_KEY` - Key inside the store (default: carrinho)
//! - `TABCART_CURRENCY` - `BRL`, `USD` or `EUR` (default: BRL)
//! - `RUST_LOG` - Log filter (default: warn)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{ArgGroup, Args, CommandFactory, Parser, Subcommand};
use tabcart_core::CurrencyCode;
use tabcart_widget::WidgetConfig;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::cart::LineRef;
use commands::{CommandError, Session};

#[derive(Parser)]
#[command(name = "tabcart")]
#[command(author, version, about = "Shopping cart kept in a local storage file")]
struct Cli {
    /// Store file (overrides `TABCART_STORE_PATH`)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Key the cart is stored under (overrides `TABCART_STORAGE_KEY`)
    #[arg(long, global = true)]
    key: Option<String>,

    /// Display currency (overrides `TABCART_CURRENCY`)
    #[arg(long, global = true)]
    currency: Option<CurrencyCode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product
    Add {
        /// Product name
        name: String,
        /// Unit price (e.g. 10.00 or 10,00)
        price: String,
    },
    /// Add one unit to a line
    Inc(LineArgs),
    /// Take one unit from a line, removing it at one
    Dec(LineArgs),
    /// Remove a line
    Remove(LineArgs),
    /// Empty the cart
    Clear,
    /// Show the cart
    Show {
        /// Print table rows and badge as HTML
        #[arg(long)]
        html: bool,
    },
    /// Print the purchase receipt
    Receipt {
        /// Print the receipt as HTML
        #[arg(long)]
        html: bool,
        /// Empty the cart after printing
        #[arg(long)]
        checkout: bool,
    },
    /// Print the stored cart as JSON
    Export,
}

#[derive(Args)]
#[command(group(ArgGroup::new("line").required(true).args(["name", "index"])))]
struct LineArgs {
    /// Product name
    name: Option<String>,

    /// Zero-based line position
    #[arg(long)]
    index: Option<usize>,
}

impl LineArgs {
    fn into_line_ref(self) -> Result<LineRef, clap::Error> {
        match (self.name, self.index) {
            (Some(name), None) => Ok(LineRef::Name(name)),
            (None, Some(index)) => Ok(LineRef::Index(index)),
            (Some(_), Some(_)) => Err(Cli::command().error(
                ErrorKind::ArgumentConflict,
                "give either a product name or --index, not both",
            )),
            (None, None) => Err(Cli::command().error(
                ErrorKind::MissingRequiredArgument,
                "a product name or --index is required",
            )),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = WidgetConfig::from_env()?;
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    if let Some(key) = cli.key {
        config.storage_key = key;
    }
    if let Some(currency) = cli.currency {
        config.currency = currency;
    }

    let mut session = Session::open(&config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    dispatch(cli.command, &mut session, &mut out)?;
    out.flush()?;
    Ok(())
}

fn dispatch(
    command: Commands,
    session: &mut Session,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    use commands::cart;

    match command {
        Commands::Add { name, price } => cart::add(session, out, &name, &price),
        Commands::Inc(line) => cart::increase(session, out, &line.into_line_ref()?),
        Commands::Dec(line) => cart::decrease(session, out, &line.into_line_ref()?),
        Commands::Remove(line) => cart::remove(session, out, &line.into_line_ref()?),
        Commands::Clear => cart::clear(session, out),
        Commands::Show { html } => cart::show(session, out, html),
        Commands::Receipt { html, checkout } => cart::receipt(session, out, html, checkout),
        Commands::Export => cart::export(session, out),
    }
}
