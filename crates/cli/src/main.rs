//! Farmerty CLI - drive the marketplace from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Create a farmer account and list a product
//! farmerty sign-up -n "Green Valley Farm" -e hello@greenvalley.farm -p tomatoes -r farmer
//! farmerty add-product -n "Purple Kale" --price 3.25 -u bunch -d "Tender leaves, great raw."
//!
//! # Browse organic vegetables under $5
//! farmerty browse -c vegetables --max 5 --organic
//!
//! # Who am I?
//! farmerty whoami
//! ```
//!
//! # Commands
//!
//! - `sign-in`, `sign-up`, `sign-out`, `whoami` - Session management
//! - `browse`, `categories` - Catalog browsing
//! - `add-product`, `products` - Farmer product submissions
//!
//! The session and submitted products persist in the file named by
//! `FARMERTY_STORAGE_PATH`. Ctrl-C abandons an in-flight request without
//! changing anything.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use farmerty_core::{Category, Role};
use farmerty_storefront::config::StorefrontConfig;
use farmerty_storefront::error::AppError;
use farmerty_storefront::state::AppState;

mod commands;

#[derive(Parser)]
#[command(name = "farmerty")]
#[command(author, version, about = "Farmerty farm-to-consumer marketplace")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with an email and password
    SignIn {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create an account and sign in
    SignUp {
        /// Display name (person or farm)
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        /// `farmer` or `consumer`
        #[arg(short, long, default_value = "consumer")]
        role: Role,
    },
    /// Sign out
    SignOut,
    /// Show the signed-in identity
    Whoami,
    /// Browse the catalog
    Browse {
        /// Category label or key; repeat to select several
        #[arg(short, long = "category")]
        categories: Vec<Category>,

        /// Lowest price, in dollars
        #[arg(long)]
        min: Option<Decimal>,

        /// Highest price, in dollars
        #[arg(long)]
        max: Option<Decimal>,

        /// Only certified organic products
        #[arg(long)]
        organic: bool,

        /// Case-insensitive name search
        #[arg(short, long)]
        query: Option<String>,
    },
    /// List every product category
    Categories,
    /// Submit a product (farmers only)
    AddProduct {
        #[arg(short, long)]
        name: String,

        /// Price per unit, in dollars
        #[arg(long)]
        price: String,

        /// Unit label (e.g. kg, bunch, each)
        #[arg(short, long)]
        unit: String,

        #[arg(short, long)]
        description: String,

        /// Image URL; a placeholder is used when omitted
        #[arg(short, long)]
        image_url: Option<String>,
    },
    /// List farmer-submitted products
    Products,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "farmerty_cli=info,farmerty_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        if e.is_silent() {
            tracing::warn!("Request abandoned: {e}");
        } else {
            tracing::error!("Command failed: {e}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = StorefrontConfig::from_env()?;
    let state = AppState::new(config)?;

    match cli.command {
        Commands::SignIn { email, password } => {
            commands::session::sign_in(&state, &email, password).await?;
        }
        Commands::SignUp {
            name,
            email,
            password,
            role,
        } => commands::session::sign_up(&state, &name, &email, password, role).await?,
        Commands::SignOut => commands::session::sign_out(&state),
        Commands::Whoami => commands::session::whoami(&state),
        Commands::Browse {
            categories,
            min,
            max,
            organic,
            query,
        } => commands::catalog::browse(
            &state,
            commands::catalog::BrowseArgs {
                categories,
                min,
                max,
                organic,
                query,
            },
        ),
        Commands::Categories => commands::catalog::categories(),
        Commands::AddProduct {
            name,
            price,
            unit,
            description,
            image_url,
        } => {
            let draft = farmerty_storefront::services::products::ProductDraft {
                name,
                price,
                unit,
                description,
                image_url: image_url.unwrap_or_default(),
            };
            commands::products::add_product(&state, &draft).await?;
        }
        Commands::Products => commands::products::list(&state)?,
    }
    Ok(())
}
