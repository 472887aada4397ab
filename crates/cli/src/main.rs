//! La Reyna CLI - backend management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the default administrator (admin@gmail.com / admin)
//! lr-cli admin seed
//!
//! # Create an administrator with other credentials
//! lr-cli admin seed -e jefa@lareyna.pe -p s3cret -n "Ana Reyna"
//!
//! # Register a shop customer
//! lr-cli user register -n "Lucia Mendoza" -e lucia@example.com -p pw -t 912345678
//!
//! # List the backend product table
//! lr-cli catalog list
//! ```
//!
//! # Environment Variables
//!
//! - `LA_REYNA_BACKEND_URL` - REST backend (default `http://localhost:3001`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use la_reyna_backend::BackendClient;

mod commands;

use commands::{CommandError, admin::AdminSeed, user::Registration};

/// Backend used when `LA_REYNA_BACKEND_URL` is not set.
const DEFAULT_BACKEND_URL: &str = "http://localhost:3001";

#[derive(Parser)]
#[command(name = "lr-cli")]
#[command(author, version, about = "La Reyna CLI tools")]
struct Cli {
    /// Backend base URL (overrides `LA_REYNA_BACKEND_URL`)
    #[arg(long, global = true)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage administrator accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Manage shop customers
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Inspect the backend catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create an administrator account (no-op if it already exists)
    Seed {
        /// Administrator email address
        #[arg(short, long, default_value = commands::admin::DEFAULT_EMAIL)]
        email: String,

        /// Administrator password
        #[arg(short, long, default_value = commands::admin::DEFAULT_PASSWORD)]
        password: String,

        /// Display name
        #[arg(short, long, default_value = commands::admin::DEFAULT_NAME)]
        name: String,

        /// Nine-digit phone number
        #[arg(short = 't', long, default_value = commands::admin::DEFAULT_PHONE)]
        phone: String,

        /// Postal address
        #[arg(short, long, default_value = commands::admin::DEFAULT_ADDRESS)]
        address: String,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Register a customer account
    Register {
        /// Full name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Nine-digit phone number
        #[arg(short = 't', long)]
        phone: String,

        /// Delivery address
        #[arg(short, long, default_value = "")]
        address: String,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List the products the backend serves
    List,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    let backend_url = cli
        .backend_url
        .or_else(|| std::env::var("LA_REYNA_BACKEND_URL").ok())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_owned());
    let client = BackendClient::new(&backend_url);
    tracing::debug!(backend = %client.base_url(), "Using backend");

    match cli.command {
        Commands::Admin { action } => match action {
            AdminAction::Seed {
                email,
                password,
                name,
                phone,
                address,
            } => {
                let seed = AdminSeed {
                    email,
                    password: password.into(),
                    name,
                    phone,
                    address,
                };
                commands::admin::seed(&client, seed).await?;
            }
        },
        Commands::User { action } => match action {
            UserAction::Register {
                name,
                email,
                password,
                phone,
                address,
            } => {
                let registration = Registration {
                    name,
                    email,
                    password: password.into(),
                    phone,
                    address,
                };
                commands::user::register(&client, registration).await?;
            }
        },
        Commands::Catalog { action } => match action {
            CatalogAction::List => {
                commands::catalog::list(&client).await?;
            }
        },
    }
    Ok(())
}
