//! Shilpini CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply the shop schema and the session table
//! shilpini-cli migrate
//!
//! # Create an admin account
//! shilpini-cli admin create -e owner@shilpini.com -n "Owner" -p 'long-password' -r super_admin
//!
//! # Load demo categories, products, slides and reviews
//! shilpini-cli seed
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `admin create` - Create admin accounts
//! - `seed` - Seed the database with demo data

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shilpini-cli")]
#[command(author, version, about = "Shilpini CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Insert demo data (skips categories that already exist)
    Seed,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin account
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin display name
        #[arg(short, long)]
        name: String,

        /// Login password (at least 8 characters)
        #[arg(short, long)]
        password: String,

        /// Admin role (`super_admin`, `admin`, `viewer`)
        #[arg(short, long, default_value = "admin")]
        role: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                name,
                password,
                role,
            } => {
                commands::admin::create_user(&email, &name, &password, &role).await?;
            }
        },
        Commands::Seed => commands::seed::run().await?,
    }
    Ok(())
}
