//! Inkcap CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! inkcap migrate
//!
//! # Create the admin account (register it first so it gets id 1)
//! inkcap admin create -n "Site Owner" -e owner@example.com -p "a strong password"
//!
//! # Seed the database with sample posts
//! inkcap seed
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `admin create` - Create the admin account
//! - `seed` - Seed database with sample posts

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "inkcap")]
#[command(author, version, about = "Inkcap CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage the admin account
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Seed the database with sample posts
    Seed {
        /// Account id to attribute the sample posts to
        #[arg(short, long, default_value_t = 1)]
        author_id: i64,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create the admin account
    Create {
        /// Admin display name
        #[arg(short, long)]
        name: String,

        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin password
        #[arg(short, long)]
        password: String,
    },
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

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                name,
                email,
                password,
            } => {
                commands::admin::create(&name, &email, &password).await?;
            }
        },
        Commands::Seed { author_id } => commands::seed::run(author_id).await?,
    }
    Ok(())
}
