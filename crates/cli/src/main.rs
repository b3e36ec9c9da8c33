//! Bookrent CLI - Database migrations and account management.
//!
//! # Usage
//!
//! ```bash
//! # Create the users table
//! bookrent-cli migrate users
//!
//! # Create the session table
//! bookrent-cli migrate sessions
//!
//! # Run everything
//! bookrent-cli migrate all
//!
//! # Register an account without going through the signup page
//! bookrent-cli user create -e reader@example.com -n "Reader Name"
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bookrent-cli")]
#[command(author, version, about = "Bookrent CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        target: MigrateTarget,
    },
    /// Manage reader accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum MigrateTarget {
    /// Run the users table migrations
    Users,
    /// Create the session store table
    Sessions,
    /// Run all database migrations
    All,
}

#[derive(Subcommand)]
enum UserAction {
    /// Register a new account
    Create {
        /// Email address used to log in
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Password (read from `BOOKRENT_USER_PASSWORD` when omitted)
        #[arg(short, long, env = "BOOKRENT_USER_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate { target } => {
            let pool = commands::connect().await?;
            match target {
                MigrateTarget::Users => commands::migrate::users(&pool).await?,
                MigrateTarget::Sessions => commands::migrate::sessions(pool).await?,
                MigrateTarget::All => {
                    commands::migrate::users(&pool).await?;
                    commands::migrate::sessions(pool).await?;
                }
            }
        }
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                name,
                password,
            } => {
                let pool = commands::connect().await?;
                commands::user::create(pool, &name, &email, &password).await?;
            }
        },
    }
    Ok(())
}
