//! Student Records CLI - Database migrations and admin accounts.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! sr-cli migrate
//!
//! # Create an admin
//! sr-cli admin create -u admin -p 'correct horse battery'
//!
//! # Replace an admin's password (reads $ADMIN_PASSWORD when -p is omitted)
//! ADMIN_PASSWORD='...' sr-cli admin set-password -u admin
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `admin create` - Create an admin account
//! - `admin set-password` - Replace an admin's password

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use secrecy::SecretString;

mod commands;

#[derive(Parser)]
#[command(name = "sr-cli")]
#[command(author, version, about = "Student Records CLI tools")]
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
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin account
    Create {
        #[command(flatten)]
        credentials: Credentials,
    },
    /// Replace an existing admin's password
    SetPassword {
        #[command(flatten)]
        credentials: Credentials,
    },
}

#[derive(clap::Args)]
struct Credentials {
    /// Admin username
    #[arg(short, long)]
    username: String,

    /// Admin password (at least 8 characters)
    #[arg(short, long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,
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
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create { credentials } => {
                let password = SecretString::from(credentials.password);
                commands::admin::create(&credentials.username, &password).await?;
            }
            AdminAction::SetPassword { credentials } => {
                let password = SecretString::from(credentials.password);
                commands::admin::set_password(&credentials.username, &password).await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_admin_create() {
        let cli = Cli::try_parse_from(["sr-cli", "admin", "create", "-u", "admin", "-p", "pw12345678"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Admin {
                action: AdminAction::Create { .. }
            })
        ));
    }
}
