//! CLI administration tool for user-registry.
//!
//! Registers and inspects users and checks the database without going
//! through the HTTP API. User creation runs the same field rules and
//! uniqueness check as `POST /api/v1/users`.
//!
//! # Usage
//!
//! ```bash
//! # Register a user (prompts for missing fields)
//! cargo run --bin admin -- user create --name "Jane Doe" --cin 12345678 --release-date 2022-05-10
//!
//! # Show a user by CIN, optionally narrowed by release date
//! cargo run --bin admin -- user show 12345678 --release-date 2022-05-10
//!
//! # Count registered users
//! cargo run --bin admin -- user count
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same database variables as the server (`DATABASE_URL` or `DB_*`).

use user_registry::application::services::UserService;
use user_registry::config::Config;
use user_registry::domain::clock::SystemClock;
use user_registry::domain::entities::User;
use user_registry::domain::validation::{
    UserCandidate, parse_release_date_param, validate_lookup_cin,
};
use user_registry::infrastructure::persistence::PgUserRepository;
use user_registry::server::connect_pool;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing user-registry.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Register a new user
    Create {
        /// Full name
        #[arg(short, long)]
        name: Option<String>,

        /// 8-digit CIN
        #[arg(short, long)]
        cin: Option<String>,

        /// CIN release date (YYYY-MM-DD)
        #[arg(short, long)]
        release_date: Option<String>,

        /// Mark the user as married
        #[arg(short, long)]
        married: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show a user by CIN
    Show {
        /// 8-digit CIN
        cin: String,

        /// Only match this CIN release date (YYYY-MM-DD)
        #[arg(short, long)]
        release_date: Option<String>,
    },

    /// Count registered users
    Count,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: PgPool) -> Result<()> {
    let repository = Arc::new(PgUserRepository::new(Arc::new(pool)));
    let service = UserService::new(repository, Arc::new(SystemClock));

    match action {
        UserAction::Create {
            name,
            cin,
            release_date,
            married,
            yes,
        } => create_user(&service, name, cin, release_date, married, yes).await?,
        UserAction::Show { cin, release_date } => show_user(&service, cin, release_date).await?,
        UserAction::Count => {
            let count = service.count_users().await?;
            println!("  Users: {}", count.to_string().bright_green().bold());
        }
    }

    Ok(())
}

/// Registers a user with interactive prompts for missing fields.
///
/// # Flow
///
/// 1. Prompt for name, CIN and release date (unless provided)
/// 2. Validate with the same rules as the HTTP API
/// 3. Confirm creation (unless `--yes` flag)
/// 4. Persist through [`UserService::create_user`]
async fn create_user(
    service: &UserService,
    name: Option<String>,
    cin: Option<String>,
    release_date: Option<String>,
    married: bool,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Register User".bright_blue().bold());
    println!();

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Name").interact_text()?,
    };

    let cin = match cin {
        Some(c) => c,
        None => Input::new().with_prompt("CIN (8 digits)").interact_text()?,
    };

    let release_date = match release_date {
        Some(d) => d,
        None => Input::new()
            .with_prompt("CIN release date (YYYY-MM-DD)")
            .with_initial_text(service.today().to_string())
            .interact_text()?,
    };

    let cin_release_date = parse_date_arg(&release_date)?;

    let candidate = UserCandidate {
        name: Some(name),
        cin: Some(cin),
        cin_release_date: Some(cin_release_date),
        is_married: married,
    };

    let new_user = service
        .validate(Some(candidate))
        .context("User data rejected")?;

    println!();
    println!("{}", "User details:".bright_white().bold());
    println!("  Name:         {}", new_user.name.cyan());
    println!("  CIN:          {}", new_user.cin.cyan());
    println!("  Release date: {}", new_user.cin_release_date.to_string().cyan());
    println!("  Married:      {}", new_user.is_married.to_string().cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Register this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let user = service
        .create_user(new_user)
        .await
        .context("Failed to register user")?;

    println!();
    println!(
        "{} {}",
        "✅ User registered with id".green().bold(),
        user.id.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Prints a user found by CIN, or by CIN and release date.
///
/// A missing user or a storage failure is returned as an error, so the tool
/// exits non-zero.
async fn show_user(
    service: &UserService,
    cin: String,
    release_date: Option<String>,
) -> Result<()> {
    let cin = validate_lookup_cin(&cin).map_err(|e| anyhow::anyhow!("{}", e))?;

    let result = match release_date {
        Some(raw) => {
            let date = parse_date_arg(&raw)?;
            service.get_user_by_cin_and_release_date(cin, date).await
        }
        None => service.get_user_by_cin(cin).await,
    };

    let user = result.context("Failed to look up user")?;
    print_user(&user);

    Ok(())
}

fn print_user(user: &User) {
    println!("{}", "👤 User".bright_blue().bold());
    println!();
    println!("  ID:           {}", user.id.to_string().bright_black());
    println!("  Name:         {}", user.name.cyan());
    println!("  CIN:          {}", user.cin.cyan());
    println!("  Release date: {}", user.cin_release_date.to_string().cyan());
    println!(
        "  Married:      {}",
        if user.is_married { "yes".green() } else { "no".normal() }
    );
    println!();
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate> {
    parse_release_date_param(Some(raw))
        .with_context(|| format!("Invalid release date '{}', expected YYYY-MM-DD", raw))
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use user_registry::domain::clock::FixedClock;
    use user_registry::infrastructure::persistence::InMemoryUserRepository;

    fn service() -> UserService {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(FixedClock(today)),
        )
    }

    #[tokio::test]
    async fn test_create_user_rejected_candidate_is_error() {
        let service = service();

        let result = create_user(
            &service,
            Some("Jane Doe".to_string()),
            Some("1234567A".to_string()),
            Some("2022-05-10".to_string()),
            false,
            true,
        )
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.root_cause().to_string(), "CIN must contain only numbers.");
        assert_eq!(service.count_users().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_then_show_user() {
        let service = service();

        create_user(
            &service,
            Some("Jane Doe".to_string()),
            Some("12345678".to_string()),
            Some("2022-05-10".to_string()),
            true,
            true,
        )
        .await
        .unwrap();

        show_user(&service, "12345678".to_string(), Some("2022-05-10".to_string()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_show_missing_user_is_error() {
        let service = service();

        let err = show_user(&service, "12345678".to_string(), None)
            .await
            .unwrap_err();

        assert_eq!(
            err.root_cause().to_string(),
            "User not found with CIN: 12345678"
        );
    }
}
