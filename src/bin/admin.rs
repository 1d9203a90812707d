//! CLI administration tool for user-management-api.
//!
//! Inspects and maintains user records without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # List users (same paging and search rules as GET /api/users)
//! cargo run --bin admin -- users list --search smith --page 2
//!
//! # Show or delete a single user
//! cargo run --bin admin -- users show 42
//! cargo run --bin admin -- users delete 42
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_HOST` / `DB_USER` / `DB_PASSWORD` / `DB_NAME`)

use user_management_api::api::dto::pagination::UserListParams;
use user_management_api::config::Config;
use user_management_api::domain::entities::User;
use user_management_api::domain::repositories::UserRepository;
use user_management_api::infrastructure::persistence::PgUserRepository;
use user_management_api::prelude::{AppError, UserService};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing user-management-api.
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
    /// Inspect and manage users
    Users {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// List users
    List {
        /// Case-sensitive substring of first name, last name or email
        #[arg(short, long)]
        search: Option<String>,

        /// Page number (1-based)
        #[arg(short, long)]
        page: Option<i64>,

        /// Users per page
        #[arg(long)]
        page_size: Option<i64>,
    },

    /// Show a single user
    Show {
        /// User id
        id: i32,
    },

    /// Delete a user
    Delete {
        /// User id
        id: i32,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

type Service = UserService<dyn UserRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let repository: Arc<dyn UserRepository> =
        Arc::new(PgUserRepository::new(Arc::new(pool.clone())));
    let service = UserService::new(repository);

    match cli.command {
        Commands::Users { action } => handle_user_action(action, &service).await?,
        Commands::Db { action } => handle_db_action(action, &service, &pool).await?,
    }

    Ok(())
}

/// Dispatches user subcommands.
async fn handle_user_action(action: UserAction, service: &Service) -> Result<()> {
    match action {
        UserAction::List {
            search,
            page,
            page_size,
        } => {
            let params = UserListParams {
                search,
                page,
                page_size,
            };
            list_users(service, params).await?;
        }
        UserAction::Show { id } => show_user(service, id).await?,
        UserAction::Delete { id, yes } => delete_user(service, id, yes).await?,
    }

    Ok(())
}

/// Lists one page of users as a table.
///
/// # Output Format
///
/// ```text
/// 👥 Users (page 1, 10 per page, 25 total)
///
///   ID    Name                           Email                          Born
///   ──────────────────────────────────────────────────────────────────────────────
///   1     Ada Lovelace                   ada@x.com                      1815-12-10
/// ```
async fn list_users(service: &Service, params: UserListParams) -> Result<()> {
    let (offset, limit) = params
        .validate_and_get_offset_limit()
        .map_err(anyhow::Error::msg)?;

    let page = service
        .list_users(params.search.as_deref(), offset, limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    println!(
        "{} {}",
        "👥 Users".bright_blue().bold(),
        format!(
            "(page {}, {} per page, {} total)",
            params.page(),
            params.page_size(),
            page.total
        )
        .bright_black()
    );
    println!();

    if page.users.is_empty() {
        println!("{}", "  No users found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<30} {:<30} {:<10}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Email".bright_white().bold(),
        "Born".bright_white().bold()
    );
    println!("  {}", "─".repeat(78).bright_black());

    for user in &page.users {
        println!(
            "  {:<5} {:<30} {:<30} {}",
            user.id.to_string().bright_black(),
            full_name(user).cyan(),
            user.email,
            user.date_of_birth.to_string().bright_black()
        );
    }

    println!();
    Ok(())
}

/// Prints a single user.
async fn show_user(service: &Service, id: i32) -> Result<()> {
    let user = fetch_user(service, id).await?;

    println!("{}", "👤 User".bright_blue().bold());
    println!();
    print_user(&user);
    println!();

    Ok(())
}

/// Deletes a user after confirmation.
///
/// Requires confirmation (default: No) unless `--yes` is given.
async fn delete_user(service: &Service, id: i32, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete User".bright_blue().bold());
    println!();

    let user = fetch_user(service, id).await?;
    print_user(&user);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this user?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_user(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete user: {}", e))?;

    println!();
    println!("{}", "✅ User deleted".green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, service: &Service, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            service
                .health_check()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let users = service
                .list_users(None, 0, 1)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count users: {}", e))?
                .total;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Users:      {}", users.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}

async fn fetch_user(service: &Service, id: i32) -> Result<User> {
    match service.get_user(id).await {
        Ok(user) => Ok(user),
        Err(AppError::NotFound { .. }) => anyhow::bail!("User {} not found", id),
        Err(e) => Err(anyhow::anyhow!("Database error: {}", e)),
    }
}

fn print_user(user: &User) {
    println!("  ID:    {}", user.id.to_string().bright_black());
    println!("  Name:  {}", full_name(user).cyan());
    println!("  Email: {}", user.email);
    println!("  Born:  {}", user.date_of_birth);
}

fn full_name(user: &User) -> String {
    format!("{} {}", user.first_name, user.last_name)
}
