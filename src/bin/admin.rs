//! CLI administration tool for owned-links.
//!
//! Provides commands for managing user accounts, viewing statistics,
//! and performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (prompts for missing values)
//! cargo run --bin admin -- user create --email alice@example.com
//!
//! # List all users
//! cargo run --bin admin -- user list
//!
//! # Delete a user by email or ID; their links become anonymous
//! cargo run --bin admin -- user delete alice@example.com
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use owned_links::application::services::UserService;
use owned_links::domain::entities::PublicUser;
use owned_links::domain::repositories::UserRepository;
use owned_links::infrastructure::persistence::PgUserRepository;
use owned_links::infrastructure::security::Argon2PasswordHasher;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing owned-links.
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
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show statistics
    Stats,

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
        /// Email address (prompted if omitted)
        #[arg(short, long)]
        email: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all users
    List,

    /// Delete a user; their links are kept as anonymous links
    Delete {
        /// User email or ID
        email_or_id: String,
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

type PgUserService = UserService<PgUserRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));
    let service = UserService::new(repo.clone(), Arc::new(Argon2PasswordHasher::new()));

    match action {
        UserAction::Create { email, yes } => create_user(&service, email, yes).await?,
        UserAction::List => list_users(&service).await?,
        UserAction::Delete { email_or_id } => delete_user(&service, &repo, &email_or_id).await?,
    }

    Ok(())
}

/// Registers a user with interactive prompts.
///
/// The password is read without echo and confirmed. Email and password rules
/// are the same as for `POST /users`.
async fn create_user(service: &PgUserService, email: Option<String>, skip_confirm: bool) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Create user {email}?"))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let user = service
        .register(&email, &password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!("{}", "✅ User created successfully!".green().bold());
    println!("  ID:    {}", user.id.to_string().bright_black());
    println!("  Email: {}", user.email.cyan());
    println!();
    println!("{}", "Log in with:".bright_white());
    println!(
        "  curl -X POST -H \"Content-Type: application/json\" -d '{{\"email\":\"{}\",\"password\":\"...\"}}' http://localhost:3077/auth/login",
        user.email
    );
    println!();

    Ok(())
}

/// Lists all users.
///
/// # Output Format
///
/// ```text
/// 📋 Users
///
///   ID  Email                                    Created
///   ───────────────────────────────────────────────────────────────
///   1   alice@example.com                        2025-01-15 10:30
/// ```
async fn list_users(service: &PgUserService) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = service
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<40} {:<20}",
        "ID".bright_white().bold(),
        "Email".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(65).bright_black());

    for user in &users {
        println!(
            "  {:<5} {:<40} {}",
            user.id.to_string().bright_black(),
            user.email.cyan(),
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Deletes a user by email or ID with confirmation prompt.
///
/// # Lookup
///
/// - If input is numeric, lookup by ID
/// - Otherwise, lookup by email (exact match)
async fn delete_user(
    service: &PgUserService,
    repo: &PgUserRepository,
    email_or_id: &str,
) -> Result<()> {
    println!("{}", "🗑️  Delete User".bright_blue().bold());
    println!();

    let user: Option<PublicUser> = match email_or_id.parse::<i64>() {
        Ok(id) => repo
            .find_by_id(id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
            .map(|u| u.into_public()),
        Err(_) => repo
            .find_by_email(email_or_id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
            .map(|u| u.into_public()),
    };

    let user = user.context("User not found")?;

    println!("  Email: {}", user.email.cyan());
    println!("  ID:    {}", user.id.to_string().bright_black());
    println!();
    println!(
        "{}",
        "Links owned by this user will remain reachable as anonymous links.".yellow()
    );
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Delete this user?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    service
        .delete(user.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete user: {}", e))?;

    println!();
    println!("{}", "✅ User deleted".green().bold());
    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Active, anonymous and deleted link counts
/// - Total clicks across active links
/// - Number of users
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (active, anonymous, deleted, clicks): (i64, i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            COUNT(*) FILTER (WHERE deleted_at IS NULL),
            COUNT(*) FILTER (WHERE deleted_at IS NULL AND owner_id IS NULL),
            COUNT(*) FILTER (WHERE deleted_at IS NOT NULL),
            COALESCE(SUM(click_count) FILTER (WHERE deleted_at IS NULL), 0)::BIGINT
        FROM links
        "#,
    )
    .fetch_one(pool)
    .await?;

    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    println!("  Active links:    {}", active.to_string().bright_green().bold());
    println!("    anonymous:     {}", anonymous.to_string().bright_black());
    println!("  Deleted links:   {}", deleted.to_string().bright_black());
    println!("  Clicks:          {}", clicks.to_string().bright_green().bold());
    println!("  Users:           {}", users.to_string().bright_green().bold());
    println!();

    Ok(())
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

            let migrations: Option<i64> = sqlx::query_scalar(
                "SELECT MAX(version) FROM _sqlx_migrations WHERE success",
            )
            .fetch_one(pool)
            .await
            .unwrap_or(None);

            println!("  PostgreSQL: {}", version.bright_white());
            match migrations {
                Some(v) => println!("  Schema:     {}", v.to_string().bright_white()),
                None => println!("  Schema:     {}", "not migrated".yellow()),
            }
            println!();
        }
    }

    Ok(())
}
