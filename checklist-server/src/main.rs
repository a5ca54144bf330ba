//! checklistd - multi-user todo list server.

use std::io::{BufRead, Write};
use std::net::SocketAddr;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use checklist_server::db;
use checklist_server::http::{self, ServerConfig};

#[derive(Parser)]
#[command(name = "checklistd", about = "Multi-user todo list server", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Provision a user (reads the password from stdin)
    AddUser(AddUserArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Postgres connection string (defaults to DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,

    /// Allow any CORS origin
    #[arg(long)]
    cors_permissive: bool,
}

#[derive(Args)]
struct AddUserArgs {
    /// Username to create or update
    username: String,

    /// Postgres connection string (defaults to DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

fn database_url(flag: Option<String>) -> Result<String> {
    flag.or_else(|| std::env::var("DATABASE_URL").ok())
        .ok_or_else(|| anyhow!("DATABASE_URL is not set (use --database-url or the environment)"))
}

async fn run_serve(args: ServeArgs) -> Result<()> {
    let url = database_url(args.database_url)?;
    let pool = db::create_pool(&url)
        .await
        .context("failed to connect to Postgres")?;
    db::migrations::run(&pool).await?;

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    http::run_server(pool, config).await?;
    Ok(())
}

async fn run_add_user(args: AddUserArgs) -> Result<()> {
    let url = database_url(args.database_url)?;
    let pool = db::create_pool(&url)
        .await
        .context("failed to connect to Postgres")?;
    db::migrations::run(&pool).await?;

    eprint!("password for {}: ", args.username);
    std::io::stderr().flush().ok();

    let mut password = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut password)
        .context("failed to read password from stdin")?;
    let password = password.trim_end_matches(['\r', '\n']);

    if password.is_empty() {
        return Err(anyhow!("password must not be empty"));
    }

    db::AuthStore::new(&pool)
        .upsert_user(&args.username, password)
        .await?;

    tracing::info!(username = %args.username, "user provisioned");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing().ok();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => run_serve(args).await,
        Command::AddUser(args) => run_add_user(args).await,
    }
}
