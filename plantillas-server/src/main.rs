use anyhow::Context;
use clap::{Parser, Subcommand};
use plantillas_core::database::connect_pool;
use plantillas_server::{AppState, create_app, infra::config::ServerConfig};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "plantillas-server")]
#[command(about = "Image catalog API with hashtag search and PDF sheet export")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServerConfig,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Connect to the database, run a trivial query and exit
    Ping,
    /// Apply pending schema migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Must run before parsing so env-backed flags see the file.
    let env_file_loaded = dotenvy::dotenv().is_ok();

    let cli = Cli::parse();
    init_tracing();

    if env_file_loaded {
        info!("loaded .env file");
    }

    match cli.command {
        Some(Command::Db(DbCommand::Ping)) => run_db_ping(&cli.serve).await,
        Some(Command::Db(DbCommand::Migrate)) => {
            run_db_migrate(&cli.serve).await
        }
        None => run_server(cli.serve).await,
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run_db_ping(config: &ServerConfig) -> anyhow::Result<()> {
    let database_url = config.resolve_database_url()?;
    connect_pool(&database_url, config.pool_settings())
        .await
        .context("failed to connect to PostgreSQL")?;
    info!("Database connection OK");
    Ok(())
}

async fn run_db_migrate(config: &ServerConfig) -> anyhow::Result<()> {
    let database_url = config.resolve_database_url()?;
    let pool = connect_pool(&database_url, config.pool_settings())
        .await
        .context("failed to connect to PostgreSQL for migration")?;
    plantillas_core::MIGRATOR
        .run(&pool)
        .await
        .context("database migration failed")?;
    info!("Database migrations applied successfully");
    Ok(())
}

async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let database_url = config.resolve_database_url()?;
    let addr = config.socket_addr()?;

    let pool = connect_pool(&database_url, config.pool_settings())
        .await
        .context("failed to connect to PostgreSQL")?;
    info!(
        max_connections = config.db_max_connections,
        "database pool ready"
    );

    let state = AppState::from_pool(pool, config)?;
    let router = create_app(state);

    info!("Starting Plantillas server (HTTP) on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
