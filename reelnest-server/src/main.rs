use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use reelnest_core::application::unit_of_work::AppUnitOfWork;
use reelnest_core::database::PostgresDatabase;
use reelnest_core::domain::seed::{DEMO_PASSWORD, seed_demo};
use reelnest_server::{
    AppState,
    auth::AuthCrypto,
    create_app,
    infra::config::{Config, ConfigLoad, ConfigLoader},
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "reelnest-server")]
#[command(about = "Social video backend: accounts, follows, publication and engagement")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,

    /// Configuration file (overrides REELNEST_CONFIG and default locations)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Serve from the in-memory store, pre-seeded with demo data
    #[arg(long, default_value_t = false)]
    memory: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Apply database migrations and exit
    Migrate,
    /// Insert the demo accounts and videos and exit
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        match command {
            Command::Db(DbCommand::Migrate) => {
                run_db_migrate(&cli.serve).await?;
                return Ok(());
            }
            Command::Db(DbCommand::Seed) => {
                run_db_seed(&cli.serve).await?;
                return Ok(());
            }
        }
    }

    run_server(cli.serve).await
}

async fn run_db_migrate(args: &ServeArgs) -> anyhow::Result<()> {
    let config = load_runtime_config(args)?;
    let pg = connect_postgres(&config)
        .await
        .context("failed to connect to PostgreSQL for migration")?;
    pg.initialize_schema()
        .await
        .context("database migration failed")?;
    info!("Database migrations applied successfully");
    Ok(())
}

async fn run_db_seed(args: &ServeArgs) -> anyhow::Result<()> {
    let config = load_runtime_config(args)?;
    let pg = Arc::new(
        connect_postgres(&config)
            .await
            .context("failed to connect to PostgreSQL for seeding")?,
    );
    let unit_of_work =
        AppUnitOfWork::from_postgres(pg).map_err(anyhow::Error::msg)?;
    let crypto = AuthCrypto::new(&config.auth.password_pepper)
        .context("invalid password hashing configuration")?;

    seed(&unit_of_work, &crypto).await
}

async fn seed(
    unit_of_work: &AppUnitOfWork,
    crypto: &AuthCrypto,
) -> anyhow::Result<()> {
    let password_hash = crypto
        .hash_password(DEMO_PASSWORD)
        .context("failed to hash demo password")?;
    let report = seed_demo(unit_of_work, &password_hash)
        .await
        .context("failed to seed demo data")?;

    for account in &report.accounts {
        info!(email = %account.email, id = %account.id, "seeded demo account");
    }
    for email in &report.skipped {
        info!(%email, "demo account already present");
    }
    Ok(())
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let config = Arc::new(load_runtime_config(&args)?);
    let auth_crypto = Arc::new(
        AuthCrypto::new(&config.auth.password_pepper)
            .context("invalid password hashing configuration")?,
    );

    let state = if args.memory {
        let unit_of_work = Arc::new(AppUnitOfWork::in_memory());
        seed(&unit_of_work, &auth_crypto).await?;
        warn!("serving from the in-memory store; data is lost on exit");
        AppState::new(unit_of_work, config.clone(), auth_crypto)
    } else {
        let pg = Arc::new(
            connect_postgres(&config)
                .await
                .context("failed to connect to PostgreSQL")?,
        );
        pg.initialize_schema()
            .await
            .context("database migration failed")?;
        let unit_of_work = Arc::new(
            AppUnitOfWork::from_postgres(pg.clone())
                .map_err(anyhow::Error::msg)?,
        );
        AppState::new(unit_of_work, config.clone(), auth_crypto)
            .with_postgres(pg)
    };

    let addr = config
        .server
        .socket_addr()
        .context("invalid server host/port")?;
    let router = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Reelnest listening on http://{addr}");

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    info!("Reelnest shut down");
    Ok(())
}

async fn connect_postgres(config: &Config) -> anyhow::Result<PostgresDatabase> {
    let url = config
        .database
        .url
        .as_deref()
        .context("DATABASE_URL is not configured (use --memory to run without PostgreSQL)")?;
    Ok(PostgresDatabase::new(url, config.database.max_connections).await?)
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Config> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_config_path(path);
    }
    let ConfigLoad {
        mut config,
        warnings,
    } = loader.load().context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = &config.metadata.config_path {
        info!(path = %path.display(), "configuration file loaded");
    }

    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => {
                warn!(message = %warning.message, "configuration warning")
            }
        }
    }

    Ok(config)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        ) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received terminate signal, shutting down"),
    }
}
