//! Tournament bracket server using the async actor model.
//!
//! Each tournament's bracket is owned by a TournamentActor managed by
//! TournamentManager, with brackets kept in memory or in PostgreSQL.

use std::sync::Arc;

use anyhow::{Context, Error};
use bracket_engine::{
    store::{BracketStore, Database, MemoryBracketStore, PgBracketStore},
    tournament::TournamentManager,
};
use bracket_server::{
    api,
    config::{ConfigOverrides, ServerConfig, StoreBackend},
    logging, metrics,
};
use pico_args::Arguments;
use tracing::info;

const HELP: &str = "\
Run a single-elimination tournament bracket server

USAGE:
  bracket_server [OPTIONS]

OPTIONS:
  --bind          IP:PORT  Server socket bind address   [default: env SERVER_BIND or 127.0.0.1:6969]
  --store         BACKEND  memory or postgres           [default: env STORE_BACKEND or memory]
  --db-url        URL      Database connection string   [default: env DATABASE_URL]
  --metrics-bind  IP:PORT  Prometheus exporter address  [default: env METRICS_BIND, disabled]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  STORE_BACKEND            Bracket store backend (memory, postgres)
  DATABASE_URL             PostgreSQL connection string
  DB_MAX_CONNECTIONS       Database pool size
  MIN_PARTICIPANTS         Smallest roster accepted by generate [default: 2]
  EVENT_BUFFER             Per-subscriber event queue size [default: 32]
  ACTOR_IDLE_TIMEOUT_SECS  Stop idle tournament actors after this many seconds [default: 300]
  METRICS_BIND             Prometheus exporter address
  RUST_LOG                 Log filter [default: info,sqlx=warn,hyper=warn]
  (See .env.example for all configuration options)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let overrides = ConfigOverrides {
        bind: pargs.opt_value_from_str("--bind")?,
        database_url: pargs.opt_value_from_str("--db-url")?,
        store: pargs.opt_value_from_str("--store")?,
        metrics_bind: pargs.opt_value_from_str("--metrics-bind")?,
    };

    logging::init();

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        tracing::warn!("Ignoring unrecognized arguments: {:?}", remaining);
    }

    let config = ServerConfig::from_env(overrides)?;
    config.validate()?;

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(|e| anyhow::anyhow!(e))?;
        info!("Prometheus metrics exported on http://{}/metrics", addr);
    }

    info!("Starting bracket server with {} store", config.store);

    let (store, database): (Arc<dyn BracketStore>, Option<Database>) = match config.store {
        StoreBackend::Memory => {
            let store: Arc<dyn BracketStore> = Arc::new(MemoryBracketStore::new());
            (store, None)
        }
        StoreBackend::Postgres => {
            info!("Connecting to database");
            let db = Database::new(&config.database)
                .await
                .context("Failed to connect to database")?;

            let store = PgBracketStore::new(Arc::new(db.pool().clone()));
            store
                .ensure_schema()
                .await
                .context("Failed to prepare brackets table")?;

            info!("Database connected successfully");
            let store: Arc<dyn BracketStore> = Arc::new(store);
            (store, Some(db))
        }
    };

    let stored = store.list_ids().await.context("Failed to list tournaments")?;
    info!("{} stored tournament(s) available", stored.len());

    let tournament_manager = Arc::new(TournamentManager::new(store, config.tournaments.clone()));

    let api_state = api::AppState {
        tournament_manager: tournament_manager.clone(),
        database: database.clone(),
    };
    let app = api::create_router(api_state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down server...");
    tournament_manager.close_all().await;
    if let Some(db) = database {
        db.close().await;
    }

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
