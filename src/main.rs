use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use sqlx::migrate::Migrator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use account_core::adapters::PostgresLedgerStore;
use account_core::clients::{HttpAccountDirectory, HttpTransactionRecorder};
use account_core::config::Config;
use account_core::ports::LedgerStore;
use account_core::services::AccountService;
use account_core::{AppState, create_app, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Setup logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database pool
    let pool = db::create_pool(&config).await?;

    // Run migrations
    let migrator = Migrator::new(Path::new("./migrations")).await?;
    migrator.run(&pool).await?;
    tracing::info!("database migrations completed");

    // Collaborator clients
    let ledger: Arc<dyn LedgerStore> = Arc::new(PostgresLedgerStore::new(pool));
    let recorder = Arc::new(HttpTransactionRecorder::new(
        config.transaction_service_url.clone(),
    ));
    let directory = Arc::new(HttpAccountDirectory::new(config.user_service_url.clone()));
    tracing::info!(
        directory = %config.user_service_url,
        recorder = %config.transaction_service_url,
        "collaborator clients initialized"
    );

    let service = Arc::new(AccountService::new(ledger.clone(), recorder, directory));
    let app = create_app(AppState { service, ledger });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
