use ranch_ledger::{
    build_router,
    config::{Config, StorageBackend},
    AppState,
};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ranch_ledger=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    let timezone = config.timezone();
    tracing::info!(utc_offset_hours = config.utc_offset_hours, "Ranch timezone configured");

    let state = match &config.storage {
        StorageBackend::Postgres(database_url) => {
            tracing::info!("Connecting to database...");
            let db = Database::connect(database_url).await?;

            if config.run_migrations {
                tracing::info!("Running migrations...");
                migration::Migrator::up(&db, None).await?;
            }

            AppState::sea_orm(db, timezone)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; records are lost on shutdown");
            AppState::in_memory_with_timezone(timezone)
        }
    };

    let mut app = build_router(state);
    if config.cors_allow_any {
        app = app.layer(CorsLayer::permissive());
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
