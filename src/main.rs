use rusty_library_catalog::{
    adapters::{memory::InMemoryBookRepository, postgres::PostgresBookRepository},
    api::{handlers::AppState, router::create_router},
    application::catalog::{ServiceDependencies, seed_catalog},
    config::{AppConfig, DEFAULT_LOG_FILTER},
    ports::BookRepository,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Select the storage adapter
    let book_repository: Arc<dyn BookRepository> = match &config.database_url {
        Some(database_url) => {
            tracing::info!("Connecting to PostgreSQL");

            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await?;

            sqlx::migrate!("./migrations").run(&pool).await?;

            Arc::new(PostgresBookRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, books are kept in memory only");
            Arc::new(InMemoryBookRepository::new())
        }
    };

    let service_deps = ServiceDependencies { book_repository };

    // Load initial catalog data
    if let Some(seed_file) = &config.seed_file {
        let json = std::fs::read_to_string(seed_file)?;
        let inserted = seed_catalog(&service_deps, &json).await?;
        tracing::info!("Loaded {} books from {}", inserted, seed_file);
    }

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app).await?;

    Ok(())
}
