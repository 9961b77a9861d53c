//! Server binary: loads config from the environment, prepares storage and serves the API.

use std::sync::Arc;
use tokio::net::TcpListener;
use worlder::{app, ensure_database_exists, AppState, CountryStore, MemoryCountryStore, PgCountryStore, ServerConfig, StoreKind};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("worlder=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let store: Arc<dyn CountryStore> = match config.store {
        StoreKind::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            let store = PgCountryStore::new(pool, &config.schema);
            store.ensure_table().await?;
            tracing::info!(schema = %config.schema, "countries table ready");
            Arc::new(store)
        }
        StoreKind::Memory => {
            tracing::info!("using in-memory country store");
            Arc::new(MemoryCountryStore::new())
        }
    };

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(AppState::new(store))).await?;
    Ok(())
}
