//! Worlder: REST service for country records backed by PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{ServerConfig, StoreKind};
pub use error::{AppError, ConfigError, StoreError};
pub use model::Country;
pub use routes::{app, common_routes_with_ready, country_routes, BODY_LIMIT_BYTES};
pub use service::CountryService;
pub use state::AppState;
pub use store::{ensure_database_exists, CountryStore, MemoryCountryStore, PgCountryStore};
