//! Country accessor: one trait, a PostgreSQL implementation and an in-process one.

mod memory;
mod postgres;

pub use memory::MemoryCountryStore;
pub use postgres::{ensure_database_exists, PgCountryStore};

use crate::error::StoreError;
use crate::model::Country;
use async_trait::async_trait;

/// Every method is a single statement against the `countries` table.
///
/// Lists are ordered by `id` ascending. Lookups that target one record return
/// `Ok(None)` when nothing matches.
#[async_trait]
pub trait CountryStore: Send + Sync {
    /// Insert when `id` is `None`; otherwise replace every field at that id.
    /// Replacing an id that does not exist fails with [`StoreError::NotFound`].
    async fn save(&self, country: &Country) -> Result<Country, StoreError>;

    async fn find_all(&self) -> Result<Vec<Country>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Country>, StoreError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Country>, StoreError>;

    async fn find_by_iso_code(&self, iso_code: &str) -> Result<Option<Country>, StoreError>;

    /// Exact, case-sensitive match.
    async fn find_by_continent(&self, continent: &str) -> Result<Vec<Country>, StoreError>;

    /// Strictly greater than `min`.
    async fn find_population_above(&self, min: i64) -> Result<Vec<Country>, StoreError>;

    /// Strictly greater than `min`.
    async fn find_area_above(&self, min: f64) -> Result<Vec<Country>, StoreError>;

    /// Sorted, without records that have no continent.
    async fn distinct_continents(&self) -> Result<Vec<String>, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;

    /// Returns `false` when there was nothing to delete.
    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError>;

    /// Cheap reachability check used by readiness.
    async fn ping(&self) -> Result<(), StoreError>;
}
