//! Country use cases. Each method is exactly one call into the store.

use crate::error::StoreError;
use crate::model::Country;
use crate::store::CountryStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct CountryService {
    store: Arc<dyn CountryStore>,
}

impl CountryService {
    pub fn new(store: Arc<dyn CountryStore>) -> Self {
        CountryService { store }
    }

    pub async fn all_countries(&self) -> Result<Vec<Country>, StoreError> {
        self.store.find_all().await
    }

    pub async fn country_by_id(&self, id: i64) -> Result<Option<Country>, StoreError> {
        self.store.find_by_id(id).await
    }

    pub async fn country_by_name(&self, name: &str) -> Result<Option<Country>, StoreError> {
        self.store.find_by_name(name).await
    }

    pub async fn country_by_iso_code(&self, iso_code: &str) -> Result<Option<Country>, StoreError> {
        self.store.find_by_iso_code(iso_code).await
    }

    pub async fn countries_by_continent(&self, continent: &str) -> Result<Vec<Country>, StoreError> {
        self.store.find_by_continent(continent).await
    }

    pub async fn countries_with_population_above(&self, min: i64) -> Result<Vec<Country>, StoreError> {
        self.store.find_population_above(min).await
    }

    pub async fn countries_with_area_above(&self, min: f64) -> Result<Vec<Country>, StoreError> {
        self.store.find_area_above(min).await
    }

    pub async fn all_continents(&self) -> Result<Vec<String>, StoreError> {
        self.store.distinct_continents().await
    }

    pub async fn total_count(&self) -> Result<i64, StoreError> {
        self.store.count().await
    }

    /// Insert or replace depending on `country.id`.
    pub async fn save_country(&self, country: &Country) -> Result<Country, StoreError> {
        self.store.save(country).await
    }

    pub async fn delete_country(&self, id: i64) -> Result<bool, StoreError> {
        self.store.delete_by_id(id).await
    }

    pub async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        self.store.exists_by_id(id).await
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }
}
