//! In-process country store with the same constraints as the `countries` table.

use super::CountryStore;
use crate::error::StoreError;
use crate::model::Country;
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

const ISO_CODE_MAX_LEN: usize = 3;

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i64, Country>,
    last_id: i64,
}

/// Ids are never reused, even after deletes. Poisoned locks surface as
/// [`StoreError::Db`] so callers see a server-side failure.
#[derive(Default)]
pub struct MemoryCountryStore {
    inner: RwLock<Inner>,
}

impl MemoryCountryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner.read().map_err(|_| poisoned())
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner.write().map_err(|_| poisoned())
    }

    fn filtered(&self, keep: impl Fn(&Country) -> bool) -> Result<Vec<Country>, StoreError> {
        Ok(self.read()?.rows.values().filter(|c| keep(c)).cloned().collect())
    }

    fn first(&self, keep: impl Fn(&Country) -> bool) -> Result<Option<Country>, StoreError> {
        Ok(self.read()?.rows.values().find(|c| keep(c)).cloned())
    }
}

fn poisoned() -> StoreError {
    StoreError::Db(sqlx::Error::Protocol("country store lock poisoned".into()))
}

/// `VARCHAR(3)` semantics: excess characters that are all spaces are cut off,
/// anything else over the limit is rejected.
fn fit_iso_code(c: &Country) -> Result<Country, StoreError> {
    let mut fitted = c.clone();
    if let Some((cut, _)) = c.iso_code.char_indices().nth(ISO_CODE_MAX_LEN) {
        if !c.iso_code[cut..].chars().all(|ch| ch == ' ') {
            return Err(StoreError::Constraint(format!(
                "iso_code '{}' longer than {} characters",
                c.iso_code, ISO_CODE_MAX_LEN
            )));
        }
        fitted.iso_code.truncate(cut);
    }
    Ok(fitted)
}

/// Uniqueness, checked against every row except the one being replaced.
fn check_constraints(rows: &BTreeMap<i64, Country>, c: &Country, skip: Option<i64>) -> Result<(), StoreError> {
    for (id, other) in rows {
        if Some(*id) == skip {
            continue;
        }
        if other.name == c.name {
            return Err(StoreError::Constraint(format!("duplicate name '{}'", c.name)));
        }
        if other.iso_code == c.iso_code {
            return Err(StoreError::Constraint(format!("duplicate iso_code '{}'", c.iso_code)));
        }
    }
    Ok(())
}

#[async_trait]
impl CountryStore for MemoryCountryStore {
    async fn save(&self, country: &Country) -> Result<Country, StoreError> {
        let country = fit_iso_code(country)?;
        let mut inner = self.write()?;
        match country.id {
            None => {
                check_constraints(&inner.rows, &country, None)?;
                inner.last_id += 1;
                let id = inner.last_id;
                let saved = country.with_id(id);
                inner.rows.insert(id, saved.clone());
                Ok(saved)
            }
            Some(id) => {
                if !inner.rows.contains_key(&id) {
                    return Err(StoreError::NotFound(id));
                }
                check_constraints(&inner.rows, &country, Some(id))?;
                inner.rows.insert(id, country.clone());
                Ok(country)
            }
        }
    }

    async fn find_all(&self) -> Result<Vec<Country>, StoreError> {
        self.filtered(|_| true)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Country>, StoreError> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Country>, StoreError> {
        self.first(|c| c.name == name)
    }

    async fn find_by_iso_code(&self, iso_code: &str) -> Result<Option<Country>, StoreError> {
        self.first(|c| c.iso_code == iso_code)
    }

    async fn find_by_continent(&self, continent: &str) -> Result<Vec<Country>, StoreError> {
        self.filtered(|c| c.continent.as_deref() == Some(continent))
    }

    async fn find_population_above(&self, min: i64) -> Result<Vec<Country>, StoreError> {
        self.filtered(|c| c.population.is_some_and(|p| p > min))
    }

    async fn find_area_above(&self, min: f64) -> Result<Vec<Country>, StoreError> {
        self.filtered(|c| c.area.is_some_and(|a| a > min))
    }

    async fn distinct_continents(&self) -> Result<Vec<String>, StoreError> {
        let inner = self.read()?;
        let set: BTreeSet<&str> = inner.rows.values().filter_map(|c| c.continent.as_deref()).collect();
        Ok(set.into_iter().map(String::from).collect())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.read()?.rows.len() as i64)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.write()?.rows.remove(&id).is_some())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.read()?.rows.contains_key(&id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.read().map(|_| ())
    }
}
