//! `countries` DDL and queries against PostgreSQL. The table lives in the schema
//! given at construction (`WORLDER_SCHEMA`, default `public`).

use super::CountryStore;
use crate::error::StoreError;
use crate::model::Country;
use async_trait::async_trait;
use sqlx::ConnectOptions;
use sqlx::postgres::PgConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

const COLUMNS: &str =
    "id, name, iso_code, capital, continent, population, area, currency, official_language";

#[derive(Clone)]
pub struct PgCountryStore {
    pool: PgPool,
    schema: String,
    table: String,
}

impl PgCountryStore {
    /// `schema` must be a plain identifier; it is quoted, never bound.
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgCountryStore {
            pool,
            schema: quote_ident(schema),
            table: format!("{}.countries", quote_ident(schema)),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the schema and `countries` table if they do not exist.
    pub async fn ensure_table(&self) -> Result<(), StoreError> {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", self.schema))
            .execute(&self.pool)
            .await?;
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                iso_code VARCHAR(3) NOT NULL UNIQUE,
                capital TEXT,
                continent TEXT,
                population BIGINT,
                area DOUBLE PRECISION,
                currency TEXT,
                official_language TEXT
            )
            "#,
            self.table
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, c: &Country) -> Result<Country, StoreError> {
        let sql = format!(
            "INSERT INTO {} (name, iso_code, capital, continent, population, area, currency, official_language) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            self.table, COLUMNS
        );
        tracing::debug!(sql = %sql, name = %c.name, iso_code = %c.iso_code, "query");
        let row = sqlx::query_as::<_, Country>(&sql)
            .bind(&c.name)
            .bind(&c.iso_code)
            .bind(&c.capital)
            .bind(&c.continent)
            .bind(c.population)
            .bind(c.area)
            .bind(&c.currency)
            .bind(&c.official_language)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn replace(&self, id: i64, c: &Country) -> Result<Country, StoreError> {
        let sql = format!(
            "UPDATE {} SET name = $2, iso_code = $3, capital = $4, continent = $5, population = $6, \
             area = $7, currency = $8, official_language = $9 WHERE id = $1 RETURNING {}",
            self.table, COLUMNS
        );
        tracing::debug!(sql = %sql, id, name = %c.name, iso_code = %c.iso_code, "query");
        sqlx::query_as::<_, Country>(&sql)
            .bind(id)
            .bind(&c.name)
            .bind(&c.iso_code)
            .bind(&c.capital)
            .bind(&c.continent)
            .bind(c.population)
            .bind(c.area)
            .bind(&c.currency)
            .bind(&c.official_language)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    fn select(&self, clause: &str) -> String {
        format!("SELECT {} FROM {} {}", COLUMNS, self.table, clause)
    }
}

#[async_trait]
impl CountryStore for PgCountryStore {
    async fn save(&self, country: &Country) -> Result<Country, StoreError> {
        match country.id {
            None => self.insert(country).await,
            Some(id) => self.replace(id, country).await,
        }
    }

    async fn find_all(&self) -> Result<Vec<Country>, StoreError> {
        let sql = self.select("ORDER BY id");
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Country>, StoreError> {
        let sql = self.select("WHERE id = $1");
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Country>, StoreError> {
        let sql = self.select("WHERE name = $1");
        tracing::debug!(sql = %sql, name, "query");
        Ok(sqlx::query_as(&sql).bind(name).fetch_optional(&self.pool).await?)
    }

    async fn find_by_iso_code(&self, iso_code: &str) -> Result<Option<Country>, StoreError> {
        let sql = self.select("WHERE iso_code = $1");
        tracing::debug!(sql = %sql, iso_code, "query");
        Ok(sqlx::query_as(&sql).bind(iso_code).fetch_optional(&self.pool).await?)
    }

    async fn find_by_continent(&self, continent: &str) -> Result<Vec<Country>, StoreError> {
        let sql = self.select("WHERE continent = $1 ORDER BY id");
        tracing::debug!(sql = %sql, continent, "query");
        Ok(sqlx::query_as(&sql).bind(continent).fetch_all(&self.pool).await?)
    }

    async fn find_population_above(&self, min: i64) -> Result<Vec<Country>, StoreError> {
        let sql = self.select("WHERE population > $1 ORDER BY id");
        tracing::debug!(sql = %sql, min, "query");
        Ok(sqlx::query_as(&sql).bind(min).fetch_all(&self.pool).await?)
    }

    async fn find_area_above(&self, min: f64) -> Result<Vec<Country>, StoreError> {
        let sql = self.select("WHERE area > $1 ORDER BY id");
        tracing::debug!(sql = %sql, min, "query");
        Ok(sqlx::query_as(&sql).bind(min).fetch_all(&self.pool).await?)
    }

    async fn distinct_continents(&self) -> Result<Vec<String>, StoreError> {
        let sql = format!(
            "SELECT DISTINCT continent FROM {} WHERE continent IS NOT NULL ORDER BY continent",
            self.table
        );
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<(String,)> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|(c,)| c).collect())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.table);
        tracing::debug!(sql = %sql, "query");
        let (n,): (i64,) = sqlx::query_as(&sql).fetch_one(&self.pool).await?;
        Ok(n)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table);
        tracing::debug!(sql = %sql, id, "query");
        let done = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(done.rows_affected() > 0)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", self.table);
        tracing::debug!(sql = %sql, id, "query");
        let (exists,): (bool,) = sqlx::query_as(&sql).bind(id).fetch_one(&self.pool).await?;
        Ok(exists)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database, with the same host, credentials and TLS settings,
/// to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let Some((admin, db_name)) = admin_options(database_url)? else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the `postgres` maintenance database plus the target database name.
/// `None` when the URL names no database or already names `postgres`.
fn admin_options(database_url: &str) -> Result<Option<(PgConnectOptions, String)>, StoreError> {
    let opts = PgConnectOptions::from_str(database_url)?;
    let db_name = match opts.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(None),
    };
    Ok(Some((opts.database("postgres"), db_name)))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
