//! The country record, shared by the wire format and the `countries` table.

use serde::{Deserialize, Serialize};

/// One row of `countries`. `id` is `None` until the store assigns it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub iso_code: String,
    #[serde(default)]
    pub capital: Option<String>,
    #[serde(default)]
    pub continent: Option<String>,
    #[serde(default)]
    pub population: Option<i64>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub official_language: Option<String>,
}

impl Country {
    /// Country with only the required fields set.
    pub fn new(name: impl Into<String>, iso_code: impl Into<String>) -> Self {
        Country {
            id: None,
            name: name.into(),
            iso_code: iso_code.into(),
            capital: None,
            continent: None,
            population: None,
            area: None,
            currency: None,
            official_language: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}
