//! Response helpers shared by handlers.

use crate::error::AppError;
use axum::Json;

/// 200 with the record when present, otherwise 404 naming what was looked up.
pub fn found<T>(value: Option<T>, what: impl FnOnce() -> String) -> Result<Json<T>, AppError> {
    value.map(Json).ok_or_else(|| AppError::NotFound(what()))
}
