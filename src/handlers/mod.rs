//! HTTP handlers.

pub mod country;
