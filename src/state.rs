//! Shared application state for all routes.

use crate::service::CountryService;
use crate::store::CountryStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub countries: CountryService,
}

impl AppState {
    pub fn new(store: Arc<dyn CountryStore>) -> Self {
        AppState {
            countries: CountryService::new(store),
        }
    }
}
