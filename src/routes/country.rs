//! Country routes. Static segments (`count`, `continents`) win over `:id`.

use crate::handlers::country::{
    continents, count, create, delete, list, list_area_above, list_by_continent, list_population_above, read,
    read_by_code, read_by_name, update,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn country_routes(state: AppState) -> Router {
    Router::new()
        .route("/countries", get(list).post(create))
        .route("/countries/count", get(count))
        .route("/countries/continents", get(continents))
        .route("/countries/:id", get(read).put(update).delete(delete))
        .route("/countries/name/:name", get(read_by_name))
        .route("/countries/code/:iso_code", get(read_by_code))
        .route("/countries/continent/:continent", get(list_by_continent))
        .route("/countries/population/min/:min", get(list_population_above))
        .route("/countries/area/min/:min", get(list_area_above))
        .with_state(state)
}
