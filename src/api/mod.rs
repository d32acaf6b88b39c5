use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::state::AppState;
use crate::store::StoreError;

pub mod auth;
pub mod search;
pub mod theses;
pub mod users;
pub mod watchlist;

/// Build the REST router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(users::health))
        .route("/api/user/profile", get(users::profile))
        .route("/api/watchlist", get(watchlist::get_watchlist))
        .route("/api/watchlist/patents", post(watchlist::save_patent))
        .route("/api/watchlist/patents/{id}", delete(watchlist::delete_patent))
        .route("/api/watchlist/queries", post(watchlist::save_query))
        .route("/api/watchlist/queries/{id}", delete(watchlist::delete_query))
        .route("/api/watchlist/inventors", post(watchlist::save_inventor))
        .route("/api/watchlist/inventors/{id}", delete(watchlist::delete_inventor))
        .route("/api/theses", get(theses::list_theses))
        .route("/api/theses", post(theses::create_thesis))
        .route("/api/theses/starred", get(theses::starred_thesis))
        .route("/api/theses/{id}", put(theses::update_thesis))
        .route("/api/theses/{id}", delete(theses::delete_thesis))
        .route("/api/theses/{id}/star", post(theses::star_thesis))
        .route("/api/theses/{id}/star", delete(theses::unstar_thesis))
        .route("/api/patents/search", get(search::search))
        .with_state(state)
}

/// Map a store failure to an HTTP error.
pub(crate) fn store_error(e: StoreError) -> (StatusCode, String) {
    let status = match &e {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Duplicate(_) => StatusCode::CONFLICT,
        StoreError::Invalid(_) => StatusCode::BAD_REQUEST,
        StoreError::Io(_) | StoreError::Json(_) => {
            tracing::error!("Store failure: {e}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, e.to_string())
}
