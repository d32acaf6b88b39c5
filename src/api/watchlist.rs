use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::api::auth::CurrentUser;
use crate::api::store_error;
use crate::models::{
    SaveInventorRequest, SavePatentRequest, SaveQueryRequest, SavedInventor, SavedPatent,
    SavedQuery, Watchlist,
};
use crate::state::AppState;

/// GET /api/watchlist - Saved patents, queries and inventors, newest first
pub async fn get_watchlist(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Watchlist>, (StatusCode, String)> {
    let watchlist = state.store.watchlist(user.id).map_err(store_error)?;
    Ok(Json(watchlist))
}

/// POST /api/watchlist/patents
pub async fn save_patent(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<SavePatentRequest>,
) -> Result<(StatusCode, Json<SavedPatent>), (StatusCode, String)> {
    let patent = state.store.add_patent(user.id, req).map_err(store_error)?;
    tracing::info!("{} saved patent {}", user.email, patent.patent_id);
    Ok((StatusCode::CREATED, Json(patent)))
}

/// POST /api/watchlist/queries
pub async fn save_query(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<SaveQueryRequest>,
) -> Result<(StatusCode, Json<SavedQuery>), (StatusCode, String)> {
    let query = state.store.add_query(user.id, req).map_err(store_error)?;
    Ok((StatusCode::CREATED, Json(query)))
}

/// POST /api/watchlist/inventors
pub async fn save_inventor(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<SaveInventorRequest>,
) -> Result<(StatusCode, Json<SavedInventor>), (StatusCode, String)> {
    let inventor = state.store.add_inventor(user.id, req).map_err(store_error)?;
    Ok((StatusCode::CREATED, Json(inventor)))
}

/// DELETE /api/watchlist/patents/:id
pub async fn delete_patent(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    state.store.remove_patent(user.id, id).map_err(store_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/watchlist/queries/:id
pub async fn delete_query(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    state.store.remove_query(user.id, id).map_err(store_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/watchlist/inventors/:id
pub async fn delete_inventor(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    state.store.remove_inventor(user.id, id).map_err(store_error)?;
    Ok(StatusCode::NO_CONTENT)
}
