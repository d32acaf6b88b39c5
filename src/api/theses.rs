use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::api::auth::CurrentUser;
use crate::api::store_error;
use crate::models::{Thesis, ThesisEntry, ThesisRequest};
use crate::state::AppState;

/// GET /api/theses - All theses, newest first
pub async fn list_theses(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<ThesisEntry>>, (StatusCode, String)> {
    let theses = state.store.list_theses(user.id).map_err(store_error)?;
    Ok(Json(theses))
}

/// POST /api/theses
pub async fn create_thesis(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<ThesisRequest>,
) -> Result<(StatusCode, Json<Thesis>), (StatusCode, String)> {
    let thesis = state.store.create_thesis(user.id, req).map_err(store_error)?;
    Ok((StatusCode::CREATED, Json(thesis)))
}

/// PUT /api/theses/:id
pub async fn update_thesis(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ThesisRequest>,
) -> Result<Json<Thesis>, (StatusCode, String)> {
    let thesis = state
        .store
        .update_thesis(user.id, id, req)
        .map_err(store_error)?;
    Ok(Json(thesis))
}

/// DELETE /api/theses/:id
pub async fn delete_thesis(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    state.store.delete_thesis(user.id, id).map_err(store_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/theses/starred - The starred thesis, or `null`
pub async fn starred_thesis(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Option<Thesis>>, (StatusCode, String)> {
    let thesis = state.store.starred_thesis(user.id).map_err(store_error)?;
    Ok(Json(thesis))
}

/// POST /api/theses/:id/star - Make this the single starred thesis
pub async fn star_thesis(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Thesis>, (StatusCode, String)> {
    let thesis = state.store.star_thesis(user.id, id).map_err(store_error)?;
    tracing::info!("{} starred thesis {}", user.email, thesis.id);
    Ok(Json(thesis))
}

/// DELETE /api/theses/:id/star
pub async fn unstar_thesis(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    state.store.unstar_thesis(user.id, id).map_err(store_error)?;
    Ok(StatusCode::NO_CONTENT)
}
