use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::auth::CurrentUser;
use crate::api::store_error;
use crate::models::{SearchParams, SearchResponse, StarredThesisRef};
use crate::search::{attach_alignment, paginate, rank, RankingOptions};
use crate::state::AppState;

/// GET /api/patents/search - Patent search with thesis alignment:
///   1. Fetch a candidate pool from the provider
///   2. Score every candidate against the starred thesis (if any)
///   3. Apply the optional alignment threshold and sort
///   4. Paginate locally
pub async fn search(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let query = params.query.trim().to_string();
    if query.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Query is required".to_string()));
    }
    if let Some(min) = params.min_alignment {
        if !(0.0..=1.0).contains(&min) {
            return Err((
                StatusCode::BAD_REQUEST,
                "min_alignment must be between 0 and 1".to_string(),
            ));
        }
    }
    let limit = params.limit.clamp(1, state.config.max_page_size);
    let offset = params.offset;

    // ── Step 1: Candidate pool ──────────────────────────────
    let pool_size = state.config.serpapi.results_per_query.max(limit);
    let batch = state
        .provider
        .search(&query, pool_size)
        .await
        .map_err(|e| {
            tracing::warn!("Patent search failed for {query:?}: {e}");
            (StatusCode::BAD_GATEWAY, format!("Search failed: {e}"))
        })?;

    // ── Step 2: Alignment against the starred thesis ────────
    let thesis = state.store.starred_thesis(user.id).map_err(store_error)?;
    let mut records = batch.records;
    attach_alignment(&mut records, thesis.as_ref());

    // ── Step 3 + 4: Filter, sort, paginate ─────────────────
    let ranked = rank(
        records,
        RankingOptions {
            min_alignment: params.min_alignment,
            sort: params.sort,
        },
    );
    let page = paginate(ranked, offset, limit);

    tracing::info!(
        "Search {query:?} for {}: {} candidates, returning {}",
        user.email,
        page.total,
        page.results.len()
    );

    Ok(Json(SearchResponse {
        results: page.results,
        total: page.total,
        query,
        limit,
        offset,
        has_more: page.has_more,
        starred_thesis: thesis.map(|t| StarredThesisRef {
            id: t.id,
            title: t.title,
        }),
        source: state.provider.name().to_string(),
        message: batch.message,
        provider_info: batch.info,
    }))
}
