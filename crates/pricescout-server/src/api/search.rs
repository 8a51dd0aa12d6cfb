use axum::{
    extract::{Query, State},
    Extension, Json,
};
use pricescout_core::{LedgerEntry, Region, SearchResult};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    pub query: Option<String>,
    #[serde(alias = "country")]
    pub region: Option<Region>,
}

#[derive(Debug, Deserialize)]
pub(super) struct HistoryQuery {
    pub limit: Option<i64>,
}

pub(super) async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<ApiResponse<SearchResult>>, ApiError> {
    let query = params
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "validation_error",
                "query parameter is required",
            )
        })?;
    let region = params.region.unwrap_or_default();

    tracing::debug!(request_id = %req_id.0, query, region = %region, "search request");
    let result = state.engine.search(query, region).await;

    Ok(Json(ApiResponse {
        data: result,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn history(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<HistoryQuery>,
) -> Json<ApiResponse<Vec<LedgerEntry>>> {
    let entries = state
        .engine
        .ledger()
        .recent(normalize_limit(params.limit))
        .await;

    Json(ApiResponse {
        data: entries,
        meta: ResponseMeta::new(req_id.0),
    })
}
