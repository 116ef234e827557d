use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use globenews_core::EnrichedArticle;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

const DEFAULT_COUNT: i64 = 20;
const MAX_COUNT: i64 = 100;

#[derive(Debug, Deserialize)]
pub(super) struct ArticlesQuery {
    n: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct ArticlesResponse {
    articles: Vec<EnrichedArticle>,
}

/// Parse the `n` query value: absent means the default, anything that is not
/// a positive integer is rejected, and large values are capped.
fn parse_count(raw: Option<&str>) -> Result<i64, String> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_COUNT);
    };
    match raw.trim().parse::<i64>() {
        Ok(n) if n > 0 => Ok(n.min(MAX_COUNT)),
        Ok(_) => Err(format!("n must be a positive integer, got {raw}")),
        Err(_) => Err(format!("n must be an integer, got '{raw}'")),
    }
}

pub(super) async fn list_articles(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<ArticlesQuery>, QueryRejection>,
) -> Result<Json<ArticlesResponse>, ApiError> {
    // Malformed query strings (e.g. a repeated `n`) get the JSON error body too.
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let n = parse_count(query.n.as_deref()).map_err(ApiError::bad_request)?;

    let articles = state.store.sample(n).await.map_err(|e| {
        tracing::error!(request_id = %req_id.0, error = %e, "failed to sample articles");
        ApiError::internal()
    })?;

    tracing::debug!(
        request_id = %req_id.0,
        requested = n,
        returned = articles.len(),
        "served articles"
    );
    Ok(Json(ArticlesResponse { articles }))
}
