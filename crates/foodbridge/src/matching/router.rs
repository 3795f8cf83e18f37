use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AlertId, SurplusPostId};
use super::repository::{Clock, MatchStore};
use super::scoring::RankedMatch;
use super::service::{MatchingError, MatchingService};

/// Router builder exposing the engine's three operations over HTTP.
pub fn matching_router<S, C>(service: Arc<MatchingService<S, C>>) -> Router
where
    S: MatchStore + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route(
            "/api/v1/matching/surplus/:post_id/matches",
            get(find_matches_handler::<S, C>).post(create_matches_handler::<S, C>),
        )
        .route(
            "/api/v1/matching/emergency/:alert_id/surplus",
            get(emergency_handler::<S, C>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct FindMatchesQuery {
    top_n: Option<usize>,
}

pub(crate) async fn find_matches_handler<S, C>(
    State(service): State<Arc<MatchingService<S, C>>>,
    Path(post_id): Path<String>,
    Query(query): Query<FindMatchesQuery>,
) -> Response
where
    S: MatchStore + 'static,
    C: Clock + 'static,
{
    let id = SurplusPostId(post_id);
    match service.find_best_matches(&id, query.top_n).await {
        Ok(matches) => {
            let payload = json!({
                "surplus_post_id": id.0,
                "count": matches.len(),
                "matches": matches,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_matches_handler<S, C>(
    State(service): State<Arc<MatchingService<S, C>>>,
    Path(post_id): Path<String>,
    axum::Json(matches): axum::Json<Vec<RankedMatch>>,
) -> Response
where
    S: MatchStore + 'static,
    C: Clock + 'static,
{
    let id = SurplusPostId(post_id);
    match service.create_matches(&id, &matches).await {
        Ok(match_ids) => {
            let payload = json!({
                "surplus_post_id": id.0,
                "match_ids": match_ids,
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn emergency_handler<S, C>(
    State(service): State<Arc<MatchingService<S, C>>>,
    Path(alert_id): Path<String>,
) -> Response
where
    S: MatchStore + 'static,
    C: Clock + 'static,
{
    let id = AlertId(alert_id);
    match service.find_emergency_matches(&id).await {
        Ok(surplus) => {
            let payload = json!({
                "alert_id": id.0,
                "count": surplus.len(),
                "surplus": surplus,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: MatchingError) -> Response {
    let status = match &err {
        MatchingError::PostNotFound(_) | MatchingError::AlertNotFound(_) => StatusCode::NOT_FOUND,
        MatchingError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
