use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::service::{CreditScoringService, ScoreRequest, ScoringError};
use crate::chains::{self, SUPPORTED_CHAINS};
use crate::datasource::ChainDataSource;

/// Router builder exposing the scoring and chain listing endpoints.
pub fn score_router<D>(service: Arc<CreditScoringService<D>>) -> Router
where
    D: ChainDataSource + 'static,
{
    Router::new()
        .route("/api/v1/score", post(score_handler::<D>))
        .route("/api/v1/chains", get(chains_handler))
        .with_state(service)
}

/// Resolves the user-facing chain symbol, then scores the wallet.
pub(crate) async fn score_handler<D>(
    State(service): State<Arc<CreditScoringService<D>>>,
    Json(mut request): Json<ScoreRequest>,
) -> Response
where
    D: ChainDataSource + 'static,
{
    let Some(chain) = chains::resolve(&request.chain) else {
        let payload = json!({
            "error": "Unsupported or invalid chain specified.",
            "chain": request.chain,
        });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    };
    request.chain = chain.provider_chain.to_string();

    match service.score(request).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn chains_handler() -> Response {
    (StatusCode::OK, Json(json!({ "chains": SUPPORTED_CHAINS }))).into_response()
}

impl IntoResponse for ScoringError {
    fn into_response(self) -> Response {
        match self {
            ScoringError::InvalidRequest(_) => {
                let payload = json!({ "error": self.to_string() });
                (StatusCode::BAD_REQUEST, Json(payload)).into_response()
            }
            ScoringError::DataSourceUnavailable(_) => {
                let payload = json!({
                    "error": self.to_string(),
                    "retryable": true,
                });
                (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
            }
        }
    }
}
