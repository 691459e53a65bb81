use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use cryptocredit::datasource::ChainDataSource;
use cryptocredit::scoring::{score_router, CreditScoringService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_scoring_routes<D>(service: Arc<CreditScoringService<D>>) -> axum::Router
where
    D: ChainDataSource + 'static,
{
    score_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use cryptocredit::datasource::DataSourceError;
    use cryptocredit::scoring::{
        NftHolding, RawTransaction, RequestLimits, ScoreAggregator, ScoreWeights, TokenBalance,
    };
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    struct EmptyWallets;

    impl ChainDataSource for EmptyWallets {
        async fn transactions(
            &self,
            _address: &str,
            _chain: &str,
            _limit: u32,
        ) -> Result<Vec<RawTransaction>, DataSourceError> {
            Ok(Vec::new())
        }

        async fn token_balances(
            &self,
            _address: &str,
            _chain: &str,
        ) -> Result<Vec<TokenBalance>, DataSourceError> {
            Ok(Vec::new())
        }

        async fn nft_holdings(
            &self,
            _address: &str,
            _chain: &str,
        ) -> Result<Vec<NftHolding>, DataSourceError> {
            Ok(Vec::new())
        }
    }

    fn app(ready: bool) -> axum::Router {
        let aggregator =
            ScoreAggregator::new(ScoreWeights::default()).expect("default weights validate");
        let service = CreditScoringService::new(
            Arc::new(EmptyWallets),
            aggregator,
            RequestLimits::default(),
        );
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_scoring_routes(Arc::new(service)).layer(Extension(state))
    }

    async fn get(app: axum::Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response")
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json payload")
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let response = get(app(false), "/ready").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await["status"], "initializing");

        let response = get(app(true), "/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ready");
    }

    #[tokio::test]
    async fn health_and_metrics_respond() {
        let response = get(app(true), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");

        let response = get(app(true), "/metrics").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn merged_router_serves_scores() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/score")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "address": "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
                    "chain": "ethereum",
                })
                .to_string(),
            ))
            .expect("request");

        let response = app(true).oneshot(request).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["credit_score"], 0);
        assert_eq!(body["transactions"], json!([]));
    }
}
