//! HTTP surface for the underwriting pipeline.
//!
//! Two POST endpoints wrap the pipeline's two operations; everything else
//! (wallet connection, signing, dashboards) lives in other services and
//! consumes these endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use trustline_core::{
    PipelineError, ReputationProfile, SignalRequest, Underwriting, UnderwritingPipeline,
};

/// Shared state: one pipeline instance for all requests.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<UnderwritingPipeline>,
}

/// Body of `POST /underwriting`: the signal identifiers plus the requested
/// collateral asset.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnderwritingRequest {
    #[serde(flatten)]
    pub signals: SignalRequest,
    #[serde(default)]
    pub collateral_asset: Option<String>,
}

/// Build the router for the pipeline endpoints.
pub fn router(pipeline: Arc<UnderwritingPipeline>) -> Router {
    Router::new()
        .route("/reputation", post(post_reputation))
        .route("/underwriting", post(post_underwriting))
        .route("/health", get(health))
        .with_state(AppState { pipeline })
}

/// Bind and serve until the process exits.
pub async fn serve(bind: &str, pipeline: Arc<UnderwritingPipeline>) -> anyhow::Result<()> {
    let app = router(pipeline);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(bind, "underwriting service listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

/// `POST /reputation` - aggregate signals only; never fails.
async fn post_reputation(
    State(state): State<AppState>,
    Json(request): Json<SignalRequest>,
) -> Json<ReputationProfile> {
    Json(state.pipeline.reputation(&request).await)
}

/// `POST /underwriting` - full pipeline run.
async fn post_underwriting(
    State(state): State<AppState>,
    Json(request): Json<UnderwritingRequest>,
) -> Result<Json<Underwriting>, ApiError> {
    let asset = request
        .collateral_asset
        .as_deref()
        .unwrap_or_default();
    let result = state.pipeline.underwrite(&request.signals, asset).await?;
    Ok(Json(result))
}

/// Pipeline errors rendered as `{"error": ...}` with the taxonomy's status.
struct ApiError(PipelineError);

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, "underwriting request failed");
        }
        (status, Json(json!({"error": self.0.to_string()}))).into_response()
    }
}
