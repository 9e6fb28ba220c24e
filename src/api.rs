// HealthBot REST API (Axum)
// Router lives in the library so the server binary and tests share it

use crate::advice::{AdviceEngine, AdviceSet, ConditionId, DISCLAIMER};
use crate::bmi::{Bmi, BmiCategory, Tone};
use crate::dataset::{CorrelationMatrix, HealthDataset};
use crate::error::HealthError;
use crate::insights::Insights;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared application state (read-only, no locking)
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<HealthDataset>,
    pub engine: AdviceEngine,
}

impl AppState {
    pub fn new(dataset: HealthDataset) -> Self {
        AppState {
            dataset: Arc::new(dataset),
            engine: AdviceEngine::new(),
        }
    }
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn err(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

impl IntoResponse for HealthError {
    fn into_response(self) -> Response {
        let status = match &self {
            HealthError::UnknownCondition(_) | HealthError::UnknownColumn(_) => StatusCode::NOT_FOUND,
            HealthError::OutOfRange { .. } | HealthError::NotNumeric(_) | HealthError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::warn!(%status, error = %self, "request failed");
        (status, Json(ApiResponse::<()>::err(self.to_string()))).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, HealthError>;

#[derive(Serialize)]
struct ConditionResponse {
    slug: &'static str,
    label: &'static str,
}

#[derive(Serialize)]
struct AdviceResponse {
    condition: ConditionId,
    label: &'static str,
    disclaimer: &'static str,
    lines: AdviceSet,
}

#[derive(Deserialize)]
struct BmiQuery {
    height: f64,
    weight: f64,
}

#[derive(Serialize)]
struct BmiResponse {
    bmi: f64,
    display: String,
    category: BmiCategory,
    label: &'static str,
    tone: Tone,
}

#[derive(Serialize)]
struct BarPoint {
    name: String,
    value: f64,
}

#[derive(Serialize)]
struct LinePoint {
    age: f64,
    value: f64,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/conditions - Selectable conditions in display order
async fn list_conditions() -> Json<ApiResponse<Vec<ConditionResponse>>> {
    let conditions = ConditionId::ALL
        .iter()
        .map(|c| ConditionResponse {
            slug: c.slug(),
            label: c.label(),
        })
        .collect();
    Json(ApiResponse::ok(conditions))
}

/// GET /api/advice/:condition - Wellness suggestions for a label or slug
async fn get_advice(
    State(state): State<AppState>,
    Path(condition): Path<String>,
) -> ApiResult<AdviceResponse> {
    // Path has already percent-decoded the segment
    let id: ConditionId = condition.parse()?;
    Ok(Json(ApiResponse::ok(AdviceResponse {
        condition: id,
        label: id.label(),
        disclaimer: DISCLAIMER,
        lines: state.engine.lookup(id),
    })))
}

/// GET /api/bmi?height=&weight= - BMI calculator
async fn calculate_bmi(query: Result<Query<BmiQuery>, QueryRejection>) -> ApiResult<BmiResponse> {
    let Query(query) = query.map_err(|e| HealthError::InvalidQuery(e.body_text()))?;
    let bmi = Bmi::calculate(query.height, query.weight)?;
    Ok(Json(ApiResponse::ok(BmiResponse {
        bmi: bmi.value,
        display: bmi.to_string(),
        category: bmi.category,
        label: bmi.category.label(),
        tone: bmi.category.tone(),
    })))
}

/// GET /api/insights - Home page sample statistics
async fn get_insights() -> Json<ApiResponse<Insights>> {
    Json(ApiResponse::ok(Insights::sample()))
}

/// GET /api/dataset/columns - Numeric columns available for charts
async fn get_columns(State(state): State<AppState>) -> Json<ApiResponse<Vec<String>>> {
    Json(ApiResponse::ok(state.dataset.numeric_columns()))
}

/// GET /api/charts/bar/:metric
async fn bar_chart(State(state): State<AppState>, Path(metric): Path<String>) -> ApiResult<Vec<BarPoint>> {
    let points = state
        .dataset
        .bar_series(&metric)?
        .into_iter()
        .map(|(name, value)| BarPoint { name, value })
        .collect();
    Ok(Json(ApiResponse::ok(points)))
}

/// GET /api/charts/line/:metric
async fn line_chart(State(state): State<AppState>, Path(metric): Path<String>) -> ApiResult<Vec<LinePoint>> {
    let points = state
        .dataset
        .line_series(&metric)?
        .into_iter()
        .map(|(age, value)| LinePoint { age, value })
        .collect();
    Ok(Json(ApiResponse::ok(points)))
}

/// GET /api/charts/correlation - NaN cells serialize as null
async fn correlation(State(state): State<AppState>) -> Json<ApiResponse<CorrelationMatrix>> {
    Json(ApiResponse::ok(state.dataset.correlation_matrix()))
}

/// GET / - Serve index.html
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/conditions", get(list_conditions))
        .route("/advice/:condition", get(get_advice))
        .route("/bmi", get(calculate_bmi))
        .route("/insights", get(get_insights))
        .route("/dataset/columns", get(get_columns))
        .route("/charts/bar/:metric", get(bar_chart))
        .route("/charts/line/:metric", get(line_chart))
        .route("/charts/correlation", get(correlation))
        .with_state(state);

    Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        let csv = "Name,Age,Weight\nAlice,25,60\nBob,35,80\n";
        router(AppState::new(HealthDataset::from_reader(csv.as_bytes()).unwrap()))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], "OK");
    }

    #[tokio::test]
    async fn test_conditions() {
        let (_, body) = get_json("/api/conditions").await;
        let list = body["data"].as_array().unwrap();
        assert_eq!(list.len(), 10);
        assert_eq!(list[0]["label"], "None / Not Sure");
    }

    #[tokio::test]
    async fn test_advice_by_label() {
        let (status, body) = get_json("/api/advice/High%20Blood%20Pressure").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["condition"], "high-blood-pressure");
        let lines = body["data"]["lines"].as_array().unwrap();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0]["severity"], "warning");
        assert_eq!(lines[3]["severity"], "info");
    }

    #[tokio::test]
    async fn test_advice_unknown_condition() {
        let (status, body) = get_json("/api/advice/sprained-ankle").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_bmi() {
        let (status, body) = get_json("/api/bmi?height=1.65&weight=65").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["category"], "Normal");
        assert_eq!(body["data"]["tone"], "success");

        let (status, _) = get_json("/api/bmi?height=3.0&weight=65").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bmi_malformed_query_is_json() {
        for uri in ["/api/bmi?height=&weight=65", "/api/bmi?weight=65", "/api/bmi?height=abc&weight=65"] {
            let (status, body) = get_json(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body["success"], false);
            assert!(body["error"].as_str().unwrap().starts_with("Invalid query"));
        }
    }

    #[tokio::test]
    async fn test_advice_path_decoded_once() {
        let (status, _) = get_json("/api/advice/High%2520Blood%2520Pressure").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = get_json("/api/advice/diabetes").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["lines"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_insights_and_index_page() {
        let (_, body) = get_json("/api/insights").await;
        assert_eq!(body["data"]["weekly_trends"].as_array().unwrap().len(), 7);

        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Sample Health Trends"));
        assert!(html.contains("weekly_trends"));
    }

    #[tokio::test]
    async fn test_charts() {
        let (_, body) = get_json("/api/dataset/columns").await;
        assert_eq!(body["data"], serde_json::json!(["Age", "Weight"]));

        let (_, body) = get_json("/api/charts/bar/Weight").await;
        assert_eq!(body["data"][1]["name"], "Bob");

        let (_, body) = get_json("/api/charts/line/Weight").await;
        assert_eq!(body["data"][0]["age"], 25.0);

        let (status, _) = get_json("/api/charts/bar/Name").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = get_json("/api/charts/correlation").await;
        assert_eq!(body["data"]["columns"].as_array().unwrap().len(), 2);
    }
}
