use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::catalog::{Category, Scheme};
use crate::config::Config;
use crate::eligibility::{RecommendationReport, SchemeMatch};
use crate::engine::Engine;
use crate::error::EngineError;
use crate::questions::{AnswerSheet, Question};
use crate::wizard::Wizard;

#[derive(Clone)]
struct ApiState {
    config: Config,
    engine: Arc<Engine>,
}

#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    ok: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    question_id: Option<String>,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
    question_id: Option<String>,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            question_id: None,
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        let status = match &err {
            EngineError::UnknownScheme(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };
        let question_id = match &err {
            EngineError::Validation { question_id, .. } => Some(question_id.clone()),
            _ => None,
        };
        if !err.is_user_error() {
            warn!("request rejected: {err}");
        }
        Self {
            status,
            message: err.to_string(),
            question_id,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            ok: false,
            error: self.message,
            question_id: self.question_id,
        });
        (self.status, body).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, ApiError>;

#[derive(Debug, Clone, Default, Deserialize)]
struct SchemeListQuery {
    category: Option<String>,
    search: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RecommendRequest {
    #[serde(default)]
    answers: AnswerSheet,
    top: Option<usize>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct SchemeListResponse<'a> {
    total: usize,
    schemes: Vec<&'a Scheme>,
}

#[derive(Debug, Serialize)]
struct EligibilityCheckResponse {
    scheme: String,
    eligible: bool,
    reasons: Vec<String>,
    next_steps: Vec<String>,
    result: SchemeMatch,
}

pub fn router(engine: Arc<Engine>, config: Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/v1/questions", get(questions))
        .route("/v1/schemes", get(list_schemes))
        .route("/v1/schemes/:id", get(scheme_details))
        .route("/v1/schemes/:id/eligibility", post(check_eligibility))
        .route("/v1/recommendations", post(recommend))
        .route("/v1/config", get(show_config))
        .layer(cors)
        .with_state(ApiState { config, engine })
}

pub async fn run_server(config: Config, engine: Arc<Engine>, bind: SocketAddr) -> Result<()> {
    let app = router(engine, config);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("REST API listening on http://{bind}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<ApiResponse<HealthResponse>> {
    ok(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn show_config(State(state): State<ApiState>) -> Json<ApiResponse<Config>> {
    ok(state.config)
}

async fn questions(State(state): State<ApiState>) -> Json<ApiResponse<Vec<Question>>> {
    ok(state.engine.questions().iter().cloned().collect())
}

async fn list_schemes(
    State(state): State<ApiState>,
    Query(query): Query<SchemeListQuery>,
) -> Response {
    let category = match query.category.as_deref().map(Category::from_str).transpose() {
        Ok(category) => category,
        Err(err) => return ApiError::bad_request(err.to_string()).into_response(),
    };
    let schemes = state
        .engine
        .catalog()
        .search(category, query.search.as_deref());
    ok(SchemeListResponse {
        total: schemes.len(),
        schemes,
    })
    .into_response()
}

async fn scheme_details(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Scheme> {
    let scheme = state.engine.catalog().require(&id)?;
    Ok(ok(scheme.clone()))
}

async fn check_eligibility(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(sheet): Json<AnswerSheet>,
) -> ApiResult<EligibilityCheckResponse> {
    let scheme = state.engine.catalog().require(&id)?;
    let mut wizard = Wizard::new(Arc::clone(&state.engine));
    wizard.fill(&sheet)?;
    let result = state.engine.match_scheme(wizard.answers(), scheme);

    let reasons = if result.eligible && result.reasons.is_empty() {
        vec!["You are eligible for this scheme".to_string()]
    } else {
        result.reasons.clone()
    };
    let next_steps = if result.eligible {
        scheme.documents_required.clone()
    } else {
        Vec::new()
    };
    Ok(ok(EligibilityCheckResponse {
        scheme: scheme.name.clone(),
        eligible: result.eligible,
        reasons,
        next_steps,
        result,
    }))
}

async fn recommend(
    State(state): State<ApiState>,
    Json(request): Json<RecommendRequest>,
) -> ApiResult<RecommendationReport> {
    let wizard = Wizard::replay(Arc::clone(&state.engine), &request.answers)?;
    let top = request.top.unwrap_or(state.config.presentation.top_n);
    let report = wizard
        .into_report()
        .ok_or_else(|| ApiError::bad_request("questionnaire did not complete"))?;
    Ok(ok(report.truncated(top)))
}

fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse { ok: true, data })
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        router(Arc::new(Engine::with_defaults()), Config::default())
    }

    async fn call(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let body = serde_json::from_slice(&bytes).expect("json body");
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request builds")
    }

    #[tokio::test]
    async fn lists_schemes_filtered_by_category() {
        let (status, body) = call(get_req("/v1/schemes?category=pension")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["schemes"][0]["id"], "pm-kmy");

        let (status, _) = call(get_req("/v1/schemes?category=lottery")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_scheme_is_not_found() {
        let (status, body) = call(get_req("/v1/schemes/free-tractor")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["ok"], false);
    }

    #[tokio::test]
    async fn eligibility_check_explains_land_ceiling() {
        let (status, body) = call(post_json(
            "/v1/schemes/pm-kisan/eligibility",
            json!({ "land_size": "large", "farmer_type": "owner" }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["eligible"], false);
        assert_eq!(
            body["data"]["reasons"][0],
            "Land size exceeds the 2 hectare limit for PM-KISAN"
        );
        assert_eq!(body["data"]["next_steps"], json!([]));

        let (_, body) = call(post_json(
            "/v1/schemes/pm-kisan/eligibility",
            json!({ "land_size": "small", "farmer_type": "owner" }),
        ))
        .await;
        assert_eq!(body["data"]["eligible"], true);
        assert_eq!(body["data"]["reasons"][0], "You are eligible for this scheme");
        assert_eq!(body["data"]["next_steps"][0], "Aadhaar Card");
    }

    #[tokio::test]
    async fn incomplete_answers_report_missing_question() {
        let (status, body) = call(post_json(
            "/v1/recommendations",
            json!({ "answers": { "land_size": "small" } }),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["question_id"], "farmer_type");
    }

    #[tokio::test]
    async fn recommendations_are_truncated_after_ranking() {
        let (status, body) = call(post_json(
            "/v1/recommendations",
            json!({
                "answers": {
                    "land_size": "small",
                    "farmer_type": "owner",
                    "age": "18-30",
                    "category": "general",
                    "interests": ["pension", "credit"]
                },
                "top": 3
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        let matches = body["data"]["matches"].as_array().expect("matches array");
        assert_eq!(matches.len(), 3);
        assert_eq!(body["data"]["evaluated"], 12);
        assert_eq!(matches[0]["scheme_id"], "pm-kmy");
    }
}
