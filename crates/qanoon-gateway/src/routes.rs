//! HTTP surface: legal Q&A endpoint, CORS preflight, health and status.

use axum::{
    body::{Body, Bytes},
    extract::{ConnectInfo, State},
    http::{header, Method, Request, StatusCode},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use futures_util::FutureExt;
use qanoon_core::{
    AnswerPipeline, AnswerResponse, Language, QanoonConfig, QuestionRequest, RequestError,
};
use std::any::Any;
use std::net::SocketAddr;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};

pub struct AppState {
    pipeline: AnswerPipeline,
    max_response_length: usize,
}

impl AppState {
    pub fn new(pipeline: AnswerPipeline, max_response_length: usize) -> Self {
        Self {
            pipeline,
            max_response_length,
        }
    }

    pub fn from_config(config: QanoonConfig) -> Self {
        Self::new(AnswerPipeline::from_config(&config), config.max_response_length)
    }
}

pub fn build_app(state: Arc<AppState>) -> Router {
    // Public educational API: any origin may call it.
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .route("/api/status", get(status))
        .route("/api/legal-qa", post(legal_qa))
        .with_state(state)
        .layer(cors)
        .layer(axum::middleware::from_fn(log_request))
}

async fn log_request(request: Request<Body>, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    tracing::info!(
        method = %request.method(),
        path = %request.uri().path(),
        peer = %peer,
        "[GATEWAY] Request"
    );
    next.run(request).await
}

async fn health() -> &'static str {
    "OK"
}

/// Which providers hold a credential. Never exposes the keys themselves.
async fn status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "qanoon-gateway",
        "version": qanoon_core::version(),
        "configured": state.pipeline.is_configured(),
        "providers": state.pipeline.configured_providers(),
        "max_response_length": state.max_response_length,
    }))
}

/// POST /api/legal-qa: 400 for bad input, 200 with a disclaimed answer, 500 when no
/// provider could answer or something failed unexpectedly.
///
/// The body is parsed as JSON whatever the `Content-Type`, so plain `fetch` calls
/// without the header still work.
async fn legal_qa(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> (StatusCode, Json<AnswerResponse>) {
    let request = match serde_json::from_slice::<QuestionRequest>(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("[GATEWAY] Unreadable body: {}", e);
            return bad_request(Language::default(), &RequestError::MissingFields);
        }
    };

    let language = request.language_hint();
    let question = match request.into_question() {
        Ok(q) => q,
        Err(e) => return bad_request(language, &e),
    };

    match AssertUnwindSafe(state.pipeline.generate_answer(&question))
        .catch_unwind()
        .await
    {
        Ok(response) => {
            let status = if response.success {
                StatusCode::OK
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, Json(response))
        }
        Err(panic) => {
            let detail = panic_detail(panic.as_ref());
            tracing::error!(
                topic = %question.topic(),
                language = %language,
                "[GATEWAY] Unhandled failure while answering: {}",
                detail
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AnswerResponse::failure(
                    language,
                    language.apology_message(),
                    detail,
                )),
            )
        }
    }
}

fn bad_request(language: Language, err: &RequestError) -> (StatusCode, Json<AnswerResponse>) {
    tracing::info!("[GATEWAY] Rejected request: {}", err);
    (
        StatusCode::BAD_REQUEST,
        Json(AnswerResponse::failure(
            language,
            err.localized(language),
            err.to_string(),
        )),
    )
}

fn panic_detail(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
