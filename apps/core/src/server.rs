//! HTTP surface: shared state, router, and request handlers.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{ConnectInfo, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::info;
use validator::Validate;

use crate::error::AppError;
use crate::feedback::FeedbackRecorder;
use crate::models::{
    ChatRequest, ConversationMode, FeedbackRequest, FeedbackResponse, HealthResponse,
};
use crate::pipeline::classifier::MoodModel;
use crate::pipeline::{MoodEngine, MoodReport};
use crate::polarity::PolarityScorer;
use crate::rate_limiter::RateLimiter;

/// Shared application state, cloned cheaply per request.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<MoodEngine>,
    pub recorder: Arc<FeedbackRecorder>,
    pub scorer: Arc<PolarityScorer>,
    pub limiter: Arc<Mutex<RateLimiter>>,
    /// Request-level cap on message length, in characters.
    pub max_message_len: usize,
}

/// Build the router over shared state.
///
/// Pure function of the state so tests can drive the exact production
/// routes through `tower::ServiceExt::oneshot`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/feedback", post(feedback))
        .route("/health", get(health))
        .with_state(state)
}

/// POST /chat: classify one message and produce a mood report.
async fn chat(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<MoodReport>, AppError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::EmptyMessage);
    }
    request.validate()?;
    if message.chars().count() > state.max_message_len {
        return Err(AppError::Validation(format!(
            "Message too long (max {} characters)",
            state.max_message_len
        )));
    }

    let client_key = addr.ip().to_string();
    {
        let mut limiter = state
            .limiter
            .lock()
            .map_err(|_| AppError::Internal("Rate limiter lock poisoned".to_string()))?;
        if !limiter.check(&client_key) {
            return Err(AppError::RateLimited);
        }
    }

    let mode: ConversationMode = request.mode.parse()?;
    let report = state.engine.respond(message, mode);
    info!(request = %report.id, outcome = ?report.outcome, "Chat handled");
    Ok(Json(report))
}

/// POST /feedback: score the feedback text and append it to the log.
async fn feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("Empty feedback".to_string()));
    }
    request.validate()?;

    let sentiment = state.scorer.classify(text);
    state.recorder.record(
        text,
        &request.predicted,
        &request.actual,
        sentiment,
        request.prediction_id.as_deref(),
    )?;

    info!(sentiment = %sentiment, "Feedback recorded");
    Ok(Json(FeedbackResponse {
        message: "Feedback received successfully".to_string(),
        sentiment,
    }))
}

/// GET /health: liveness plus the size of the loaded label set.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        labels: state.engine.model().labels().len(),
    })
}
