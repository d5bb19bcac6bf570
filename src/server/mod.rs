// src/server/mod.rs

//! HTTP surface: a thin axum layer over the agent and its tools.
//!
//! `/chat` runs full agent turns against the process-wide session; the other
//! routes expose the individual capabilities directly, mirroring the tool
//! boundary's error-to-string conversion.

use crate::agent::Agent;
use crate::agent::memory::ConversationMemory;
use crate::calculator;
use crate::config::CONFIG;
use crate::products::{Product, SemanticRetriever, ProductSummarizer};
use crate::tools::{PRODUCT_UNAVAILABLE_MSG, ToolExecutor, ToolName};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::error;

pub struct AppState {
    pub agent: Agent,
    pub session: Mutex<ConversationMemory>,
    pub tools: ToolExecutor,
    pub retriever: SemanticRetriever,
    pub summarizer: ProductSummarizer,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat))
        .route("/products", get(products))
        .route("/outlets", post(outlets))
        .route("/calculator", post(calculate))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

/// One full agent turn. Turns are serialized on the session lock; iterations
/// within a turn are strictly sequential anyway.
async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let mut session = state.session.lock().await;
    let answer = state.agent.handle_turn(&mut session, &req.message).await;
    Json(ChatResponse { answer })
}

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub query: String,
    pub summary: String,
    pub results: Vec<Product>,
}

async fn products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProductQuery>,
) -> Json<ProductResponse> {
    let results = match state.retriever.retrieve(&params.query, CONFIG.retrieval_k).await {
        Ok(results) => results,
        Err(e) => {
            error!("product search failed: {e:#}");
            return Json(ProductResponse {
                query: params.query,
                summary: PRODUCT_UNAVAILABLE_MSG.to_string(),
                results: Vec::new(),
            });
        }
    };

    let summary = match state.summarizer.summarize(&params.query, &results).await {
        Ok(summary) => summary,
        Err(e) => {
            error!("product summary failed: {e:#}");
            PRODUCT_UNAVAILABLE_MSG.to_string()
        }
    };

    Json(ProductResponse {
        query: params.query,
        summary,
        results,
    })
}

#[derive(Debug, Deserialize)]
pub struct OutletRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct OutletResponse {
    pub answer: String,
}

async fn outlets(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OutletRequest>,
) -> Json<OutletResponse> {
    let answer = state.tools.invoke(ToolName::OutletInfo, &req.question).await;
    Json(OutletResponse { answer })
}

#[derive(Debug, Deserialize)]
pub struct CalcRequest {
    pub expression: String,
}

#[derive(Debug, Serialize)]
pub struct CalcResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

async fn calculate(Json(req): Json<CalcRequest>) -> Json<CalcResponse> {
    match calculator::evaluate(&req.expression) {
        Ok(result) => Json(CalcResponse {
            result: Some(result),
            error: None,
        }),
        Err(e) => Json(CalcResponse {
            result: None,
            error: Some(e.to_string()),
        }),
    }
}
