// src/main.rs

use std::sync::Arc;

use reqwest::Client;
use sqlx::sqlite::SqlitePoolOptions;
use tokio::sync::Mutex;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use zusbot::agent::Agent;
use zusbot::agent::memory::ConversationMemory;
use zusbot::config::CONFIG;
use zusbot::llm::OpenAIClient;
use zusbot::outlets::{OutletExecutor, SqlGenerator};
use zusbot::products::index::QdrantProductIndex;
use zusbot::products::{ProductSummarizer, SemanticRetriever};
use zusbot::server::{self, AppState};
use zusbot::tools::ToolExecutor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let level = CONFIG.log_level.parse::<Level>().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting zusbot (model: {})", CONFIG.chat_model);

    // Process-wide resources: opened once, shared until shutdown.
    let pool = SqlitePoolOptions::new()
        .max_connections(CONFIG.sqlite_max_connections)
        .connect(&CONFIG.database_url)
        .await?;

    let llm = Arc::new(OpenAIClient::new()?);
    let index = Arc::new(QdrantProductIndex::new(
        Client::new(),
        CONFIG.qdrant_url.clone(),
        CONFIG.qdrant_collection.clone(),
    ));

    let retriever = SemanticRetriever::new(llm.clone(), index);
    let summarizer = ProductSummarizer::new(llm.clone());
    let outlets = OutletExecutor::new(SqlGenerator::new(llm.clone()), pool.clone());

    let tools = ToolExecutor::new(retriever.clone(), summarizer.clone(), outlets)
        .with_top_k(CONFIG.retrieval_k);
    let agent =
        Agent::new(llm, tools.clone()).with_max_iterations(CONFIG.agent_max_iterations);

    let state = Arc::new(AppState {
        agent,
        session: Mutex::new(ConversationMemory::new()),
        tools,
        retriever,
        summarizer,
    });

    let app = server::router(state);
    let bind_address = CONFIG.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
