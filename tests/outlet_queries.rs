// tests/outlet_queries.rs
//
// Outlet lookup pipeline: safety gate, NL->SQL delegation, execution, and
// result formatting against an in-memory outlets table.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use sqlx::SqlitePool;

use zusbot::error::OutletError;
use zusbot::llm::TextGenerator;
use zusbot::outlets::{OutletExecutor, SqlGenerator};

struct ScriptedGenerator {
    responses: Mutex<VecDeque<String>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    fn new(responses: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.iter().map(|s| s.to_string()).collect()),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .expect("script lock")
            .pop_front()
            .ok_or_else(|| anyhow!("script exhausted"))
    }
}

async fn seeded_pool() -> SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .expect("Failed to open in-memory sqlite");

    sqlx::query(
        "CREATE TABLE outlets (
            id INTEGER PRIMARY KEY,
            name TEXT, address TEXT, hours TEXT, services TEXT
        )",
    )
    .execute(&pool)
    .await
    .expect("Failed to create outlets table");

    let rows = [
        (1, "ZUS Coffee SS 2", "SS 2, Petaling Jaya, Selangor", "8am-10pm", "Dine-in, Delivery"),
        (2, "ZUS Coffee KLCC", "Suria KLCC, Kuala Lumpur", "10am-10pm", "Dine-in"),
        (3, "ZUS Coffee Bukit Bintang", "Bukit Bintang, Kuala Lumpur", "24 hours", "Dine-in, Drive-thru"),
        (4, "ZUS Coffee Setia Alam", "Setia Alam, Shah Alam, Selangor", "8am-8pm", "Delivery"),
    ];
    for (id, name, address, hours, services) in rows {
        sqlx::query("INSERT INTO outlets (id, name, address, hours, services) VALUES (?, ?, ?, ?, ?)")
            .bind(id)
            .bind(name)
            .bind(address)
            .bind(hours)
            .bind(services)
            .execute(&pool)
            .await
            .expect("Failed to seed outlet");
    }

    pool
}

async fn executor(script: &[&str]) -> (OutletExecutor, Arc<ScriptedGenerator>) {
    let generator = ScriptedGenerator::new(script);
    let pool = seeded_pool().await;
    (
        OutletExecutor::new(SqlGenerator::new(generator.clone()), pool),
        generator,
    )
}

#[tokio::test]
async fn test_injection_rejected_before_any_generation() {
    let (outlets, generator) = executor(&[]).await;

    let err = outlets
        .answer("'; DROP TABLE outlets; --")
        .await
        .unwrap_err();

    assert!(matches!(err, OutletError::UnsafeInput));
    assert!(err.to_string().contains("looks suspicious"));
    // No completion call, therefore no SQL and no database call either.
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_empty_question_rejected() {
    let (outlets, generator) = executor(&[]).await;

    let err = outlets.answer("   ").await.unwrap_err();
    assert!(matches!(err, OutletError::EmptyInput));
    assert!(err.to_string().contains("No query provided"));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_count_question_plural() {
    let (outlets, _) = executor(&[
        "SELECT COUNT(*) FROM outlets WHERE address LIKE '%Kuala Lumpur%'",
    ])
    .await;

    let answer = outlets
        .answer("How many outlets are in Kuala Lumpur?")
        .await
        .unwrap();

    assert_eq!(
        answer,
        "There are 2 ZUS Coffee outlets matching your query."
    );
}

#[tokio::test]
async fn test_count_question_singular() {
    let (outlets, _) = executor(&[
        "SELECT COUNT(*) FROM outlets WHERE address LIKE '%Setia Alam%'",
    ])
    .await;

    let answer = outlets
        .answer("How many outlets are in Setia Alam?")
        .await
        .unwrap();

    assert_eq!(answer, "There is 1 ZUS Coffee outlet matching your query.");
}

#[tokio::test]
async fn test_generated_sql_inside_code_fence() {
    let (outlets, _) =
        executor(&["```sql\nSELECT COUNT(*) FROM outlets\n```"]).await;

    let answer = outlets.answer("How many outlets do you have?").await.unwrap();
    assert_eq!(
        answer,
        "There are 4 ZUS Coffee outlets matching your query."
    );
}

#[tokio::test]
async fn test_zero_rows_yields_canned_message() {
    let (outlets, _) = executor(&[
        "SELECT name, address FROM outlets WHERE address LIKE '%Penang%'",
    ])
    .await;

    let answer = outlets.answer("Any outlets in Penang?").await.unwrap();
    assert_eq!(answer, "I couldn't find any information matching your query.");
}

#[tokio::test]
async fn test_row_formatting_excludes_id() {
    let (outlets, _) = executor(&[
        "SELECT * FROM outlets WHERE address LIKE '%Kuala Lumpur%'",
    ])
    .await;

    let answer = outlets.answer("Which outlets are in Kuala Lumpur?").await.unwrap();

    let rows: Vec<&str> = answer.split("\n\n").collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("name: ZUS Coffee KLCC, address: Suria KLCC, Kuala Lumpur"));
    assert!(rows[1].contains("hours: 24 hours"));
    assert!(!answer.contains("id:"));
}

#[tokio::test]
async fn test_malformed_sql_is_execution_error() {
    let (outlets, _) = executor(&["SELEC nonsense FROM nowhere"]).await;

    let err = outlets.answer("Which outlets are open now?").await.unwrap_err();
    assert!(matches!(err, OutletError::Execution(_)));
}

#[tokio::test]
async fn test_completion_failure_is_generation_error() {
    // Empty script: the SQL generator's completion call fails.
    let (outlets, _) = executor(&[]).await;

    let err = outlets.answer("Which outlets deliver?").await.unwrap_err();
    assert!(matches!(err, OutletError::Generation(_)));
}
