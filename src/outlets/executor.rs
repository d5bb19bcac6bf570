// src/outlets/executor.rs

//! Safety-gates, executes, and formats generated outlet SQL.

use crate::error::OutletError;
use crate::outlets::sql_generator::SqlGenerator;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, SqlitePool};
use tracing::debug;

/// Injection markers checked against the raw question, case-insensitively,
/// before any SQL is generated.
const DENY_LIST: [&str; 4] = ["drop table", "--", ";", "'"];

pub const NO_RESULTS_MSG: &str = "I couldn't find any information matching your query.";

#[derive(Clone)]
pub struct OutletExecutor {
    generator: SqlGenerator,
    pool: SqlitePool,
}

impl OutletExecutor {
    pub fn new(generator: SqlGenerator, pool: SqlitePool) -> Self {
        Self { generator, pool }
    }

    /// Answer a natural-language outlet question. The connection is checked
    /// out of the pool per call and returned on every exit path.
    pub async fn answer(&self, question: &str) -> Result<String, OutletError> {
        if question.trim().is_empty() {
            return Err(OutletError::EmptyInput);
        }
        if is_suspicious(question) {
            return Err(OutletError::UnsafeInput);
        }

        let sql = self
            .generator
            .generate_sql(question)
            .await
            .map_err(OutletError::Generation)?;
        debug!(%sql, "generated outlet SQL");

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(OutletError::Execution)?;

        if rows.is_empty() {
            return Ok(NO_RESULTS_MSG.to_string());
        }

        if sql.to_uppercase().contains("COUNT(") {
            let count: i64 = rows[0].try_get(0).map_err(OutletError::Execution)?;
            return Ok(count_sentence(count));
        }

        Ok(format_rows(&rows))
    }
}

fn is_suspicious(question: &str) -> bool {
    let lowered = question.to_lowercase();
    DENY_LIST.iter().any(|marker| lowered.contains(marker))
}

/// Single natural-language sentence for aggregate counts, with singular
/// agreement exactly at n=1.
fn count_sentence(count: i64) -> String {
    let (verb, noun) = if count == 1 {
        ("is", "outlet")
    } else {
        ("are", "outlets")
    };
    format!("There {verb} {count} ZUS Coffee {noun} matching your query.")
}

/// One line per row of comma-joined `column: value` pairs, rows separated by
/// a blank line. `id` is always excluded.
fn format_rows(rows: &[SqliteRow]) -> String {
    let mut formatted = Vec::with_capacity(rows.len());
    for row in rows {
        let mut pairs = Vec::new();
        for (idx, column) in row.columns().iter().enumerate() {
            if column.name().eq_ignore_ascii_case("id") {
                continue;
            }
            pairs.push(format!("{}: {}", column.name(), column_value(row, idx)));
        }
        formatted.push(pairs.join(", "));
    }
    formatted.join("\n\n")
}

fn column_value(row: &SqliteRow, idx: usize) -> String {
    if let Ok(v) = row.try_get::<String, _>(idx) {
        return v;
    }
    if let Ok(v) = row.try_get::<i64, _>(idx) {
        return v.to_string();
    }
    if let Ok(v) = row.try_get::<f64, _>(idx) {
        return v.to_string();
    }
    "NULL".to_string()
}
