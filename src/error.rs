// src/error.rs

//! Component error taxonomy.
//!
//! Each tool-facing component returns its own error enum; the tool registry is
//! the single place where these are converted into user-facing observation
//! strings. For the user-correctable variants (empty input, injection match)
//! the `Display` text *is* the user message.

use thiserror::Error;

/// Calculator failures.
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("Error: No expression provided. Please enter a valid mathematical expression.")]
    EmptyInput,

    #[error("Error: Could not evaluate the expression. {0}")]
    Evaluation(String),
}

/// Outlet lookup failures.
#[derive(Debug, Error)]
pub enum OutletError {
    #[error("Error: No query provided. Please ask something like 'Show all outlets in Selangor'.")]
    EmptyInput,

    #[error("Your query looks suspicious. Please ask about outlets using natural language.")]
    UnsafeInput,

    /// The completion service failed to produce usable SQL.
    #[error("SQL generation failed: {0}")]
    Generation(#[source] anyhow::Error),

    /// The database rejected the generated statement.
    #[error("query execution failed: {0}")]
    Execution(#[source] sqlx::Error),
}

/// Product retrieval/summarization failures.
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("embedding request failed: {0}")]
    Embedding(#[source] anyhow::Error),

    #[error("vector search failed: {0}")]
    Search(#[source] anyhow::Error),

    #[error("summarization failed: {0}")]
    Generation(#[source] anyhow::Error),
}

/// Planner output that could not be parsed. Recoverable: the orchestrator
/// feeds the failure back into the loop as an observation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("could not parse planner output: {0}")]
    Parse(String),
}
