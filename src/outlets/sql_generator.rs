// src/outlets/sql_generator.rs

//! Natural language to SQL over the fixed outlet schema.

use crate::llm::TextGenerator;
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static CODE_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)```(?:sql)?\s*(.*?)```").expect("valid code block regex"));

const SQL_PROMPT: &str = r#"You are an expert SQL generator for an SQLite database.

Generate an SQL query for the table `outlets` with the following columns:
- id (integer)
- name (text)
- address (text)
- hours (text)
- services (text)

Guidelines:
1. If the user asks for the number of outlets or uses phrases like
   "how many", "total number", "count", then use: SELECT COUNT(*) FROM outlets WHERE ...
2. For location-based or fuzzy queries (e.g. "in Shah Alam", "around Setia Alam"),
   use `address LIKE '%...%'` with appropriate wildcards.
3. Do not include the `id` column in SELECT unless asked.
4. Return the SQL query.

Now, generate an SQL query for the following user question:

Question: {question}
SQL:
"#;

#[derive(Clone)]
pub struct SqlGenerator {
    generator: Arc<dyn TextGenerator>,
}

impl SqlGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Produce a single SQL statement for a natural-language question.
    /// Completion-service failures propagate to the caller; no retries.
    pub async fn generate_sql(&self, question: &str) -> Result<String> {
        let prompt = SQL_PROMPT.replace("{question}", question);
        let raw = self.generator.generate(&prompt).await?;
        Ok(extract_sql_codeblock(&raw))
    }
}

/// Pull the statement out of a fenced code block when one is present,
/// otherwise return the whole response trimmed.
pub fn extract_sql_codeblock(text: &str) -> String {
    match CODE_BLOCK_RE.captures(text) {
        Some(caps) => caps
            .get(1)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
        None => text.trim().to_string(),
    }
}
