// src/tools/mod.rs

//! Named capabilities exposed to the planner.
//!
//! Tool names form a closed enum with an exhaustive dispatch table; unknown
//! names never reach dispatch (the planner parser rejects them first). Every
//! arm of `invoke` absorbs its component's errors and returns an apologetic
//! observation string instead, so tools never leak structured failures to the
//! planner.

use crate::calculator;
use crate::error::{OutletError, PlannerError};
use crate::outlets::OutletExecutor;
use crate::products::retriever::{DEFAULT_TOP_K, SemanticRetriever};
use crate::products::summarizer::ProductSummarizer;
use std::fmt;
use std::str::FromStr;
use tracing::error;

pub const PRODUCT_UNAVAILABLE_MSG: &str =
    "Sorry, the ZUS server is currently unavailable. Please try again later.";
pub const OUTLET_APOLOGY_MSG: &str =
    "Sorry, something went wrong while processing your request.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    Calculator,
    ProductInfo,
    OutletInfo,
}

impl ToolName {
    pub fn all() -> [ToolName; 3] {
        [
            ToolName::Calculator,
            ToolName::ProductInfo,
            ToolName::OutletInfo,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::Calculator => "Calculator",
            ToolName::ProductInfo => "ProductInfo",
            ToolName::OutletInfo => "OutletInfo",
        }
    }

    /// Injected verbatim into the planner prompt.
    pub fn description(&self) -> &'static str {
        match self {
            ToolName::Calculator => "Use this to perform math or arithmetic calculations.",
            ToolName::ProductInfo => "Use this to answer questions about ZUS Coffee products.",
            ToolName::OutletInfo => "Use this to answer questions about ZUS Coffee outlets.",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Calculator" => Ok(ToolName::Calculator),
            "ProductInfo" => Ok(ToolName::ProductInfo),
            "OutletInfo" => Ok(ToolName::OutletInfo),
            other => Err(PlannerError::Parse(format!("unknown tool name '{other}'"))),
        }
    }
}

/// The `{tools}` block of the planner prompt.
pub fn render_tool_descriptions() -> String {
    ToolName::all()
        .iter()
        .map(|tool| format!("{}: {}", tool, tool.description()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The `{tool_names}` block of the planner prompt.
pub fn render_tool_names() -> String {
    ToolName::all()
        .iter()
        .map(|tool| tool.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Dispatches planner tool invocations to the three capabilities.
///
/// Clone is cheap: the components share their clients via Arc.
#[derive(Clone)]
pub struct ToolExecutor {
    retriever: SemanticRetriever,
    summarizer: ProductSummarizer,
    outlets: OutletExecutor,
    top_k: usize,
}

impl ToolExecutor {
    pub fn new(
        retriever: SemanticRetriever,
        summarizer: ProductSummarizer,
        outlets: OutletExecutor,
    ) -> Self {
        Self {
            retriever,
            summarizer,
            outlets,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Configure how many records product searches retrieve.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Execute one tool invocation. Infallible by contract: every internal
    /// error is converted to a user-facing observation string here.
    pub async fn invoke(&self, name: ToolName, input: &str) -> String {
        match name {
            ToolName::Calculator => match calculator::evaluate(input) {
                Ok(result) => result,
                Err(e) => e.to_string(),
            },
            ToolName::ProductInfo => self.product_info(input).await,
            ToolName::OutletInfo => self.outlet_info(input).await,
        }
    }

    async fn product_info(&self, query: &str) -> String {
        let products = match self.retriever.retrieve(query, self.top_k).await {
            Ok(products) => products,
            Err(e) => {
                error!("product retrieval failed: {e:#}");
                return PRODUCT_UNAVAILABLE_MSG.to_string();
            }
        };

        match self.summarizer.summarize(query, &products).await {
            Ok(answer) => answer,
            Err(e) => {
                error!("product summarization failed: {e:#}");
                PRODUCT_UNAVAILABLE_MSG.to_string()
            }
        }
    }

    async fn outlet_info(&self, question: &str) -> String {
        match self.outlets.answer(question).await {
            Ok(answer) => answer,
            // User-correctable rejections carry their own message.
            Err(e @ (OutletError::EmptyInput | OutletError::UnsafeInput)) => e.to_string(),
            Err(e) => {
                error!("outlet lookup failed: {e:#}");
                OUTLET_APOLOGY_MSG.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_name_round_trip() {
        for tool in ToolName::all() {
            assert_eq!(tool.as_str().parse::<ToolName>().unwrap(), tool);
        }
    }

    #[test]
    fn test_unknown_tool_is_parse_error() {
        let err = "WeatherInfo".parse::<ToolName>().unwrap_err();
        assert!(err.to_string().contains("unknown tool name"));
    }

    #[test]
    fn test_rendered_descriptions_cover_all_tools() {
        let rendered = render_tool_descriptions();
        assert!(rendered.contains("Calculator:"));
        assert!(rendered.contains("ProductInfo:"));
        assert!(rendered.contains("OutletInfo:"));
        assert_eq!(render_tool_names(), "Calculator, ProductInfo, OutletInfo");
    }
}
