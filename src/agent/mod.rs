// src/agent/mod.rs

//! The bounded decide/act/observe reasoning loop.
//!
//! Each turn asks the planner for a decision, dispatches tool invocations
//! through the registry, and feeds observations back until a final answer or
//! the iteration cap. The only non-deterministic element is the content of
//! the planner's text; the control structure is fixed.

pub mod memory;
pub mod parser;
pub mod prompt;
pub mod scratchpad;

use crate::agent::memory::{ConversationMemory, Speaker};
use crate::agent::parser::{PlannerDecision, parse_decision};
use crate::agent::scratchpad::{Scratchpad, ScratchpadStep};
use crate::llm::TextGenerator;
use crate::tools::ToolExecutor;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Hard cap on think/act cycles per turn.
pub const MAX_ITERATIONS: usize = 3;

const GENERIC_FAILURE_MSG: &str = "Sorry, the agent couldn't complete the task.";
const TURN_ERROR_MSG: &str = "Sorry, something went wrong. Try again.";

/// Degenerate-answer markers that trigger fallback extraction.
const FAILURE_MARKERS: [&str; 2] = ["agent stopped", "try again"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    FinalAnswer,
    IterationCap,
    FallbackObservation,
    Error,
}

#[derive(Debug)]
pub struct AgentTurnResult {
    pub answer: String,
    pub terminated_by: TurnOutcome,
}

pub struct Agent {
    generator: Arc<dyn TextGenerator>,
    tools: ToolExecutor,
    max_iterations: usize,
}

impl Agent {
    pub fn new(generator: Arc<dyn TextGenerator>, tools: ToolExecutor) -> Self {
        Self {
            generator,
            tools,
            max_iterations: MAX_ITERATIONS,
        }
    }

    /// Configure the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Run one conversational turn and append both utterances to `memory`.
    /// Never fails: structural errors become a generic apology and the
    /// session stays usable.
    pub async fn handle_turn(&self, memory: &mut ConversationMemory, input: &str) -> String {
        let result = self.turn(memory, input).await;
        memory.push(Speaker::Human, input);
        memory.push(Speaker::Ai, result.answer.clone());
        result.answer
    }

    /// Run one turn and report how it terminated.
    pub async fn turn(&self, memory: &ConversationMemory, input: &str) -> AgentTurnResult {
        match self.run_loop(memory, input).await {
            Ok(result) => result,
            Err(e) => {
                error!("turn failed: {e:#}");
                AgentTurnResult {
                    answer: TURN_ERROR_MSG.to_string(),
                    terminated_by: TurnOutcome::Error,
                }
            }
        }
    }

    async fn run_loop(
        &self,
        memory: &ConversationMemory,
        input: &str,
    ) -> anyhow::Result<AgentTurnResult> {
        let mut scratchpad = Scratchpad::default();

        for iteration in 0..self.max_iterations {
            let planner_prompt = prompt::build_prompt(memory, &scratchpad, input);
            let output = self.generator.generate(&planner_prompt).await?;

            match parse_decision(&output) {
                Ok(PlannerDecision::Final { answer, .. }) => {
                    info!(iteration, "planner produced a final answer");
                    return Ok(finish(answer, TurnOutcome::FinalAnswer, &scratchpad));
                }
                Ok(PlannerDecision::Act {
                    thought,
                    tool,
                    input: tool_input,
                }) => {
                    info!(tool = tool.as_str(), iteration, "dispatching tool");
                    let observation = self.tools.invoke(tool, &tool_input).await;
                    scratchpad.push(ScratchpadStep {
                        thought,
                        action: Some(tool),
                        action_input: Some(tool_input),
                        observation: Some(observation),
                    });
                }
                Err(e) => {
                    // Recoverable: describe the failure to the planner and let
                    // it try again on the next iteration.
                    warn!("planner parse failure: {e}");
                    scratchpad.push(ScratchpadStep {
                        thought: String::new(),
                        action: None,
                        action_input: None,
                        observation: Some(format!(
                            "Invalid planner output ({e}). Respond with either an \
                             Action/Action Input pair or a Final Answer."
                        )),
                    });
                }
            }
        }

        warn!(
            max_iterations = self.max_iterations,
            "iteration cap reached without a final answer"
        );
        Ok(finish(String::new(), TurnOutcome::IterationCap, &scratchpad))
    }
}

/// Apply the fallback policy: a missing or degenerate answer is replaced with
/// the most recent substantial observation, so the user still receives the
/// best information the loop actually gathered.
fn finish(answer: String, outcome: TurnOutcome, scratchpad: &Scratchpad) -> AgentTurnResult {
    let trimmed = answer.trim();
    let lowered = trimmed.to_lowercase();
    let degenerate =
        trimmed.is_empty() || FAILURE_MARKERS.iter().any(|marker| lowered.contains(marker));

    if !degenerate {
        return AgentTurnResult {
            answer: trimmed.to_string(),
            terminated_by: outcome,
        };
    }

    match scratchpad.last_substantial_observation() {
        Some(observation) => AgentTurnResult {
            answer: observation.to_string(),
            terminated_by: TurnOutcome::FallbackObservation,
        },
        None if trimmed.is_empty() => AgentTurnResult {
            answer: GENERIC_FAILURE_MSG.to_string(),
            terminated_by: outcome,
        },
        // A degenerate but non-empty answer with nothing better to offer is
        // returned as-is.
        None => AgentTurnResult {
            answer: trimmed.to_string(),
            terminated_by: outcome,
        },
    }
}
