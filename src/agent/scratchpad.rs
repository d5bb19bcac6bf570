// src/agent/scratchpad.rs

//! Per-turn record of (thought, action, observation) steps. Rebuilt for every
//! turn; never persisted across turns.

use crate::tools::ToolName;

#[derive(Debug, Clone)]
pub struct ScratchpadStep {
    pub thought: String,
    pub action: Option<ToolName>,
    pub action_input: Option<String>,
    pub observation: Option<String>,
}

#[derive(Debug, Default)]
pub struct Scratchpad {
    steps: Vec<ScratchpadStep>,
}

impl Scratchpad {
    pub fn push(&mut self, step: ScratchpadStep) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[ScratchpadStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The `{agent_scratchpad}` block of the planner prompt: the trajectory so
    /// far, in the same markers the planner is asked to emit.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for step in &self.steps {
            if !step.thought.is_empty() {
                out.push_str(&format!("Thought: {}\n", step.thought));
            }
            if let Some(action) = step.action {
                out.push_str(&format!("Action: {}\n", action));
            }
            if let Some(input) = &step.action_input {
                out.push_str(&format!("Action Input: {}\n", input));
            }
            if let Some(observation) = &step.observation {
                out.push_str(&format!("Observation: {}\n", observation));
            }
        }
        out
    }

    /// The most recent observation substantial enough (trimmed length over 30
    /// characters) to stand in for a missing or degenerate final answer.
    pub fn last_substantial_observation(&self) -> Option<&str> {
        self.steps
            .iter()
            .rev()
            .filter_map(|step| step.observation.as_deref())
            .map(str::trim)
            .find(|observation| observation.chars().count() > 30)
    }
}
