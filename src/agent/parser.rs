// src/agent/parser.rs

//! Defensive parsing of planner output.
//!
//! The planner is asked to emit either an `Action:`/`Action Input:` pair or a
//! `Final Answer:` line. Everything else is a recoverable parse error the
//! orchestrator feeds back into the loop, never a crash.

use crate::error::PlannerError;
use crate::tools::ToolName;

#[derive(Debug, Clone, PartialEq)]
pub enum PlannerDecision {
    /// Invoke a tool with the given input.
    Act {
        thought: String,
        tool: ToolName,
        input: String,
    },
    /// Terminal answer. Clarifying questions ride this channel too, per the
    /// prompt contract.
    Final { thought: String, answer: String },
}

const FINAL_ANSWER_MARKER: &str = "Final Answer:";

pub fn parse_decision(text: &str) -> Result<PlannerDecision, PlannerError> {
    let mut thought = String::new();
    let mut action: Option<String> = None;
    let mut action_input: Option<String> = None;

    for line in text.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("Thought:") {
            if thought.is_empty() {
                thought = rest.trim().to_string();
            }
        } else if let Some(rest) = line.strip_prefix("Action:") {
            action = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix("Action Input:") {
            action_input = Some(rest.trim().to_string());
        }
    }

    // The final answer may span lines; take everything after the marker.
    let final_answer = text
        .find(FINAL_ANSWER_MARKER)
        .map(|idx| text[idx + FINAL_ANSWER_MARKER.len()..].trim().to_string());

    match (action, final_answer) {
        (Some(_), Some(_)) => Err(PlannerError::Parse(
            "output contains both an action and a final answer".to_string(),
        )),
        (Some(name), None) => {
            let tool = name.parse::<ToolName>()?;
            let input = action_input.ok_or_else(|| {
                PlannerError::Parse("action is missing an Action Input line".to_string())
            })?;
            Ok(PlannerDecision::Act {
                thought,
                tool,
                input,
            })
        }
        (None, Some(answer)) => Ok(PlannerDecision::Final { thought, answer }),
        (None, None) => Err(PlannerError::Parse(
            "output contains neither an action nor a final answer".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action() {
        let text = "Thought: The user wants to calculate 23 * 47.\n\
                    Action: Calculator\n\
                    Action Input: 23 * 47";

        let decision = parse_decision(text).unwrap();
        assert_eq!(
            decision,
            PlannerDecision::Act {
                thought: "The user wants to calculate 23 * 47.".to_string(),
                tool: ToolName::Calculator,
                input: "23 * 47".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_final_answer() {
        let text = "Thought: I now know the final answer.\n\
                    Final Answer: 23 * 47 is 1081.";

        let decision = parse_decision(text).unwrap();
        assert_eq!(
            decision,
            PlannerDecision::Final {
                thought: "I now know the final answer.".to_string(),
                answer: "23 * 47 is 1081.".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_multiline_final_answer() {
        let text = "Final Answer: We have two outlets:\n- SS 2\n- Setia Alam";
        match parse_decision(text).unwrap() {
            PlannerDecision::Final { answer, .. } => {
                assert!(answer.starts_with("We have two outlets:"));
                assert!(answer.contains("Setia Alam"));
            }
            other => panic!("expected final answer, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_tool_rejected() {
        let text = "Action: WeatherInfo\nAction Input: KL";
        let err = parse_decision(text).unwrap_err();
        assert!(err.to_string().contains("unknown tool name"));
    }

    #[test]
    fn test_missing_action_input_rejected() {
        let text = "Thought: hmm\nAction: Calculator";
        let err = parse_decision(text).unwrap_err();
        assert!(err.to_string().contains("missing an Action Input"));
    }

    #[test]
    fn test_both_markers_rejected() {
        let text = "Action: Calculator\nAction Input: 1 + 1\nFinal Answer: 2";
        assert!(parse_decision(text).is_err());
    }

    #[test]
    fn test_unstructured_output_rejected() {
        let text = "I think I should probably look something up.";
        let err = parse_decision(text).unwrap_err();
        assert!(err.to_string().contains("neither an action nor a final answer"));
    }
}
