// src/agent/memory.rs

//! Owned, append-only conversation log. One per session; the caller passes it
//! by mutable reference into each turn, so there is no hidden global state.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Human,
    Ai,
}

impl Speaker {
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::Human => "Human",
            Speaker::Ai => "AI",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConversationMemory {
    entries: Vec<(Speaker, String)>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, speaker: Speaker, utterance: impl Into<String>) {
        self.entries.push((speaker, utterance.into()));
    }

    pub fn entries(&self) -> &[(Speaker, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The history block of the planner prompt.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|(speaker, utterance)| format!("{}: {}", speaker.label(), utterance))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
