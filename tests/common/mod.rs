//! Shared test utilities

#![allow(dead_code)]

use std::collections::VecDeque;

use async_trait::async_trait;
use kitchen_assistant::{Catalog, Recipe, VoiceIo};

/// Voice I/O that replays scripted replies and records everything spoken
///
/// Once the script runs out it reports the input as closed, so a session
/// under test always terminates
#[derive(Debug, Default)]
pub struct ScriptedVoice {
    replies: VecDeque<String>,
    pub spoken: Vec<String>,
    pub listens: usize,
}

impl ScriptedVoice {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: replies.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    /// How many times `line` was spoken
    pub fn count(&self, line: &str) -> usize {
        self.spoken.iter().filter(|s| *s == line).count()
    }

    /// Whether any spoken line starts with `prefix`
    pub fn said_starting_with(&self, prefix: &str) -> bool {
        self.spoken.iter().any(|s| s.starts_with(prefix))
    }

    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

#[async_trait(?Send)]
impl VoiceIo for ScriptedVoice {
    async fn speak(&mut self, text: &str) {
        self.spoken.push(text.to_string());
    }

    async fn listen(&mut self) -> String {
        self.listens += 1;
        self.replies.pop_front().unwrap_or_default()
    }

    fn is_open(&self) -> bool {
        !self.replies.is_empty()
    }
}

/// Small catalog used across tests
pub fn test_catalog() -> Catalog {
    Catalog::new(vec![
        Recipe::new("Tomato Soup", ["tomato", "salt"], "Boil tomatoes."),
        Recipe::new(
            "Spaghetti Carbonara",
            ["pasta", "eggs", "bacon", "cheese"],
            "Cook pasta, mix with eggs and bacon.",
        ),
        Recipe::new(
            "Grilled Cheese Sandwich",
            ["bread", "cheese", "butter"],
            "Butter the bread and grill with cheese.",
        ),
    ])
}
