//! Classifying utterances into intents
//!
//! Plain keyword matching: mode and yes/no keywords match anywhere in the
//! utterance, exit keywords must be the whole utterance.

/// Meaning of an utterance in the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Look up a recipe by name
    Specific,
    /// Browse recipes that can be made with what's on hand
    Recommended,
    /// Leave the session
    Exit,
    /// Yes
    Affirm,
    /// No
    Deny,
    /// Nothing usable in this state
    Unrecognized,
}

/// Keyword sets used for classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keywords {
    /// Selects the specific-recipe flow
    pub specific: Vec<String>,
    /// Selects the recommended-recipe flow, including common misspellings
    pub recommended: Vec<String>,
    /// Ends the session when said on their own
    pub exit: Vec<String>,
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            specific: to_owned(&["specific"]),
            recommended: to_owned(&["recommend", "recommended", "recomended", "suggested"]),
            exit: to_owned(&["exit", "quit", "goodbye", "bye"]),
        }
    }
}

impl Keywords {
    /// Add keywords for the two modes on top of the current sets
    #[must_use]
    pub fn with_extra(mut self, specific: &[String], recommended: &[String]) -> Self {
        let normalize = |words: &[String]| {
            words
                .iter()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect::<Vec<_>>()
        };

        self.specific.extend(normalize(specific));
        self.recommended.extend(normalize(recommended));
        self
    }

    /// Classify an answer to "specific or recommended?"
    ///
    /// Specific wins when both appear
    #[must_use]
    pub fn mode(&self, utterance: &str) -> Intent {
        if contains_any(utterance, &self.specific) {
            Intent::Specific
        } else if contains_any(utterance, &self.recommended) {
            Intent::Recommended
        } else {
            Intent::Unrecognized
        }
    }

    /// Classify a reply inside a recipe flow
    ///
    /// `Exit` only when the whole utterance is an exit keyword and
    /// `Unrecognized` for silence. `None` means free text to match against
    /// recipe names
    #[must_use]
    pub fn reply(&self, utterance: &str) -> Option<Intent> {
        if utterance.is_empty() {
            Some(Intent::Unrecognized)
        } else if self.exit.iter().any(|word| word == utterance) {
            Some(Intent::Exit)
        } else {
            None
        }
    }
}

/// Classify an answer to a yes/no question
///
/// Substring match, "yes" checked first, so "not really" counts as no
#[must_use]
pub fn confirmation(utterance: &str) -> Intent {
    if utterance.contains("yes") {
        Intent::Affirm
    } else if utterance.contains("no") {
        Intent::Deny
    } else {
        Intent::Unrecognized
    }
}

fn contains_any(utterance: &str, words: &[String]) -> bool {
    !utterance.is_empty() && words.iter().any(|w| utterance.contains(w.as_str()))
}

fn to_owned(words: &[&str]) -> Vec<String> {
    words.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_keywords() {
        let keywords = Keywords::default();

        assert_eq!(keywords.mode("specific"), Intent::Specific);
        assert_eq!(keywords.mode("a specific one please"), Intent::Specific);
        assert_eq!(keywords.mode("recommended"), Intent::Recommended);
        assert_eq!(keywords.mode("recomended"), Intent::Recommended);
        assert_eq!(keywords.mode("what do you recommend"), Intent::Recommended);
        assert_eq!(keywords.mode("suggested"), Intent::Recommended);
        assert_eq!(keywords.mode("banana"), Intent::Unrecognized);
        assert_eq!(keywords.mode(""), Intent::Unrecognized);
    }

    #[test]
    fn test_specific_wins_over_recommended() {
        assert_eq!(
            Keywords::default().mode("specific not recommended"),
            Intent::Specific
        );
    }

    #[test]
    fn test_exit_requires_exact_match() {
        let keywords = Keywords::default();

        assert_eq!(keywords.reply("bye"), Some(Intent::Exit));
        assert_eq!(keywords.reply("quit"), Some(Intent::Exit));
        assert_eq!(keywords.reply("goodbye for now"), None);
        assert_eq!(keywords.reply("tomato soup"), None);
        assert_eq!(keywords.reply(""), Some(Intent::Unrecognized));
    }

    #[test]
    fn test_extra_keywords() {
        let keywords = Keywords::default()
            .with_extra(&["Particular ".to_string()], &["surprise".to_string(), String::new()]);

        assert_eq!(keywords.mode("something particular"), Intent::Specific);
        assert_eq!(keywords.mode("surprise me"), Intent::Recommended);
        assert_eq!(keywords.mode(""), Intent::Unrecognized);
    }

    #[test]
    fn test_confirmation() {
        assert_eq!(confirmation("yes please"), Intent::Affirm);
        assert_eq!(confirmation("no thanks"), Intent::Deny);
        assert_eq!(confirmation("nope"), Intent::Deny);
        assert_eq!(confirmation("maybe"), Intent::Unrecognized);
        assert_eq!(confirmation(""), Intent::Unrecognized);
    }
}
