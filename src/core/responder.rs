//! Canned-reply chatbot responder.
//!
//! Rules are evaluated strictly in order against the lower-cased input; the
//! first rule with any keyword contained in the input wins. Input that matches
//! nothing gets the fallback reply, so every input yields exactly one reply.

use crate::infrastructure::catalog::{ChatRule, ChatScript};

impl ChatRule {
    /// `normalized` must already be lower-cased.
    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| normalized.contains(&keyword.to_lowercase()))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Responder<'a> {
    rules: &'a [ChatRule],
    fallback: &'a str,
}

impl<'a> Responder<'a> {
    pub fn new(rules: &'a [ChatRule], fallback: &'a str) -> Self {
        Responder { rules, fallback }
    }

    pub fn from_script(script: &'a ChatScript) -> Self {
        Self::new(&script.rules, &script.fallback)
    }

    pub fn respond(&self, text: &str) -> &'a str {
        let normalized = text.to_lowercase();
        let rules: &'a [ChatRule] = self.rules;

        rules
            .iter()
            .find(|rule| rule.matches(&normalized))
            .map(|rule| rule.reply.as_str())
            .unwrap_or(self.fallback)
    }
}
