//! Chat history owned by front-ends
//!
//! The pipeline never reads or writes this log; front-ends record each
//! completed turn themselves.

use crate::pipeline::{AnswerResult, Query};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    System,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::System => f.write_str("system"),
            Self::Assistant => f.write_str("assistant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only turn log; `clear` is the only removal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatHistory {
    turns: Vec<ChatTurn>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push(ChatTurn {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        });
    }

    /// Record a completed turn: the query, its classification, and the answer
    /// when one was produced.
    pub fn record(&mut self, query: &Query, answer: &AnswerResult) {
        self.push(Role::User, query.as_str());
        self.push(Role::System, format!("Classified as: {}", answer.path));
        if !answer.is_empty() {
            self.push(Role::Assistant, answer.text.as_str());
        }
    }

    pub fn clear(&mut self) {
        tracing::info!("Clearing chat history");
        self.turns.clear();
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatTurn> {
        self.turns.iter()
    }

    /// Most recent assistant answer
    pub fn last_answer(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|turn| turn.role == Role::Assistant)
            .map(|turn| turn.content.as_str())
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Classification;

    fn answer(text: &str, path: Classification) -> AnswerResult {
        AnswerResult {
            text: text.to_string(),
            citation: None,
            path,
        }
    }

    #[test]
    fn test_record_full_turn() {
        let mut history = ChatHistory::new();
        let query = Query::new("How do I reset?").unwrap();
        history.record(&query, &answer("Hold power.", Classification::Product));

        let roles: Vec<Role> = history.iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::User, Role::System, Role::Assistant]);
        assert_eq!(history.turns()[1].content, "Classified as: Product");
        assert_eq!(history.last_answer(), Some("Hold power."));
    }

    #[test]
    fn test_record_skips_empty_answer() {
        let mut history = ChatHistory::new();
        let query = Query::new("weather?").unwrap();
        history.record(&query, &AnswerResult::empty(Classification::Generic));

        assert_eq!(history.len(), 2);
        assert_eq!(history.turns()[1].content, "Classified as: Generic");
        assert_eq!(history.last_answer(), None);
    }

    #[test]
    fn test_clear() {
        let mut history = ChatHistory::new();
        history.push(Role::User, "hi");
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
