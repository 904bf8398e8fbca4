//! Pipeline data model

use crate::error::{KbRouterError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single user question. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(KbRouterError::InvalidInput("query is empty".to_string()));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Answer path chosen for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// Specific to the configured product; answered from the knowledge base
    Product,
    /// Answered by general-purpose generation
    Generic,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Product => f.write_str("Product"),
            Self::Generic => f.write_str("Generic"),
        }
    }
}

/// Evidence backing a knowledge-base answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub context_text: String,
    pub source_uri: String,
}

/// The result of one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    /// Empty when the chosen path produced no answer
    pub text: String,
    pub citation: Option<Citation>,
    pub path: Classification,
}

impl AnswerResult {
    /// No answer produced on `path`
    pub fn empty(path: Classification) -> Self {
        Self {
            text: String::new(),
            citation: None,
            path,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
