//! Kbrouter Core Library
//!
//! Routes a natural-language question either to a managed knowledge base or to a
//! general-purpose language model.
//!
//! # Features
//! - Lightweight query classification (`Product` vs `Generic`)
//! - Knowledge-base retrieve-and-generate with first-citation extraction
//! - Generic answers from a text-generation model
//! - Fail-open error policy: a turn always produces an `AnswerResult`

pub mod config;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod session;

pub use config::{ConfigSummary, ServiceConfig};
pub use error::{ConfigError, Error, KbRouterError, Result, ServiceError};
pub use llm::{
    BedrockAgentClient, BedrockRuntimeClient, InferenceParams, KbResponse, KnowledgeBase,
    TextGenerator,
};
pub use pipeline::{
    AnswerResult, Citation, Classification, Classifier, DisplayEvent, DisplaySink, EventBuffer,
    GenericResponder, KnowledgeRetriever, NoopSink, Query, Router, Stage,
};
pub use session::{ChatHistory, ChatTurn, Role};

/// Default diagnostic log file name
pub const DEFAULT_LOG_FILE: &str = "app.log";
