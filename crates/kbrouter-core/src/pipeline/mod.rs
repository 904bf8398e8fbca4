//! Query-routing pipeline
//!
//! Classifier -> (KnowledgeRetriever | GenericResponder), orchestrated by
//! [`Router`]. Remote failures are swallowed at each component boundary,
//! reported to a [`DisplaySink`], and replaced by a default value.

mod classifier;
mod responder;
mod retriever;
mod router;
mod sink;
mod types;

pub use classifier::{label_for, Classifier};
pub use responder::GenericResponder;
pub use retriever::{first_citation, KnowledgeRetriever};
pub use router::Router;
pub use sink::{DisplayEvent, DisplaySink, EventBuffer, NoopSink, Stage};
pub use types::{AnswerResult, Citation, Classification, Query};
