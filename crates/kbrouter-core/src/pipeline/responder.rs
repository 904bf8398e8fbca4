//! General-purpose answers

use super::{DisplaySink, Query, Stage};
use crate::error::ServiceError;
use crate::llm::{InferenceParams, TextGenerator};
use std::sync::Arc;

const GENERIC_SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Please provide a clear, professional answer.";

/// Answers queries that need no retrieval
pub struct GenericResponder {
    generator: Arc<dyn TextGenerator>,
    sink: Arc<dyn DisplaySink>,
}

impl GenericResponder {
    pub fn new(generator: Arc<dyn TextGenerator>, sink: Arc<dyn DisplaySink>) -> Self {
        Self { generator, sink }
    }

    /// Generate an answer; empty on failure
    pub async fn respond(&self, query: &Query) -> String {
        tracing::info!("Getting generic response for query: {}", query);

        match self.try_respond(query).await {
            Ok(text) => {
                tracing::info!("Successfully generated generic response");
                text
            }
            Err(e) => {
                tracing::error!("Generic response error: {}", e);
                self.sink.service_error(Stage::GenericResponse, &e);
                String::new()
            }
        }
    }

    pub async fn try_respond(&self, query: &Query) -> Result<String, ServiceError> {
        self.generator
            .generate(
                GENERIC_SYSTEM_PROMPT,
                query.as_str(),
                &InferenceParams::GENERIC_ANSWER,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::testing::FakeGenerator;
    use crate::pipeline::{DisplayEvent, EventBuffer};

    #[tokio::test]
    async fn test_respond() {
        let generator = Arc::new(FakeGenerator::replying("Paris."));
        let sink = Arc::new(EventBuffer::new());
        let responder = GenericResponder::new(generator.clone(), sink.clone());

        let text = responder
            .respond(&Query::new("Capital of France?").unwrap())
            .await;
        assert_eq!(text, "Paris.");

        let calls = generator.calls();
        assert_eq!(calls[0].system, GENERIC_SYSTEM_PROMPT);
        assert_eq!(calls[0].params.max_tokens, 500);
        assert!(sink.events().is_empty());
    }

    #[tokio::test]
    async fn test_respond_failure_is_empty() {
        let sink = Arc::new(EventBuffer::new());
        let responder =
            GenericResponder::new(Arc::new(FakeGenerator::failing("throttled")), sink.clone());

        let text = responder.respond(&Query::new("hi").unwrap()).await;
        assert!(text.is_empty());
        assert!(matches!(
            sink.events().as_slice(),
            [DisplayEvent::Error(msg)] if msg.starts_with("Generic response error:")
        ));
    }
}
