//! Knowledge-base answers with citation extraction

use super::{AnswerResult, Citation, Classification, DisplaySink, Query, Stage};
use crate::error::ServiceError;
use crate::llm::{KbResponse, KnowledgeBase};
use std::sync::Arc;

/// Answers product queries from the configured knowledge base
pub struct KnowledgeRetriever {
    knowledge_base: Arc<dyn KnowledgeBase>,
    knowledge_base_id: String,
    model_arn: String,
    sink: Arc<dyn DisplaySink>,
}

impl KnowledgeRetriever {
    pub fn new(
        knowledge_base: Arc<dyn KnowledgeBase>,
        knowledge_base_id: impl Into<String>,
        model_arn: impl Into<String>,
        sink: Arc<dyn DisplaySink>,
    ) -> Self {
        Self {
            knowledge_base,
            knowledge_base_id: knowledge_base_id.into(),
            model_arn: model_arn.into(),
            sink,
        }
    }

    /// Retrieve an answer; on failure the answer text is empty
    pub async fn retrieve(&self, query: &Query) -> AnswerResult {
        tracing::info!("Getting knowledge base response for query: {}", query);

        match self.try_retrieve(query).await {
            Ok(answer) => {
                tracing::info!("Successfully retrieved answer from knowledge base");
                answer
            }
            Err(e) => {
                tracing::error!("Knowledge base error: {}", e);
                self.sink.service_error(Stage::KnowledgeBase, &e);
                AnswerResult::empty(Classification::Product)
            }
        }
    }

    pub async fn try_retrieve(&self, query: &Query) -> Result<AnswerResult, ServiceError> {
        let response = self
            .knowledge_base
            .retrieve_and_generate(query.as_str(), &self.knowledge_base_id, &self.model_arn)
            .await?;

        let citation = first_citation(&response)?;
        match &citation {
            Some(citation) => {
                tracing::info!("Found context from source: {}", citation.source_uri);
                self.sink.citation(citation);
            }
            None => {
                tracing::warn!("No specific context found in knowledge base response");
                self.sink.no_context();
            }
        }

        Ok(AnswerResult {
            text: response.output.text,
            citation,
            path: Classification::Product,
        })
    }
}

/// First reference of the first citation group; everything else is dropped.
///
/// A first reference without content text or an S3 URI is a malformed response.
pub fn first_citation(response: &KbResponse) -> Result<Option<Citation>, ServiceError> {
    let Some(reference) = response
        .citations
        .first()
        .and_then(|group| group.retrieved_references.first())
    else {
        return Ok(None);
    };

    let context_text = reference
        .content_text()
        .ok_or(ServiceError::MissingField("citations[0].retrievedReferences[0].content.text"))?;
    let source_uri = reference.s3_uri().ok_or(ServiceError::MissingField(
        "citations[0].retrievedReferences[0].location.s3Location.uri",
    ))?;

    Ok(Some(Citation {
        context_text: context_text.to_string(),
        source_uri: source_uri.to_string(),
    }))
}
