//! Query routing: classify, then answer on exactly one path

use super::{
    AnswerResult, Classification, Classifier, DisplaySink, GenericResponder, KnowledgeRetriever,
    Query,
};
use crate::config::ServiceConfig;
use crate::llm::{
    load_sdk_config, BedrockAgentClient, BedrockRuntimeClient, KnowledgeBase, TextGenerator,
};
use std::sync::Arc;

/// Orchestrates one turn.
///
/// `Start -> Classifying -> {RetrievingKB | GeneratingGeneric} -> Done`.
/// An empty answer on the chosen path is returned as-is; the other path is
/// never tried.
pub struct Router {
    classifier: Classifier,
    retriever: KnowledgeRetriever,
    responder: GenericResponder,
}

impl Router {
    pub fn new(
        classifier: Classifier,
        retriever: KnowledgeRetriever,
        responder: GenericResponder,
    ) -> Self {
        Self {
            classifier,
            retriever,
            responder,
        }
    }

    /// Wire all components from configuration and shared clients
    pub fn from_config(
        config: &ServiceConfig,
        generator: Arc<dyn TextGenerator>,
        knowledge_base: Arc<dyn KnowledgeBase>,
        sink: Arc<dyn DisplaySink>,
    ) -> Self {
        Self::new(
            Classifier::new(generator.clone(), config.product_name.clone(), sink.clone()),
            KnowledgeRetriever::new(
                knowledge_base,
                config.knowledge_base_id.clone(),
                config.model_arn(),
                sink.clone(),
            ),
            GenericResponder::new(generator, sink),
        )
    }

    /// Create the Bedrock clients once and wire them in
    pub async fn connect(config: &ServiceConfig, sink: Arc<dyn DisplaySink>) -> Self {
        let sdk_config = load_sdk_config(config).await;
        let generator = Arc::new(BedrockRuntimeClient::new(&sdk_config, &config.model_id));
        let knowledge_base = Arc::new(BedrockAgentClient::new(&sdk_config));
        tracing::info!(
            region = %config.region,
            model = %generator.model_name(),
            "Bedrock clients initialized"
        );
        Self::from_config(config, generator, knowledge_base, sink)
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub async fn handle(&self, query: &Query) -> AnswerResult {
        tracing::info!("New query received: {}", query);

        let path = self.classifier.classify(query).await;

        let answer = match path {
            Classification::Product => {
                tracing::info!("Processing product-specific query");
                self.retriever.retrieve(query).await
            }
            Classification::Generic => {
                tracing::info!("Processing generic query");
                AnswerResult {
                    text: self.responder.respond(query).await,
                    citation: None,
                    path: Classification::Generic,
                }
            }
        };

        if answer.is_empty() {
            tracing::warn!("No response generated");
        }

        answer
    }
}
