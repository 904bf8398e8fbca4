//! Remote capability trait definitions

use super::wire::KbResponse;
use crate::error::ServiceError;
use async_trait::async_trait;

/// Sampling parameters for a single generation call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InferenceParams {
    pub max_tokens: u32,
    pub top_p: f32,
    pub top_k: u32,
    pub temperature: f32,
}

impl InferenceParams {
    /// Only a one-word label is needed
    pub const CLASSIFICATION: Self = Self {
        max_tokens: 10,
        top_p: 0.9,
        top_k: 20,
        temperature: 0.7,
    };

    pub const GENERIC_ANSWER: Self = Self {
        max_tokens: 500,
        top_p: 0.9,
        top_k: 20,
        temperature: 0.7,
    };
}

/// Text generation from a remote model.
///
/// One attempt per call: implementations neither cache nor retry.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for one system instruction and one user message
    async fn generate(
        &self,
        system: &str,
        user: &str,
        params: &InferenceParams,
    ) -> Result<String, ServiceError>;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// Remote retrieval-augmented generation against a knowledge base
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// Retrieve, rank and generate an answer for `query`
    async fn retrieve_and_generate(
        &self,
        query: &str,
        knowledge_base_id: &str,
        model_arn: &str,
    ) -> Result<KbResponse, ServiceError>;
}
