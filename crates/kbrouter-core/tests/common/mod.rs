//! Shared fakes for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use kbrouter_core::{
    EventBuffer, InferenceParams, KbResponse, KnowledgeBase, Router, ServiceConfig, ServiceError,
    TextGenerator,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Answers classification and generic calls separately
pub struct ScriptedGenerator {
    classification: Result<String, String>,
    answer: Result<String, String>,
    pub classify_calls: AtomicUsize,
    pub generic_calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(classification: Result<&str, &str>, answer: Result<&str, &str>) -> Self {
        Self {
            classification: classification.map(str::to_string).map_err(str::to_string),
            answer: answer.map(str::to_string).map_err(str::to_string),
            classify_calls: AtomicUsize::new(0),
            generic_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        _system: &str,
        _user: &str,
        params: &InferenceParams,
    ) -> Result<String, ServiceError> {
        let reply = if *params == InferenceParams::CLASSIFICATION {
            self.classify_calls.fetch_add(1, Ordering::SeqCst);
            &self.classification
        } else {
            self.generic_calls.fetch_add(1, Ordering::SeqCst);
            &self.answer
        };
        reply
            .clone()
            .map_err(|message| ServiceError::request("InvokeModel", message))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

pub struct ScriptedKnowledgeBase {
    reply: Result<KbResponse, String>,
    pub calls: AtomicUsize,
}

impl ScriptedKnowledgeBase {
    pub fn replying_json(body: serde_json::Value) -> Self {
        Self {
            reply: Ok(serde_json::from_value(body).expect("valid KB response")),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl KnowledgeBase for ScriptedKnowledgeBase {
    async fn retrieve_and_generate(
        &self,
        _query: &str,
        _knowledge_base_id: &str,
        _model_arn: &str,
    ) -> Result<KbResponse, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .clone()
            .map_err(|message| ServiceError::request("RetrieveAndGenerate", message))
    }
}

pub fn test_config(product: &str) -> ServiceConfig {
    let env: HashMap<&str, &str> = [
        ("AWS_REGION", "us-east-1"),
        ("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE"),
        ("AWS_SECRET_ACCESS_KEY", "secret"),
        ("MODEL_ID", "amazon.nova-lite-v1:0"),
        ("KNOWLEDGE_BASE_ID", "KB123"),
        ("PRODUCT_NAME", product),
        ("APP_TITLE", "Test Assistant"),
    ]
    .into_iter()
    .collect();
    ServiceConfig::from_lookup(|name| env.get(name).map(|v| v.to_string()))
        .expect("complete test config")
}

pub struct Harness {
    pub router: Router,
    pub generator: Arc<ScriptedGenerator>,
    pub knowledge_base: Arc<ScriptedKnowledgeBase>,
    pub events: Arc<EventBuffer>,
}

pub fn harness(
    product: &str,
    generator: ScriptedGenerator,
    knowledge_base: ScriptedKnowledgeBase,
) -> Harness {
    let generator = Arc::new(generator);
    let knowledge_base = Arc::new(knowledge_base);
    let events = Arc::new(EventBuffer::new());
    let router = Router::from_config(
        &test_config(product),
        generator.clone(),
        knowledge_base.clone(),
        events.clone(),
    );
    Harness {
        router,
        generator,
        knowledge_base,
        events,
    }
}
