//! Product vs generic query classification

use super::{Classification, DisplaySink, Query, Stage};
use crate::error::ServiceError;
use crate::llm::{InferenceParams, TextGenerator};
use std::sync::Arc;

const PRODUCT_LABEL: &str = "Product";

/// Labels queries using a remote model
pub struct Classifier {
    generator: Arc<dyn TextGenerator>,
    domain_name: String,
    sink: Arc<dyn DisplaySink>,
}

impl Classifier {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        domain_name: impl Into<String>,
        sink: Arc<dyn DisplaySink>,
    ) -> Self {
        Self {
            generator,
            domain_name: domain_name.into(),
            sink,
        }
    }

    pub fn domain_name(&self) -> &str {
        &self.domain_name
    }

    /// Classify, falling back to `Generic` when the remote call fails
    pub async fn classify(&self, query: &Query) -> Classification {
        tracing::info!("Classifying query: {}", query);

        match self.try_classify(query).await {
            Ok(label) => {
                tracing::info!("Query classified as: {}", label);
                label
            }
            Err(e) => {
                tracing::error!("Classification error: {}", e);
                self.sink.service_error(Stage::Classification, &e);
                Classification::Generic
            }
        }
    }

    pub async fn try_classify(&self, query: &Query) -> Result<Classification, ServiceError> {
        let system = build_classification_prompt(&self.domain_name);
        let raw = self
            .generator
            .generate(&system, query.as_str(), &InferenceParams::CLASSIFICATION)
            .await?;

        tracing::debug!("Classification response: {:?}", raw);

        Ok(label_for(&raw, &self.domain_name))
    }
}

fn build_classification_prompt(domain_name: &str) -> String {
    format!(
        r#"Classify user input into:
"Product" - for {} specific queries
"Generic" - for general questions.
Only respond with category.
Just Product or Generic, nothing more or less."#,
        domain_name
    )
}

/// `Product` when the raw model output mentions the domain name, ignoring case,
/// or when the output is exactly the `Product` label the prompt asks for.
///
/// The domain check is a substring match: a generic answer that happens to
/// contain the domain name is labelled `Product`.
pub fn label_for(raw: &str, domain_name: &str) -> Classification {
    let token = raw.trim().trim_end_matches(['.', '!']);
    if raw.to_lowercase().contains(&domain_name.to_lowercase())
        || token.eq_ignore_ascii_case(PRODUCT_LABEL)
    {
        Classification::Product
    } else {
        Classification::Generic
    }
}
