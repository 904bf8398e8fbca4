//! Amazon Bedrock clients for the two remote capabilities

use super::wire::{
    CitationGroup, InvokeRequest, InvokeResponse, KbOutput, KbResponse, ReferenceContent,
    ReferenceLocation, RetrievedReference, S3Location,
};
use super::{InferenceParams, KnowledgeBase, TextGenerator};
use crate::config::ServiceConfig;
use crate::error::ServiceError;
use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_bedrockagentruntime::error::DisplayErrorContext;
use aws_sdk_bedrockagentruntime::operation::retrieve_and_generate::RetrieveAndGenerateOutput;
use aws_sdk_bedrockagentruntime::types::{
    KnowledgeBaseRetrieveAndGenerateConfiguration, RetrieveAndGenerateConfiguration,
    RetrieveAndGenerateInput, RetrieveAndGenerateType,
};
use aws_sdk_bedrockruntime::config::{Credentials, Region};
use aws_sdk_bedrockruntime::primitives::Blob;
use std::time::Instant;

const CREDENTIALS_SOURCE: &str = "kbrouter-environment";

/// Build the shared SDK configuration from validated settings.
///
/// SDK retries are disabled: every remote call is a single attempt.
pub async fn load_sdk_config(config: &ServiceConfig) -> SdkConfig {
    let credentials = Credentials::new(
        config.access_key_id.clone(),
        config.secret_access_key.clone(),
        config.session_token.clone(),
        None,
        CREDENTIALS_SOURCE,
    );

    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .credentials_provider(credentials)
        .retry_config(RetryConfig::disabled())
        .load()
        .await
}

/// Text generation through Bedrock `InvokeModel`
pub struct BedrockRuntimeClient {
    client: aws_sdk_bedrockruntime::Client,
    model_id: String,
}

impl BedrockRuntimeClient {
    pub fn new(sdk_config: &SdkConfig, model_id: impl Into<String>) -> Self {
        Self {
            client: aws_sdk_bedrockruntime::Client::new(sdk_config),
            model_id: model_id.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for BedrockRuntimeClient {
    async fn generate(
        &self,
        system: &str,
        user: &str,
        params: &InferenceParams,
    ) -> Result<String, ServiceError> {
        let start = Instant::now();
        let body = serde_json::to_vec(&InvokeRequest::new(system, user, params))?;

        let response = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| {
                ServiceError::request(
                    "InvokeModel",
                    aws_sdk_bedrockruntime::error::DisplayErrorContext(&e),
                )
            })?;

        let parsed: InvokeResponse = serde_json::from_slice(response.body().as_ref())?;
        let text = parsed.text();

        tracing::debug!(
            model = %self.model_id,
            elapsed_ms = start.elapsed().as_millis() as u64,
            chars = text.chars().count(),
            "InvokeModel completed"
        );

        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model_id
    }
}

/// Knowledge-base retrieve-and-generate through the Bedrock agent runtime
pub struct BedrockAgentClient {
    client: aws_sdk_bedrockagentruntime::Client,
}

impl BedrockAgentClient {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_bedrockagentruntime::Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl KnowledgeBase for BedrockAgentClient {
    async fn retrieve_and_generate(
        &self,
        query: &str,
        knowledge_base_id: &str,
        model_arn: &str,
    ) -> Result<KbResponse, ServiceError> {
        let start = Instant::now();

        let input = RetrieveAndGenerateInput::builder()
            .text(query)
            .build()
            .map_err(|e| ServiceError::request("RetrieveAndGenerate", e))?;

        let kb_config = KnowledgeBaseRetrieveAndGenerateConfiguration::builder()
            .knowledge_base_id(knowledge_base_id)
            .model_arn(model_arn)
            .build()
            .map_err(|e| ServiceError::request("RetrieveAndGenerate", e))?;

        let configuration = RetrieveAndGenerateConfiguration::builder()
            .r#type(RetrieveAndGenerateType::KnowledgeBase)
            .knowledge_base_configuration(kb_config)
            .build()
            .map_err(|e| ServiceError::request("RetrieveAndGenerate", e))?;

        let response = self
            .client
            .retrieve_and_generate()
            .input(input)
            .retrieve_and_generate_configuration(configuration)
            .send()
            .await
            .map_err(|e| ServiceError::request("RetrieveAndGenerate", DisplayErrorContext(&e)))?;

        let kb_response = to_kb_response(&response)?;

        tracing::debug!(
            knowledge_base = %knowledge_base_id,
            elapsed_ms = start.elapsed().as_millis() as u64,
            citations = kb_response.citations.len(),
            "RetrieveAndGenerate completed"
        );

        Ok(kb_response)
    }
}

/// Convert the SDK output into the wire model the retriever inspects
fn to_kb_response(output: &RetrieveAndGenerateOutput) -> Result<KbResponse, ServiceError> {
    let text = output
        .output()
        .map(|generated| generated.text().to_string())
        .ok_or(ServiceError::MissingField("output.text"))?;

    let citations = output
        .citations()
        .iter()
        .map(|citation| CitationGroup {
            retrieved_references: citation
                .retrieved_references()
                .iter()
                .map(|reference| RetrievedReference {
                    content: reference.content().map(|content| ReferenceContent {
                        text: Some(content.text().to_string()),
                    }),
                    location: reference.location().map(|location| ReferenceLocation {
                        s3_location: location.s3_location().map(|s3| S3Location {
                            uri: s3.uri().map(str::to_string),
                        }),
                    }),
                })
                .collect(),
        })
        .collect();

    Ok(KbResponse {
        output: KbOutput { text },
        citations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_bedrockagentruntime::types::{
        Citation, RetrievalResultContent, RetrievalResultLocation, RetrievalResultLocationType,
        RetrievalResultS3Location, RetrievalResultWebLocation,
        RetrieveAndGenerateOutput as GeneratedText, RetrievedReference as SdkReference,
    };

    fn generated(text: &str) -> GeneratedText {
        GeneratedText::builder().text(text).build().unwrap()
    }

    fn s3_reference(text: &str, uri: &str) -> SdkReference {
        SdkReference::builder()
            .content(RetrievalResultContent::builder().text(text).build())
            .location(
                RetrievalResultLocation::builder()
                    .r#type(RetrievalResultLocationType::S3)
                    .s3_location(RetrievalResultS3Location::builder().uri(uri).build())
                    .build()
                    .unwrap(),
            )
            .build()
    }

    #[test]
    fn test_converts_citations() {
        let output = RetrieveAndGenerateOutput::builder()
            .session_id("session-1")
            .output(generated("Hold the button for 10 seconds."))
            .citations(
                Citation::builder()
                    .retrieved_references(s3_reference(
                        "To reset, hold the power button...",
                        "s3://docs/manual.pdf",
                    ))
                    .retrieved_references(s3_reference("Second chunk", "s3://docs/faq.pdf"))
                    .build(),
            )
            .build()
            .unwrap();

        let response = to_kb_response(&output).unwrap();
        assert_eq!(response.output.text, "Hold the button for 10 seconds.");
        assert_eq!(response.citations.len(), 1);

        let references = &response.citations[0].retrieved_references;
        assert_eq!(references.len(), 2);
        assert_eq!(
            references[0].content_text(),
            Some("To reset, hold the power button...")
        );
        assert_eq!(references[0].s3_uri(), Some("s3://docs/manual.pdf"));
    }

    #[test]
    fn test_converts_answer_without_citations() {
        let output = RetrieveAndGenerateOutput::builder()
            .session_id("session-1")
            .output(generated("I could not find that."))
            .build()
            .unwrap();

        let response = to_kb_response(&output).unwrap();
        assert_eq!(response.output.text, "I could not find that.");
        assert!(response.citations.is_empty());
    }

    #[test]
    fn test_reference_without_s3_location() {
        let reference = SdkReference::builder()
            .content(
                RetrievalResultContent::builder()
                    .text("From the web")
                    .build(),
            )
            .location(
                RetrievalResultLocation::builder()
                    .r#type(RetrievalResultLocationType::Web)
                    .web_location(
                        RetrievalResultWebLocation::builder()
                            .url("https://docs.acme.test/reset")
                            .build(),
                    )
                    .build()
                    .unwrap(),
            )
            .build();
        let output = RetrieveAndGenerateOutput::builder()
            .session_id("session-1")
            .output(generated("answer"))
            .citations(Citation::builder().retrieved_references(reference).build())
            .build()
            .unwrap();

        let response = to_kb_response(&output).unwrap();
        let reference = &response.citations[0].retrieved_references[0];
        assert_eq!(reference.content_text(), Some("From the web"));
        assert_eq!(reference.s3_uri(), None);
    }

    #[test]
    fn test_missing_output_is_an_error() {
        let output = RetrieveAndGenerateOutput::builder()
            .session_id("session-1")
            .build()
            .unwrap();

        let err = to_kb_response(&output).unwrap_err();
        assert!(matches!(err, ServiceError::MissingField("output.text")));
    }
}
