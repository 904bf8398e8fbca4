//! Wire formats of the two remote calls

use super::InferenceParams;
use serde::{Deserialize, Serialize};

/// Message schema version expected by the text-generation model
pub const SCHEMA_VERSION: &str = "messages-v1";

/// `InvokeModel` request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvokeRequest {
    pub schema_version: String,
    pub messages: Vec<Message>,
    pub system: Vec<TextBlock>,
    pub inference_config: InferenceConfig,
}

impl InvokeRequest {
    /// Single system block, single user turn
    pub fn new(system: &str, user: &str, params: &InferenceParams) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            messages: vec![Message::user(user)],
            system: vec![TextBlock {
                text: system.to_string(),
            }],
            inference_config: InferenceConfig::from(params),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: String,
    pub content: Vec<TextBlock>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: vec![TextBlock { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextBlock {
    pub text: String,
}

/// Sampling settings; the model reads these keys in snake case
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InferenceConfig {
    pub max_new_tokens: u32,
    pub top_p: f32,
    pub top_k: u32,
    pub temperature: f32,
}

impl From<&InferenceParams> for InferenceConfig {
    fn from(params: &InferenceParams) -> Self {
        Self {
            max_new_tokens: params.max_tokens,
            top_p: params.top_p,
            top_k: params.top_k,
            temperature: params.temperature,
        }
    }
}

/// `InvokeModel` response body
#[derive(Debug, Clone, Deserialize)]
pub struct InvokeResponse {
    pub output: InvokeOutput,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvokeOutput {
    pub message: OutputMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputMessage {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// Response fragment; non-text fragments have no `text`
#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    #[serde(default)]
    pub text: Option<String>,
}

impl InvokeResponse {
    /// All text fragments joined in order
    pub fn text(&self) -> String {
        self.output
            .message
            .content
            .iter()
            .filter_map(|block| block.text.as_deref())
            .collect()
    }
}

/// `RetrieveAndGenerate` response
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KbResponse {
    pub output: KbOutput,
    #[serde(default)]
    pub citations: Vec<CitationGroup>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KbOutput {
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CitationGroup {
    #[serde(default)]
    pub retrieved_references: Vec<RetrievedReference>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetrievedReference {
    #[serde(default)]
    pub content: Option<ReferenceContent>,
    #[serde(default)]
    pub location: Option<ReferenceLocation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReferenceContent {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceLocation {
    #[serde(default)]
    pub s3_location: Option<S3Location>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct S3Location {
    #[serde(default)]
    pub uri: Option<String>,
}

impl RetrievedReference {
    pub fn content_text(&self) -> Option<&str> {
        self.content.as_ref()?.text.as_deref()
    }

    pub fn s3_uri(&self) -> Option<&str> {
        self.location.as_ref()?.s3_location.as_ref()?.uri.as_deref()
    }
}
