//! Remote capability integration
//!
//! Provides traits and implementations for:
//! - Text generation (Bedrock `InvokeModel`)
//! - Knowledge-base retrieve-and-generate (Bedrock agent runtime)

mod bedrock;
mod traits;
mod wire;

pub use bedrock::{load_sdk_config, BedrockAgentClient, BedrockRuntimeClient};
pub use traits::*;
pub use wire::{
    CitationGroup, ContentBlock, InferenceConfig, InvokeRequest, InvokeResponse, KbOutput,
    KbResponse, Message, ReferenceContent, ReferenceLocation, RetrievedReference, S3Location,
    TextBlock, SCHEMA_VERSION,
};
