//! Configuration management
//!
//! All settings come from the process environment (front-ends load a `.env`
//! file first). Validation happens once at startup; a missing setting is fatal.

use crate::error::ConfigError;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

pub const ENV_REGION: &str = "AWS_REGION";
pub const ENV_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const ENV_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const ENV_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";
pub const ENV_MODEL_ID: &str = "MODEL_ID";
pub const ENV_KNOWLEDGE_BASE_ID: &str = "KNOWLEDGE_BASE_ID";
pub const ENV_PRODUCT_NAME: &str = "PRODUCT_NAME";
pub const ENV_APP_TITLE: &str = "APP_TITLE";
pub const ENV_LOG_FILE: &str = "KBROUTER_LOG_FILE";

/// Required settings, in the order they are reported when missing
pub const REQUIRED_VARS: [&str; 7] = [
    ENV_REGION,
    ENV_ACCESS_KEY_ID,
    ENV_SECRET_ACCESS_KEY,
    ENV_MODEL_ID,
    ENV_KNOWLEDGE_BASE_ID,
    ENV_PRODUCT_NAME,
    ENV_APP_TITLE,
];

/// Process-wide service configuration, read once at startup
#[derive(Clone)]
pub struct ServiceConfig {
    /// AWS region hosting both remote capabilities
    pub region: String,

    pub access_key_id: String,

    pub secret_access_key: String,

    /// Temporary-credential session token
    pub session_token: Option<String>,

    /// Foundation model identifier used for classification and generic answers
    pub model_id: String,

    pub knowledge_base_id: String,

    /// Product or domain name; also the classification keyword
    pub product_name: String,

    pub app_title: String,

    /// Append-only diagnostic log
    pub log_file: PathBuf,
}

impl ServiceConfig {
    /// Load from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using an arbitrary variable lookup.
    ///
    /// Empty values count as missing. Every missing required variable is
    /// collected before failing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let missing: Vec<&'static str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|name| get(name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(vec![name]));

        Ok(Self {
            region: require(ENV_REGION)?,
            access_key_id: require(ENV_ACCESS_KEY_ID)?,
            secret_access_key: require(ENV_SECRET_ACCESS_KEY)?,
            session_token: get(ENV_SESSION_TOKEN),
            model_id: require(ENV_MODEL_ID)?,
            knowledge_base_id: require(ENV_KNOWLEDGE_BASE_ID)?,
            product_name: require(ENV_PRODUCT_NAME)?,
            app_title: require(ENV_APP_TITLE)?,
            log_file: log_file_from_lookup(&lookup),
        })
    }

    /// Diagnostic log location, available even when validation fails
    pub fn log_file_from_env() -> PathBuf {
        log_file_from_lookup(|name| std::env::var(name).ok())
    }

    /// ARN of the foundation model the knowledge base generates with
    pub fn model_arn(&self) -> String {
        format!(
            "arn:aws:bedrock:{}::foundation-model/{}",
            self.region, self.model_id
        )
    }

    /// Non-secret view for display
    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            app_title: self.app_title.clone(),
            region: self.region.clone(),
            model_id: self.model_id.clone(),
            product_name: self.product_name.clone(),
            knowledge_base_id: self.knowledge_base_id.clone(),
        }
    }
}

fn log_file_from_lookup<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    lookup(ENV_LOG_FILE)
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(crate::DEFAULT_LOG_FILE))
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "<redacted>"),
            )
            .field("model_id", &self.model_id)
            .field("knowledge_base_id", &self.knowledge_base_id)
            .field("product_name", &self.product_name)
            .field("app_title", &self.app_title)
            .field("log_file", &self.log_file)
            .finish()
    }
}

/// Configuration shown in the side panel and by `kbrouter config`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSummary {
    pub app_title: String,
    pub region: String,
    pub model_id: String,
    pub product_name: String,
    pub knowledge_base_id: String,
}
