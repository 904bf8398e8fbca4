//! Classify command

use crate::app::OutputFormat;
use anyhow::Result;
use kbrouter_core::{NoopSink, Query, Router, ServiceConfig};
use std::sync::Arc;

pub async fn run(config: &ServiceConfig, text: &str, format: OutputFormat) -> Result<()> {
    let query = Query::new(text)?;
    let router = Router::connect(config, Arc::new(NoopSink)).await;

    // Surface the failure here instead of silently falling back
    let classifier = router.classifier();
    let label = classifier.try_classify(&query).await?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "query": text,
                    "domain": classifier.domain_name(),
                    "classification": label,
                })
            );
        }
        OutputFormat::Cli => println!("{}", label),
    }
    Ok(())
}
