//! Ask command

use crate::app::OutputFormat;
use crate::output::{format_answer, format_events};
use anyhow::Result;
use kbrouter_core::{EventBuffer, Query, Router, ServiceConfig};
use std::sync::Arc;

pub async fn run(config: &ServiceConfig, text: &str, format: OutputFormat) -> Result<()> {
    let query = Query::new(text)?;
    let events = Arc::new(EventBuffer::new());
    let router = Router::connect(config, events.clone()).await;

    let answer = router.handle(&query).await;
    let events = events.drain();

    match format {
        OutputFormat::Json => {
            let errors: Vec<&str> = events
                .iter()
                .filter_map(|event| match event {
                    kbrouter_core::DisplayEvent::Error(message) => Some(message.as_str()),
                    _ => None,
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "answer": answer,
                    "errors": errors,
                }))?
            );
        }
        OutputFormat::Cli => {
            println!("[{}]", answer.path);
            if !events.is_empty() {
                println!("{}", format_events(&events));
                println!();
            }
            println!("{}", format_answer(&answer));
        }
    }
    Ok(())
}
