//! Config command

use crate::app::OutputFormat;
use anyhow::Result;
use kbrouter_core::ServiceConfig;

pub fn run(config: &ServiceConfig, format: OutputFormat) -> Result<()> {
    let summary = config.summary();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Cli => {
            println!("{}", summary.app_title);
            println!();
            println!("Region:          {}", summary.region);
            println!("Model:           {}", summary.model_id);
            println!("Product:         {}", summary.product_name);
            println!("Knowledge base:  {}", summary.knowledge_base_id);
            println!("Log file:        {}", config.log_file.display());
        }
    }
    Ok(())
}
