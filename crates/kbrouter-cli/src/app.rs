//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "kbrouter")]
#[command(
    author,
    version,
    about = "Ask questions answered from your knowledge base or a general model"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Answer a single question
    Ask(QueryArgs),

    /// Show how a question would be classified
    Classify(QueryArgs),

    /// Interactive chat session on stdin
    Chat,

    /// Show the active configuration
    Config,
}

#[derive(Args)]
pub struct QueryArgs {
    /// Question text
    #[arg(required = true)]
    pub query: Vec<String>,
}

impl QueryArgs {
    pub fn text(&self) -> String {
        self.query.join(" ")
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Cli,
    Json,
}
