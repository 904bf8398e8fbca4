//! Interactive chat over stdin

use crate::output::{format_answer, format_events};
use anyhow::Result;
use kbrouter_core::{ChatHistory, EventBuffer, Query, Router, ServiceConfig};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

enum Input {
    Query(Query),
    Clear,
    History,
    Quit,
    Skip,
}

fn parse_input(line: &str) -> Input {
    match line.trim() {
        "/quit" | "/exit" => Input::Quit,
        "/clear" => Input::Clear,
        "/history" => Input::History,
        text => Query::new(text).map(Input::Query).unwrap_or(Input::Skip),
    }
}

pub async fn run(config: &ServiceConfig) -> Result<()> {
    let events = Arc::new(EventBuffer::new());
    let router = Router::connect(config, events.clone()).await;
    let mut history = ChatHistory::new();

    println!("{}", config.app_title);
    println!(
        "Region: {} | Model: {} | Product: {}",
        config.region, config.model_id, config.product_name
    );
    println!("Commands: /clear, /history, /quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("Ask me anything about {}... > ", config.product_name);
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_input(&line) {
            Input::Quit => break,
            Input::Skip => continue,
            Input::Clear => {
                history.clear();
                println!("Chat history cleared");
            }
            Input::History => {
                for turn in history.iter() {
                    println!(
                        "{} [{}] {}",
                        turn.timestamp.format("%H:%M:%S"),
                        turn.role,
                        turn.content
                    );
                }
            }
            Input::Query(query) => {
                println!("Processing...");
                let answer = router.handle(&query).await;
                history.record(&query, &answer);

                let events = events.drain();
                if !events.is_empty() {
                    println!("{}", format_events(&events));
                }
                println!("{}", format_answer(&answer));
            }
        }
    }

    Ok(())
}
