//! Terminal rendering of answers and display events

use kbrouter_core::{AnswerResult, DisplayEvent};

/// Render side-channel events the way they appear above an answer
pub fn format_events(events: &[DisplayEvent]) -> String {
    events
        .iter()
        .map(|event| match event {
            DisplayEvent::Error(message) => format!("Error: {}", message),
            DisplayEvent::Citation(citation) => format!(
                "Context: {}\nSource: {}",
                citation.context_text, citation.source_uri
            ),
            DisplayEvent::NoContext => "No specific context found".to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_answer(answer: &AnswerResult) -> String {
    if answer.is_empty() {
        "(no response generated)".to_string()
    } else {
        answer.text.clone()
    }
}
