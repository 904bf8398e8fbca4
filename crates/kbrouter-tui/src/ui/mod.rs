//! TUI rendering

use crate::app::App;
use kbrouter_core::{DisplayEvent, Role};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const INPUT_PREFIX: &str = "> ";

pub fn render(frame: &mut Frame, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(36)])
        .split(frame.area());

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(columns[0]);

    render_transcript(frame, app, main[0]);
    render_input(frame, app, main[1]);
    render_status(frame, app, main[2]);
    render_sidebar(frame, app, columns[1]);
}

fn render_transcript(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width.saturating_sub(2) as usize;

    // One entry per screen row, so the window below is measured in rows
    let mut rows: Vec<Line> = Vec::new();
    for turn in app.history.iter() {
        let (label, color) = match turn.role {
            Role::User => ("You", Color::Cyan),
            Role::System => ("System", Color::DarkGray),
            Role::Assistant => ("Assistant", Color::Green),
        };
        rows.push(Line::from(vec![
            Span::styled(
                format!("{} ", turn.timestamp.format("%H:%M")),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                label,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]));
        for text in turn.content.lines() {
            rows.extend(wrap_text(text, width).into_iter().map(Line::from));
        }
        rows.push(Line::default());
    }

    if app.is_loading {
        rows.push(Line::from(Span::styled(
            "Processing...",
            Style::default().fg(Color::Yellow),
        )));
    }

    // Keep the newest turn visible; scrolling moves back in time
    let visible = area.height.saturating_sub(2) as usize;
    let bottom = rows
        .len()
        .saturating_sub(app.scroll_offset)
        .max(visible.min(rows.len()));
    let top = bottom.saturating_sub(visible);
    let rows: Vec<Line> = rows.into_iter().skip(top).take(bottom - top).collect();

    let transcript = Paragraph::new(rows).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", app.config.app_title)),
    );

    frame.render_widget(transcript, area);
}

/// Word-wrap to `width` columns, splitting words longer than a row
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut rows = Vec::new();
    let mut row = String::new();
    let mut row_len = 0;
    for word in text.split(' ') {
        let word_len = word.chars().count();
        if row_len > 0 && row_len + 1 + word_len > width {
            rows.push(std::mem::take(&mut row));
            row_len = 0;
        }
        if row_len > 0 {
            row.push(' ');
            row_len += 1;
        }
        for c in word.chars() {
            if row_len == width {
                rows.push(std::mem::take(&mut row));
                row_len = 0;
            }
            row.push(c);
            row_len += 1;
        }
    }
    rows.push(row);
    rows
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let placeholder = app.input.is_empty() && !app.is_loading;
    let text = if placeholder {
        Span::styled(
            format!(
                "{}Ask me anything about {}...",
                INPUT_PREFIX, app.config.product_name
            ),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(
            format!("{}{}", INPUT_PREFIX, app.input),
            Style::default().fg(Color::Yellow),
        )
    };

    let input = Paragraph::new(Line::from(text))
        .block(Block::default().borders(Borders::ALL).title(" Chat "));

    frame.render_widget(input, area);

    if !app.is_loading {
        frame.set_cursor_position((
            area.x + INPUT_PREFIX.len() as u16 + app.cursor_pos as u16 + 1,
            area.y + 1,
        ));
    }
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(area);

    let label = Style::default().fg(Color::Yellow);
    let config_lines = vec![
        Line::from(vec![Span::styled("Region: ", label), Span::raw(&app.config.region)]),
        Line::from(vec![Span::styled("Model: ", label), Span::raw(&app.config.model_id)]),
        Line::from(vec![
            Span::styled("Product: ", label),
            Span::raw(&app.config.product_name),
        ]),
        Line::default(),
        Line::from(Span::styled(
            "Ctrl+L  Clear Chat",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "Ctrl+Y  Copy answer",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "Esc     Clear input / Quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let config = Paragraph::new(config_lines)
        .block(Block::default().borders(Borders::ALL).title(" Configuration "))
        .wrap(Wrap { trim: true });
    frame.render_widget(config, chunks[0]);

    let context = Paragraph::new(context_lines(&app.context))
        .block(Block::default().borders(Borders::ALL).title(" Context "))
        .wrap(Wrap { trim: false });
    frame.render_widget(context, chunks[1]);
}

fn context_lines(events: &[DisplayEvent]) -> Vec<Line<'_>> {
    let label = Style::default().fg(Color::Rgb(0xFF, 0xDA, 0x33));
    let mut lines = Vec::new();
    for event in events {
        match event {
            DisplayEvent::Citation(citation) => {
                lines.push(Line::from(vec![
                    Span::styled("Context: ", label),
                    Span::raw(citation.context_text.as_str()),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("Source: ", label),
                    Span::raw(citation.source_uri.as_str()),
                ]));
            }
            DisplayEvent::NoContext => {
                lines.push(Line::from(Span::styled(
                    "No specific context found",
                    Style::default().fg(Color::Red),
                )));
            }
            // Errors go to the status line
            DisplayEvent::Error(_) => {}
        }
    }
    lines
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let (status, color) = if app.is_loading {
        ("Processing...".to_string(), Color::Yellow)
    } else if let Some(ref msg) = app.status_message {
        let color = if msg.contains("error") {
            Color::Red
        } else {
            Color::DarkGray
        };
        (msg.clone(), color)
    } else {
        (
            "Enter: send | Up/Down: scroll | Ctrl+L: clear | Esc: quit".to_string(),
            Color::DarkGray,
        )
    };

    let paragraph = Paragraph::new(status).style(Style::default().fg(color));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kbrouter_core::{
        EventBuffer, InferenceParams, KbResponse, KnowledgeBase, Router, ServiceConfig,
        ServiceError, TextGenerator,
    };
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    struct FixedAnswer(String);

    #[async_trait]
    impl TextGenerator for FixedAnswer {
        async fn generate(
            &self,
            _system: &str,
            _user: &str,
            _params: &InferenceParams,
        ) -> Result<String, ServiceError> {
            Ok(self.0.clone())
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    struct UnusedKnowledgeBase;

    #[async_trait]
    impl KnowledgeBase for UnusedKnowledgeBase {
        async fn retrieve_and_generate(
            &self,
            _query: &str,
            _knowledge_base_id: &str,
            _model_arn: &str,
        ) -> Result<KbResponse, ServiceError> {
            Err(ServiceError::request("RetrieveAndGenerate", "not expected"))
        }
    }

    fn test_config() -> ServiceConfig {
        ServiceConfig::from_lookup(|name| match name {
            "PRODUCT_NAME" => Some("WidgetPro".to_string()),
            "APP_TITLE" => Some("WidgetPro Assistant".to_string()),
            "AWS_SESSION_TOKEN" | "KBROUTER_LOG_FILE" => None,
            _ => Some("test".to_string()),
        })
        .unwrap()
    }

    async fn app_with_answer(answer: &str) -> App {
        let config = test_config();
        let events = Arc::new(EventBuffer::new());
        let router = Router::from_config(
            &config,
            Arc::new(FixedAnswer(answer.to_string())),
            Arc::new(UnusedKnowledgeBase),
            events.clone(),
        );
        let mut app = App::new(router, events, &config);

        app.input = "Tell me something long".to_string();
        app.submit();
        app.process_pending().await;
        app
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("hello world", 20), vec!["hello world"]);
        assert_eq!(wrap_text("hello world", 8), vec!["hello", "world"]);
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[tokio::test]
    async fn test_long_answer_tail_is_visible() {
        let answer = format!("{}THE-END", "lorem ipsum dolor sit amet ".repeat(83));
        let mut app = app_with_answer(&answer).await;

        assert_eq!(app.history.last_answer(), Some(answer.as_str()));
        assert!(screen(&app).contains("THE-END"));

        for _ in 0..10 {
            app.scroll_up();
        }
        assert!(!screen(&app).contains("THE-END"));

        for _ in 0..10 {
            app.scroll_down();
        }
        assert!(screen(&app).contains("THE-END"));
    }

    #[tokio::test]
    async fn test_scrolling_stops_at_first_turn() {
        let answer = "lorem ipsum dolor sit amet ".repeat(83);
        let mut app = app_with_answer(&answer).await;

        for _ in 0..500 {
            app.scroll_up();
        }
        assert!(screen(&app).contains("Tell me something long"));
    }
}
