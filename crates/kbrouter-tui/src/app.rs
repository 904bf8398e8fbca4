//! TUI application state

use kbrouter_core::{
    ChatHistory, ConfigSummary, DisplayEvent, EventBuffer, Query, Router, ServiceConfig,
};
use std::sync::Arc;

pub struct App {
    pub router: Router,
    pub events: Arc<EventBuffer>,
    pub config: ConfigSummary,

    pub history: ChatHistory,

    pub input: String,
    pub cursor_pos: usize,

    /// Query submitted but not yet answered
    pub pending: Option<Query>,

    /// Side-channel events of the latest turn
    pub context: Vec<DisplayEvent>,

    pub scroll_offset: usize,
    pub status_message: Option<String>,
    pub is_loading: bool,

    pub should_quit: bool,
}

impl App {
    pub fn new(router: Router, events: Arc<EventBuffer>, config: &ServiceConfig) -> Self {
        Self {
            router,
            events,
            config: config.summary(),
            history: ChatHistory::new(),
            input: String::new(),
            cursor_pos: 0,
            pending: None,
            context: Vec::new(),
            scroll_offset: 0,
            status_message: None,
            is_loading: false,
            should_quit: false,
        }
    }

    /// Queue the current input for processing on the next loop iteration
    pub fn submit(&mut self) {
        match Query::new(self.input.as_str()) {
            Ok(query) => {
                self.pending = Some(query);
                self.is_loading = true;
                self.status_message = None;
                self.input.clear();
                self.cursor_pos = 0;
            }
            Err(_) => {
                self.status_message = Some("Type a question first".to_string());
            }
        }
    }

    /// Run the pending query through the router
    pub async fn process_pending(&mut self) {
        let Some(query) = self.pending.take() else {
            return;
        };

        let answer = self.router.handle(&query).await;
        self.history.record(&query, &answer);

        self.context = self.events.drain();
        self.status_message = self.context.iter().find_map(|event| match event {
            DisplayEvent::Error(message) => Some(message.clone()),
            _ => None,
        });
        if answer.is_empty() && self.status_message.is_none() {
            self.status_message = Some("No response generated".to_string());
        }

        self.scroll_offset = 0;
        self.is_loading = false;
    }

    /// Clear the conversation immediately
    pub fn clear_chat(&mut self) {
        self.history.clear();
        self.context.clear();
        self.scroll_offset = 0;
        self.status_message = Some("Chat history cleared".to_string());
    }

    pub fn copy_last_answer(&mut self) {
        let Some(answer) = self.history.last_answer() else {
            self.status_message = Some("Nothing to copy yet".to_string());
            return;
        };

        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(answer)) {
            Ok(()) => self.status_message = Some("Copied answer to clipboard".to_string()),
            Err(e) => self.status_message = Some(format!("Clipboard error: {}", e)),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.byte_index();
        self.input.insert(byte_idx, c);
        self.cursor_pos += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos -= 1;
            let byte_idx = self.byte_index();
            self.input.remove(byte_idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor_pos < self.input.chars().count() {
            self.cursor_pos += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset += 1;
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }
}
