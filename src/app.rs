use crate::conversation::{ChatCompletion, ChatSession, PendingRequest};
use crate::status_indicator::StatusIndicator;
use ratatui::layout::Rect;

pub struct App {
    pub session: ChatSession,
    pub status_indicator: StatusIndicator,
    /// Lines scrolled back from the newest message; 0 follows the conversation.
    pub scroll_back: u16,
    /// Where the send icon was last drawn, for mouse hits.
    pub send_button: Option<Rect>,
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> App {
        App {
            session: ChatSession::new(),
            status_indicator: StatusIndicator::new(),
            scroll_back: 0,
            send_button: None,
            should_quit: false,
        }
    }

    /// Sends the draft, if the session accepts it, and jumps back to the
    /// newest message.
    pub fn submit(&mut self) -> Option<PendingRequest> {
        let request = self.session.send_question()?;
        self.status_indicator.set_thinking(true);
        self.scroll_back = 0;
        Some(request)
    }

    pub fn apply_completion(&mut self, completion: ChatCompletion) {
        if self.session.resolve(completion) {
            self.scroll_back = 0;
        }
        self.status_indicator
            .set_thinking(self.session.is_loading());
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }
}
