use crate::constants::{ACCENT_RGB, THINKING_TEXT};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

#[derive(Debug, Default)]
pub struct StatusIndicator {
    thinking: bool,
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_thinking(&mut self, thinking: bool) {
        if thinking && !self.thinking {
            self.spinner_idx = 0;
        }
        self.thinking = thinking;
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    pub fn tick(&mut self) {
        if self.thinking {
            self.spinner_idx = self.spinner_idx.wrapping_add(1);
        }
    }

    pub fn line(&self) -> Line<'static> {
        if !self.thinking {
            return Line::default();
        }

        let (r, g, b) = ACCENT_RGB;
        let frame = SPINNER_FRAMES[self.spinner_idx % SPINNER_FRAMES.len()];
        Line::from(vec![
            Span::styled(frame, Style::default().fg(Color::Rgb(r, g, b))),
            Span::raw(" "),
            Span::styled(THINKING_TEXT, Style::default().fg(Color::DarkGray)),
        ])
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new(self.line()).alignment(Alignment::Left), area);
    }
}
