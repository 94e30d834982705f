use crate::constants::{ACCENT_RGB, BUBBLE_WIDTH_PERCENT};
use crate::models::{Message, Sender};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

const MIN_BUBBLE_WIDTH: usize = 12;
/// Width of the `│ ` gutter in front of every body line.
const GUTTER: usize = 2;

/// Renders one message as a bubble `width` columns wide at most. User
/// bubbles are pushed to the right edge, ai bubbles stay on the left.
pub fn render_message(message: &Message, width: u16) -> Vec<Line<'static>> {
    let width = width as usize;
    let max_bubble = (width * BUBBLE_WIDTH_PERCENT / 100)
        .max(MIN_BUBBLE_WIDTH)
        .min(width.max(1));
    let text_width = max_bubble.saturating_sub(GUTTER).max(1);

    let style = base_style(message.sender);
    let header = header_text(message);

    let body: Vec<String> = wrap(&message.text, text_width)
        .into_iter()
        .map(|line| line.into_owned())
        .collect();

    let source: Vec<String> = message
        .primary_source()
        .map(|label| {
            wrap(&format!("Source: {}", label), text_width)
                .into_iter()
                .map(|line| line.into_owned())
                .collect()
        })
        .unwrap_or_default();

    let widest = body
        .iter()
        .chain(source.iter())
        .map(|line| line.width() + GUTTER)
        .chain(std::iter::once(header.width()))
        .max()
        .unwrap_or(0)
        .min(max_bubble);

    let indent = match message.sender {
        Sender::User => " ".repeat(width.saturating_sub(widest)),
        Sender::Ai => String::new(),
    };

    let mut lines = Vec::with_capacity(body.len() + source.len() + 2);
    lines.push(Line::from(vec![
        Span::raw(indent.clone()),
        Span::styled(header, style.add_modifier(Modifier::BOLD)),
    ]));

    for text in body {
        lines.push(Line::from(vec![
            Span::raw(indent.clone()),
            Span::styled("│ ", style),
            Span::styled(text, style),
        ]));
    }

    let source_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);
    for text in source {
        lines.push(Line::from(vec![
            Span::raw(indent.clone()),
            Span::styled("│ ", style),
            Span::styled(text, source_style),
        ]));
    }

    lines.push(Line::from(vec![
        Span::raw(indent),
        Span::styled("╰─", style),
    ]));

    lines
}

fn base_style(sender: Sender) -> Style {
    let (r, g, b) = ACCENT_RGB;
    match sender {
        Sender::User => Style::default().fg(Color::Rgb(r, g, b)),
        Sender::Ai => Style::default().fg(Color::Gray),
    }
}

fn header_text(message: &Message) -> String {
    let who = match message.sender {
        Sender::User => "You",
        Sender::Ai => "Tutor",
    };
    format!("┌─ {} · {}", who, message.timestamp.format("%H:%M"))
}
