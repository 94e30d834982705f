use crate::api::ApiClient;
use crate::chat_message::render_message;
use crate::constants::{
    ACCENT_RGB, APP_TITLE, EMPTY_STATE_PROMPT, FOOTER_HINT, INPUT_PLACEHOLDER, SEND_ICON,
};
use crate::conversation::{ChatCompletion, PendingRequest};
use crate::App;
use log::debug;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn draw_chat(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(2),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    draw_header(f, chunks[0]);
    draw_messages(f, app, chunks[1]);
    app.status_indicator.render(f, chunks[2]);
    draw_input(f, app, chunks[3]);

    f.render_widget(
        Paragraph::new(FOOTER_HINT)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        chunks[4],
    );
}

fn accent() -> Color {
    let (r, g, b) = ACCENT_RGB;
    Color::Rgb(r, g, b)
}

fn draw_header(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        APP_TITLE,
        Style::default().fg(accent()).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(title, area);
}

fn draw_messages(f: &mut Frame, app: &mut App, area: Rect) {
    let area = Rect {
        x: area.x + 1,
        width: area.width.saturating_sub(2),
        ..area
    };

    if app.session.messages().is_empty() {
        let prompt = Paragraph::new(Line::from(Span::styled(
            EMPTY_STATE_PROMPT,
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center);
        let row = Rect {
            y: area.y + area.height / 3,
            height: area.height.min(1),
            ..area
        };
        f.render_widget(prompt, row);
        return;
    }

    let mut lines = Vec::new();
    for message in app.session.messages() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(render_message(message, area.width));
    }

    // Skip lines up front: Paragraph::scroll only takes a u16 offset.
    let max_scroll = lines.len().saturating_sub(area.height as usize);
    let scroll_back = (app.scroll_back as usize).min(max_scroll);
    app.scroll_back = u16::try_from(scroll_back).unwrap_or(u16::MAX);
    let visible: Vec<Line> = lines
        .into_iter()
        .skip(max_scroll - scroll_back)
        .take(area.height as usize)
        .collect();

    f.render_widget(Paragraph::new(visible), area);
}

fn draw_input(f: &mut Frame, app: &mut App, area: Rect) {
    let border_color = if app.session.is_loading() {
        Color::DarkGray
    } else {
        accent()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let icon_width = SEND_ICON.width() as u16;
    let text_area = Rect {
        width: inner.width.saturating_sub(icon_width + 1),
        ..inner
    };
    let send_button = Rect {
        x: inner.x + inner.width.saturating_sub(icon_width),
        width: icon_width.min(inner.width),
        ..inner
    };

    let draft = app.session.draft();
    let (tail, tail_width) = visible_tail(draft, text_area.width.saturating_sub(1) as usize);
    let line = if draft.is_empty() {
        Line::from(Span::styled(
            INPUT_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::styled(tail, Style::default().fg(Color::White)))
    };
    f.render_widget(Paragraph::new(line), text_area);

    f.render_widget(
        Paragraph::new(Span::styled(
            SEND_ICON,
            Style::default().fg(accent()).add_modifier(Modifier::BOLD),
        )),
        send_button,
    );
    app.send_button = Some(send_button);

    let cursor_x = text_area.x.saturating_add(u16::try_from(tail_width).unwrap_or(u16::MAX));
    f.set_cursor_position((cursor_x, text_area.y));
}

/// The longest suffix of `text` that fits in `max_width` columns, with its width.
fn visible_tail(text: &str, max_width: usize) -> (&str, usize) {
    let mut width = 0;
    let mut start = text.len();
    for (idx, c) in text.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        start = idx;
    }
    (&text[start..], width)
}

/// Sends one accepted question and tags the outcome with its token.
pub async fn answer_question(client: &ApiClient, request: PendingRequest) -> ChatCompletion {
    debug!("Dispatching request {} to {}", request.token, client.base_url());
    let result = client.chat_with_ai(&request.question).await;
    ChatCompletion {
        token: request.token,
        result,
    }
}
