use crate::constants::SCROLL_STEP;
use crate::conversation::PendingRequest;
use crate::App;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

/// Applies a terminal event to the app. Returns the request to dispatch when
/// the event sent a question.
pub fn handle_event(event: Event, app: &mut App) -> Option<PendingRequest> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_chat_input(key, app),
        Event::Mouse(mouse) => handle_mouse(mouse, app),
        Event::Paste(text) => {
            app.session.push_str(&text);
            None
        }
        _ => None,
    }
}

pub fn handle_chat_input(key: KeyEvent, app: &mut App) -> Option<PendingRequest> {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Enter => return app.submit(),
        KeyCode::PageUp => app.scroll_up(SCROLL_STEP),
        KeyCode::PageDown => app.scroll_down(SCROLL_STEP),
        KeyCode::Backspace => app.session.pop_char(),
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => app.should_quit = true,
                    'u' => app.session.clear_draft(),
                    _ => {}
                }
            } else {
                app.session.push_char(c);
            }
        }
        _ => {}
    }
    None
}

fn handle_mouse(mouse: MouseEvent, app: &mut App) -> Option<PendingRequest> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let hit = app
                .send_button
                .is_some_and(|rect| rect.contains(Position::new(mouse.column, mouse.row)));
            if hit {
                return app.submit();
            }
        }
        MouseEventKind::ScrollUp => app.scroll_up(1),
        MouseEventKind::ScrollDown => app.scroll_down(1),
        _ => {}
    }
    None
}
