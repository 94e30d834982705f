// src/ui.rs

use crate::api::ApiClient;
use crate::chat_view::{answer_question, draw_chat};
use crate::conversation::{ChatCompletion, PendingRequest};
use crate::errors::TutorResult;
use crate::key_handlers::handle_event;
use crate::App;
use crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        Event, EventStream,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::{Stream, StreamExt};
use log::info;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{io, panic, time::Duration};
use tokio::sync::mpsc;
use tokio::time;

const TICK_RATE: Duration = Duration::from_millis(120);

/// Runs the terminal UI until the user quits.
pub async fn run_ui(client: ApiClient) -> TutorResult<()> {
    // Setup terminal
    install_panic_hook(|| {
        let _ = restore_terminal();
    });
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, EventStream::new(), client).await;

    restore_terminal()?;
    terminal.show_cursor()?;

    res.map(|_| ())
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )
}

/// Chains `restore` in front of the current panic hook, so the panic message
/// lands on a usable terminal.
fn install_panic_hook<F>(restore: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore();
        previous(info);
    }));
}

/// Main loop. All app state is mutated here; chat requests run as spawned
/// tasks and report back over a channel. Returns the final app state.
async fn run_app<B, S>(
    terminal: &mut Terminal<B>,
    mut events: S,
    client: ApiClient,
) -> TutorResult<App>
where
    B: Backend,
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    let mut app = App::new();
    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel::<ChatCompletion>();
    let mut ticker = time::interval(TICK_RATE);

    loop {
        terminal.draw(|f| draw_chat(f, &mut app))?;

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(event)) => {
                        if let Some(request) = handle_event(event, &mut app) {
                            dispatch(&client, request, completion_tx.clone());
                        }
                    }
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            }
            Some(completion) = completion_rx.recv() => {
                app.apply_completion(completion);
            }
            _ = ticker.tick() => {
                app.status_indicator.tick();
            }
        }

        if app.should_quit {
            info!("Quit requested");
            break;
        }
    }

    Ok(app)
}

/// Sends `request` on a spawned task and delivers its completion to `tx`.
fn dispatch(
    client: &ApiClient,
    request: PendingRequest,
    tx: mpsc::UnboundedSender<ChatCompletion>,
) {
    let client = client.clone();
    tokio::spawn(async move {
        let completion = answer_question(&client, request).await;
        // The receiver is gone only once the UI has exited.
        let _ = tx.send(completion);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::unreachable_url;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use serde_json::json;
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    };
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn key(code: KeyCode) -> io::Result<Event> {
        Ok(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    #[tokio::test]
    async fn test_dispatch_delivers_completion_over_channel() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "answer": "42",
                "sources": [{ "source": "bookA.pdf" }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(mock_server.uri());
        let mut app = App::new();
        app.session.push_str("What is the answer?");
        let request = app.submit().unwrap();
        let token = request.token;

        let (tx, mut rx) = mpsc::unbounded_channel();
        dispatch(&client, request, tx);
        let completion = rx.recv().await.unwrap();
        assert_eq!(completion.token, token);

        app.apply_completion(completion);
        let messages = app.session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].text, "42");
        assert!(!app.session.is_loading());
        assert!(!app.status_indicator.is_thinking());
    }

    #[tokio::test]
    async fn test_dispatch_failure_clears_loading() {
        let client = ApiClient::new(unreachable_url());
        let mut app = App::new();
        app.session.push_str("hello?");
        let request = app.submit().unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        dispatch(&client, request, tx);
        app.apply_completion(rx.recv().await.unwrap());

        assert_eq!(app.session.messages()[1].text, "Error connecting to AI Tutor.");
        assert!(!app.session.is_loading());
    }

    #[tokio::test]
    async fn test_event_loop_edits_draft_and_quits() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let events = futures::stream::iter(vec![
            key(KeyCode::Char('h')),
            key(KeyCode::Char('i')),
            key(KeyCode::Enter),
            key(KeyCode::Esc),
        ]);
        // The reply to "hi" may or may not land before Esc is handled.
        let app = run_app(&mut terminal, events, ApiClient::new(unreachable_url()))
            .await
            .unwrap();

        assert!(app.should_quit);
        assert_eq!(app.session.draft(), "");
        assert_eq!(app.session.messages()[0].text, "hi");
    }

    #[tokio::test]
    async fn test_event_loop_ends_with_input_stream() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let events = futures::stream::iter(vec![key(KeyCode::Char('x'))]);

        let app = run_app(&mut terminal, events, ApiClient::new(unreachable_url()))
            .await
            .unwrap();

        assert!(!app.should_quit);
        assert_eq!(app.session.draft(), "x");
        assert!(app.session.messages().is_empty());
    }

    #[test]
    fn test_panic_hook_restores_before_reporting() {
        let restored = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&restored);
        install_panic_hook(move || flag.store(true, Ordering::SeqCst));

        let result = panic::catch_unwind(|| panic!("draw failed"));

        assert!(result.is_err());
        assert!(restored.load(Ordering::SeqCst));
    }
}
