// src/conversation.rs

use crate::errors::TutorResult;
use crate::models::{ChatResponse, Message};
use log::{debug, warn};

/// A question accepted by the session and waiting to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub token: u64,
    pub question: String,
}

/// The outcome of a dispatched request, tagged with the token it was sent under.
#[derive(Debug)]
pub struct ChatCompletion {
    pub token: u64,
    pub result: TutorResult<ChatResponse>,
}

/// Draft text, the message log and the in-flight request.
///
/// Messages are only ever appended. At most one request is outstanding:
/// sends are refused while loading, and a completion is only applied if its
/// token matches the request currently in flight.
#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<Message>,
    draft: String,
    in_flight: Option<u64>,
    next_token: u64,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn push_char(&mut self, c: char) {
        self.draft.push(c);
    }

    pub fn push_str(&mut self, text: &str) {
        self.draft.push_str(text);
    }

    pub fn pop_char(&mut self) {
        self.draft.pop();
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    /// Sends the current draft. See [`ChatSession::submit`].
    pub fn send_question(&mut self) -> Option<PendingRequest> {
        let text = self.draft.clone();
        self.submit(&text)
    }

    /// Appends the user message, clears the draft and marks the session as
    /// loading. Returns `None` without touching anything when `text` is blank
    /// or a request is already in flight.
    pub fn submit(&mut self, text: &str) -> Option<PendingRequest> {
        if text.trim().is_empty() {
            return None;
        }
        if let Some(token) = self.in_flight {
            debug!("Ignoring send while request {} is in flight", token);
            return None;
        }

        self.messages.push(Message::user(text));
        self.draft.clear();

        self.next_token += 1;
        let token = self.next_token;
        self.in_flight = Some(token);

        Some(PendingRequest {
            token,
            question: text.to_string(),
        })
    }

    /// Applies a completion. Stale completions are dropped and `false` is
    /// returned; otherwise exactly one ai message is appended.
    pub fn resolve(&mut self, completion: ChatCompletion) -> bool {
        if self.in_flight != Some(completion.token) {
            warn!(
                "Discarding stale response for request {} (in flight: {:?})",
                completion.token, self.in_flight
            );
            return false;
        }

        let message = match completion.result {
            Ok(response) => Message::ai(response.answer, response.sources),
            Err(_) => Message::ai_error(),
        };
        self.messages.push(message);
        self.in_flight = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TutorError;
    use crate::models::{Sender, Source};

    fn answer(text: &str, sources: &[&str]) -> TutorResult<ChatResponse> {
        Ok(ChatResponse {
            answer: text.to_string(),
            sources: sources.iter().map(|s| Source::named(*s)).collect(),
        })
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut session = ChatSession::new();
        for text in ["", "   ", "\n\t "] {
            session.push_str(text);
            assert_eq!(session.send_question(), None);
            session.clear_draft();
        }
        assert!(session.messages().is_empty());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_blank_input_keeps_draft() {
        let mut session = ChatSession::new();
        session.push_str("  ");
        assert_eq!(session.send_question(), None);
        assert_eq!(session.draft(), "  ");
    }

    #[test]
    fn test_send_appends_user_message_and_starts_loading() {
        let mut session = ChatSession::new();
        session.push_str("  What is entropy? ");

        let request = session.send_question().unwrap();

        assert_eq!(request.question, "  What is entropy? ");
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].sender, Sender::User);
        assert_eq!(session.messages()[0].text, "  What is entropy? ");
        assert_eq!(session.draft(), "");
        assert!(session.is_loading());
    }

    #[test]
    fn test_success_appends_answer_and_stops_loading() {
        let mut session = ChatSession::new();
        let request = session.submit("What is the answer?").unwrap();

        assert!(session.resolve(ChatCompletion {
            token: request.token,
            result: answer("42", &["bookA.pdf"]),
        }));

        let ai = &session.messages()[1];
        assert_eq!(session.messages().len(), 2);
        assert_eq!(ai.sender, Sender::Ai);
        assert_eq!(ai.text, "42");
        assert_eq!(ai.primary_source(), Some("bookA.pdf"));
        assert!(!session.is_loading());
    }

    #[test]
    fn test_failure_appends_fixed_error_text() {
        let mut session = ChatSession::new();
        let request = session.submit("hello?").unwrap();

        session.resolve(ChatCompletion {
            token: request.token,
            result: Err(TutorError::api_error("connection refused")),
        });

        let ai = &session.messages()[1];
        assert_eq!(ai.text, "Error connecting to AI Tutor.");
        assert!(ai.sources.is_none());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_send_while_loading_is_rejected() {
        let mut session = ChatSession::new();
        let first = session.submit("first").unwrap();

        session.push_str("second");
        assert_eq!(session.send_question(), None);
        assert_eq!(session.draft(), "second");
        assert_eq!(session.messages().len(), 1);

        session.resolve(ChatCompletion {
            token: first.token,
            result: answer("one", &[]),
        });
        let second = session.send_question().unwrap();
        assert!(second.token > first.token);
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut session = ChatSession::new();
        let first = session.submit("first").unwrap();
        session.resolve(ChatCompletion {
            token: first.token,
            result: answer("one", &[]),
        });
        let second = session.submit("second").unwrap();

        let applied = session.resolve(ChatCompletion {
            token: first.token,
            result: answer("late duplicate", &[]),
        });

        assert!(!applied);
        assert_eq!(session.messages().len(), 3);
        assert!(session.is_loading());

        assert!(session.resolve(ChatCompletion {
            token: second.token,
            result: answer("two", &[]),
        }));
        assert_eq!(session.messages().len(), 4);
    }

    #[test]
    fn test_each_accepted_send_adds_two_messages() {
        let mut session = ChatSession::new();
        for (i, question) in ["a", "b", "c"].iter().enumerate() {
            let request = session.submit(question).unwrap();
            session.resolve(ChatCompletion {
                token: request.token,
                result: if i % 2 == 0 {
                    answer("ok", &[])
                } else {
                    Err(TutorError::api_error("boom"))
                },
            });
            assert_eq!(session.messages().len(), (i + 1) * 2);
        }
    }
}
