// UI Constants
pub const APP_TITLE: &str = "AI Books Tutor";
pub const EMPTY_STATE_PROMPT: &str = "Ask a question about your uploaded books!";
pub const INPUT_PLACEHOLDER: &str = "Ask a question...";
pub const THINKING_TEXT: &str = "Thinking...";
pub const SEND_ICON: &str = "➤";
pub const FOOTER_HINT: &str = "Enter or click ➤ to send · PgUp/PgDn to scroll · Esc to quit";

pub const ACCENT_RGB: (u8, u8, u8) = (98, 0, 238);

/// Bubbles never grow past this share of the message area.
pub const BUBBLE_WIDTH_PERCENT: usize = 85;
pub const SCROLL_STEP: u16 = 5;

// API Constants
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const HEALTH_PATH: &str = "/health";
pub const CHAT_PATH: &str = "/chat";

/// Shown in place of an answer whenever the chat call fails.
pub const CHAT_ERROR_TEXT: &str = "Error connecting to AI Tutor.";
