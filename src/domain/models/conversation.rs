use thiserror::Error;

use super::Message;

/// Whether the language model session answered its last health check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Availability {
    #[default]
    Unknown,
    Available,
    Unavailable(String),
}

/// Recoverable failure of a single prompt/response exchange. These are kept in
/// the conversation state for display, they never escape the store.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExchangeFailure {
    #[error("The assistant is unavailable: {0}")]
    Unavailable(String),
    #[error("The assistant failed to respond: {0}")]
    Failed(String),
    #[error("The assistant did not respond within {0}ms")]
    TimedOut(u64),
}

/// Snapshot of everything the presentation layer renders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Conversation {
    pub messages: Vec<Message>,
    pub draft_text: String,
    pub is_awaiting_response: bool,
    pub is_input_focused: bool,
    pub availability: Availability,
    pub last_failure: Option<ExchangeFailure>,
}
