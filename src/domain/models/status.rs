#[cfg(test)]
#[path = "status_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::widgets::Paragraph;

use super::Availability;
use super::Conversation;

#[derive(Debug, PartialEq, Eq)]
pub enum Status {
    Thinking,
    Failure(String),
    Unavailable(String),
}

impl Status {
    pub fn from_conversation(conversation: &Conversation) -> Option<Status> {
        if conversation.is_awaiting_response {
            return Some(Status::Thinking);
        }
        if let Some(failure) = &conversation.last_failure {
            return Some(Status::Failure(failure.to_string()));
        }
        if let Availability::Unavailable(reason) = &conversation.availability {
            return Some(Status::Unavailable(format!(
                "Assistant unavailable: {reason}"
            )));
        }

        return None;
    }

    pub fn widget(&self) -> Paragraph<'static> {
        match self {
            Status::Thinking => {
                return Paragraph::new("Thinking...").style(Style::default().fg(Color::DarkGray));
            }
            Status::Failure(text) | Status::Unavailable(text) => {
                return Paragraph::new(text.to_string()).style(Style::default().fg(Color::Red));
            }
        }
    }
}
