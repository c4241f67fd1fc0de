#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use ratatui::prelude::Rect;

use super::BubbleList;
use super::Scroll;
use crate::domain::models::Conversation;
use crate::domain::models::Suggestion;

/// Presentation state derived from the latest conversation snapshot.
pub struct AppState {
    pub bubble_list: BubbleList,
    pub conversation: Conversation,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub scroll: Scroll,
    pub suggestions: Vec<Suggestion>,
}

impl AppState {
    pub fn new(conversation: Conversation, suggestions: Vec<Suggestion>) -> AppState {
        let mut app_state = AppState {
            bubble_list: BubbleList::default(),
            conversation,
            last_known_height: 0,
            last_known_width: 0,
            scroll: Scroll::default(),
            suggestions,
        };
        app_state.sync_dependants();

        return app_state;
    }

    /// Applies a new snapshot. The transcript follows the newest message
    /// whenever messages are added or removed.
    pub fn set_conversation(&mut self, conversation: Conversation) {
        let messages_changed = conversation.messages.len() != self.conversation.messages.len();
        self.conversation = conversation;
        self.sync_dependants();

        if messages_changed {
            self.scroll.last();
        }
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    pub fn show_suggestions(&self) -> bool {
        return self.conversation.messages.is_empty() && !self.suggestions.is_empty();
    }

    /// Resolves a `1`-based suggestion key. Suggestions are only offered on an
    /// empty transcript.
    pub fn suggestion_for_key(&self, key: char) -> Option<&Suggestion> {
        if !self.show_suggestions() {
            return None;
        }

        let idx = key.to_digit(10)? as usize;
        if idx == 0 {
            return None;
        }

        return self.suggestions.get(idx - 1);
    }

    fn sync_dependants(&mut self) {
        self.bubble_list.set_messages(
            &self.conversation.messages,
            self.last_known_width as usize,
        );

        self.scroll.set_state(
            u16::try_from(self.bubble_list.len()).unwrap_or(u16::MAX),
            self.last_known_height,
        );
    }
}
