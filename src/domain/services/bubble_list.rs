use std::collections::HashMap;

use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use uuid::Uuid;

use super::Bubble;
use super::BubbleAlignment;
use crate::domain::models::Message;

#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

/// Rendered transcript. Messages never change after creation, so their
/// bubbles are cached by message id until the available width changes.
#[derive(Default)]
pub struct BubbleList {
    cache: HashMap<Uuid, Vec<Line<'static>>>,
    line_width: usize,
    lines_len: usize,
    order: Vec<Uuid>,
}

impl BubbleList {
    pub fn set_messages(&mut self, messages: &[Message], line_width: usize) {
        if self.line_width != line_width {
            self.cache.clear();
            self.line_width = line_width;
        }

        self.order = messages
            .iter()
            .map(|message| {
                return message.id();
            })
            .collect();
        self.cache.retain(|id, _| return self.order.contains(id));

        self.lines_len = messages
            .iter()
            .map(|message| {
                if let Some(lines) = self.cache.get(&message.id()) {
                    return lines.len();
                }

                let align = BubbleAlignment::for_origin(message.origin());
                let bubble_lines = Bubble::new(message, align, line_width).as_lines();
                let bubble_line_len = bubble_lines.len();
                self.cache.insert(message.id(), bubble_lines);

                return bubble_line_len;
            })
            .sum();
    }

    pub fn len(&self) -> usize {
        return self.lines_len;
    }

    pub fn is_empty(&self) -> bool {
        return self.lines_len == 0;
    }

    pub fn widget(&self, scroll: u16) -> Paragraph<'static> {
        let lines: Vec<Line<'static>> = self
            .order
            .iter()
            .filter_map(|id| {
                return self.cache.get(id);
            })
            .flat_map(|lines| {
                return lines.to_owned();
            })
            .collect();

        return Paragraph::new(lines)
            .block(Block::default())
            .scroll((scroll, 0));
    }
}
