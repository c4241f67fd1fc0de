#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use uuid::Uuid;

use super::Origin;

/// A single transcript entry. Messages are never edited once created, the
/// only way to remove one is to clear the whole conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    id: Uuid,
    origin: Origin,
    text: String,
}

impl Message {
    pub fn new(origin: Origin, text: &str) -> Message {
        return Message {
            id: Uuid::new_v4(),
            origin,
            text: text.to_string(),
        };
    }

    pub fn id(&self) -> Uuid {
        return self.id;
    }

    pub fn origin(&self) -> Origin {
        return self.origin;
    }

    pub fn text(&self) -> &str {
        return &self.text;
    }

    /// Word wraps the message to `line_max_width` columns. Words wider than
    /// the limit are split across lines.
    pub fn as_string_lines(&self, line_max_width: usize) -> Vec<String> {
        let width = line_max_width.max(1);
        let mut lines: Vec<String> = Vec::new();

        for full_line in self.text.replace('\t', "  ").split('\n') {
            if full_line.trim().is_empty() {
                lines.push(" ".to_string());
                continue;
            }

            let mut current = String::new();
            for word in full_line.split(' ') {
                let mut word = word.to_string();
                while word.chars().count() > width {
                    if !current.is_empty() {
                        lines.push(current.trim_end().to_string());
                        current = String::new();
                    }
                    lines.push(word.chars().take(width).collect());
                    word = word.chars().skip(width).collect();
                }

                let current_len = current.chars().count();
                if current_len == 0 {
                    current = word;
                } else if current_len + 1 + word.chars().count() > width {
                    lines.push(current.trim_end().to_string());
                    current = word;
                } else {
                    current.push(' ');
                    current.push_str(&word);
                }
            }

            if !current.is_empty() {
                lines.push(current.trim_end().to_string());
            }
        }

        return lines;
    }
}
