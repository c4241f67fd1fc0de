#[cfg(test)]
#[path = "suggestion_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Suggestion {
    pub title: String,
    pub subtitle: String,
}

impl Suggestion {
    pub fn new(title: &str, subtitle: &str) -> Suggestion {
        return Suggestion {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
        };
    }

    /// Cards offered on an empty transcript.
    pub fn defaults() -> Vec<Suggestion> {
        return vec![
            Suggestion::new("Creative ways", "to teach coding to kids"),
            Suggestion::new("Generate UI", "for a finance tracking app"),
        ];
    }

    /// Prompt sent when the card is picked.
    pub fn prompt(&self) -> String {
        return format!("{} {}", self.title, self.subtitle);
    }

    /// Card for the zero based `index`, labelled with the key that picks it.
    pub fn widget(&self, index: usize) -> Paragraph<'static> {
        let lines = vec![
            Line::from(Span::styled(
                self.title.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.subtitle.to_string(),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        return Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!("[{}]", index + 1)),
        );
    }
}
