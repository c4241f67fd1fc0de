#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::domain::models::Message;
use crate::domain::models::Origin;

#[derive(Debug, PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

impl BubbleAlignment {
    pub fn for_origin(origin: Origin) -> BubbleAlignment {
        if origin == Origin::User {
            return BubbleAlignment::Right;
        }

        return BubbleAlignment::Left;
    }
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    window_max_width: usize,
}

pub struct BubbleConfig {
    pub bubble_padding: usize,
    pub border_elements_length: usize,
    pub outer_padding_percentage: f32,
}

fn repeat(text: &str, count: usize) -> String {
    return [text].repeat(count).join("");
}

impl<'a> Bubble<'a> {
    pub fn new(
        message: &'a Message,
        alignment: BubbleAlignment,
        window_max_width: usize,
    ) -> Bubble<'a> {
        return Bubble {
            alignment,
            message,
            window_max_width,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            // Unicode character border + padding.
            bubble_padding: 4,
            // left border + left padding + (text, not counted) + right padding + right border +
            // scrollbar.
            border_elements_length: 5,
            outer_padding_percentage: 0.04,
        };
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let label = self.message.origin().to_string();
        let max_line_length = self.get_max_line_length(&label);

        let lines = self
            .message
            .as_string_lines(max_line_length)
            .into_iter()
            .map(|line| {
                return self.text_to_line(line, max_line_length);
            })
            .collect::<Vec<Line<'static>>>();

        return self.wrap_lines_in_bubble(lines, max_line_length, &label);
    }

    fn text_to_line(&self, text: String, max_line_length: usize) -> Line<'static> {
        let fill = repeat(" ", max_line_length.saturating_sub(text.chars().count()));
        let spans = vec![
            self.border_span("│ ".to_string()),
            Span::from(text),
            self.border_span(format!("{fill} │")),
        ];

        return self.pad_line(spans, max_line_length);
    }

    fn pad_line(&self, mut spans: Vec<Span<'static>>, max_line_length: usize) -> Line<'static> {
        let bubble_width = max_line_length + Bubble::style_config().bubble_padding;
        let outer_padding = Span::from(repeat(
            " ",
            self.window_max_width.saturating_sub(bubble_width),
        ));

        if self.alignment == BubbleAlignment::Left {
            spans.push(outer_padding);
            return Line::from(spans);
        }

        let mut line_spans = vec![outer_padding];
        line_spans.extend(spans);
        return Line::from(line_spans);
    }

    fn get_max_line_length(&self, label: &str) -> usize {
        let style_config = Bubble::style_config();
        // Add a minimum 4% of padding on the side.
        let min_bubble_padding_length = ((self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil()) as usize;

        // Border elements + minimum bubble padding.
        let line_border_width = style_config.border_elements_length + min_bubble_padding_length;
        let limit = self
            .window_max_width
            .saturating_sub(line_border_width)
            .max(1);

        let mut max_line_length = self
            .message
            .text()
            .replace('\t', "  ")
            .lines()
            .map(|line| {
                return line.chars().count();
            })
            .max()
            .unwrap_or(0)
            .min(limit);

        let label_length = label.chars().count();
        if max_line_length < label_length {
            max_line_length = label_length;
        }

        return max_line_length;
    }

    fn wrap_lines_in_bubble(
        &self,
        lines: Vec<Line<'static>>,
        max_line_length: usize,
        label: &str,
    ) -> Vec<Line<'static>> {
        // Add 2 for the padding on both sides of the text.
        let inner_width = max_line_length + 2;
        let top_bar = format!(
            "╭{label}{}╮",
            repeat("─", inner_width.saturating_sub(label.chars().count()))
        );
        let bottom_bar = format!("╰{}╯", repeat("─", inner_width));

        let mut res = vec![self.pad_line(vec![self.border_span(top_bar)], max_line_length)];
        res.extend(lines);
        res.push(self.pad_line(vec![self.border_span(bottom_bar)], max_line_length));

        return res;
    }

    fn border_span(&self, text: String) -> Span<'static> {
        if self.message.origin() == Origin::User {
            return Span::styled(
                text,
                Style {
                    fg: Some(Color::Cyan),
                    ..Style::default()
                },
            );
        }

        return Span::from(text);
    }
}
