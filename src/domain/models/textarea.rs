use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use tui_textarea::CursorMove;

pub struct TextArea {}

impl<'a> TextArea {
    /// Builds the composer holding `draft`, with the cursor at its end.
    pub fn composer(draft: &str, focused: bool) -> tui_textarea::TextArea<'a> {
        let lines = draft
            .split('\n')
            .map(|line| {
                return line.to_string();
            })
            .collect::<Vec<String>>();

        let mut textarea = tui_textarea::TextArea::new(lines);
        textarea.move_cursor(CursorMove::Bottom);
        textarea.move_cursor(CursorMove::End);
        TextArea::set_focused(&mut textarea, focused);

        return textarea;
    }

    pub fn set_focused(textarea: &mut tui_textarea::TextArea<'a>, focused: bool) {
        let mut border_style = Style::default().fg(Color::DarkGray);
        let mut cursor_style = Style::default();
        if focused {
            border_style = Style::default().fg(Color::White);
            cursor_style = Style::default().fg(Color::Black).bg(Color::White);
        }

        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style)
                .title("Ask anything")
                .padding(Padding::new(1, 1, 0, 0)),
        );
        textarea.set_cursor_style(cursor_style);
        textarea.set_cursor_line_style(Style::default());
    }
}
