use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio::sync::watch;
use tui_textarea::Key;

use crate::domain::models::Conversation;
use crate::domain::models::Event;
use crate::domain::models::Status;
use crate::domain::models::StoreEvent;
use crate::domain::models::Suggestion;
use crate::domain::models::TextArea;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::ConversationStore;

fn header_widget() -> Paragraph<'static> {
    let line = Line::from(vec![
        Span::styled(
            "Chat Assistant",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  Tab: write  Esc: leave  CTRL+L: clear  CTRL+C: quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    return Paragraph::new(line);
}

fn draft_of(textarea: &tui_textarea::TextArea) -> String {
    return textarea.lines().join("\n");
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    store: &mut ConversationStore,
    events: &mut EventsService,
    snapshots: &mut watch::Receiver<Conversation>,
) -> Result<()> {
    let mut textarea = TextArea::composer(
        &store.conversation().draft_text,
        store.conversation().is_input_focused,
    );

    loop {
        if snapshots.has_changed()? {
            let conversation = snapshots.borrow_and_update().clone();
            app_state.set_conversation(conversation);
        }

        // The store owns the draft. Rebuild the composer whenever the store
        // changed it behind our back, such as after a send or a clear.
        if draft_of(&textarea) != app_state.conversation.draft_text {
            textarea = TextArea::composer(
                &app_state.conversation.draft_text,
                app_state.conversation.is_input_focused,
            );
        }
        TextArea::set_focused(&mut textarea, app_state.conversation.is_input_focused);

        terminal.draw(|frame| {
            let mut suggestions_height = 0;
            if app_state.show_suggestions() {
                suggestions_height = 4;
            }

            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Length(1),
                    Constraint::Min(1),
                    Constraint::Length(suggestions_height),
                    Constraint::Length(1),
                    Constraint::Length(4),
                ])
                .split(frame.size());

            frame.render_widget(header_widget(), layout[0]);

            if layout[1].width != app_state.last_known_width
                || layout[1].height != app_state.last_known_height
            {
                app_state.set_rect(layout[1]);
            }
            frame.render_widget(
                app_state.bubble_list.widget(app_state.scroll.position),
                layout[1],
            );

            if app_state.show_suggestions() {
                let cards = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints(vec![
                        Constraint::Percentage(50),
                        Constraint::Percentage(50),
                    ])
                    .split(layout[2]);

                for (idx, suggestion) in app_state.suggestions.iter().take(cards.len()).enumerate() {
                    frame.render_widget(suggestion.widget(idx), cards[idx]);
                }
            }

            if let Some(status) = Status::from_conversation(&app_state.conversation) {
                frame.render_widget(status.widget(), layout[3]);
            }

            frame.render_widget(textarea.widget(), layout[4]);
        })?;

        let focused = store.conversation().is_input_focused;
        match events.next().await? {
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardCTRLL() => {
                store.clear();
            }
            Event::KeyboardEnter() => {
                if focused {
                    store.update_draft(&draft_of(&textarea));
                    store.send();
                } else {
                    store.set_input_focused(true);
                }
            }
            Event::KeyboardTab() => {
                store.set_input_focused(true);
            }
            Event::KeyboardEsc() => {
                store.set_input_focused(false);
            }
            Event::KeyboardPaste(text) => {
                store.set_input_focused(true);
                for (idx, line) in text.replace('\r', "").split('\n').enumerate() {
                    if idx > 0 {
                        textarea.insert_newline();
                    }
                    textarea.insert_str(line);
                }
                store.update_draft(&draft_of(&textarea));
            }
            Event::KeyboardCharInput(input) => {
                if focused {
                    if textarea.input(input) {
                        store.update_draft(&draft_of(&textarea));
                    }
                } else if let Key::Char(key) = input.key {
                    if key == 'i' {
                        store.set_input_focused(true);
                    } else if let Some(suggestion) = app_state.suggestion_for_key(key).cloned() {
                        store.apply_suggestion(&suggestion.title, &suggestion.subtitle);
                    }
                }
            }
            Event::Store(event) => {
                store.handle_event(event);
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UIResize() | Event::UITick() => (),
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    mut store: ConversationStore,
    store_events: mpsc::UnboundedReceiver<StoreEvent>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let mut snapshots = store.subscribe();
    let mut app_state = AppState::new(snapshots.borrow_and_update().clone(), Suggestion::defaults());
    let mut events = EventsService::new(store_events);

    store.check_availability();
    start_loop(
        &mut terminal,
        &mut app_state,
        &mut store,
        &mut events,
        &mut snapshots,
    )
    .await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
