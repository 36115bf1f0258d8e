use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::themes::Tone;

use super::app::{Picker, PickerAction};

fn draw_header(f: &mut Frame, picker: &Picker, area: Rect) {
    let key = Style::default().fg(Tone::Key.color(picker.theme));
    let text = vec![
        Line::from(Span::styled(
            "Available Scripts:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw("(Press "),
            Span::styled("<space>", key),
            Span::raw(" to select and "),
            Span::styled("<enter>", key),
            Span::raw(" to proceed. Press "),
            Span::styled("<enter>", key),
            Span::raw(" without selecting any script to exit.)"),
        ]),
    ];
    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), area);
}

fn draw_choices(f: &mut Frame, picker: &mut Picker, area: Rect) {
    let command = Style::default().fg(Tone::Command.color(picker.theme));
    let items: Vec<ListItem> = picker
        .choices
        .iter()
        .zip(&picker.toggled)
        .map(|(choice, &on)| {
            ListItem::new(Line::from(vec![
                Span::raw(if on { "◉ " } else { "◯ " }),
                Span::styled(
                    choice.name.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(": "),
                Span::styled(choice.command.as_str(), command),
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("❯ ");

    f.render_stateful_widget(list, area, &mut picker.state);
}

fn draw_error(f: &mut Frame, picker: &Picker, area: Rect) {
    if let Some(message) = picker.error {
        let error = Paragraph::new(Line::from(Span::styled(
            format!("> {}", message),
            Style::default().fg(Tone::Failure.color(picker.theme)),
        )));
        f.render_widget(error, area);
    }
}

fn draw_ui<W: std::io::Write>(
    terminal: &mut Terminal<CrosstermBackend<W>>,
    picker: &mut Picker,
) -> Result<()> {
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Length(2),
                    Constraint::Min(3),
                    Constraint::Length(1),
                ]
                .as_ref(),
            )
            .split(f.size());

        draw_header(f, picker, chunks[0]);
        draw_choices(f, picker, chunks[1]);
        draw_error(f, picker, chunks[2]);
    })?;

    Ok(())
}

/// Redraws and handles key presses until the picker is confirmed or
/// cancelled. Cancelling yields an empty selection.
pub fn run_event_loop<W: std::io::Write>(
    terminal: &mut Terminal<CrosstermBackend<W>>,
    picker: &mut Picker,
) -> Result<Vec<String>> {
    loop {
        draw_ui(terminal, picker)?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match picker.handle_key(key) {
                PickerAction::Continue => {}
                PickerAction::Confirm(values) => return Ok(values),
                PickerAction::Cancel => return Ok(Vec::new()),
            }
        }
    }
}
