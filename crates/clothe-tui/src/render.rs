//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never mutate
//! state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::screens::{Focus, FormScreen};
use crate::state::AppState;

/// Height of one bordered input field.
const FIELD_HEIGHT: u16 = 3;

/// Spinner frames for the status line.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Ticks per spinner frame.
const SPINNER_SPEED_DIVISOR: usize = 3;

const HELP_TEXT: &str = "Tab focus · Enter select · Esc cancel · Ctrl+C quit";

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let screen = app.active_screen();
    let area = frame.area();

    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend(screen.fields.iter().map(|_| Constraint::Length(FIELD_HEIGHT)));
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Min(3));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_header(app, screen, frame, chunks[0]);

    let field_count = screen.fields.len();
    for index in 0..field_count {
        render_field(screen, index, frame, chunks[1 + index]);
    }

    render_actions(screen, frame, chunks[1 + field_count]);
    render_output(screen, frame, chunks[2 + field_count]);
    render_status(app, screen, frame, chunks[3 + field_count]);
}

fn render_header(app: &AppState, screen: &FormScreen, frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::styled(
        screen.spec.title,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(user) = &app.session_user {
        spans.push(Span::styled(
            format!("  signed in as {user}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_field(screen: &FormScreen, index: usize, frame: &mut Frame, area: Rect) {
    let spec = &screen.spec.fields[index];
    let field = &screen.fields[index];
    let focused = screen.focus == Focus::Field(index);

    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(spec.label);

    let content = if field.text().is_empty() {
        Line::from(Span::styled(
            spec.placeholder,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(field.display())
    };
    let inner_width = area.width.saturating_sub(2);
    let cursor = field.cursor_column();
    let offset = horizontal_scroll(cursor, inner_width);
    frame.render_widget(
        Paragraph::new(content).block(block).scroll((0, offset)),
        area,
    );

    if focused {
        let col = (cursor - offset).min(inner_width.saturating_sub(1));
        frame.set_cursor_position((area.x + 1 + col, area.y + 1));
    }
}

/// Columns to skip so the cursor stays inside a field `width` columns wide.
fn horizontal_scroll(cursor: u16, width: u16) -> u16 {
    if width == 0 {
        return cursor;
    }
    cursor.saturating_add(1).saturating_sub(width)
}

fn render_actions(screen: &FormScreen, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    for (index, action) in screen.spec.actions.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if screen.focus == Focus::Action(index) {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        spans.push(Span::styled(
            format!("[F{} {}]", action.shortcut, action.label),
            style,
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_output(screen: &FormScreen, frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Result");
    frame.render_widget(
        Paragraph::new(screen.output.as_str())
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn render_status(app: &AppState, screen: &FormScreen, frame: &mut Frame, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = Vec::new();
    if screen.task.is_running() {
        let spinner =
            SPINNER_FRAMES[(app.spinner_frame / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len()];
        spans.push(Span::styled(
            format!("{spinner} working  "),
            Style::default().fg(Color::Yellow),
        ));
    }
    spans.push(Span::styled(app.backend_url.as_str(), dim));
    spans.push(Span::styled("  ", dim));
    spans.push(Span::styled(HELP_TEXT, dim));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
