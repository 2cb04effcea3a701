//! Detail overlay rendering.
//!
//! Displays a modal overlay with everything known about the selected card.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, View};
use crate::data::{BackupCard, HealthStatus, ServiceCard};
use crate::ui::Theme;

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 40;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 12;

fn field<'a>(theme: &Theme, label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" {:<13}", label), Style::default().fg(theme.muted)),
        Span::raw(value),
    ])
}

fn status_field<'a>(theme: &Theme, label: &'a str, health: HealthStatus, text: &str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" {:<13}", label), Style::default().fg(theme.muted)),
        Span::styled(
            format!("{} {}", health.symbol(), text),
            theme.status_style(health).add_modifier(Modifier::BOLD),
        ),
    ])
}

fn service_lines<'a>(theme: &Theme, card: &ServiceCard) -> (String, Vec<Line<'a>>) {
    let status = match card.status {
        Some(code) => format!("{} (HTTP {})", card.status_label(), code),
        None => format!("{} (no status)", card.status_label()),
    };

    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", card.description),
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        status_field(theme, "Status", card.health(), &status),
        field(theme, "Response", card.response_label()),
        field(theme, "Last check", card.last_check.clone().unwrap_or_else(|| "-".to_string())),
        field(theme, "URL", card.url.clone()),
    ];
    (format!("{} {}", card.icon, card.name), lines)
}

fn backup_lines<'a>(theme: &Theme, card: &BackupCard) -> (String, Vec<Line<'a>>) {
    let mut lines = vec![
        field(theme, "Database", card.database.clone()),
        Line::from(""),
        status_field(theme, "Status", card.health(), card.status_label()),
        field(theme, "Size", card.size.clone()),
        field(theme, "Duration", card.duration.clone()),
        field(theme, "Last backup", card.last_backup.clone().unwrap_or_else(|| "-".to_string())),
    ];
    if let Some(message) = &card.message {
        lines.push(Line::from(""));
        lines.push(field(theme, "Message", message.clone()));
    }
    (format!("{} {}", card.icon, card.project), lines)
}

/// Render the selected card as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let content = match app.current_view {
        View::Services => app.services.selected_card().map(|c| service_lines(&app.theme, c)),
        View::Backups => app.backups.selected_card().map(|c| backup_lines(&app.theme, c)),
    };
    let Some((title, lines)) = content else {
        return;
    };

    let overlay_width = (area.width * 80 / 100).clamp(MIN_OVERLAY_WIDTH, 80);
    let overlay_height = (area.height * 60 / 100).clamp(MIN_OVERLAY_HEIGHT, 16);
    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let [body, footer] =
        Layout::vertical([Constraint::Min(5), Constraint::Length(1)]).areas(overlay_area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        body,
    );

    let hint = Paragraph::new(Line::from(Span::styled(
        " ↑↓ next card · Esc close ",
        Style::default().add_modifier(Modifier::DIM),
    )));
    frame.render_widget(hint, footer);
}
