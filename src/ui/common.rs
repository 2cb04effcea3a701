//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, overview block, status bar
//! and help overlay.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::duration::format_duration;
use crate::data::{Board, HealthStatus};
use crate::source::Origin;

use super::OVERVIEW_HEIGHT;

/// Render the header bar with both dashboards at a glance.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " STATUSBOARD ",
        Style::default().add_modifier(Modifier::BOLD),
    )];

    match app.services.board.as_ref() {
        Some(board) => {
            let s = &board.summary;
            let health = if s.online_count == s.total {
                HealthStatus::Healthy
            } else if s.online_count == 0 {
                HealthStatus::Critical
            } else {
                HealthStatus::Warning
            };
            spans.push(Span::raw("│ "));
            spans.push(Span::styled("● ", app.theme.status_style(health)));
            spans.push(Span::raw(format!("{} online ", board.online_label())));
        }
        None => spans.push(Span::raw("│ services loading... ")),
    }

    match app.backups.board.as_ref() {
        Some(board) => {
            let s = &board.summary;
            let health = if s.success_count == s.total {
                HealthStatus::Healthy
            } else {
                HealthStatus::Critical
            };
            spans.push(Span::raw("│ "));
            spans.push(Span::styled("● ", app.theme.status_style(health)));
            spans.push(Span::raw(format!(
                "{} backups ok, {} ",
                board.success_label(),
                board.summary.total_size()
            )));
        }
        None => spans.push(Span::raw("│ backups loading... ")),
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab bar showing available views.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![Line::from(" 1:Services "), Line::from(" 2:Backups ")];

    let selected = match app.current_view {
        View::Services => 0,
        View::Backups => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Split a dashboard area into overview, table and chart.
pub fn dashboard_layout(area: Rect) -> (Rect, Rect, Rect) {
    let [overview, body] =
        Layout::vertical([Constraint::Length(OVERVIEW_HEIGHT), Constraint::Min(5)]).areas(area);
    let [table, chart] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(body);
    (overview, table, chart)
}

/// Render the overview block of a dashboard.
///
/// `stats` are label/value pairs; boards built from mock data get a banner.
pub fn render_overview<B: Board>(
    frame: &mut Frame,
    app: &App,
    board: &B,
    stats: &[(&str, String)],
    area: Rect,
) {
    let mut spans = Vec::new();
    if board.origin() == Origin::Mock {
        spans.push(Span::styled(" MOCK DATA ", app.theme.mock_banner));
        spans.push(Span::raw(" "));
    }

    for (label, value) in stats {
        spans.push(Span::styled(format!("{}: ", label), Style::default().fg(app.theme.muted)));
        spans.push(Span::styled(value.clone(), Style::default().add_modifier(Modifier::BOLD)));
        spans.push(Span::raw("  │  "));
    }
    spans.push(Span::styled("Updated: ", Style::default().fg(app.theme.muted)));
    spans.push(Span::raw(board.updated().to_string()));

    let block = Block::default()
        .title(format!(" {} ", B::TITLE))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Placeholder shown before a dashboard's first snapshot arrives.
pub fn render_placeholder(frame: &mut Frame, app: &App, title: &str, error: Option<&str>, area: Rect) {
    let text = match error {
        Some(err) => Line::from(Span::styled(
            format!("  Failed to load: {}", err),
            app.theme.status_style(HealthStatus::Critical),
        )),
        None => Line::from(Span::styled(
            "  Loading...",
            Style::default().add_modifier(Modifier::DIM),
        )),
    };

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(vec![Line::from(""), text]).block(block), area);
}

/// Render the status bar at the bottom.
///
/// Shows: source, time since last load, refresh period, available controls.
/// Also displays temporary status messages and load errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let (last_loaded, period) = match app.current_view {
        View::Services => (
            app.services.board.as_ref().map(|b| b.last_loaded()),
            app.services.refresh_period(),
        ),
        View::Backups => (
            app.backups.board.as_ref().map(|b| b.last_loaded()),
            app.backups.refresh_period(),
        ),
    };

    let controls = "r:refresh Tab:switch Enter:detail t:theme ?:help q:quit";
    let source = app.source_description();

    let status = if let Some(err) = app.load_error() {
        format!(" {} | Error: {} | {}", source, err, controls)
    } else if let Some(loaded) = last_loaded {
        let every = period
            .map(|p| format!(" | every {}", format_duration(p)))
            .unwrap_or_default();
        format!(
            " {} | Loaded {} ago{} | {}",
            source,
            format_duration(loaded.elapsed()),
            every,
            controls
        )
    } else {
        format!(" {} | Loading... | q:quit", source)
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  1/2         Services / Backups"),
        Line::from("  Tab ←/→     Switch dashboard"),
        Line::from("  ↑/↓ j/k     Select card"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Card detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        section(" General"),
        Line::from("  r           Refresh now"),
        Line::from("  t           Toggle light/dark"),
        Line::from("  e           Export to JSON"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 20u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
