//! Database backup dashboard.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::{BackupBoard, Board};

use super::{chart, common};

/// Render the Backups view: overview, one row per project, backup-size chart.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let dashboard = &app.backups;
    let Some(board) = dashboard.board.as_ref() else {
        common::render_placeholder(frame, app, BackupBoard::TITLE, dashboard.load_error.as_deref(), area);
        return;
    };

    let (overview, table_area, chart_area) = common::dashboard_layout(area);

    common::render_overview(
        frame,
        app,
        board,
        &[
            ("Successful", board.success_label()),
            ("Total size", board.summary.total_size()),
        ],
        overview,
    );

    let header = Row::new(vec![
        Cell::from("Project"),
        Cell::from("Database"),
        Cell::from("Status"),
        Cell::from("Size"),
        Cell::from("Took"),
        Cell::from("Last backup"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = board
        .cards
        .iter()
        .map(|card| {
            Row::new(vec![
                Cell::from(format!("{} {}", card.icon, card.project)),
                Cell::from(card.database.clone()).style(Style::default().fg(app.theme.muted)),
                Cell::from(format!("{} {}", card.health().symbol(), card.status_label()))
                    .style(app.theme.status_style(card.health())),
                Cell::from(card.size.clone()),
                Cell::from(card.duration.clone()),
                Cell::from(card.last_backup.clone().unwrap_or_else(|| "-".to_string())),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Length(10),
        Constraint::Length(7),
        Constraint::Length(6),
        Constraint::Length(21),
    ];

    let title = format!(" Backups ({}) ", board.cards.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default()
        .with_offset(super::table_offset(dashboard.selected, super::visible_rows(table_area)));
    if !board.cards.is_empty() {
        state.select(Some(dashboard.selected));
    }
    frame.render_stateful_widget(table, table_area, &mut state);

    chart::render(frame, app, dashboard.chart.active(), chart_area);
}
