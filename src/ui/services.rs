//! Service uptime dashboard.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::{Board, ServiceBoard};

use super::{chart, common};

/// Render the Services view: overview, one row per service, response-time chart.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let dashboard = &app.services;
    let Some(board) = dashboard.board.as_ref() else {
        common::render_placeholder(frame, app, ServiceBoard::TITLE, dashboard.load_error.as_deref(), area);
        return;
    };

    let (overview, table_area, chart_area) = common::dashboard_layout(area);

    common::render_overview(
        frame,
        app,
        board,
        &[
            ("Online", board.online_label()),
            ("Avg response", board.avg_response_label()),
        ],
        overview,
    );

    let header = Row::new(vec![
        Cell::from("Service"),
        Cell::from("Status"),
        Cell::from("Response"),
        Cell::from("Checked"),
        Cell::from("URL"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = board
        .cards
        .iter()
        .map(|card| {
            let status_style = app.theme.status_style(card.health());
            Row::new(vec![
                Cell::from(format!("{} {}", card.icon, card.name)),
                Cell::from(format!("{} {}", card.health().symbol(), card.status_label()))
                    .style(status_style),
                Cell::from(card.response_label()),
                Cell::from(card.last_check.clone().unwrap_or_else(|| "-".to_string())),
                Cell::from(card.url.clone()).style(Style::default().fg(app.theme.muted)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2),
        Constraint::Length(10),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Fill(3),
    ];

    let title = format!(" Services ({}) ", board.cards.len());
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
