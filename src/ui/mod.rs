//! Terminal rendering.
//!
//! ```text
//! row 0   header (both dashboards at a glance)
//! row 1   tabs
//! row 2.. overview block │ cards table + chart
//! last    status bar
//! ```

pub mod backups;
pub mod chart;
pub mod common;
pub mod detail;
pub mod services;
pub mod theme;

use ratatui::layout::{Constraint, Layout, Rect};

pub use theme::Theme;

/// Height of the overview block at the top of a dashboard, borders included.
pub const OVERVIEW_HEIGHT: u16 = 3;

/// Split the screen into header, tabs, dashboard and status bar.
pub fn screen_layout(area: Rect) -> [Rect; 4] {
    Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Length(1), // Tabs
        Constraint::Min(8),    // Dashboard
        Constraint::Length(1), // Status bar
    ])
    .areas(area)
}

/// Where the cards table lands on a screen of size `area`.
pub fn table_area(area: Rect) -> Rect {
    let [_, _, content, _] = screen_layout(area);
    let (_, table, _) = common::dashboard_layout(content);
    table
}

/// Card rows a table drawn in `table` can show, after borders and header.
pub fn visible_rows(table: Rect) -> usize {
    usize::from(table.height.saturating_sub(3))
}

/// Index of the first card shown when `selected` must stay in view.
pub fn table_offset(selected: usize, visible: usize) -> usize {
    selected.saturating_sub(visible.saturating_sub(1))
}
