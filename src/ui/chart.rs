//! Bar chart rendering for the active chart of a dashboard.

use ratatui::{
    layout::{Direction, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::BarChartModel;

/// `Bar` only takes integers; values are kept to two decimals.
const VALUE_SCALE: f64 = 100.0;

fn scaled(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        (value * VALUE_SCALE).round() as u64
    } else {
        0
    }
}

/// Render `chart`, or an empty panel when the slot holds none.
pub fn render(frame: &mut Frame, app: &App, chart: Option<&BarChartModel>, area: Rect) {
    let title = chart
        .map(|c| format!(" {} ({}) ", c.title, c.unit))
        .unwrap_or_else(|| " Chart ".to_string());

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let Some(chart) = chart.filter(|c| !c.is_empty()) else {
        let empty = Paragraph::new(Line::from(Span::styled(
            "  No data",
            Style::default().add_modifier(Modifier::DIM),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let bars: Vec<Bar> = chart
        .bars
        .iter()
        .map(|b| {
            let color = app.theme.status_color(b.tone);
            Bar::default()
                .label(Line::from(b.label.clone()))
                .value(scaled(b.value))
                .text_value(b.text.clone())
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(color).add_modifier(Modifier::REVERSED))
        })
        .collect();

    let widget = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .max(scaled(chart.max_value()).max(1))
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled() {
        assert_eq!(scaled(2.1), 210);
        assert_eq!(scaled(245.0), 24500);
        assert_eq!(scaled(0.0), 0);
        assert_eq!(scaled(-3.0), 0);
        assert_eq!(scaled(f64::NAN), 0);
    }
}
