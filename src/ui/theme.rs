//! Light and dark themes.
//!
//! The initial theme follows the terminal background; `t` toggles it.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::HealthStatus;

/// Color and style theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub is_light: bool,
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    pub warning: Color,
    pub critical: Color,
    pub healthy: Color,
    pub border: Color,
    /// Muted text: URLs, timestamps, placeholders.
    pub muted: Color,
    /// Banner shown over dashboards built from mock data.
    pub mock_banner: Style,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    pub tab_active: Style,
    pub tab_inactive: Style,
    pub border_type: BorderType,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            is_light: false,
            highlight: Color::Cyan,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::Gray,
            muted: Color::DarkGray,
            mock_banner: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    pub fn light() -> Self {
        Self {
            is_light: true,
            highlight: Color::Blue,
            warning: Color::Rgb(191, 125, 0),
            critical: Color::Red,
            healthy: Color::Rgb(0, 135, 62),
            border: Color::DarkGray,
            muted: Color::Gray,
            mock_banner: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(191, 125, 0))
                .add_modifier(Modifier::BOLD),
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// The opposite theme.
    pub fn toggled(&self) -> Self {
        if self.is_light {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Color for a health status
    pub fn status_color(&self, status: HealthStatus) -> Color {
        match status {
            HealthStatus::Healthy => self.healthy,
            HealthStatus::Warning => self.warning,
            HealthStatus::Critical => self.critical,
        }
    }

    /// Get style for a health status
    pub fn status_style(&self, status: HealthStatus) -> Style {
        let style = Style::default().fg(self.status_color(status));
        if status == HealthStatus::Critical {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        let dark = Theme::dark();
        let light = dark.toggled();
        assert!(light.is_light);
        assert_eq!(light.highlight, Theme::light().highlight);
        assert!(!light.toggled().is_light);
    }

    #[test]
    fn test_status_style() {
        let theme = Theme::dark();
        assert_eq!(theme.status_style(HealthStatus::Healthy).fg, Some(Color::Green));
        assert!(theme
            .status_style(HealthStatus::Critical)
            .add_modifier
            .contains(Modifier::BOLD));
    }
}
