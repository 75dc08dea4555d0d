// Theme system for the TUI
//
// Two built-in palettes switched at runtime. Each theme names the
// colors for the chrome plus the gauge's track and threshold zones.

use ratatui::style::{Color, Style};

use crate::gauge::GaugeZone;

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

impl ThemeKind {
    pub fn all() -> &'static [ThemeKind] {
        &[ThemeKind::Dark, ThemeKind::Light]
    }

    /// Get the next theme in the cycle
    pub fn next(self) -> Self {
        let themes = Self::all();
        let current = themes.iter().position(|&t| t == self).unwrap_or(0);
        themes[(current + 1) % themes.len()]
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
        }
    }

    /// Parse a theme name from config; unknown names fall back to Dark.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => ThemeKind::Light,
            _ => ThemeKind::Dark,
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme {
                border: Style::default().fg(Color::DarkGray),
                title: Style::default().fg(Color::Cyan),
                text: Style::default().fg(Color::White),
                dim: Style::default().fg(Color::DarkGray),
                error: Style::default().fg(Color::Red),
                track: Color::DarkGray,
                ok: Color::Green,
                warning: Color::Yellow,
                danger: Color::Red,
            },
            ThemeKind::Light => Theme {
                border: Style::default().fg(Color::Gray),
                title: Style::default().fg(Color::Blue),
                text: Style::default().fg(Color::Black),
                dim: Style::default().fg(Color::Gray),
                error: Style::default().fg(Color::LightRed),
                track: Color::Gray,
                ok: Color::Green,
                warning: Color::LightYellow,
                danger: Color::LightRed,
            },
        }
    }
}

/// Resolved colors for one theme
#[derive(Debug, Clone)]
pub struct Theme {
    pub border: Style,
    pub title: Style,
    pub text: Style,
    pub dim: Style,
    pub error: Style,
    /// Background arc of the gauge
    pub track: Color,
    pub ok: Color,
    pub warning: Color,
    pub danger: Color,
}

impl Theme {
    /// Color for the gauge's filled arc in the given zone.
    pub fn zone_color(&self, zone: GaugeZone) -> Color {
        match zone {
            GaugeZone::Ok => self.ok,
            GaugeZone::Warning => self.warning,
            GaugeZone::Danger => self.danger,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_cycle_wraps() {
        assert_eq!(ThemeKind::Dark.next(), ThemeKind::Light);
        assert_eq!(ThemeKind::Light.next(), ThemeKind::Dark);
    }

    #[test]
    fn unknown_name_falls_back_to_dark() {
        assert_eq!(ThemeKind::from_name("solarized"), ThemeKind::Dark);
        assert_eq!(ThemeKind::from_name("Light"), ThemeKind::Light);
    }

    #[test]
    fn zone_colors_map_to_thresholds() {
        let theme = ThemeKind::Dark.theme();
        assert_eq!(theme.zone_color(GaugeZone::Ok), Color::Green);
        assert_eq!(theme.zone_color(GaugeZone::Warning), Color::Yellow);
        assert_eq!(theme.zone_color(GaugeZone::Danger), Color::Red);
    }
}
