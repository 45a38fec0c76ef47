// Theme system for the TUI
//
// Runtime-switchable color themes ('t' cycles, config picks the start).
// Each theme defines colors for every UI element the gallery draws.

use ratatui::style::{Color, Modifier, Style};

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
    Nord,
}

impl ThemeKind {
    /// All available themes, in cycle order
    pub fn all() -> &'static [ThemeKind] {
        &[ThemeKind::Dark, ThemeKind::Light, ThemeKind::Nord]
    }

    /// Next theme in the cycle
    pub fn next(self) -> Self {
        let themes = Self::all();
        let current = themes.iter().position(|&t| t == self).unwrap_or(0);
        themes[(current + 1) % themes.len()]
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
            ThemeKind::Nord => "Nord",
        }
    }

    /// Look up a theme by its config-file name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// Get the theme palette
    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
            ThemeKind::Nord => Theme::nord(),
        }
    }
}

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub fg: Color,
    pub dim: Color,
    pub border: Color,

    // Title and status
    pub title: Color,
    pub status_bar: Color,

    // Card row colors
    pub author: Color,
    pub detail: Color,
    pub link: Color,

    // Spinner and page numbers
    pub accent: Color,

    // Failure banner
    pub error: Color,

    // Log levels
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
    pub log_trace: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            fg: Color::White,
            dim: Color::DarkGray,
            border: Color::Gray,

            title: Color::Cyan,
            status_bar: Color::Green,

            author: Color::White,
            detail: Color::Gray,
            link: Color::Blue,

            accent: Color::Cyan,
            error: Color::Red,

            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Blue,
            log_debug: Color::Gray,
            log_trace: Color::DarkGray,
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            fg: Color::Black,
            dim: Color::Gray,
            border: Color::DarkGray,

            title: Color::Blue,
            status_bar: Color::DarkGray,

            author: Color::Black,
            detail: Color::DarkGray,
            link: Color::Blue,

            accent: Color::Blue,
            error: Color::Red,

            log_error: Color::Red,
            log_warn: Color::Rgb(184, 134, 11), // Dark goldenrod
            log_info: Color::Blue,
            log_debug: Color::DarkGray,
            log_trace: Color::Gray,
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            fg: Color::Rgb(236, 239, 244),
            dim: Color::Rgb(76, 86, 106),
            border: Color::Rgb(76, 86, 106),

            title: Color::Rgb(136, 192, 208), // Frost
            status_bar: Color::Rgb(163, 190, 140), // Green

            author: Color::Rgb(236, 239, 244),
            detail: Color::Rgb(129, 161, 193), // Frost 2
            link: Color::Rgb(136, 192, 208),

            accent: Color::Rgb(136, 192, 208),
            error: Color::Rgb(191, 97, 106),

            log_error: Color::Rgb(191, 97, 106),
            log_warn: Color::Rgb(235, 203, 139),
            log_info: Color::Rgb(129, 161, 193),
            log_debug: Color::Rgb(76, 86, 106),
            log_trace: Color::Rgb(59, 66, 82),
        }
    }

    // Helper methods for creating styles

    /// Base style with theme foreground
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg)
    }

    /// Dim style for hints and secondary text
    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.dim)
    }

    /// Border style
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Title style
    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    /// Status bar style
    pub fn status_style(&self) -> Style {
        Style::default().fg(self.status_bar)
    }

    /// Card headline style (photographer credit)
    pub fn author_style(&self) -> Style {
        Style::default()
            .fg(self.author)
            .add_modifier(Modifier::BOLD)
    }

    /// Failure banner style
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_visits_every_theme() {
        let mut kind = ThemeKind::default();
        let mut seen = vec![kind];
        for _ in 1..ThemeKind::all().len() {
            kind = kind.next();
            seen.push(kind);
        }
        assert_eq!(seen, ThemeKind::all());
        assert_eq!(kind.next(), ThemeKind::Dark); // wraps
    }

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(ThemeKind::from_name("nord"), Some(ThemeKind::Nord));
        assert_eq!(ThemeKind::from_name("LIGHT"), Some(ThemeKind::Light));
        assert_eq!(ThemeKind::from_name("solarized"), None);
    }
}
