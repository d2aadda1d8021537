//! Row and chrome styling.
//!
//! Record rows style each field on its own; the cursor row uses one uniform
//! highlight across the full width.

use ratatui::style::{Color, Modifier, Style};

/// Environment variable that turns colors off when set to any value.
pub const NO_COLOR_ENV: &str = "NO_COLOR";

/// Whether rows and chrome are drawn in color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Colors stay on unless `--no-color` was given or `NO_COLOR` is set,
    /// even to an empty string.
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        Self {
            enabled: !no_color_flag && std::env::var_os(NO_COLOR_ENV).is_none(),
        }
    }

    /// Colors on, independent of the environment.
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Colors off, independent of the environment.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// True when colored styles should be used.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== RowStyles =====

/// Styles for record rows, the title bar and the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowStyles {
    /// Uniform highlight for the cursor row.
    pub cursor: Style,
    /// Source name field.
    pub name: Style,
    /// Line number field.
    pub number: Style,
    /// Content field.
    pub content: Style,
    /// Truncation markers.
    pub marker: Style,
    /// Title bar below the viewport.
    pub title: Style,
    /// Informational status messages.
    pub status: Style,
    /// Error status messages.
    pub error: Style,
}

impl RowStyles {
    /// Build styles for the given color configuration.
    ///
    /// Without colors the cursor and title fall back to reverse video so the
    /// highlight stays visible.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                cursor: Style::default()
                    .fg(Color::White)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                name: Style::default().fg(Color::Blue),
                number: Style::default().fg(Color::Green),
                content: Style::default(),
                marker: Style::default().fg(Color::Magenta),
                title: Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
                status: Style::default().fg(Color::Green),
                error: Style::default().fg(Color::Red),
            }
        } else {
            Self {
                cursor: Style::default().add_modifier(Modifier::REVERSED),
                name: Style::default(),
                number: Style::default(),
                content: Style::default(),
                marker: Style::default(),
                title: Style::default().add_modifier(Modifier::REVERSED),
                status: Style::default(),
                error: Style::default(),
            }
        }
    }
}

impl Default for RowStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::enabled())
    }
}
