//! Title bar and status line.
//!
//! The title bar sits directly under the viewport and describes the
//! highlighted record. The status line below it shows the most recent notable
//! event and is cleared on the next keypress unless something new was set.

use super::styles::RowStyles;
use crate::model::Record;
use ratatui::text::{Line, Span};

/// Program name shown at the left of the title bar.
pub const TITLE_TAG: &str = "[happygrep]";

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Progress or informational text.
    Info,
    /// Failure text.
    Error,
}

/// One-line status message holder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    message: Option<(StatusKind, String)>,
}

impl StatusLine {
    /// Empty status line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show an informational message.
    pub fn info(&mut self, text: impl Into<String>) {
        self.message = Some((StatusKind::Info, text.into()));
    }

    /// Show an error message.
    pub fn error(&mut self, text: impl Into<String>) {
        self.message = Some((StatusKind::Error, text.into()));
    }

    /// Drop the current message.
    pub fn clear(&mut self) {
        self.message = None;
    }

    /// Current message text, if any.
    pub fn text(&self) -> Option<&str> {
        self.message.as_ref().map(|(_, text)| text.as_str())
    }

    /// Current message severity, if any.
    #[cfg(test)]
    pub fn kind(&self) -> Option<StatusKind> {
        self.message.as_ref().map(|(kind, _)| *kind)
    }

    /// Styled line for the bottom row.
    pub fn line(&self, styles: &RowStyles) -> Line<'static> {
        match &self.message {
            Some((StatusKind::Info, text)) => Line::from(Span::styled(text.clone(), styles.status)),
            Some((StatusKind::Error, text)) => Line::from(Span::styled(text.clone(), styles.error)),
            None => Line::default(),
        }
    }
}

/// Title bar text: the highlighted file on the left, position on the right.
///
/// `selected` is the cursor record and its zero-based index; `None` when the
/// store is empty.
pub fn title_line(
    selected: Option<(usize, &Record)>,
    total: usize,
    width: usize,
    styles: &RowStyles,
) -> Line<'static> {
    let left = match selected {
        Some((_, record)) => format!("{TITLE_TAG} {}", record.name()),
        None => TITLE_TAG.to_string(),
    };
    let right = match selected {
        Some((index, _)) if total > 0 => {
            let line = index + 1;
            format!("line {line} of {total} ({}%)", line * 100 / total)
        }
        _ => String::new(),
    };

    let used = left.chars().count() + right.chars().count();
    let gap = width.saturating_sub(used).max(1);
    Line::from(format!("{left}{}{right}", " ".repeat(gap))).style(styles.title)
}
