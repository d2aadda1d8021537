//! Record row renderer.
//!
//! A [`RecordFormat`] knows how to read one producer line into a [`Record`]
//! and how to lay a record out into one styled row. [`GrepFormat`] is the
//! `name:line:content` layout used for grep output.

use super::styles::RowStyles;
use super::surface::Surface;
use crate::model::{Record, RecordStore};
use crate::parser::{self, ParseSkip};
use crate::view_state::ViewState;
use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicode_width::UnicodeWidthChar;

/// Marker drawn where a field has been cut short.
pub const TRUNCATION_MARKER: char = '~';

/// Columns between the name field and the line number field.
pub const NAME_GAP: usize = 2;

/// Default width of the name field.
pub const DEFAULT_NAME_WIDTH: usize = 25;

/// Default width of the line number field.
pub const DEFAULT_NUMBER_WIDTH: usize = 9;

/// Default tab stop.
pub const DEFAULT_TAB_SIZE: usize = 8;

/// Read and layout capability for one kind of record.
pub trait RecordFormat {
    /// Parse one producer line (terminator already stripped).
    ///
    /// # Errors
    ///
    /// Returns the reason the line is not a record; callers drop it.
    fn read(&self, line: &str) -> Result<Record, ParseSkip>;

    /// Lay `record` out for a row `width` columns wide.
    fn layout(&self, record: &Record, is_cursor: bool, width: usize) -> Line<'static>;
}

/// Column layout for grep results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrepFormat {
    name_width: usize,
    number_width: usize,
    tab_size: usize,
    styles: RowStyles,
}

impl Default for GrepFormat {
    fn default() -> Self {
        Self::new(
            DEFAULT_NAME_WIDTH,
            DEFAULT_NUMBER_WIDTH,
            DEFAULT_TAB_SIZE,
            RowStyles::default(),
        )
    }
}

impl GrepFormat {
    /// Create a layout. Zero widths are raised to 1.
    pub fn new(name_width: usize, number_width: usize, tab_size: usize, styles: RowStyles) -> Self {
        Self {
            name_width: name_width.max(1),
            number_width: number_width.max(1),
            tab_size: tab_size.max(1),
            styles,
        }
    }

    /// Styles in use.
    pub fn styles(&self) -> &RowStyles {
        &self.styles
    }

    /// First column of the content field.
    pub fn content_column(&self) -> usize {
        self.name_width + NAME_GAP + self.number_width
    }
}

impl RecordFormat for GrepFormat {
    fn read(&self, line: &str) -> Result<Record, ParseSkip> {
        parser::parse_line(line)
    }

    fn layout(&self, record: &Record, is_cursor: bool, width: usize) -> Line<'static> {
        let styles = &self.styles;
        // The cursor row carries one style on the line; spans stay unstyled.
        let pick = |style: Style| if is_cursor { Style::default() } else { style };

        let mut spans = Vec::with_capacity(6);

        // Name
        let name_field = self.name_width + NAME_GAP;
        let used = if display_width(record.name()) > self.name_width {
            let tail = trailing_columns(record.name(), self.name_width);
            let used = 1 + display_width(tail);
            spans.push(Span::styled(TRUNCATION_MARKER.to_string(), pick(styles.marker)));
            spans.push(Span::styled(tail.to_string(), pick(styles.name)));
            used
        } else {
            spans.push(Span::styled(record.name().to_string(), pick(styles.name)));
            display_width(record.name())
        };
        spans.push(Span::raw(" ".repeat(name_field.saturating_sub(used).max(1))));

        // Line number
        let number = leading_columns(record.line_number(), self.number_width);
        let padding = self.number_width - display_width(number);
        spans.push(Span::styled(number.to_string(), pick(styles.number)));
        spans.push(Span::raw(" ".repeat(padding)));

        // Content
        let available = width.saturating_sub(self.content_column());
        let expanded = expand_tabs(record.content(), self.tab_size);
        if display_width(&expanded) > available {
            if available > 0 {
                let visible = leading_columns(&expanded, available - 1);
                spans.push(Span::styled(visible.to_string(), pick(styles.content)));
                spans.push(Span::styled(TRUNCATION_MARKER.to_string(), pick(styles.marker)));
            }
        } else {
            spans.push(Span::styled(expanded, pick(styles.content)));
        }

        let line = Line::from(spans);
        if is_cursor {
            line.style(styles.cursor)
        } else {
            line
        }
    }
}

/// Draw viewport `row` from `store`. Returns `false` and blanks the row when
/// no record maps to it.
pub fn render_row<F, S>(
    format: &F,
    surface: &mut S,
    view: &ViewState,
    store: &RecordStore,
    row: usize,
) -> bool
where
    F: RecordFormat + ?Sized,
    S: Surface + ?Sized,
{
    let index = view.index_of(row);
    match store.get(index) {
        Some(record) => {
            let line = format.layout(record, index == view.cursor(), surface.width());
            surface.put_line(row, &line);
            true
        }
        None => {
            surface.clear_row(row);
            false
        }
    }
}

/// Replace tabs with spaces up to the next multiple of `tab_size`, counting
/// columns from the start of `text`.
pub fn expand_tabs(text: &str, tab_size: usize) -> String {
    let tab_size = tab_size.max(1);
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for ch in text.chars() {
        if ch == '\t' {
            let pad = tab_size - column % tab_size;
            out.extend(std::iter::repeat_n(' ', pad));
            column += pad;
        } else {
            out.push(ch);
            column += ch.width().unwrap_or(0);
        }
    }
    out
}

fn display_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Longest prefix of `text` no wider than `columns`.
fn leading_columns(text: &str, columns: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        used += ch.width().unwrap_or(0);
        if used > columns {
            return &text[..idx];
        }
    }
    text
}

/// Longest suffix of `text` no wider than `columns`.
fn trailing_columns(text: &str, columns: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in text.char_indices().rev() {
        used += ch.width().unwrap_or(0);
        if used > columns {
            return &text[idx + ch.len_utf8()..];
        }
    }
    text
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
