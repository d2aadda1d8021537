//! View-state layer: offset/cursor bookkeeping over the record store.
//!
//! [`ViewState`] never stores the record count. Every operation takes the
//! current `total` from the store, so the view is always derived from it.
//!
//! Invariants after every completed navigation, when `total > 0`:
//!
//! - `offset <= total - 1`
//! - `offset <= cursor <= min(offset + height - 1, total - 1)`
//!
//! When `total == 0`, `offset == cursor == 0`.

pub mod navigation;

pub use navigation::{navigate, NavOutcome, NavRequest, Notice, Repaint};

/// Size of the record viewport, in rows and columns. Both are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    height: usize,
    width: usize,
}

impl Viewport {
    /// Create a viewport, clamping zero dimensions to 1.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height: height.max(1),
            width: width.max(1),
        }
    }

    /// Rows available for records.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Columns available for a record row.
    pub fn width(&self) -> usize {
        self.width
    }
}

/// Offset and cursor into the record store plus viewport geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    offset: usize,
    cursor: usize,
    viewport: Viewport,
}

impl ViewState {
    /// Fresh view at the top of the store.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            offset: 0,
            cursor: 0,
            viewport,
        }
    }

    /// Store index shown in the first viewport row.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Store index of the highlighted record.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current geometry.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Viewport rows.
    pub fn height(&self) -> usize {
        self.viewport.height
    }

    /// Viewport columns.
    pub fn width(&self) -> usize {
        self.viewport.width
    }

    /// True if store index `index` falls inside the viewport rows
    /// (regardless of whether a record exists there).
    pub fn is_visible(&self, index: usize) -> bool {
        index >= self.offset && index < self.offset + self.viewport.height
    }

    /// Viewport row that shows store index `index`, if visible.
    pub fn row_of(&self, index: usize) -> Option<usize> {
        self.is_visible(index).then(|| index - self.offset)
    }

    /// Store index rendered in viewport row `row`.
    pub fn index_of(&self, row: usize) -> usize {
        self.offset + row
    }

    /// Index of the last record on screen, `None` when the store is empty.
    pub fn last_visible(&self, total: usize) -> Option<usize> {
        (total > 0).then(|| (self.offset + self.viewport.height - 1).min(total - 1))
    }

    /// Check the documented invariants against `total`.
    pub fn is_consistent(&self, total: usize) -> bool {
        match self.last_visible(total) {
            None => self.offset == 0 && self.cursor == 0,
            Some(last) => {
                self.offset <= total - 1 && self.offset <= self.cursor && self.cursor <= last
            }
        }
    }

    pub(crate) fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor;
    }

    pub(crate) fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
    }

    pub(crate) fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}
