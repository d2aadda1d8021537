//! Navigation engine.
//!
//! Pure function from (view, total, request) to a new view plus a
//! [`Repaint`] plan. The plan tells the shell the cheapest way to bring the
//! screen up to date: redraw two rows, shift the viewport and fill the
//! exposed rows, or (on resize only) redraw everything.

use super::{ViewState, Viewport};
use std::fmt;
use tracing::debug;

/// Discrete movement requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavRequest {
    /// Cursor one record up.
    MoveUp,
    /// Cursor one record down.
    MoveDown,
    /// Cursor to the first visible row.
    MoveTop,
    /// Cursor to the last visible row.
    MoveBottom,
    /// Viewport forward one page; cursor to its first row.
    PageDown,
    /// Viewport back one page; cursor to its first row.
    PageUp,
    /// Terminal geometry changed.
    Resize {
        /// New viewport rows.
        height: usize,
        /// New viewport columns.
        width: usize,
    },
}

/// Boundary notices reported instead of moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Cursor is already on the first record.
    AtFirstLine,
    /// Cursor is already on the last record.
    AtLastLine,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::AtFirstLine => f.write_str("already at first line"),
            Notice::AtLastLine => f.write_str("already at last line"),
        }
    }
}

/// What the screen needs after a state change.
///
/// Row numbers are viewport rows under the *new* view state, sorted and
/// without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repaint {
    /// Nothing changed on screen.
    Nothing,
    /// Redraw these rows in place.
    Rows(Vec<usize>),
    /// Shift existing rows by `steps` (positive: content moves up, new rows
    /// appear at the bottom), then redraw `rows`.
    Scroll {
        /// Signed number of rows the offset moved.
        steps: isize,
        /// Exposed rows plus any row whose highlight changed.
        rows: Vec<usize>,
    },
    /// Clear and redraw every row.
    Full,
}

/// Result of one navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavOutcome {
    /// Screen update plan.
    pub repaint: Repaint,
    /// Boundary notice for the status line.
    pub notice: Option<Notice>,
}

impl NavOutcome {
    fn unchanged(notice: Option<Notice>) -> Self {
        Self {
            repaint: Repaint::Nothing,
            notice,
        }
    }

    fn repaint(repaint: Repaint) -> Self {
        Self {
            repaint,
            notice: None,
        }
    }
}

/// Apply `request` to `view` given `total` records in the store.
pub fn navigate(view: &mut ViewState, total: usize, request: NavRequest) -> NavOutcome {
    let outcome = match request {
        NavRequest::Resize { height, width } => {
            NavOutcome::repaint(resize(view, Viewport::new(height, width)))
        }
        _ if total == 0 => on_empty_store(request),
        NavRequest::MoveUp => {
            if view.cursor() == 0 {
                NavOutcome::unchanged(Some(Notice::AtFirstLine))
            } else {
                NavOutcome::repaint(step_to(view, total, view.cursor() - 1))
            }
        }
        NavRequest::MoveDown => {
            if view.cursor() + 1 >= total {
                NavOutcome::unchanged(Some(Notice::AtLastLine))
            } else {
                NavOutcome::repaint(step_to(view, total, view.cursor() + 1))
            }
        }
        // A jump of zero rows counts as both directions, so it can hit
        // either boundary notice.
        NavRequest::MoveTop => {
            let target = view.offset();
            if view.cursor() == 0 {
                NavOutcome::unchanged(Some(Notice::AtFirstLine))
            } else if view.cursor() == target && view.cursor() == total - 1 {
                NavOutcome::unchanged(Some(Notice::AtLastLine))
            } else if view.cursor() == target {
                NavOutcome::unchanged(None)
            } else {
                NavOutcome::repaint(step_to(view, total, target))
            }
        }
        NavRequest::MoveBottom => {
            let bottom_row = view.offset() + view.height() - 1;
            let target = bottom_row.min(total - 1);
            if view.cursor() == bottom_row && view.cursor() == 0 {
                NavOutcome::unchanged(Some(Notice::AtFirstLine))
            } else if view.cursor() == total - 1 {
                NavOutcome::unchanged(Some(Notice::AtLastLine))
            } else if view.cursor() == target {
                NavOutcome::unchanged(None)
            } else {
                NavOutcome::repaint(step_to(view, total, target))
            }
        }
        NavRequest::PageDown => {
            let target = (view.offset() + view.height()).min(total - 1);
            NavOutcome::repaint(page_to(view, total, target))
        }
        NavRequest::PageUp => {
            let target = view.offset().saturating_sub(view.height());
            NavOutcome::repaint(page_to(view, total, target))
        }
    };

    debug!(
        ?request,
        offset = view.offset(),
        cursor = view.cursor(),
        total,
        height = view.height(),
        repaint = ?outcome.repaint,
        "navigate"
    );
    debug_assert!(view.is_consistent(total), "view {view:?} total {total}");

    outcome
}

fn on_empty_store(request: NavRequest) -> NavOutcome {
    match request {
        NavRequest::MoveUp | NavRequest::MoveTop => NavOutcome::unchanged(Some(Notice::AtFirstLine)),
        NavRequest::MoveDown | NavRequest::MoveBottom => {
            NavOutcome::unchanged(Some(Notice::AtLastLine))
        }
        _ => NavOutcome::unchanged(None),
    }
}

/// Move the cursor to `target` (a valid index), scrolling only if it left
/// the viewport.
fn step_to(view: &mut ViewState, total: usize, target: usize) -> Repaint {
    let old = view.cursor();
    view.set_cursor(target);

    if view.is_visible(target) {
        return Repaint::Rows(sorted_rows(
            view.row_of(old).into_iter().chain(view.row_of(target)),
        ));
    }

    let new_offset = if target < view.offset() {
        target
    } else {
        (target + 1 - view.height()).min(total.saturating_sub(view.height()))
    };
    scroll_to(view, total, new_offset, old)
}

/// Move the viewport to `target` and put the cursor on its first row.
fn page_to(view: &mut ViewState, total: usize, target: usize) -> Repaint {
    let old = view.cursor();
    view.set_cursor(target);

    if target == view.offset() {
        return Repaint::Rows(sorted_rows(view.row_of(old).into_iter().chain([0])));
    }
    scroll_to(view, total, target, old)
}

/// Shift the viewport to `new_offset`, keep the cursor on screen, and list
/// the exposed rows plus the rows whose highlight changed.
fn scroll_to(view: &mut ViewState, total: usize, new_offset: usize, old_cursor: usize) -> Repaint {
    let steps = new_offset as isize - view.offset() as isize;
    view.set_offset(new_offset);

    let last = view.last_visible(total).unwrap_or(new_offset);
    let cursor = view.cursor().max(new_offset).min(last);
    view.set_cursor(cursor);

    let height = view.height();
    let shifted = steps.unsigned_abs().min(height);
    let exposed = if steps > 0 {
        height - shifted..height
    } else {
        0..shifted
    };

    let rows = exposed
        .chain(view.row_of(old_cursor))
        .chain(view.row_of(cursor));
    Repaint::Scroll {
        steps,
        rows: sorted_rows(rows),
    }
}

fn resize(view: &mut ViewState, viewport: Viewport) -> Repaint {
    view.set_viewport(viewport);
    let height = viewport.height();
    if view.cursor() >= view.offset() + height {
        view.set_offset(view.cursor() + 1 - height);
    }
    Repaint::Full
}

fn sorted_rows(rows: impl IntoIterator<Item = usize>) -> Vec<usize> {
    let mut rows: Vec<usize> = rows.into_iter().collect();
    rows.sort_unstable();
    rows.dedup();
    rows
}

#[cfg(test)]
#[path = "navigation_tests.rs"]
mod tests;
