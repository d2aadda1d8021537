//! Terminal surface for the record viewport.
//!
//! The viewport is kept in a persistent cell grid rather than rebuilt every
//! frame. Navigation writes individual rows and shifts the grid in place, and
//! ratatui's frame diff then sends only the cells that actually changed.

use ratatui::{
    buffer::{Buffer, Cell},
    layout::{Position, Rect},
    text::Line,
    widgets::Widget,
};

/// Fixed-size character grid with row writes and a scroll-shift primitive.
pub trait Surface {
    /// Rows in the grid.
    fn height(&self) -> usize;

    /// Columns in the grid.
    fn width(&self) -> usize;

    /// Replace `row` with `line`, clipped to the grid width. The line style
    /// fills the whole row.
    fn put_line(&mut self, row: usize, line: &Line<'_>);

    /// Blank `row`.
    fn clear_row(&mut self, row: usize);

    /// Shift rows by `steps`: positive moves content up and blanks rows at
    /// the bottom, negative moves content down and blanks rows at the top.
    fn shift(&mut self, steps: isize);

    /// Change geometry. Content is discarded.
    fn resize(&mut self, height: usize, width: usize);

    /// Blank every row.
    fn clear(&mut self);
}

/// [`Surface`] backed by a ratatui [`Buffer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSurface {
    buffer: Buffer,
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

impl GridSurface {
    /// Empty grid of `height` rows by `width` columns.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            buffer: Buffer::empty(Rect::new(0, 0, to_u16(width), to_u16(height))),
        }
    }

    /// Underlying cell buffer.
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Symbols of `row` concatenated, trailing blanks included.
    pub fn row_text(&self, row: usize) -> String {
        let y = to_u16(row);
        (0..self.buffer.area.width)
            .filter_map(|x| self.buffer.cell(Position::new(x, y)))
            .map(Cell::symbol)
            .collect()
    }

    fn row_rect(&self, row: usize) -> Option<Rect> {
        (row < self.height()).then(|| Rect::new(0, to_u16(row), self.buffer.area.width, 1))
    }
}

impl Surface for GridSurface {
    fn height(&self) -> usize {
        usize::from(self.buffer.area.height)
    }

    fn width(&self) -> usize {
        usize::from(self.buffer.area.width)
    }

    fn put_line(&mut self, row: usize, line: &Line<'_>) {
        let Some(rect) = self.row_rect(row) else {
            return;
        };
        self.clear_row(row);
        self.buffer.set_style(rect, line.style);
        self.buffer.set_line(0, rect.y, line, rect.width);
    }

    fn clear_row(&mut self, row: usize) {
        let width = self.width();
        let start = row * width;
        if let Some(cells) = self.buffer.content.get_mut(start..start + width) {
            cells.iter_mut().for_each(|cell| {
                cell.reset();
            });
        }
    }

    fn shift(&mut self, steps: isize) {
        let height = self.height();
        let width = self.width();
        let moved = steps.unsigned_abs();
        if moved == 0 {
            return;
        }
        if moved >= height {
            self.clear();
            return;
        }

        let cells = &mut self.buffer.content;
        if steps > 0 {
            cells.rotate_left(moved * width);
            (height - moved..height).for_each(|row| self.clear_row(row));
        } else {
            cells.rotate_right(moved * width);
            (0..moved).for_each(|row| self.clear_row(row));
        }
    }

    fn resize(&mut self, height: usize, width: usize) {
        self.buffer = Buffer::empty(Rect::new(0, 0, to_u16(width), to_u16(height)));
    }

    fn clear(&mut self) {
        self.buffer.reset();
    }
}

impl Widget for &GridSurface {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = area.width.min(self.buffer.area.width);
        let height = area.height.min(self.buffer.area.height);
        for y in 0..height {
            for x in 0..width {
                let Some(cell) = self.buffer.cell(Position::new(x, y)) else {
                    continue;
                };
                if let Some(target) = buf.cell_mut(Position::new(area.x + x, area.y + y)) {
                    *target = cell.clone();
                }
            }
        }
    }
}
