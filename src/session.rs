//! Search session: the record store, the view over it and the producer
//! feeding it.
//!
//! The session is the only owner of mutable viewer state. The event loop
//! hands it a [`Surface`] to draw on; it turns navigation outcomes into the
//! smallest set of row writes and shifts.

use crate::model::{Record, RecordStore, SourceError};
use crate::source::{Batch, LineSource};
use crate::view::renderer::{render_row, RecordFormat};
use crate::view::surface::Surface;
use crate::view_state::{navigate, NavRequest, Notice, Repaint, ViewState, Viewport};
use tracing::{debug, info};

/// One search session.
#[derive(Debug)]
pub struct Session<F> {
    format: F,
    store: RecordStore,
    view: ViewState,
    source: LineSource,
}

impl<F: RecordFormat> Session<F> {
    /// Session over an already-open source.
    pub fn new(format: F, source: LineSource, viewport: Viewport) -> Self {
        info!(producer = source.description(), "session started");
        Self {
            format,
            store: RecordStore::new(),
            view: ViewState::new(viewport),
            source,
        }
    }

    /// Spawn `command` and start a session over its output.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::SpawnFailed` if the producer cannot start.
    pub fn start(command: &str, format: F, viewport: Viewport) -> Result<Self, SourceError> {
        let source = LineSource::start(command)?;
        Ok(Self::new(format, source, viewport))
    }

    /// Discard all records and the producer, then start over with `command`.
    /// The viewport geometry is kept.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::SpawnFailed` if the new producer cannot start;
    /// the old session has already been torn down.
    pub fn restart<S>(&mut self, command: &str, surface: &mut S) -> Result<(), SourceError>
    where
        S: Surface + ?Sized,
    {
        self.close();
        self.store = RecordStore::new();
        self.view = ViewState::new(self.view.viewport());
        surface.clear();
        self.source = LineSource::start(command)?;
        info!(producer = command, "session restarted");
        Ok(())
    }

    /// Read one batch of at most `viewport_height` lines and draw the rows
    /// the new records landed on.
    pub fn fetch<S>(&mut self, surface: &mut S) -> Batch
    where
        S: Surface + ?Sized,
    {
        let before = self.store.len();
        let batch = self
            .source
            .poll_batch(&self.format, &mut self.store, self.view.height());

        for index in before..self.store.len() {
            let Some(row) = self.view.row_of(index) else {
                break;
            };
            render_row(&self.format, surface, &self.view, &self.store, row);
        }

        debug!(
            appended = batch.appended,
            skipped = batch.skipped,
            total = self.store.len(),
            "batch fetched"
        );
        batch
    }

    /// Apply a navigation request and update the surface accordingly.
    pub fn dispatch<S>(&mut self, request: NavRequest, surface: &mut S) -> Option<Notice>
    where
        S: Surface + ?Sized,
    {
        let outcome = navigate(&mut self.view, self.store.len(), request);
        self.apply(outcome.repaint, surface);
        outcome.notice
    }

    /// Clear the surface and draw every viewport row.
    pub fn redraw<S>(&self, surface: &mut S)
    where
        S: Surface + ?Sized,
    {
        surface.clear();
        for row in 0..self.view.height() {
            if !render_row(&self.format, surface, &self.view, &self.store, row) {
                break;
            }
        }
    }

    fn apply<S>(&self, repaint: Repaint, surface: &mut S)
    where
        S: Surface + ?Sized,
    {
        match repaint {
            Repaint::Nothing => {}
            Repaint::Rows(rows) => self.render_rows(&rows, surface),
            Repaint::Scroll { steps, rows } => {
                surface.shift(steps);
                self.render_rows(&rows, surface);
            }
            Repaint::Full => {
                if surface.height() != self.view.height() || surface.width() != self.view.width() {
                    surface.resize(self.view.height(), self.view.width());
                }
                self.redraw(surface);
            }
        }
    }

    fn render_rows<S>(&self, rows: &[usize], surface: &mut S)
    where
        S: Surface + ?Sized,
    {
        for &row in rows {
            render_row(&self.format, surface, &self.view, &self.store, row);
        }
    }

    /// The highlighted record and its index, `None` while the store is empty.
    pub fn selected(&self) -> Option<(usize, &Record)> {
        let cursor = self.view.cursor();
        self.store.get(cursor).map(|record| (cursor, record))
    }

    /// Records loaded so far.
    pub fn total(&self) -> usize {
        self.store.len()
    }

    /// Current view.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Loaded records.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Record format in use.
    pub fn format(&self) -> &F {
        &self.format
    }

    /// Producer description for messages.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// True while the producer may still deliver records.
    pub fn is_loading(&self) -> bool {
        self.source.is_live()
    }

    /// Stop the producer. Loaded records stay available.
    pub fn close(&mut self) {
        if self.source.is_live() {
            info!(total = self.store.len(), "closing producer");
        }
        self.source.close();
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
