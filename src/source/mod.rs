//! Line source: the streaming producer and the reader that drains it.
//!
//! The producer is an external process whose stdout carries one result per
//! line. [`LineSource`] owns the process handle and pulls bounded batches so a
//! single event-loop iteration can never stall on huge result sets.

use crate::model::{RecordStore, SourceError};
use crate::parser::strip_terminator;
use crate::view::RecordFormat;
use std::io::{self, BufRead, BufReader};
use std::process::{Child, Command, Stdio};
use tracing::{debug, info, trace, warn};

pub mod command;

pub use command::search_command;

/// Lifecycle of the producer handle.
///
/// `Open → Draining → Closed` on a normal run, `Open|Draining → Failed` on a
/// read or allocation error. Both terminal states have released the pipe and
/// reaped the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProducerState {
    /// Spawned, nothing read yet.
    Open,
    /// At least one batch has been read; more output may follow.
    Draining,
    /// Stream exhausted or closed on request.
    Closed,
    /// Stopped by an error.
    Failed,
}

/// Outcome of one `poll_batch` call.
#[derive(Debug)]
pub enum BatchStatus {
    /// More output may follow.
    Continuing,
    /// The producer closed its stream; the handle has been torn down.
    EndOfStream,
    /// Reading or storing failed; the handle has been torn down and records
    /// appended before the failure are kept.
    Failed(SourceError),
}

/// Result of reading one bounded batch.
#[derive(Debug)]
pub struct Batch {
    /// Records appended to the store by this batch.
    pub appended: usize,
    /// Raw lines dropped as sentinel or malformed.
    pub skipped: usize,
    /// Whether the producer is still live.
    pub status: BatchStatus,
}

/// Reader over a producer's output stream.
pub struct LineSource {
    reader: Option<Box<dyn BufRead>>,
    child: Option<Child>,
    description: String,
    state: ProducerState,
}

impl std::fmt::Debug for LineSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineSource")
            .field("description", &self.description)
            .field("state", &self.state)
            .field("has_child", &self.child.is_some())
            .finish()
    }
}

impl LineSource {
    /// Run `shell_command` through `sh -c` with its stdout captured.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::SpawnFailed` if the process cannot be started.
    pub fn start(shell_command: &str) -> Result<Self, SourceError> {
        let mut command = Command::new("sh");
        command.arg("-c").arg(shell_command);
        Self::spawn_described(command, shell_command.to_string())
    }

    /// Spawn an arbitrary command as the producer.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::SpawnFailed` if the process cannot be started.
    #[cfg(test)]
    pub fn spawn(command: Command) -> Result<Self, SourceError> {
        let description = format!("{command:?}");
        Self::spawn_described(command, description)
    }

    fn spawn_described(mut command: Command, description: String) -> Result<Self, SourceError> {
        let mut child = command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SourceError::SpawnFailed {
                command: description.clone(),
                source,
            })?;

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(SourceError::SpawnFailed {
                command: description,
                source: io::Error::other("producer stdout was not captured"),
            });
        };

        info!(command = %description, pid = child.id(), "producer started");

        Ok(Self {
            reader: Some(Box::new(BufReader::new(stdout))),
            child: Some(child),
            description,
            state: ProducerState::Open,
        })
    }

    /// Wrap an already-open stream (no process to reap).
    pub fn from_reader(reader: impl BufRead + 'static) -> Self {
        Self {
            reader: Some(Box::new(reader)),
            child: None,
            description: "<reader>".to_string(),
            state: ProducerState::Open,
        }
    }

    /// Human-readable producer description (the shell command when spawned).
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ProducerState {
        self.state
    }

    /// True while more output may arrive.
    pub fn is_live(&self) -> bool {
        matches!(self.state, ProducerState::Open | ProducerState::Draining)
    }

    /// Read at most `max_lines` raw lines, parse them with `format` and append
    /// the results to `store` in the order received.
    ///
    /// Sentinel and malformed lines count against `max_lines` but are not
    /// appended. Blocks until `max_lines` lines have arrived or the stream
    /// ends. Once the source is closed every call returns `EndOfStream` with
    /// nothing appended.
    pub fn poll_batch<F>(&mut self, format: &F, store: &mut RecordStore, max_lines: usize) -> Batch
    where
        F: RecordFormat + ?Sized,
    {
        let mut batch = Batch {
            appended: 0,
            skipped: 0,
            status: BatchStatus::Continuing,
        };

        if !self.is_live() {
            batch.status = BatchStatus::EndOfStream;
            return batch;
        }
        self.state = ProducerState::Draining;

        let mut buf = Vec::new();
        let mut lines = 0;
        while lines < max_lines {
            buf.clear();
            match self.read_raw_line(&mut buf) {
                Ok(0) => {
                    self.finish(ProducerState::Closed);
                    batch.status = BatchStatus::EndOfStream;
                    return batch;
                }
                Ok(_) => {
                    lines += 1;
                    let text = String::from_utf8_lossy(&buf);
                    match format.read(strip_terminator(&text)) {
                        Ok(record) => {
                            if let Err(err) = store.push(record) {
                                warn!(error = %err, "record store could not grow");
                                self.finish(ProducerState::Failed);
                                batch.status = BatchStatus::Failed(err);
                                return batch;
                            }
                            batch.appended += 1;
                        }
                        Err(skip) => {
                            trace!(%skip, "dropped producer line");
                            batch.skipped += 1;
                        }
                    }
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => {
                    warn!(error = %err, command = %self.description, "producer read failed");
                    self.finish(ProducerState::Failed);
                    batch.status = BatchStatus::Failed(SourceError::ReadFailed(err));
                    return batch;
                }
            }
        }

        batch
    }

    /// Close the stream and reap the process, killing it if still running.
    pub fn close(&mut self) {
        if self.is_live() {
            self.finish(ProducerState::Closed);
        }
    }

    fn read_raw_line(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        match self.reader.as_mut() {
            Some(reader) => reader.read_until(b'\n', buf),
            None => Ok(0),
        }
    }

    fn finish(&mut self, state: ProducerState) {
        self.reader = None;
        self.state = state;

        let Some(mut child) = self.child.take() else {
            return;
        };
        // Still running means it may be searching without writing, so it
        // would never notice the closed pipe.
        if matches!(child.try_wait(), Ok(None)) {
            let _ = child.kill();
        }
        match child.wait() {
            Ok(status) => debug!(?status, "producer reaped"),
            Err(err) => warn!(error = %err, "failed to reap producer"),
        }
    }
}

impl Drop for LineSource {
    fn drop(&mut self) {
        self.close();
    }
}
