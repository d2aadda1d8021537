//! Editor collaborator.
//!
//! Builds the editor command for the highlighted record and runs it through
//! the shell. The caller owns suspending and restoring the terminal.

use crate::model::Record;
use std::io;
use std::process::{Command, ExitStatus};
use tracing::info;

/// Placeholder replaced by the record's line number.
pub const LINE_PLACEHOLDER: &str = "{line}";

/// Placeholder replaced by the record's escaped path.
pub const FILE_PLACEHOLDER: &str = "{file}";

/// Default editor template.
pub const DEFAULT_EDITOR: &str = "vim +{line} {file}";

/// Shell command template with `{line}` and `{file}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    template: String,
}

impl Default for EditorCommand {
    fn default() -> Self {
        Self::new(DEFAULT_EDITOR)
    }
}

impl EditorCommand {
    /// Wrap a template.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Template as configured.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Shell command that opens `record` at its line.
    pub fn render(&self, record: &Record) -> String {
        self.template
            .replace(LINE_PLACEHOLDER, &escape_path(record.line_number()))
            .replace(FILE_PLACEHOLDER, &escape_path(record.name()))
    }

    /// Run the editor for `record` with the inherited terminal and wait for
    /// it. The exit status is only logged.
    ///
    /// # Errors
    ///
    /// Returns the spawn error if the shell itself could not be started.
    pub fn launch(&self, record: &Record) -> io::Result<ExitStatus> {
        let command = self.render(record);
        info!(%command, "launching editor");
        let status = Command::new("sh").arg("-c").arg(&command).status()?;
        info!(?status, "editor returned");
        Ok(status)
    }
}

/// Backslash-escape whitespace and shell metacharacters so the path reaches
/// the editor as one literal argument.
pub fn escape_path(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for ch in path.chars() {
        if ch.is_whitespace() || "\\'\"`$&;|<>()*?[]{}!#~".contains(ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
