//! Domain model types (pure).

pub mod error;
pub mod key_action;
pub mod record;

// Re-export for convenience
pub use error::{AppError, SourceError};
pub use key_action::KeyAction;
pub use record::{Record, RecordStore};
