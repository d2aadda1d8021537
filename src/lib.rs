//! happygrep
//!
//! Interactive terminal browser for recursive grep results. Results stream in
//! from a `find | grep` producer while the user navigates them, and any result
//! can be opened in an external editor at its line.
//!
//! Pure core (`parser`, `view_state`, `model`) with an impure shell (`source`,
//! `session`, `view`, `editor`) around it.

pub mod config;
pub mod editor;
pub mod logging;
pub mod model;
pub mod parser;
pub mod session;
pub mod source;
pub mod view;
pub mod view_state;
