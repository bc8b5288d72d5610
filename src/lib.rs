//! termbuffer
//!
//! Interprets the raw output stream of a program running under a
//! pseudo-terminal into a structured screen model:
//!
//! - `core`: screen buffer, lines, cells, attributes, scrollback, snapshots
//! - `parser`: CSI recognition and dispatch, SGR interpretation
//! - `terminal`: byte-stream facade driving the buffer
//! - `config`: buffer configuration

pub mod config;
pub mod core;
pub mod parser;
pub mod terminal;

pub use crate::config::{Config, ConfigError};
pub use crate::core::{ScreenBuffer, Snapshot};
pub use crate::parser::{CsiError, TerminalHost};
pub use crate::terminal::Terminal;
