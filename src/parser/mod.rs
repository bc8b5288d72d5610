//! Escape sequence interpretation
//!
//! `csi` recognizes control sequences and applies them to a host; `sgr`
//! interprets the graphic rendition codes of `CSI ... m`.

pub mod csi;
pub mod sgr;

pub use csi::{dispatch, is_incomplete, Command, CsiError, CsiSequence, TerminalHost};
