//! VT100 escape sequences used by the status header
//!
//! The terminal emulator itself lives outside this crate; these helpers
//! only build the byte sequences the header needs.

use core::fmt::{self, Write};

/// Save cursor position and attributes
pub const SAVE_CURSOR: &str = "\x1b7";

/// Restore cursor position and attributes
pub const RESTORE_CURSOR: &str = "\x1b8";

/// Highlight attribute for header lines (rendered as inverse on the LCD)
pub const HIGHLIGHT: &str = "\x1b[5m";

/// Reset all attributes
pub const RESET_ATTRIBUTES: &str = "\x1b[0m";

/// Write a cursor move to `row`/`col` (both 1-based)
pub fn move_to<W: Write>(out: &mut W, row: u16, col: u16) -> fmt::Result {
    write!(out, "\x1b[{};{}H", row, col)
}

/// Write the scroll region that pins the first `fixed_lines` rows
///
/// Rows `fixed_lines + 1 ..= rows` scroll; the header rows above never do.
pub fn scroll_region<W: Write>(out: &mut W, fixed_lines: u8, rows: u8) -> fmt::Result {
    write!(out, "\x1b[{};{}r", u16::from(fixed_lines) + 1, rows)
}
