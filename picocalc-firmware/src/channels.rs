//! Shared state between tasks and the external terminal
//!
//! Only process-wide signals live here. The display context is built in
//! `main` and handed to tasks by reference.

use core::fmt;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::pipe::Pipe;
use picocalc_core::signal::ShutdownSignal;
use picocalc_core::timer::EditorState;

/// Bytes buffered for the terminal emulator
pub const TERMINAL_PIPE_SIZE: usize = 512;

/// Escape sequences headed for the terminal emulator
pub static TERMINAL_OUT: Pipe<CriticalSectionRawMutex, TERMINAL_PIPE_SIZE> = Pipe::new();

/// Set by the full-screen editor while it owns the screen
pub static EDITOR: EditorState = EditorState::new();

/// Never raised on hardware
pub static SHUTDOWN: ShutdownSignal = ShutdownSignal::new();

/// `fmt::Write` into [`TERMINAL_OUT`]
///
/// Fails instead of waiting when the pipe is full; the header simply tries
/// again on its next tick.
pub struct TerminalSink;

impl fmt::Write for TerminalSink {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut bytes = s.as_bytes();
        while !bytes.is_empty() {
            let written = TERMINAL_OUT.try_write(bytes).map_err(|_| fmt::Error)?;
            bytes = &bytes[written..];
        }
        Ok(())
    }
}
